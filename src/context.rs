// Copyright 2023 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Message contexts for desktop entry keys.
//!
//! The same source text can be used with different meanings, for
//! example "Photo Editor" as the name of an application and as the
//! comment describing it. Translators see each use as a separate
//! message with its own `msgctxt`.

/// Marker found in the name of folder templates.
pub const DIRECTORY_MARKER: &str = "directory.in";

/// Prefix of link templates.
pub const LINK_PREFIX: &str = "eos-link-";

/// The kind of desktop entry described by a template.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Category {
    /// An ordinary application launcher.
    Application,
    /// A launcher for a web link.
    Link,
    /// A folder in the desktop shell.
    Folder,
}

impl Category {
    /// Determine the category from the name of a template file.
    ///
    /// # Examples
    ///
    /// ```
    /// use desktop_i18n_helpers::Category;
    ///
    /// assert_eq!(Category::from_file_name("games.directory.in"), Category::Folder);
    /// assert_eq!(Category::from_file_name("eos-link-news.desktop.in"), Category::Link);
    /// assert_eq!(Category::from_file_name("photos.desktop.in"), Category::Application);
    /// ```
    pub fn from_file_name(name: &str) -> Self {
        if name.contains(DIRECTORY_MARKER) {
            Category::Folder
        } else if name.starts_with(LINK_PREFIX) {
            Category::Link
        } else {
            Category::Application
        }
    }
}

/// Find the `msgctxt` used to translate `key` in a `category` entry.
///
/// Returns `None` when the key is not translated for this kind of
/// entry.
pub fn context_for(category: Category, key: &str) -> Option<&'static str> {
    match (category, key) {
        (Category::Application, "Name") => Some("title"),
        (Category::Application, "Comment") => Some("subtitle"),
        (Category::Folder, "Name") => Some("folderName"),
        _ => None,
    }
}
