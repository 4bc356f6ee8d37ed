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

//! Settings for localizing a directory of templates.

use anyhow::Context;
use regex::Regex;
use std::path::PathBuf;

/// Pattern matching desktop entries which are already localized.
///
/// These are outputs like `com.endlessm.photos.es_GT.desktop` and must
/// not be processed again.
pub const DEFAULT_EXCLUDE_PATTERN: &str = r"^com\.endlessm\..+\.[a-z]{2,3}_?[A-Z]{0,2}\.desktop$";

/// Where to find translations and which files to localize.
#[derive(Debug, Clone)]
pub struct LocalizeConfig {
    /// Directory with one `<lang>.po` file per language.
    pub po_dir: PathBuf,
    /// File listing the languages to localize into.
    pub linguas: PathBuf,
    /// A file is a template if its name contains one of these.
    pub template_markers: Vec<String>,
    /// File names matching this are skipped even if they contain a
    /// template marker.
    pub exclude: Regex,
}

impl Default for LocalizeConfig {
    fn default() -> Self {
        let po_dir = PathBuf::from("po");
        Self {
            linguas: po_dir.join("LINGUAS"),
            po_dir,
            template_markers: vec![String::from("desktop.in"), String::from("directory.in")],
            exclude: Regex::new(DEFAULT_EXCLUDE_PATTERN).expect("well-formed regex"),
        }
    }
}

impl LocalizeConfig {
    /// Replace the pattern of already localized files.
    pub fn with_exclude_pattern(mut self, pattern: &str) -> anyhow::Result<Self> {
        self.exclude = Regex::new(pattern)
            .with_context(|| format!("Invalid exclude pattern {pattern:?}"))?;
        Ok(self)
    }

    /// Use `po_dir` for catalogs and `po_dir/LINGUAS` for the languages.
    pub fn with_po_dir(mut self, po_dir: impl Into<PathBuf>) -> Self {
        self.po_dir = po_dir.into();
        self.linguas = self.po_dir.join("LINGUAS");
        self
    }

    /// Should the file called `name` be localized?
    pub fn is_template(&self, name: &str) -> bool {
        self.template_markers
            .iter()
            .any(|marker| name.contains(marker.as_str()))
            && !self.exclude.is_match(name)
    }
}
