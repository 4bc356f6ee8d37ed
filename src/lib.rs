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

//! Helpers for localizing desktop entries and preparing content.
//!
//! The main entry point is [`localize::localize_dir`], which expands
//! `.desktop.in` and `.directory.in` templates into desktop entry
//! files with a `Key[lang]=...` line for every language that has a
//! translation. Translations come from GNU Gettext `xx.po` files
//! listed in a `LINGUAS` file.
//!
//! The [`content`] module converts an export from the app store CMS
//! into the on-disk content layout.

pub mod catalog;
pub mod config;
pub mod content;
pub mod context;
pub mod linguas;
pub mod localize;

pub use catalog::TranslationIndex;
pub use config::LocalizeConfig;
pub use context::{context_for, Category};
pub use localize::{localize_dir, localize_file, rewrite_line, template_files, Summary};
