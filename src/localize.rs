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

//! Expanding desktop entry templates into localized desktop entries.
//!
//! A template is a desktop entry where translatable keys are marked
//! with a leading underscore:
//!
//! ```text
//! [Desktop Entry]
//! _Name=Photo Editor
//! Exec=photos
//! ```
//!
//! Every marked line is replaced by the untranslated line and one
//! `Key[lang]=...` line per language with a translation:
//!
//! ```text
//! [Desktop Entry]
//! Name=Photo Editor
//! Name[es]=Editor de Fotos
//! Exec=photos
//! ```

use crate::catalog::TranslationIndex;
use crate::config::LocalizeConfig;
use crate::context::{context_for, Category};
use crate::linguas::load_languages;
use anyhow::{anyhow, Context};
use std::fs;
use std::path::{Path, PathBuf};

/// A line of a template.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    /// A line which is copied unchanged to the output.
    Verbatim(&'a str),
    /// A `key=value` line to localize, without the leading underscore.
    Localizable(&'a str),
}

/// Classify a template line.
///
/// # Examples
///
/// ```
/// use desktop_i18n_helpers::localize::{classify, Line};
///
/// assert_eq!(classify("_Name=Photos"), Line::Localizable("Name=Photos"));
/// assert_eq!(classify("Exec=photos"), Line::Verbatim("Exec=photos"));
/// assert_eq!(classify(""), Line::Verbatim(""));
/// ```
pub fn classify(line: &str) -> Line<'_> {
    match line.strip_prefix('_') {
        Some(entry) => Line::Localizable(entry),
        None => Line::Verbatim(line),
    }
}

/// Outcome of looking up a translation for one language.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Lookup<'a> {
    /// The key is not translated for this kind of entry.
    NoContext,
    /// The catalog has no translation, or the translation is empty.
    Missing,
    /// A usable translation.
    Found(&'a str),
}

/// Look up the translation of `value`, the value of `key` in a
/// `category` entry, for the language `lang`.
pub fn lookup<'a>(
    index: &'a TranslationIndex,
    category: Category,
    key: &str,
    value: &str,
    lang: &str,
) -> Lookup<'a> {
    let Some(msgctxt) = context_for(category, key) else {
        return Lookup::NoContext;
    };
    match index.lookup(lang, value, msgctxt) {
        Some(translation) if !translation.is_empty() => Lookup::Found(translation),
        _ => Lookup::Missing,
    }
}

/// Rewrite a single template line into one or more output lines.
///
/// Verbatim lines are returned unchanged. A localizable line yields
/// the line without its underscore, followed by the translations in
/// the order of [`TranslationIndex::languages`]. Languages without a
/// usable translation are skipped.
///
/// It is an error for a localizable line to have no `=`.
pub fn rewrite_line(
    line: &str,
    category: Category,
    index: &TranslationIndex,
) -> anyhow::Result<Vec<String>> {
    let entry = match classify(line) {
        Line::Verbatim(line) => return Ok(vec![String::from(line)]),
        Line::Localizable(entry) => entry,
    };
    let (key, value) = entry
        .split_once('=')
        .ok_or_else(|| anyhow!("Missing '=' in localized entry {line:?}"))?;

    let mut lines = vec![String::from(entry)];
    for lang in index.languages() {
        match lookup(index, category, key, value, lang) {
            Lookup::Found(translation) => lines.push(format!("{key}[{lang}]={translation}")),
            Lookup::NoContext => {
                tracing::trace!("No context for {key} in {category:?} entries");
            }
            Lookup::Missing => {
                tracing::trace!("No {lang} translation for {key}={value}");
            }
        }
    }
    Ok(lines)
}

/// Localize the full text of a template.
///
/// Returns the output text and the number of translated lines it
/// contains. Every output line ends with a newline.
fn localize_text(
    text: &str,
    category: Category,
    index: &TranslationIndex,
) -> anyhow::Result<(String, usize)> {
    let mut output = String::with_capacity(text.len());
    let mut translations = 0;
    for (idx, line) in text.lines().enumerate() {
        let lines = rewrite_line(line, category, index)
            .with_context(|| format!("Could not localize line {}", idx + 1))?;
        translations += lines.len() - 1;
        for line in lines {
            output.push_str(&line);
            output.push('\n');
        }
    }
    Ok((output, translations))
}

/// Name of the localized file for the template `name`.
///
/// The template suffix is the last three characters, as in `.in`.
fn output_name(name: &str) -> Option<&str> {
    let (cut, _) = name.char_indices().rev().nth(2)?;
    Some(&name[..cut]).filter(|name| !name.is_empty())
}

/// List the templates in `dir`, sorted by file name.
///
/// Files are templates if [`LocalizeConfig::is_template`] says so.
/// Directories and files with non-UTF-8 names are skipped.
pub fn template_files(dir: &Path, config: &LocalizeConfig) -> anyhow::Result<Vec<PathBuf>> {
    let mut templates = Vec::new();
    let entries =
        fs::read_dir(dir).with_context(|| format!("Could not read {}", dir.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("Could not read {}", dir.display()))?;
        let path = entry.path();
        let Some(name) = entry.file_name().to_str().map(String::from) else {
            continue;
        };
        if !path.is_file() {
            continue;
        }
        if config.is_template(&name) {
            templates.push(path);
        } else if config.exclude.is_match(&name) {
            tracing::debug!("Skipping already localized {}", path.display());
        }
    }
    templates.sort();
    Ok(templates)
}

/// The result of localizing one template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizedFile {
    /// The desktop entry which was written.
    pub output: PathBuf,
    /// Number of `Key[lang]=...` lines in the output.
    pub translations: usize,
}

/// Localize the template at `path`.
///
/// The output is written next to the template, overwriting any
/// existing file, and the template is then removed.
pub fn localize_file(path: &Path, index: &TranslationIndex) -> anyhow::Result<LocalizedFile> {
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| anyhow!("Invalid template name {}", path.display()))?;
    let output = output_name(name)
        .map(|name| path.with_file_name(name))
        .ok_or_else(|| anyhow!("Template name {name:?} is too short"))?;
    let category = Category::from_file_name(name);

    let text = fs::read_to_string(path)
        .with_context(|| format!("Could not read {}", path.display()))?;
    let (localized, translations) = localize_text(&text, category, index)
        .with_context(|| format!("Could not localize {}", path.display()))?;
    fs::write(&output, localized)
        .with_context(|| format!("Could not write {}", output.display()))?;
    fs::remove_file(path).with_context(|| format!("Could not remove {}", path.display()))?;

    Ok(LocalizedFile {
        output,
        translations,
    })
}

/// Totals for a localized directory.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Summary {
    /// The files written, in processing order.
    pub files: Vec<PathBuf>,
    /// Number of `Key[lang]=...` lines written to all files.
    pub translations: usize,
}

/// Localize every template in `dir`.
///
/// The languages and catalogs are loaded once from the locations in
/// `config`. Processing stops at the first error: templates handled
/// before the error stay localized and removed.
pub fn localize_dir(dir: &Path, config: &LocalizeConfig) -> anyhow::Result<Summary> {
    let languages = load_languages(&config.linguas)?;
    let index = TranslationIndex::load(&config.po_dir, &languages)?;
    tracing::debug!("Loaded catalogs for {} languages", languages.len());

    let mut summary = Summary::default();
    for template in template_files(dir, config)? {
        let localized = localize_file(&template, &index)?;
        tracing::info!(
            "Wrote {} with {} translations",
            localized.output.display(),
            localized.translations
        );
        summary.translations += localized.translations;
        summary.files.push(localized.output);
    }
    Ok(summary)
}
