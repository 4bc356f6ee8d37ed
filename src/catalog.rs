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

//! Translation catalogs indexed by language, context and message.

use anyhow::{anyhow, bail, Context};
use polib::catalog::Catalog;
use polib::po_file;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Header fields `polib` needs to read a catalog.
const REQUIRED_HEADER_FIELDS: [&str; 8] = [
    "Project-Id-Version",
    "POT-Creation-Date",
    "PO-Revision-Date",
    "Language-Team",
    "Language",
    "MIME-Version",
    "Content-Transfer-Encoding",
    "Plural-Forms",
];

/// The `msgstr` of the header entry, the first entry of a PO file.
///
/// Returns `None` if the file does not start with a header entry.
fn po_header(text: &str) -> Option<String> {
    let mut lines = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'));
    if lines.next()? != r#"msgid """# {
        return None;
    }
    let first = lines.next()?.strip_prefix("msgstr ")?;
    let mut header = String::new();
    for line in std::iter::once(first).chain(lines.take_while(|line| line.starts_with('"'))) {
        let line = line.strip_prefix('"').and_then(|line| line.strip_suffix('"'))?;
        header.push_str(line);
    }
    Some(header)
}

/// Check that the header of a PO file has every field `polib` needs.
fn check_header(text: &str) -> anyhow::Result<()> {
    let Some(header) = po_header(text) else {
        bail!("Missing header entry");
    };
    let fields = header
        .split("\\n")
        .filter_map(|line| line.split_once(':'))
        .map(|(name, _)| name.trim())
        .collect::<Vec<_>>();
    let missing = REQUIRED_HEADER_FIELDS
        .iter()
        .copied()
        .filter(|field| !fields.contains(field))
        .collect::<Vec<_>>();
    if !missing.is_empty() {
        bail!("Missing header fields: {}", missing.join(", "));
    }
    Ok(())
}

/// Messages of one catalog, grouped by `msgctxt` and then by `msgid`.
///
/// Messages without a context are stored under the empty string.
type Messages = HashMap<String, HashMap<String, String>>;

/// Translations for a list of languages.
///
/// The index is built once per run and then only read. Lookups are
/// exact: the same `msgid` used with two different contexts can have
/// two different translations.
#[derive(Debug, Default)]
pub struct TranslationIndex {
    languages: Vec<String>,
    catalogs: HashMap<String, Messages>,
}

impl TranslationIndex {
    /// Load `<po_dir>/<lang>.po` for every language in `languages`.
    ///
    /// Every language must have a catalog: a missing or broken PO
    /// file is an error.
    pub fn load(po_dir: &Path, languages: &[String]) -> anyhow::Result<Self> {
        let mut catalogs = Vec::with_capacity(languages.len());
        for lang in languages {
            let path = po_dir.join(format!("{lang}.po"));
            if !path.exists() {
                return Err(anyhow!("Missing catalog {} for {lang}", path.display()));
            }
            let text = fs::read_to_string(&path)
                .with_context(|| format!("Could not read {}", path.display()))?;
            check_header(&text)
                .with_context(|| format!("Could not parse {:?} as PO file", path))?;
            let catalog = po_file::parse(&path)
                .map_err(|err| anyhow!("{err}"))
                .with_context(|| format!("Could not parse {:?} as PO file", path))?;
            catalogs.push((lang.clone(), catalog));
        }
        Ok(Self::from_catalogs(catalogs))
    }

    /// Build an index from already parsed catalogs.
    ///
    /// The order of `catalogs` is the order of [`Self::languages`].
    /// Plural messages are skipped since desktop entries have no
    /// plural forms. Fuzzy messages are used like any other.
    pub fn from_catalogs<I>(catalogs: I) -> Self
    where
        I: IntoIterator<Item = (String, Catalog)>,
    {
        let mut index = Self::default();
        for (lang, catalog) in catalogs {
            let mut messages = Messages::new();
            for msg in catalog.messages() {
                if msg.is_plural() {
                    continue;
                }
                let Ok(msgstr) = msg.msgstr() else {
                    continue;
                };
                messages
                    .entry(String::from(msg.msgctxt()))
                    .or_default()
                    .insert(String::from(msg.msgid()), String::from(msgstr));
            }
            tracing::debug!("Indexed {} contexts for {lang}", messages.len());
            if !index.languages.contains(&lang) {
                index.languages.push(lang.clone());
            }
            index.catalogs.insert(lang, messages);
        }
        index
    }

    /// The indexed languages, in the order they were given.
    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    /// Find the translation of `msgid` in the context `msgctxt`.
    ///
    /// The translation is returned as found, even if it is empty.
    pub fn lookup(&self, lang: &str, msgid: &str, msgctxt: &str) -> Option<&str> {
        self.catalogs
            .get(lang)?
            .get(msgctxt)?
            .get(msgid)
            .map(String::as_str)
    }
}
