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

//! Reading the list of languages from a `LINGUAS` file.

use anyhow::Context;
use std::fs;
use std::path::Path;

/// Parse the contents of a `LINGUAS` file.
///
/// Languages are separated by whitespace, usually one per line. A
/// `#` starts a comment which runs to the end of the line. The order
/// of the languages is kept since it decides the order of the
/// localized lines in the output. Repeated languages are only
/// returned once.
///
/// # Examples
///
/// ```
/// use desktop_i18n_helpers::linguas::parse_languages;
///
/// assert_eq!(
///     parse_languages("# Keep sorted\nes\nfr pt_BR\n\n"),
///     vec!["es", "fr", "pt_BR"],
/// );
/// ```
pub fn parse_languages(text: &str) -> Vec<String> {
    let mut languages: Vec<String> = Vec::new();
    for line in text.lines() {
        let line = match line.split_once('#') {
            Some((before, _)) => before,
            None => line,
        };
        for lang in line.split_whitespace() {
            if !languages.iter().any(|l| l == lang) {
                languages.push(String::from(lang));
            }
        }
    }
    languages
}

/// Load the languages listed in the `LINGUAS` file at `path`.
pub fn load_languages(path: &Path) -> anyhow::Result<Vec<String>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Could not read language list {}", path.display()))?;
    Ok(parse_languages(&text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_languages_one_per_line() {
        assert_eq!(parse_languages("es\nfr\npt\n"), vec!["es", "fr", "pt"]);
    }

    #[test]
    fn test_parse_languages_keeps_order() {
        assert_eq!(parse_languages("pt\nes\nar"), vec!["pt", "es", "ar"]);
    }

    #[test]
    fn test_parse_languages_skips_blank_lines() {
        assert_eq!(parse_languages("\n\nes\n\n  \nfr\n"), vec!["es", "fr"]);
    }

    #[test]
    fn test_parse_languages_comments() {
        assert_eq!(
            parse_languages(
                "# Please keep this list sorted.\n\
                 es # Spanish\n\
                 #fr\n\
                 pt_BR\n"
            ),
            vec!["es", "pt_BR"]
        );
    }

    #[test]
    fn test_parse_languages_crlf() {
        assert_eq!(parse_languages("es\r\nfr\r\n"), vec!["es", "fr"]);
    }

    #[test]
    fn test_parse_languages_duplicates() {
        assert_eq!(parse_languages("es\nfr\nes\n"), vec!["es", "fr"]);
    }

    #[test]
    fn test_load_languages() -> anyhow::Result<()> {
        let tmpdir = tempfile::tempdir()?;
        let path = tmpdir.path().join("LINGUAS");
        fs::write(&path, "es\nfr\n")?;
        assert_eq!(load_languages(&path)?, vec!["es", "fr"]);
        Ok(())
    }

    #[test]
    fn test_load_languages_missing_file() -> anyhow::Result<()> {
        let tmpdir = tempfile::tempdir()?;
        assert!(load_languages(&tmpdir.path().join("LINGUAS")).is_err());
        Ok(())
    }
}
