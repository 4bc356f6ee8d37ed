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

//! Conversion of an app store CMS export into the content layout.
//!
//! The CMS produces a zip archive, `appstore.zip`, which does not
//! match the layout expected by the app store. The archive is
//! unpacked into a staging directory and the individual files are
//! then copied to `content/Default`. CMS locales like `es-gt` are
//! replaced by plain languages (`es`) and by personalities
//! (`Guatemala`) on the way.
//!
//! Images are copied as they are: screenshots are not resized to
//! their display width and link images are not cropped to squares.
//! Recompressing and resizing them is left to a later step of the
//! content pipeline.

use anyhow::{anyhow, bail, Context};
use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

/// Name of the archive downloaded from the CMS.
pub const ARCHIVE: &str = "appstore.zip";

/// Directory where the archive is unpacked.
pub const STAGING_DIR: &str = "unzipped";

/// Directory receiving the converted content.
pub const CONTENT_DIR: &str = "content/Default";

/// A locale used by the CMS and what it stands for in the content.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CmsLocale {
    /// Locale as written by the CMS.
    pub locale: &'static str,
    /// Language used in the content. `C` is the English fallback.
    pub language: &'static str,
    /// Personality whose links come from this locale.
    pub personality: &'static str,
}

/// The locales exported by the CMS.
pub const LOCALES: [CmsLocale; 3] = [
    CmsLocale {
        locale: "en-us",
        language: "C",
        personality: "default",
    },
    CmsLocale {
        locale: "es-gt",
        language: "es",
        personality: "Guatemala",
    },
    CmsLocale {
        locale: "pt-br",
        language: "pt",
        personality: "Brazil",
    },
];

/// Paths used while converting an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLayout {
    /// The zip archive exported by the CMS.
    pub archive: PathBuf,
    /// Where the archive is unpacked.
    pub staging: PathBuf,
    /// Where the converted content is written.
    pub content: PathBuf,
}

impl ContentLayout {
    /// The default layout below `root`.
    pub fn new(root: &Path) -> Self {
        Self {
            archive: root.join(ARCHIVE),
            staging: root.join(STAGING_DIR),
            content: root.join(CONTENT_DIR),
        }
    }
}

/// Remove the staging and content directories left by an earlier run.
pub fn reset(layout: &ContentLayout) -> anyhow::Result<()> {
    for dir in [&layout.staging, &layout.content] {
        match fs::remove_dir_all(dir) {
            Ok(()) => tracing::debug!("Removed {}", dir.display()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => {
                return Err(err).with_context(|| format!("Could not remove {}", dir.display()))
            }
        }
    }
    Ok(())
}

/// Unpack `archive` into `dest` and return the number of files.
///
/// Entries with absolute paths or paths leaving `dest` are rejected.
pub fn extract_archive(archive: &Path, dest: &Path) -> anyhow::Result<usize> {
    let file =
        File::open(archive).with_context(|| format!("Could not open {}", archive.display()))?;
    let mut zip = zip::ZipArchive::new(BufReader::new(file))
        .with_context(|| format!("Could not read {} as zip archive", archive.display()))?;

    let mut count = 0;
    for idx in 0..zip.len() {
        let mut entry = zip.by_index(idx)?;
        let relative = entry
            .enclosed_name()
            .ok_or_else(|| anyhow!("Refusing to extract {:?}", entry.name()))?;
        let path = dest.join(relative);
        if entry.is_dir() {
            fs::create_dir_all(&path)
                .with_context(|| format!("Could not create {}", path.display()))?;
            continue;
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Could not create {}", parent.display()))?;
        }
        let mut output =
            File::create(&path).with_context(|| format!("Could not create {}", path.display()))?;
        io::copy(&mut entry, &mut output)
            .with_context(|| format!("Could not extract {}", path.display()))?;
        count += 1;
    }
    Ok(count)
}

/// Replace CMS locales by languages in the JSON `text`.
///
/// Only quoted strings which are exactly a CMS locale are replaced,
/// be they object keys or values. Everything else, including the
/// formatting and the spelling of numbers, is kept byte for byte.
///
/// # Examples
///
/// ```
/// use desktop_i18n_helpers::content::rewrite_locales;
///
/// assert_eq!(
///     rewrite_locales(r#"{"es-gt": {"title": "Fotos", "locale": "es-gt"}}"#),
///     r#"{"es": {"title": "Fotos", "locale": "es"}}"#,
/// );
/// ```
pub fn rewrite_locales(text: &str) -> String {
    let mut text = String::from(text);
    for locale in &LOCALES {
        let from = format!("\"{}\"", locale.locale);
        let to = format!("\"{}\"", locale.language);
        text = text.replace(&from, &to);
    }
    text
}

fn create_dir(dir: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("Could not create {}", dir.display()))
}

fn copy_file(source: &Path, target: &Path) -> anyhow::Result<()> {
    fs::copy(source, target).with_context(|| {
        format!(
            "Could not copy {} to {}",
            source.display(),
            target.display()
        )
    })?;
    Ok(())
}

/// Copy the files directly in `source` to `target`.
fn copy_files(source: &Path, target: &Path) -> anyhow::Result<usize> {
    let entries =
        fs::read_dir(source).with_context(|| format!("Could not read {}", source.display()))?;
    create_dir(target)?;
    let mut count = 0;
    for entry in entries {
        let entry = entry.with_context(|| format!("Could not read {}", source.display()))?;
        let path = entry.path();
        if !path.is_file() {
            tracing::debug!("Skipping {}", path.display());
            continue;
        }
        copy_file(&path, &target.join(entry.file_name()))?;
        count += 1;
    }
    Ok(count)
}

fn convert_app_json(source: &Path, target: &Path) -> anyhow::Result<()> {
    let text = fs::read_to_string(source)
        .with_context(|| format!("Could not read {}", source.display()))?;
    serde_json::from_str::<serde_json::Value>(&text)
        .with_context(|| format!("Could not parse {} as JSON", source.display()))?;
    if let Some(parent) = target.parent() {
        create_dir(parent)?;
    }
    fs::write(target, rewrite_locales(&text))
        .with_context(|| format!("Could not write {}", target.display()))
}

/// Number of files handled by each step of a conversion.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    /// Number of files unpacked from the archive.
    pub extracted: usize,
    /// Files written to the content directory, per step.
    pub steps: Vec<(String, usize)>,
}

impl ConversionReport {
    fn record(&mut self, step: impl Into<String>, count: usize) {
        let step = step.into();
        tracing::info!("{step}: {count} files");
        self.steps.push((step, count));
    }

    /// Number of files written to the content directory.
    pub fn total(&self) -> usize {
        self.steps.iter().map(|(_, count)| count).sum()
    }
}

/// Convert the CMS export described by `layout`.
///
/// Any previous staging and content directories are removed first.
/// Images are copied unchanged.
pub fn convert(layout: &ContentLayout) -> anyhow::Result<ConversionReport> {
    if !layout.archive.is_file() {
        bail!("Missing CMS export {}", layout.archive.display());
    }
    let mut report = ConversionReport::default();
    reset(layout)?;
    report.extracted = extract_archive(&layout.archive, &layout.staging)?;
    tracing::info!("Extracted {} files", report.extracted);

    let apps = layout.staging.join("apps");
    let content_apps = layout.content.join("apps");
    let resources = content_apps.join("resources");

    convert_app_json(&apps.join("content.json"), &content_apps.join("content.json"))
        .context("Converting app metadata")?;
    report.record("apps", 1);

    report.record(
        "thumbnails",
        copy_files(&apps.join("thumbs"), &resources.join("thumbnails"))?,
    );
    report.record(
        "images",
        copy_files(&apps.join("featured"), &resources.join("images"))?,
    );
    for locale in &LOCALES {
        let count = copy_files(
            &apps.join("screenshots").join(locale.locale),
            &resources.join("screenshots").join(locale.language),
        )?;
        report.record(format!("screenshots/{}", locale.language), count);
    }
    report.record(
        "splash",
        copy_files(&apps.join("splash"), &resources.join("splash"))?,
    );

    let links = layout.staging.join("links");
    let content_links = layout.content.join("links");
    create_dir(&content_links)?;
    for locale in &LOCALES {
        copy_file(
            &links.join(format!("{}.json", locale.locale)),
            &content_links.join(format!("{}.json", locale.personality)),
        )?;
    }
    report.record("links", LOCALES.len());
    report.record(
        "link images",
        copy_files(&links.join("images"), &content_links.join("images"))?,
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn create_archive(path: &Path, files: &[(&str, &str)]) -> anyhow::Result<()> {
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        let mut zip = zip::ZipWriter::new(File::create(path)?);
        for (name, contents) in files {
            zip.start_file(*name, options)?;
            zip.write_all(contents.as_bytes())?;
        }
        zip.finish()?;
        Ok(())
    }

    fn cms_export() -> Vec<(&'static str, &'static str)> {
        vec![
            (
                "apps/content.json",
                r#"[{"application-id": "photos", "es-gt": {"title": "Fotos"}, "locale": "pt-br"}]"#,
            ),
            ("apps/thumbs/photos.jpg", "thumb"),
            ("apps/featured/photos.jpg", "featured"),
            ("apps/screenshots/en-us/photos-1.jpg", "en 1"),
            ("apps/screenshots/es-gt/photos-1.jpg", "es 1"),
            ("apps/screenshots/es-gt/photos-2.jpg", "es 2"),
            ("apps/screenshots/pt-br/photos-1.jpg", "pt 1"),
            ("apps/splash/photos.jpg", "splash"),
            ("links/en-us.json", "[\"en\"]"),
            ("links/es-gt.json", "[\"es\"]"),
            ("links/pt-br.json", "[\"pt\"]"),
            ("links/images/news.png", "news"),
        ]
    }

    #[test]
    fn test_rewrite_locales_keys_and_values() {
        assert_eq!(
            rewrite_locales(
                r#"{"en-us": ["en-us", "es-gt", "pt-br"], "pt-br": {"locale": "pt-br"}}"#
            ),
            r#"{"C": ["C", "es", "pt"], "pt": {"locale": "pt"}}"#
        );
    }

    #[test]
    fn test_rewrite_locales_exact_match_only() {
        let text = r#"["es-gt-2", "see es-gt", "ES-GT", 42, null]"#;
        assert_eq!(rewrite_locales(text), text);
    }

    #[test]
    fn test_rewrite_locales_keeps_numbers_and_layout() {
        assert_eq!(
            rewrite_locales(
                "{\"id\": 12345678901234567890123,\n  \"size\": 1e3,\n  \"ratio\": 0.10,\n  \"es-gt\": \"x\"}"
            ),
            "{\"id\": 12345678901234567890123,\n  \"size\": 1e3,\n  \"ratio\": 0.10,\n  \"es\": \"x\"}"
        );
    }

    #[test]
    fn test_extract_archive() -> anyhow::Result<()> {
        let tmpdir = tempfile::tempdir()?;
        let archive = tmpdir.path().join("export.zip");
        create_archive(&archive, &[("a.txt", "a"), ("nested/b.txt", "b")])?;

        let dest = tmpdir.path().join("out");
        assert_eq!(extract_archive(&archive, &dest)?, 2);
        assert_eq!(fs::read_to_string(dest.join("a.txt"))?, "a");
        assert_eq!(fs::read_to_string(dest.join("nested/b.txt"))?, "b");
        Ok(())
    }

    #[test]
    fn test_extract_archive_rejects_parent_paths() -> anyhow::Result<()> {
        let tmpdir = tempfile::tempdir()?;
        let archive = tmpdir.path().join("export.zip");
        create_archive(&archive, &[("../evil.txt", "evil")])?;

        let dest = tmpdir.path().join("out");
        assert!(extract_archive(&archive, &dest).is_err());
        assert!(!tmpdir.path().join("evil.txt").exists());
        Ok(())
    }

    #[test]
    fn test_reset_missing_directories() -> anyhow::Result<()> {
        let tmpdir = tempfile::tempdir()?;
        reset(&ContentLayout::new(tmpdir.path()))?;
        Ok(())
    }

    #[test]
    fn test_convert() -> anyhow::Result<()> {
        let tmpdir = tempfile::tempdir()?;
        let layout = ContentLayout::new(tmpdir.path());
        create_archive(&layout.archive, &cms_export())?;
        // Leftovers from an earlier run are removed.
        fs::create_dir_all(layout.content.join("obsolete"))?;

        let report = convert(&layout)?;
        assert_eq!(report.extracted, 12);
        assert_eq!(report.total(), 12);
        assert!(!layout.content.join("obsolete").exists());

        let content = &layout.content;
        assert_eq!(
            fs::read_to_string(content.join("apps/content.json"))?,
            r#"[{"application-id": "photos", "es": {"title": "Fotos"}, "locale": "pt"}]"#
        );
        for (path, contents) in [
            ("apps/resources/thumbnails/photos.jpg", "thumb"),
            ("apps/resources/images/photos.jpg", "featured"),
            ("apps/resources/screenshots/C/photos-1.jpg", "en 1"),
            ("apps/resources/screenshots/es/photos-1.jpg", "es 1"),
            ("apps/resources/screenshots/es/photos-2.jpg", "es 2"),
            ("apps/resources/screenshots/pt/photos-1.jpg", "pt 1"),
            ("apps/resources/splash/photos.jpg", "splash"),
            ("links/default.json", "[\"en\"]"),
            ("links/Guatemala.json", "[\"es\"]"),
            ("links/Brazil.json", "[\"pt\"]"),
            ("links/images/news.png", "news"),
        ] {
            assert_eq!(fs::read_to_string(content.join(path))?, contents, "{path}");
        }
        Ok(())
    }

    #[test]
    fn test_convert_missing_archive() -> anyhow::Result<()> {
        let tmpdir = tempfile::tempdir()?;
        assert!(convert(&ContentLayout::new(tmpdir.path())).is_err());
        Ok(())
    }

    #[test]
    fn test_convert_missing_screenshots() -> anyhow::Result<()> {
        let tmpdir = tempfile::tempdir()?;
        let layout = ContentLayout::new(tmpdir.path());
        let files = cms_export()
            .into_iter()
            .filter(|(name, _)| !name.starts_with("apps/screenshots/pt-br"))
            .collect::<Vec<_>>();
        create_archive(&layout.archive, &files)?;

        assert!(convert(&layout).is_err());
        Ok(())
    }
}
