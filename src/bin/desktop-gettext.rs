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

//! `gettext` for desktop entries
//!
//! This program expands `.desktop.in` and `.directory.in` templates
//! in a directory into desktop entries with a localized line for
//! every language listed in `po/LINGUAS`. The translations come from
//! GNU Gettext `po/xx.po` files. Each template is removed once its
//! desktop entry has been written.

use clap::Parser;
use desktop_i18n_helpers::{localize_dir, LocalizeConfig};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Debug, Parser)]
struct Args {
    /// Directory containing the templates.
    dir: PathBuf,
    /// Directory with the `LINGUAS` file and one `.po` file per language.
    #[arg(long, default_value = "po")]
    po_dir: PathBuf,
    /// File listing the languages, instead of `<po-dir>/LINGUAS`.
    #[arg(long)]
    linguas: Option<PathBuf>,
    /// Regular expression matching file names which are already localized.
    #[arg(long)]
    exclude_pattern: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut config = LocalizeConfig::default().with_po_dir(args.po_dir);
    if let Some(linguas) = args.linguas {
        config.linguas = linguas;
    }
    if let Some(pattern) = &args.exclude_pattern {
        config = config.with_exclude_pattern(pattern)?;
    }

    let summary = localize_dir(&args.dir, &config)?;
    tracing::info!(
        "Localized {} files with {} translations",
        summary.files.len(),
        summary.translations
    );

    Ok(())
}
