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

//! Convert an app store export from the CMS.
//!
//! Download the export from the CMS as `appstore.zip` and run this
//! program in the same directory. The export is unpacked to
//! `unzipped/` and converted into `content/Default/`, replacing any
//! earlier conversion.

use anyhow::Context;
use clap::Parser;
use desktop_i18n_helpers::content::{convert, ContentLayout};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Debug, Parser)]
struct Args {
    /// Directory containing `appstore.zip`.
    #[arg(long, default_value = ".")]
    root: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let layout = ContentLayout::new(&args.root);
    let report = convert(&layout)
        .with_context(|| format!("Could not convert {}", layout.archive.display()))?;
    tracing::info!(
        "Wrote {} files to {}",
        report.total(),
        layout.content.display()
    );

    Ok(())
}
