//! Named bundles of run cases described in a TOML file
//!
//! A bundle groups the cases that belong to one experiment so they can
//! be re-run with a single command:
//!
//! ```toml
//! [[bundle.sample]]
//! map = "data/sample/map.txt"
//! queries = "data/sample/queries.txt"
//! output = "results/sample.txt"
//!
//! [[bundle.sample]]
//! map = "data/sample/map.txt"
//! queries = "data/sample/rush_hour.txt"
//! ```
//!
//! Paths are resolved relative to the TOML file, so a bundle moves with
//! the data it points at.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::Args;
use itertools::Itertools;
use serde::Deserialize;
use tracing::info;

use crate::run;

#[derive(Deserialize, Debug, Default)]
struct BundleFile {
    #[serde(default)]
    bundle: BTreeMap<String, Vec<Case>>,
}

#[derive(Deserialize, Debug)]
struct Case {
    map: PathBuf,
    queries: PathBuf,
    output: Option<PathBuf>,
    geojson: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct BundleArgs {
    /// TOML file describing the bundles
    #[arg(long, default_value = "bundles.toml")]
    pub file: PathBuf,
    /// Bundle to run
    pub name: String,
}

pub fn run_bundle(args: &BundleArgs) -> Result<()> {
    let text = fs::read_to_string(&args.file)
        .with_context(|| format!("reading {}", args.file.display()))?;
    let bundles: BundleFile =
        toml::from_str(&text).with_context(|| format!("parsing {}", args.file.display()))?;

    let cases = bundles.bundle.get(&args.name).ok_or_else(|| {
        anyhow!(
            "no bundle named '{}' in {}; available: {}",
            args.name,
            args.file.display(),
            bundles.bundle.keys().join(", ")
        )
    })?;

    // Paths in the file are relative to the file itself
    let base = args.file.parent().unwrap_or(Path::new("."));
    for (position, case) in cases.iter().enumerate() {
        info!(
            "Bundle '{}': case {} of {}",
            args.name,
            position + 1,
            cases.len()
        );
        let output = case.output.as_ref().map(|path| base.join(path));
        let geojson = case.geojson.as_ref().map(|path| base.join(path));
        run::run_case(
            &base.join(&case.map),
            &base.join(&case.queries),
            output.as_deref(),
            geojson.as_deref(),
        )?;
    }

    Ok(())
}
