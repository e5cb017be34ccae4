//! The localization pipeline.
//!
//! Walks the manifest category by category, item by item, downloading every
//! referenced clip into the cache directory and rewriting its URL to the
//! local route. A failed download keeps the original remote URL and never
//! aborts the run; the cache files double as resumption markers, so a
//! re-run only fetches what is still missing.

use anyhow::{Context, Result};
use std::fs;
use std::time::Duration;

use crate::config::LocalizeConfig;
use crate::fetch::{self, CacheOutcome};
use crate::filename;
use crate::manifest::{AudioItem, Manifest, Mirror};

/// Per-run counters for the operator summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocalizeReport {
    pub downloaded: usize,
    pub cache_hits: usize,
    pub failed: usize,
}

/// Runs the full pipeline: load manifest, ensure the cache directory,
/// localize every URL, write the output manifest.
pub fn run(cfg: &LocalizeConfig) -> Result<LocalizeReport> {
    let manifest = Manifest::load(&cfg.input_manifest)?;

    fs::create_dir_all(&cfg.audio_dir)
        .with_context(|| format!("create audio dir {}", cfg.audio_dir.display()))?;

    let (localized, report) = localize_manifest(&manifest, cfg);

    if let Some(parent) = cfg.output_manifest.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create output dir {}", parent.display()))?;
        }
    }
    localized.save(&cfg.output_manifest)?;

    tracing::info!(
        downloaded = report.downloaded,
        cache_hits = report.cache_hits,
        failed = report.failed,
        "manifest localized to {}",
        cfg.output_manifest.display()
    );
    Ok(report)
}

/// Localizes every item and mirror URL, preserving category and item order.
pub fn localize_manifest(
    manifest: &Manifest,
    cfg: &LocalizeConfig,
) -> (Manifest, LocalizeReport) {
    let timeout = Duration::from_secs(cfg.timeout_secs);
    let mut report = LocalizeReport::default();

    let mut categories = Vec::with_capacity(manifest.categories.len());
    for (name, items) in &manifest.categories {
        tracing::info!("processing category: {}", name);
        let mut rewritten = Vec::with_capacity(items.len());
        for item in items {
            rewritten.push(localize_item(item, cfg, timeout, &mut report));
        }
        categories.push((name.clone(), rewritten));
    }

    (Manifest { categories }, report)
}

fn localize_item(
    item: &AudioItem,
    cfg: &LocalizeConfig,
    timeout: Duration,
    report: &mut LocalizeReport,
) -> AudioItem {
    AudioItem {
        text: item.text.clone(),
        url: localize_url(&item.url, cfg, timeout, report),
        mirrors: item
            .mirrors
            .iter()
            .map(|mirror| Mirror {
                text: mirror.text.clone(),
                url: localize_url(&mirror.url, cfg, timeout, report),
            })
            .collect(),
    }
}

/// Resolves one URL to its local route, or returns it unchanged on failure.
fn localize_url(
    url: &str,
    cfg: &LocalizeConfig,
    timeout: Duration,
    report: &mut LocalizeReport,
) -> String {
    let name = filename::derive_filename(url);
    let dest = cfg.audio_dir.join(&name);
    match fetch::fetch_and_cache(url, &dest, timeout) {
        Ok(CacheOutcome::Hit) => {
            report.cache_hits += 1;
            route_url(&cfg.route_prefix, &name)
        }
        Ok(CacheOutcome::Downloaded) => {
            report.downloaded += 1;
            tracing::info!("downloaded {} -> {}", url, dest.display());
            route_url(&cfg.route_prefix, &name)
        }
        Err(err) => {
            report.failed += 1;
            tracing::warn!("failed to download {}: {}", url, err);
            url.to_string()
        }
    }
}

fn route_url(prefix: &str, name: &str) -> String {
    if prefix.ends_with('/') {
        format!("{prefix}{name}")
    } else {
        format!("{prefix}/{name}")
    }
}
