//! CLI for the AML audio manifest localizer.

use anyhow::Result;
use aml_core::config::{self, LocalizeConfig};
use aml_core::localize;
use clap::Parser;
use std::path::PathBuf;

/// One-shot batch job: download every clip referenced by the manifest into
/// the local cache and rewrite its URLs to local routes. Paths come from
/// `~/.config/aml/config.toml`; flags override individual fields for a run.
#[derive(Debug, Parser)]
#[command(name = "aml")]
#[command(about = "AML: localize an audio clip manifest into a local cache", long_about = None)]
pub struct Cli {
    /// Input manifest of remote clip URLs.
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Output manifest with rewritten URLs.
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Directory where downloaded clips are cached.
    #[arg(long, value_name = "DIR")]
    pub audio_dir: Option<PathBuf>,

    /// Route prefix for rewritten URLs (e.g. "/imposter_audio/").
    #[arg(long, value_name = "PREFIX")]
    pub route_prefix: Option<String>,

    /// Per-request timeout in seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

impl Cli {
    fn apply_overrides(self, cfg: &mut LocalizeConfig) {
        if let Some(input) = self.input {
            cfg.input_manifest = input;
        }
        if let Some(output) = self.output {
            cfg.output_manifest = output;
        }
        if let Some(audio_dir) = self.audio_dir {
            cfg.audio_dir = audio_dir;
        }
        if let Some(route_prefix) = self.route_prefix {
            cfg.route_prefix = route_prefix;
        }
        if let Some(timeout) = self.timeout {
            cfg.timeout_secs = timeout;
        }
    }
}

pub fn run_from_args() -> Result<()> {
    let cli = Cli::parse();
    let mut cfg = config::load_or_init()?;
    tracing::debug!("loaded config: {:?}", cfg);
    cli.apply_overrides(&mut cfg);

    let report = localize::run(&cfg)?;
    println!(
        "Finished: {} downloaded, {} already cached, {} failed (kept remote URL); manifest saved to {}",
        report.downloaded,
        report.cache_hits,
        report.failed,
        cfg.output_manifest.display()
    );
    Ok(())
}
