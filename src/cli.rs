//! Command line arguments.

use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;
use crate::downloader::Downloader;
use crate::error::{Error, Result};

#[derive(Parser, Debug)]
#[clap(about, version, author)]
pub struct Args {
  /// Comma-separated list of mod ids to download
  #[clap(long)]
  pub mod_ids: Option<String>,

  /// Directory to save downloaded mods [default: mods]
  #[clap(long)]
  pub output_dir: Option<PathBuf>,

  /// TOML file with lookup_url, cdn_url, user_agent and output_dir
  #[clap(long, env = "CFLOOKUP_DL_CONFIG")]
  pub config: Option<PathBuf>,

  /// Lookup page template, {mod_id} is replaced with each id
  #[clap(long)]
  pub lookup_url: Option<String>,

  /// CDN template with {prefix}, {rest} and {filename} placeholders
  #[clap(long)]
  pub cdn_url: Option<String>,

  /// Only print the download links
  #[clap(long)]
  pub dry_run: bool,

  /// Enable debug logging
  #[clap(long)]
  pub debug: bool,
}

impl Args {
  /// Requested ids in order, without blanks or repeats.
  pub fn mod_ids(&self) -> Vec<String> {
    self.mod_ids.as_deref().map(parse_mod_ids).unwrap_or_default()
  }

  /// Defaults, then the config file, then flags.
  pub fn build_config(&self) -> Result<Config> {
    let mut config = match &self.config {
      Some(path) => Config::load(path)?,
      None => Config::default(),
    };

    if let Some(dir) = &self.output_dir {
      config.output_dir = dir.clone();
    }
    if let Some(lookup_url) = &self.lookup_url {
      config.lookup_url = lookup_url.clone();
    }
    if let Some(cdn_url) = &self.cdn_url {
      config.cdn_url = cdn_url.clone();
    }

    config.validate()?;
    Ok(config)
  }
}

pub fn parse_mod_ids(raw: &str) -> Vec<String> {
  let mut ids: Vec<String> = Vec::new();
  for id in raw.split(',').map(str::trim).filter(|id| !id.is_empty()) {
    if !ids.iter().any(|seen| seen == id) {
      ids.push(id.to_string());
    }
  }
  ids
}

/// Run the batch described by `args` and return the process exit code.
pub async fn execute(args: &Args) -> i32 {
  match run(args).await {
    Ok(code) => code,
    Err(e) => {
      tracing::error!("{}", e);
      e.exit_code()
    },
  }
}

pub async fn run(args: &Args) -> Result<i32> {
  let mod_ids = args.mod_ids();
  if mod_ids.is_empty() {
    return Err(Error::NoModIds);
  }

  let config = args.build_config()?;
  let output_dir = config.output_dir.clone();
  let downloader = Downloader::new(config)?;

  if args.dry_run {
    let report = downloader.resolve_all(&mod_ids).await;
    for release in &report.succeeded {
      println!("{}\t{}", release.mod_id, release.download_url);
    }
    Ok(report.exit_code())
  } else {
    let report = downloader.run(&mod_ids, &output_dir).await?;
    tracing::info!(
      "{} of {} mods saved to {}",
      report.succeeded.len(),
      mod_ids.len(),
      output_dir.display()
    );
    Ok(report.exit_code())
  }
}
