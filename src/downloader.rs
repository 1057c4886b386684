use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{exit_codes, Error, Result};
use crate::fs::target_path;
use crate::page::{CfLookupParser, ModPage, PageParser};

/// A mod id resolved to a direct download link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModRelease {
  pub mod_id: String,
  pub mod_name: String,
  pub mod_link: String,
  pub mod_filename: String,
  pub file_id: String,
  pub download_url: String,
}

#[derive(Debug, Clone)]
pub struct DownloadedMod {
  pub release: ModRelease,
  pub path: PathBuf,
  pub size: usize,
}

/// Outcome of a batch: every id ends up in exactly one of the two lists.
#[derive(Debug)]
pub struct BatchReport<T> {
  pub succeeded: Vec<T>,
  pub failed: Vec<(String, Error)>,
}

impl<T> BatchReport<T> {
  fn new() -> Self {
    Self {
      succeeded: Vec::new(),
      failed: Vec::new(),
    }
  }

  pub fn is_success(&self) -> bool {
    self.failed.is_empty()
  }

  pub fn exit_code(&self) -> i32 {
    if self.is_success() {
      exit_codes::SUCCESS
    } else {
      tracing::warn!("{} mod(s) failed", self.failed.len());
      exit_codes::SOME_MODS_FAILED
    }
  }
}

pub struct Downloader {
  http_client: reqwest::Client,
  config: Config,
  parser: Box<dyn PageParser>,
}

impl Downloader {
  pub fn new(config: Config) -> Result<Self> {
    Ok(Self::with_parser(config, Box::new(CfLookupParser::new()?)))
  }

  pub fn with_parser(config: Config, parser: Box<dyn PageParser>) -> Self {
    Self {
      http_client: reqwest::Client::new(),
      config,
      parser,
    }
  }

  async fn fetch_lookup_page(&self, mod_id: &str) -> Result<String> {
    let url = self.config.lookup_url(mod_id)?;
    tracing::debug!("fetching lookup page {}", url);

    let response = self
      .http_client
      .get(url)
      .header("user-agent", &self.config.user_agent)
      .send()
      .await?;

    let status = response.status();
    if !status.is_success() {
      return Err(Error::LookupStatus {
        mod_id: mod_id.to_string(),
        status,
      });
    }

    Ok(response.text().await?)
  }

  /// Fetch the lookup page for `mod_id` and build the CDN link of its latest release.
  pub async fn resolve(&self, mod_id: &str) -> Result<ModRelease> {
    let data = self.fetch_lookup_page(mod_id).await?;

    let ModPage {
      mod_name,
      mod_link,
      mod_filename,
      file_id,
    } = self.parser.parse(mod_id, &data)?;

    tracing::info!("Mod Name: {}", mod_name);
    tracing::info!("Mod Link: {}", mod_link);
    tracing::info!("Jar Name: {}", mod_filename);
    tracing::info!("File ID: {}", file_id);

    let download_url = self.config.cdn_template().url(&file_id, &mod_filename)?;
    tracing::info!("Download Link: {}", download_url);

    Ok(ModRelease {
      mod_id: mod_id.to_string(),
      mod_name,
      mod_link,
      mod_filename,
      file_id,
      download_url,
    })
  }

  async fn fetch_file(&self, release: &ModRelease, path: &Path) -> Result<usize> {
    let response = self
      .http_client
      .get(&release.download_url)
      .header("user-agent", &self.config.user_agent)
      .send()
      .await?;

    let status = response.status();
    tracing::info!("Mod Download Response Status Code: {}", status.as_u16());
    if !status.is_success() {
      return Err(Error::DownloadStatus {
        url: release.download_url.clone(),
        status,
      });
    }

    let data = response.bytes().await?;

    // Overwrites any earlier download of the same release.
    tokio::fs::write(path, &data).await?;

    Ok(data.len())
  }

  /// Resolve `mod_id` and save its latest release into `output_dir`.
  pub async fn download_mod(&self, mod_id: &str, output_dir: &Path) -> Result<DownloadedMod> {
    let release = self.resolve(mod_id).await?;
    let path = target_path(output_dir, &release.mod_filename)?;

    let size = self.fetch_file(&release, &path).await?;
    tracing::info!(
      "Mod downloaded successfully as {} ({} bytes)",
      release.mod_filename,
      size
    );

    Ok(DownloadedMod {
      release,
      path,
      size,
    })
  }

  /// Download every id in order. A failing id is logged and recorded, the rest
  /// of the batch still runs.
  pub async fn run(&self, mod_ids: &[String], output_dir: &Path) -> Result<BatchReport<DownloadedMod>> {
    tokio::fs::create_dir_all(output_dir).await?;

    let mut report = BatchReport::new();
    for mod_id in mod_ids {
      tracing::info!("Processing mod {}", mod_id);
      match self.download_mod(mod_id, output_dir).await {
        Ok(downloaded) => report.succeeded.push(downloaded),
        Err(e) => {
          tracing::error!("Failed to download mod {}: {}", mod_id, e);
          report.failed.push((mod_id.clone(), e));
        },
      }
    }

    Ok(report)
  }

  /// Like [`Downloader::run`] but stops after building the download links.
  pub async fn resolve_all(&self, mod_ids: &[String]) -> BatchReport<ModRelease> {
    let mut report = BatchReport::new();
    for mod_id in mod_ids {
      match self.resolve(mod_id).await {
        Ok(release) => report.succeeded.push(release),
        Err(e) => {
          tracing::error!("Failed to resolve mod {}: {}", mod_id, e);
          report.failed.push((mod_id.clone(), e));
        },
      }
    }

    report
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  struct FixedParser(ModPage);

  impl PageParser for FixedParser {
    fn parse(&self, _mod_id: &str, _html: &str) -> Result<ModPage> {
      Ok(self.0.clone())
    }
  }

  fn fixed_page(filename: &str) -> ModPage {
    ModPage {
      mod_name: "overstacked".to_string(),
      mod_link: "https://www.curseforge.com/hytale/mods/overstacked".to_string(),
      mod_filename: filename.to_string(),
      file_id: "7453942".to_string(),
    }
  }

  #[test]
  fn test_report_success() {
    let mut report: BatchReport<ModRelease> = BatchReport::new();
    assert!(report.is_success());
    report
      .failed
      .push(("1".to_string(), Error::InvalidFileId("x".to_string())));
    assert!(!report.is_success());
    assert_eq!(report.exit_code(), exit_codes::SOME_MODS_FAILED);
  }

  #[tokio::test]
  async fn test_lookup_transport_error_is_http() {
    let config = Config {
      lookup_url: "http://127.0.0.1:1/{mod_id}".to_string(),
      ..Config::default()
    };
    let downloader = Downloader::with_parser(config, Box::new(FixedParser(fixed_page("a.jar"))));

    assert!(matches!(
      downloader.resolve("1412345").await,
      Err(Error::Http(_))
    ));
  }
}
