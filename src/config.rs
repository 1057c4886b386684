//! Runtime configuration: URL templates, user agent and output directory.
//!
//! Values come from built-in defaults, optionally overridden by a TOML file and
//! then by command line flags.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use url::Url;

use crate::cdn::{CdnTemplate, DEFAULT_CDN_URL};
use crate::error::{Error, Result};

pub const DEFAULT_LOOKUP_URL: &str = "https://cflookup.com/{mod_id}";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/96.0.4664.93 Safari/537.36";
pub const DEFAULT_OUTPUT_DIR: &str = "mods";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Lookup page template, `{mod_id}` is replaced with the requested id.
  pub lookup_url: String,

  /// CDN template with `{prefix}`, `{rest}` and `{filename}` placeholders.
  pub cdn_url: String,

  pub user_agent: String,

  pub output_dir: PathBuf,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      lookup_url: DEFAULT_LOOKUP_URL.to_string(),
      cdn_url: DEFAULT_CDN_URL.to_string(),
      user_agent: DEFAULT_USER_AGENT.to_string(),
      output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
    }
  }
}

impl Config {
  pub fn load(path: &Path) -> Result<Self> {
    let content = fs::read_to_string(path)
      .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
    Self::from_toml(&content)
  }

  pub fn from_toml(content: &str) -> Result<Self> {
    Ok(toml::from_str(content)?)
  }

  /// Lookup page for `mod_id`. Ids must be all digits so they stay a single
  /// path segment.
  pub fn lookup_url(&self, mod_id: &str) -> Result<String> {
    if mod_id.is_empty() || !mod_id.bytes().all(|b| b.is_ascii_digit()) {
      return Err(Error::InvalidModId(mod_id.to_string()));
    }
    Ok(self.lookup_url.replace("{mod_id}", mod_id))
  }

  pub fn cdn_template(&self) -> CdnTemplate {
    CdnTemplate::new(self.cdn_url.clone())
  }

  pub fn validate(&self) -> Result<()> {
    require_placeholders("lookup_url", &self.lookup_url, &["{mod_id}"])?;
    require_placeholders(
      "cdn_url",
      &self.cdn_url,
      &["{prefix}", "{rest}", "{filename}"],
    )?;

    Url::parse(&self.lookup_url("1")?)?;
    Url::parse(&self.cdn_template().url("12345", "mod.jar")?)?;

    if self.user_agent.trim().is_empty() {
      return Err(Error::ConfigValidation {
        field: "user_agent".to_string(),
        message: "must not be empty".to_string(),
      });
    }

    Ok(())
  }
}

fn require_placeholders(field: &str, template: &str, placeholders: &[&str]) -> Result<()> {
  for placeholder in placeholders {
    if !template.contains(placeholder) {
      return Err(Error::ConfigValidation {
        field: field.to_string(),
        message: format!("'{}' is missing the {} placeholder", template, placeholder),
      });
    }
  }
  Ok(())
}
