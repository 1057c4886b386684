//! Error types for cflookup-dl.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
  #[error("Configuration error: {0}")]
  Config(String),

  #[error("Invalid configuration value for '{field}': {message}")]
  ConfigValidation { field: String, message: String },

  #[error("No mod ids given")]
  NoModIds,

  #[error("Invalid mod id: '{0}' (expected digits only)")]
  InvalidModId(String),

  #[error("Lookup page for mod {mod_id} returned status {status}")]
  LookupStatus {
    mod_id: String,
    status: reqwest::StatusCode,
  },

  #[error("Download of {url} returned status {status}")]
  DownloadStatus {
    url: String,
    status: reqwest::StatusCode,
  },

  /// The lookup page no longer has the layout we scrape.
  #[error("Missing element on lookup page: {0}")]
  MissingElement(String),

  #[error("Invalid file id: '{0}'")]
  InvalidFileId(String),

  #[error("Invalid filename: {0}")]
  InvalidFilename(String),

  #[error("Invalid selector: {0}")]
  Selector(String),

  #[error("Invalid pattern: {0}")]
  Regex(#[from] regex::Error),

  #[error("IO error: {0}")]
  Io(#[from] std::io::Error),

  #[error("HTTP error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("TOML parse error: {0}")]
  TomlParse(#[from] toml::de::Error),

  #[error("Invalid URL: {0}")]
  UrlParse(#[from] url::ParseError),
}

impl Error {
  /// True for failures caused by the lookup page markup rather than the network.
  pub fn is_markup(&self) -> bool {
    matches!(
      self,
      Error::MissingElement(_) | Error::InvalidFileId(_) | Error::Selector(_)
    )
  }

  /// Process exit code for an error that ended the whole run.
  pub fn exit_code(&self) -> i32 {
    match self {
      Error::NoModIds
      | Error::Config(_)
      | Error::ConfigValidation { .. }
      | Error::TomlParse(_)
      | Error::UrlParse(_) => exit_codes::USAGE_ERROR,
      _ => exit_codes::UNEXPECTED_ERROR,
    }
  }
}

pub type Result<T> = std::result::Result<T, Error>;

pub mod exit_codes {
  pub const SUCCESS: i32 = 0;
  pub const USAGE_ERROR: i32 = 1;
  pub const SOME_MODS_FAILED: i32 = 2;
  /// Failures outside any single mod, such as creating the output directory.
  pub const UNEXPECTED_ERROR: i32 = 3;
}
