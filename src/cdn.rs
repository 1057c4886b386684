//! Direct CDN links for CurseForge files.
//!
//! forgecdn paths split the numeric file id after its fourth digit, so file
//! `7453942` of `Overstacked-2026.1.12-30731.jar` lives at
//! `files/7453/942/Overstacked-2026.1.12-30731.jar`.

use crate::error::{Error, Result};

pub const DEFAULT_CDN_URL: &str = "https://mediafilez.forgecdn.net/files/{prefix}/{rest}/{filename}";

const PREFIX_LEN: usize = 4;

/// Split a file id into its 4 digit prefix and the remainder.
pub fn split_file_id(file_id: &str) -> Result<(&str, &str)> {
  if file_id.len() <= PREFIX_LEN || !file_id.bytes().all(|b| b.is_ascii_digit()) {
    return Err(Error::InvalidFileId(file_id.to_string()));
  }

  Ok(file_id.split_at(PREFIX_LEN))
}

#[derive(Debug, Clone)]
pub struct CdnTemplate {
  template: String,
}

impl CdnTemplate {
  pub fn new(template: impl Into<String>) -> Self {
    Self {
      template: template.into(),
    }
  }

  pub fn url(&self, file_id: &str, filename: &str) -> Result<String> {
    let (prefix, rest) = split_file_id(file_id)?;

    Ok(
      self
        .template
        .replace("{prefix}", prefix)
        .replace("{rest}", rest)
        .replace("{filename}", filename),
    )
  }
}

impl Default for CdnTemplate {
  fn default() -> Self {
    Self::new(DEFAULT_CDN_URL)
  }
}
