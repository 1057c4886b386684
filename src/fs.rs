//! Local file naming.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Check that a filename scraped from the lookup page is safe to join onto the
/// output directory. Names are not rewritten, only rejected.
pub fn sanitize_filename(name: &str) -> Result<&str> {
  let name = name.trim();

  if name.is_empty() || name == "." || name == ".." {
    return Err(Error::InvalidFilename(format!("'{}'", name)));
  }

  if name.contains('/') || name.contains('\\') {
    return Err(Error::InvalidFilename(format!(
      "Path separators not allowed in filename: '{}'",
      name
    )));
  }

  if name.contains('\0') {
    return Err(Error::InvalidFilename(format!(
      "Null bytes not allowed in filename: '{}'",
      name
    )));
  }

  Ok(name)
}

pub fn target_path(output_dir: &Path, filename: &str) -> Result<PathBuf> {
  Ok(output_dir.join(sanitize_filename(filename)?))
}
