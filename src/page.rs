//! Scraping of cflookup.com mod pages.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::error::{Error, Result};

const RELEASE_CAPTION: &str = "latest version information";

/// Everything we need from a lookup page to build a download link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModPage {
  pub mod_name: String,
  pub mod_link: String,
  pub mod_filename: String,
  pub file_id: String,
}

/// Extracts a [`ModPage`] from lookup page markup.
pub trait PageParser {
  fn parse(&self, mod_id: &str, html: &str) -> Result<ModPage>;
}

pub struct CfLookupParser {
  name_anchor: Selector,
  table: Selector,
  caption: Selector,
  first_row: Selector,
  cell: Selector,
  install_button: Selector,
  anchor: Selector,
  file_id: Regex,
}

fn selector(css: &str) -> Result<Selector> {
  Selector::parse(css).map_err(|e| Error::Selector(format!("{}: {}", css, e)))
}

fn text_of(element: ElementRef) -> String {
  element.text().collect::<String>()
}

impl CfLookupParser {
  pub fn new() -> Result<Self> {
    Ok(Self {
      name_anchor: selector("a.text-white")?,
      table: selector("table.table")?,
      caption: selector("caption")?,
      first_row: selector("tbody tr")?,
      cell: selector("td")?,
      install_button: selector("div.cf-install-button")?,
      anchor: selector("a")?,
      file_id: Regex::new(r"=(\d+)$")?,
    })
  }

  fn release_table<'a>(&self, doc: &'a Html) -> Option<ElementRef<'a>> {
    doc.select(&self.table).find(|table| {
      table
        .select(&self.caption)
        .next()
        .map(|caption| text_of(caption).to_lowercase().contains(RELEASE_CAPTION))
        .unwrap_or(false)
    })
  }

  fn extract_file_id(&self, href: &str) -> Result<String> {
    self
      .file_id
      .captures(href.trim())
      .and_then(|c| c.get(1))
      .map(|m| m.as_str().to_string())
      .ok_or_else(|| Error::InvalidFileId(href.to_string()))
  }
}

impl PageParser for CfLookupParser {
  fn parse(&self, mod_id: &str, html: &str) -> Result<ModPage> {
    let doc = Html::parse_document(html);

    let name_anchor = doc
      .select(&self.name_anchor)
      .next()
      .ok_or_else(|| Error::MissingElement(format!("mod name link for {}", mod_id)))?;
    let mod_link = name_anchor
      .value()
      .attr("href")
      .ok_or_else(|| Error::MissingElement(format!("href on mod name link for {}", mod_id)))?
      .to_string();
    let mod_name = mod_link
      .trim_end_matches('/')
      .rsplit('/')
      .next()
      .unwrap_or_default()
      .to_string();

    let table = self
      .release_table(&doc)
      .ok_or_else(|| Error::MissingElement("latest version information table".to_string()))?;
    let row = table
      .select(&self.first_row)
      .next()
      .ok_or_else(|| Error::MissingElement("latest release row".to_string()))?;
    let cells: Vec<ElementRef> = row.select(&self.cell).collect();

    let mod_filename = cells
      .first()
      .map(|cell| text_of(*cell).trim().to_string())
      .filter(|name| !name.is_empty())
      .ok_or_else(|| Error::MissingElement("latest release filename".to_string()))?;

    let href = cells
      .get(3)
      .and_then(|cell| cell.select(&self.install_button).next())
      .and_then(|button| button.select(&self.anchor).next())
      .and_then(|link| link.value().attr("href"))
      .ok_or_else(|| Error::MissingElement("install button link".to_string()))?;

    tracing::debug!("install link for {}: {}", mod_id, href);

    Ok(ModPage {
      mod_name,
      mod_link,
      mod_filename,
      file_id: self.extract_file_id(href)?,
    })
  }
}
