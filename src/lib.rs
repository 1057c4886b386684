//! Resolve CurseForge mod ids through cflookup.com and download the latest
//! release of each straight from the forgecdn mirror.

pub mod cdn;
pub mod cli;
pub mod config;
pub mod downloader;
pub mod error;
pub mod fs;
pub mod page;

pub use config::Config;
pub use downloader::{BatchReport, DownloadedMod, Downloader, ModRelease};
pub use error::{Error, Result};
pub use page::{CfLookupParser, ModPage, PageParser};
