use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use cflookup_dl::cli::{self, Args};

#[tokio::main]
async fn main() -> ExitCode {
  let args = Args::parse();

  let log_level = if args.debug { "debug" } else { "info" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
  fmt().with_env_filter(filter).with_target(false).init();

  ExitCode::from(cli::execute(&args).await as u8)
}
