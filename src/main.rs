mod action;
mod bank_payment;
mod cli;
mod commands;
mod env;
mod error;
mod i18n;
mod meta_files;
mod output;
mod settings;
mod studio;
mod traceback;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// ログ出力の初期化（ERPKIT_LOG で上書き可能）
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "erpkit=debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env("ERPKIT_LOG").unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = commands::dispatch(cli).await {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
