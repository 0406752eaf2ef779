use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::{module, statement};

#[derive(Debug, Parser)]
#[command(name = "erpkit")]
#[command(about = "ERP module and bank statement tools", long_about = None)]
pub struct Cli {
    /// Settings file (defaults to ~/.erpkit/settings.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub settings: Option<PathBuf>,

    /// Show debug logs and detailed errors
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// モジュールアーカイブの検証とインポート
    Module(module::Args),

    /// 銀行取引明細書の取り込みと印刷
    Statement(statement::Args),
}
