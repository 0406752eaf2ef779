use crate::cli::{Cli, Command};
use crate::error::formatter::ErrorFormatter;
use crate::error::ErpError;
use crate::i18n::I18n;
use crate::settings::AppSettings;

pub mod module;
pub mod statement;

/// コマンド共通の実行コンテキスト
pub struct AppContext {
    pub settings: AppSettings,
    pub i18n: I18n,
    formatter: ErrorFormatter,
}

impl AppContext {
    pub fn new(settings: AppSettings, formatter: ErrorFormatter) -> Self {
        let i18n = I18n::from_settings(&settings);
        Self {
            settings,
            i18n,
            formatter,
        }
    }

    /// エラーを表示用の文字列に変換
    pub fn report(&self, error: &ErpError) -> String {
        self.formatter.format(error)
    }
}

pub async fn dispatch(cli: Cli) -> Result<(), String> {
    let formatter = ErrorFormatter::new(cli.verbose);
    let settings_path = match cli.settings {
        Some(path) => path,
        None => AppSettings::default_path().map_err(|e| formatter.format(&e))?,
    };
    let settings = AppSettings::load(&settings_path).map_err(|e| formatter.format(&e))?;
    tracing::debug!(path = %settings_path.display(), keys = settings.len(), "settings loaded");

    let ctx = AppContext::new(settings, formatter);

    match cli.command {
        Command::Module(args) => module::run(&ctx, args).await,
        Command::Statement(args) => statement::run(&ctx, args).await,
    }
}
