//! アプリケーション設定
//!
//! `~/.erpkit/settings.toml` を読み込み、ドット区切りのフラットなキーで参照する。
//! ネストしたテーブルはキーに展開される:
//!
//! ```toml
//! [studio.source]
//! dir = "/opt/erp/src"       # => "studio.source.dir"
//!
//! "file.upload.dir" = "/var/erp/upload"
//! ```
//!
//! 環境変数 `ERPKIT_<KEY>`（`.` は `_`）がファイルの値より優先される。

use crate::env::EnvVar;
use crate::error::{ErpError, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// モジュールソースのルートディレクトリ
pub const STUDIO_SOURCE_DIR: &str = "studio.source.dir";
/// アップロードファイルの保存先
pub const FILE_UPLOAD_DIR: &str = "file.upload.dir";
/// メッセージのロケール
pub const APPLICATION_LOCALE: &str = "application.locale";
/// 銀行取引明細書の出力先
pub const BANK_STATEMENT_REPORT_DIR: &str = "bank.statement.report.dir";
/// データファイルの保存先
pub const DATA_DIR: &str = "data.dir";

/// アプリケーション設定
#[derive(Debug, Clone, Default)]
pub struct AppSettings {
    values: BTreeMap<String, String>,
}

impl AppSettings {
    /// 空の設定を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// デフォルトの設定ファイルパス: ~/.erpkit/settings.toml
    pub fn default_path() -> Result<PathBuf> {
        Ok(home_dir()?.join("settings.toml"))
    }

    /// 設定ファイルを読み込む（ファイルが無ければ空の設定）
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(content) => Self::from_toml_str(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "settings file not found, using defaults");
                Ok(Self::new())
            }
            Err(e) => Err(ErpError::Io(e)),
        }
    }

    /// TOML 文字列から設定を構築
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let table: toml::Table = toml::from_str(content)?;
        let mut values = BTreeMap::new();
        flatten_into(&mut values, None, &table);
        Ok(Self { values })
    }

    /// 値を設定したコピーを返す
    #[cfg(test)]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// 値を取得（環境変数 > ファイル）
    pub fn get(&self, key: &str) -> Option<String> {
        EnvVar::get(&EnvVar::for_setting(key)).or_else(|| self.values.get(key).cloned())
    }

    /// データディレクトリ（`data.dir`、未設定なら ~/.erpkit）
    pub fn data_dir(&self) -> Result<PathBuf> {
        match self.get(DATA_DIR) {
            Some(dir) => Ok(PathBuf::from(dir)),
            None => home_dir(),
        }
    }

    /// ファイルに定義されたキーの数
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn home_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| ErpError::Settings("HOME environment variable not set".to_string()))?;
    Ok(PathBuf::from(home).join(".erpkit"))
}

fn flatten_into(values: &mut BTreeMap<String, String>, prefix: Option<&str>, table: &toml::Table) {
    for (key, value) in table {
        let full_key = match prefix {
            Some(p) => format!("{}.{}", p, key),
            None => key.clone(),
        };
        match value {
            toml::Value::Table(inner) => flatten_into(values, Some(&full_key), inner),
            toml::Value::String(s) => {
                values.insert(full_key, s.clone());
            }
            other => {
                values.insert(full_key, other.to_string());
            }
        }
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
