pub mod code;
pub mod formatter;

pub use code::ErrorCode;

use thiserror::Error;

/// トレースバックのカテゴリ
///
/// 数値コードは業務アプリ側のトレースバック記録と互換。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceCategory {
    ConfigurationError,
}

impl TraceCategory {
    /// 数値コード
    pub fn code(&self) -> u8 {
        match self {
            TraceCategory::ConfigurationError => 4,
        }
    }

    /// 表示用ラベル
    pub fn label(&self) -> &'static str {
        match self {
            TraceCategory::ConfigurationError => "configuration error",
        }
    }
}

/// erpkit 統一エラー型
#[derive(Debug, Error)]
pub enum ErpError {
    /// 業務ドメインのエラー（カテゴリ + ローカライズ済みメッセージ）
    #[error("{message}")]
    Configuration {
        category: TraceCategory,
        message: String,
    },

    #[error("Record not found: {model} #{id}")]
    RecordNotFound { model: &'static str, id: u64 },

    #[error("Invalid action context: {0}")]
    InvalidContext(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Zip extraction error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

pub type Result<T> = std::result::Result<T, ErpError>;

impl ErpError {
    /// CONFIGURATION_ERROR カテゴリのドメインエラーを作成
    pub fn configuration(message: impl Into<String>) -> Self {
        ErpError::Configuration {
            category: TraceCategory::ConfigurationError,
            message: message.into(),
        }
    }

    /// ドメインエラーならそのカテゴリ
    pub fn category(&self) -> Option<TraceCategory> {
        match self {
            ErpError::Configuration { category, .. } => Some(*category),
            _ => None,
        }
    }

    /// 設定エラー（検証失敗）かどうか
    #[cfg(test)]
    pub fn is_configuration(&self) -> bool {
        self.category() == Some(TraceCategory::ConfigurationError)
    }

    /// 表示用のエラーコード
    pub fn code(&self) -> ErrorCode {
        match self {
            ErpError::Configuration { .. } => ErrorCode::Cfg001,
            ErpError::Settings(_) | ErpError::Toml(_) => ErrorCode::Cfg002,
            ErpError::RecordNotFound { .. } => ErrorCode::Rec001,
            ErpError::InvalidContext(_) => ErrorCode::Val001,
            ErpError::Json(_) => ErrorCode::Val002,
            ErpError::Zip(_) => ErrorCode::Zip001,
            ErpError::Io(e) => match e.kind() {
                std::io::ErrorKind::NotFound => ErrorCode::Io001,
                std::io::ErrorKind::PermissionDenied => ErrorCode::Io002,
                _ => ErrorCode::Io003,
            },
        }
    }
}
