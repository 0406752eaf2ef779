use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 銀行取引明細書の状態
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatementStatus {
    #[default]
    Draft,
    Imported,
}

impl StatementStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatementStatus::Draft => "draft",
            StatementStatus::Imported => "imported",
        }
    }
}

/// 銀行取引明細書
///
/// アクションのコンテキストからは `id` のみ必須。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankStatement {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: StatementStatus,
    /// ファイル形式（例: "afb120", "camt053"）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imported_at: Option<DateTime<Utc>>,
}

impl BankStatement {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            ..Self::default()
        }
    }

    #[cfg(test)]
    pub fn with_file_format(mut self, format: impl Into<String>) -> Self {
        self.file_format = Some(format.into());
        self
    }

    #[cfg(test)]
    pub fn is_imported(&self) -> bool {
        self.status == StatementStatus::Imported
    }
}
