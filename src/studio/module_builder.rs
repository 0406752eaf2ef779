use crate::meta_files::MetaFile;
use serde::{Deserialize, Serialize};

/// インポート対象のモジュール定義
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleBuilder {
    /// モジュール名（例: "axelor-sales-crm"）
    pub name: String,
    /// アップロードされたモジュールのzipアーカイブ
    pub import_meta_file: Option<MetaFile>,
}

impl ModuleBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            import_meta_file: None,
        }
    }

    /// アーカイブを指定
    pub fn with_import_file(mut self, meta_file: MetaFile) -> Self {
        self.import_meta_file = Some(meta_file);
        self
    }
}
