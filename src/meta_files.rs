//! アップロード済みファイルの参照と解決

use crate::error::{ErpError, Result};
use crate::i18n::{self, I18n};
use crate::settings::{AppSettings, FILE_UPLOAD_DIR};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// アップロード済みファイルへの参照
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaFile {
    /// 元のファイル名
    pub file_name: String,
    /// アップロードディレクトリからの相対パス（絶対パスも可）
    pub file_path: String,
}

impl MetaFile {
    pub fn new(file_name: impl Into<String>, file_path: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            file_path: file_path.into(),
        }
    }

    /// ローカルファイルを直接指す参照を作成
    pub fn from_path(path: &Path) -> Self {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Self::new(file_name, path.to_string_lossy())
    }
}

/// ファイルストレージ
pub struct MetaFiles {
    upload_dir: Option<PathBuf>,
    i18n: I18n,
}

impl MetaFiles {
    pub fn new(settings: &AppSettings, i18n: I18n) -> Self {
        Self {
            upload_dir: settings.get(FILE_UPLOAD_DIR).map(PathBuf::from),
            i18n,
        }
    }

    /// 参照をファイルシステム上のパスに解決
    ///
    /// 絶対パスはそのまま、相対パスは `file.upload.dir` 配下として解決する。
    pub fn get_path(&self, meta_file: &MetaFile) -> Result<PathBuf> {
        let path = Path::new(&meta_file.file_path);
        if path.is_absolute() {
            return Ok(path.to_path_buf());
        }

        let upload_dir = self
            .upload_dir
            .as_ref()
            .ok_or_else(|| ErpError::configuration(self.i18n.get(i18n::NO_UPLOAD_DIR)))?;
        Ok(upload_dir.join(path))
    }
}
