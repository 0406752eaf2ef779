//! 銀行取引明細書の永続化
//!
//! `<data.dir>/statements.json` に全件を保存する。保存は同じディレクトリの
//! 一時ファイルへ書き込んでから置換する。

use crate::bank_payment::BankStatement;
use crate::error::{ErpError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::NamedTempFile;

/// 明細書リポジトリ
pub trait BankStatementRepository: Send + Sync {
    /// ID で検索
    fn find(&self, id: u64) -> Result<Option<BankStatement>>;

    /// 全件（ID 昇順）
    fn all(&self) -> Result<Vec<BankStatement>>;

    /// 既存レコードを更新（存在しなければ追加）
    fn save(&self, statement: &BankStatement) -> Result<()>;

    /// 新しい ID を採番して作成
    fn create(&self, name: &str, file_format: Option<&str>) -> Result<BankStatement>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StatementStore {
    next_id: u64,
    statements: Vec<BankStatement>,
}

/// JSON ファイルによるリポジトリ
pub struct JsonBankStatementRepository {
    path: PathBuf,
    // 読み込み → 変更 → 保存の間を直列化する
    lock: Mutex<()>,
}

impl JsonBankStatementRepository {
    pub const FILE_NAME: &'static str = "statements.json";

    /// データディレクトリ配下のファイルを使用
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::with_path(data_dir.join(Self::FILE_NAME))
    }

    /// カスタムパスで作成（テスト用）
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    #[cfg(test)]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<StatementStore> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(StatementStore::default()),
            Err(e) => Err(ErpError::Io(e)),
        }
    }

    fn store(&self, store: &StatementStore) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        // 同じディレクトリに一時ファイルを作成
        let parent = self.path.parent().unwrap_or(Path::new("."));
        let mut temp_file = NamedTempFile::new_in(parent)?;

        let content = serde_json::to_string_pretty(store)?;
        temp_file.write_all(content.as_bytes())?;

        // アトミックに置換
        temp_file.persist(&self.path).map_err(|e| ErpError::Io(e.error))?;
        Ok(())
    }

    fn with_store<T>(&self, f: impl FnOnce(&mut StatementStore) -> T) -> Result<T> {
        let _guard = self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut store = self.load()?;
        let value = f(&mut store);
        self.store(&store)?;
        Ok(value)
    }
}

impl BankStatementRepository for JsonBankStatementRepository {
    fn find(&self, id: u64) -> Result<Option<BankStatement>> {
        let store = self.load()?;
        Ok(store.statements.into_iter().find(|s| s.id == id))
    }

    fn all(&self) -> Result<Vec<BankStatement>> {
        let mut statements = self.load()?.statements;
        statements.sort_by_key(|s| s.id);
        Ok(statements)
    }

    fn save(&self, statement: &BankStatement) -> Result<()> {
        self.with_store(|store| {
            match store.statements.iter_mut().find(|s| s.id == statement.id) {
                Some(existing) => *existing = statement.clone(),
                None => {
                    store.next_id = store.next_id.max(statement.id);
                    store.statements.push(statement.clone());
                }
            }
        })
    }

    fn create(&self, name: &str, file_format: Option<&str>) -> Result<BankStatement> {
        self.with_store(|store| {
            store.next_id += 1;
            let mut statement = BankStatement::new(store.next_id, name);
            statement.file_format = file_format.map(str::to_string);
            store.statements.push(statement.clone());
            statement
        })
    }
}

#[cfg(test)]
#[path = "repository_test.rs"]
mod tests;
