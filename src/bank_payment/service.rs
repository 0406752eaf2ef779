//! 銀行取引明細書サービス

use crate::bank_payment::{BankStatement, BankStatementRepository, StatementStatus};
use crate::error::{ErpError, Result};
use crate::i18n::{self, I18n};
use chrono::Utc;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

/// 取り込み可能なファイル形式
pub const SUPPORTED_FORMATS: &[&str] = &["afb120", "camt053"];

/// 明細書の取り込みと印刷
pub trait BankStatementService: Send + Sync {
    /// 明細書を取り込む
    ///
    /// `alert_if_format_not_supported` が false の場合、未対応形式は何もせず成功する。
    fn run_import(
        &self,
        statement: &mut BankStatement,
        alert_if_format_not_supported: bool,
    ) -> Result<()>;

    /// 明細書を出力し、ファイルへのリンクを返す
    fn print(&self, statement: &BankStatement) -> Result<String>;
}

/// 標準の明細書サービス
pub struct DefaultBankStatementService {
    repository: Arc<dyn BankStatementRepository>,
    report_dir: PathBuf,
    i18n: I18n,
}

impl DefaultBankStatementService {
    pub fn new(
        repository: Arc<dyn BankStatementRepository>,
        report_dir: PathBuf,
        i18n: I18n,
    ) -> Self {
        Self {
            repository,
            report_dir,
            i18n,
        }
    }

    fn supported_format(statement: &BankStatement) -> Option<&'static str> {
        let format = statement.file_format.as_deref()?.to_ascii_lowercase();
        SUPPORTED_FORMATS.iter().copied().find(|f| *f == format)
    }
}

impl BankStatementService for DefaultBankStatementService {
    fn run_import(
        &self,
        statement: &mut BankStatement,
        alert_if_format_not_supported: bool,
    ) -> Result<()> {
        let Some(format) = Self::supported_format(statement) else {
            let requested = statement.file_format.as_deref().unwrap_or("-");
            if alert_if_format_not_supported {
                return Err(ErpError::configuration(
                    self.i18n.format(i18n::STATEMENT_FORMAT_NOT_SUPPORTED, requested),
                ));
            }
            tracing::debug!(id = statement.id, format = requested, "format not supported, skipped");
            return Ok(());
        };

        // 保存が成功してから呼び出し元のレコードに反映する
        let mut updated = statement.clone();
        updated.status = StatementStatus::Imported;
        updated.imported_at = Some(Utc::now());
        self.repository.save(&updated)?;
        *statement = updated;

        tracing::info!(id = statement.id, format, "bank statement imported");
        Ok(())
    }

    fn print(&self, statement: &BankStatement) -> Result<String> {
        fs::create_dir_all(&self.report_dir)?;
        let path = self
            .report_dir
            .join(format!("bank-statement-{}.html", statement.id));
        fs::write(&path, render_html(statement))?;

        tracing::info!(id = statement.id, path = %path.display(), "bank statement printed");
        Ok(path.to_string_lossy().to_string())
    }
}

fn render_html(statement: &BankStatement) -> String {
    let name = escape_html(&statement.name);
    let format = escape_html(statement.file_format.as_deref().unwrap_or("-"));
    let imported_at = statement
        .imported_at
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "-".to_string());

    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head><meta charset=\"utf-8\"><title>{name}</title></head>\n\
         <body>\n\
         <h1>{name}</h1>\n\
         <table>\n\
         <tr><th>Id</th><td>{id}</td></tr>\n\
         <tr><th>Status</th><td>{status}</td></tr>\n\
         <tr><th>Format</th><td>{format}</td></tr>\n\
         <tr><th>Imported at</th><td>{imported_at}</td></tr>\n\
         </table>\n\
         </body>\n\
         </html>\n",
        id = statement.id,
        status = statement.status.as_str(),
    )
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
#[path = "service_test.rs"]
mod tests;
