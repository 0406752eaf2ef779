//! 銀行取引明細書のアクションコントローラ
//!
//! どちらのアクションも失敗はトレースしてレスポンスに記録し、
//! 成否にかかわらずリロードを指示する。リトライやロールバックはしない。

use crate::action::{ActionRequest, ActionResponse, ActionView};
use crate::bank_payment::{BankStatement, BankStatementRepository, BankStatementService};
use crate::error::{ErpError, Result};
use crate::traceback::TraceBackService;
use std::sync::Arc;

pub struct BankStatementController {
    service: Arc<dyn BankStatementService>,
    repository: Arc<dyn BankStatementRepository>,
}

impl BankStatementController {
    pub fn new(
        service: Arc<dyn BankStatementService>,
        repository: Arc<dyn BankStatementRepository>,
    ) -> Self {
        Self {
            service,
            repository,
        }
    }

    /// 明細書を取り込む
    pub fn run_import(&self, request: &ActionRequest, response: &mut ActionResponse) {
        let result = self.load(request).and_then(|mut statement| {
            self.service.run_import(&mut statement, true)
        });

        if let Err(e) = result {
            TraceBackService::trace(response, &e);
        }
        response.set_reload(true);
    }

    /// 明細書を出力し、HTML ビューとして表示する
    pub fn print(&self, request: &ActionRequest, response: &mut ActionResponse) {
        let result = self.load(request).and_then(|statement| {
            let file_link = self.service.print(&statement)?;
            Ok(ActionView::define(statement.name).add("html", file_link).map())
        });

        match result {
            Ok(view) => response.set_view(view),
            Err(e) => TraceBackService::trace(response, &e),
        }
        response.set_reload(true);
    }

    /// コンテキストのレコードを保存済みの最新状態で取得し直す
    fn load(&self, request: &ActionRequest) -> Result<BankStatement> {
        let context: BankStatement = request.as_type()?;
        self.repository
            .find(context.id)?
            .ok_or(ErpError::RecordNotFound {
                model: "BankStatement",
                id: context.id,
            })
    }
}

#[cfg(test)]
#[path = "controller_test.rs"]
mod tests;
