//! 例外のトレースとユーザーへの通知

use crate::action::{ActionResponse, TracedError};
use crate::error::ErpError;

/// トレースバックサービス
pub struct TraceBackService;

impl TraceBackService {
    /// エラーをログに記録し、レスポンスに設定する
    pub fn trace(response: &mut ActionResponse, error: &ErpError) {
        let code = error.code();
        let category = error.category();

        match category {
            Some(category) => tracing::warn!(
                code = code.as_str(),
                category = category.label(),
                error = %error,
                "action failed"
            ),
            None => tracing::error!(code = code.as_str(), error = ?error, "action failed"),
        }

        response.set_error(TracedError {
            code: code.as_str().to_string(),
            category: category.map(|c| c.code()),
            message: error.to_string(),
        });
    }
}
