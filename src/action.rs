//! UIアクションのリクエスト/レスポンス
//!
//! コントローラはリクエストのコンテキストから対象レコードを取り出し、
//! 結果をレスポンス（リロード指示、ビュー、トレース済みエラー）に書き込む。

use crate::error::{ErpError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;

/// アクションリクエスト
#[derive(Debug, Clone)]
pub struct ActionRequest {
    context: serde_json::Value,
}

impl ActionRequest {
    pub fn new(context: serde_json::Value) -> Self {
        Self { context }
    }

    /// コンテキストを型付きレコードとして解釈
    pub fn as_type<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(self.context.clone())
            .map_err(|e| ErpError::InvalidContext(e.to_string()))
    }
}

/// ビュー定義（タイトル + 表示ヒント）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewMap {
    pub title: String,
    pub params: BTreeMap<String, String>,
}

impl ViewMap {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

/// ビュー定義のビルダー
#[derive(Debug, Clone)]
pub struct ActionView {
    title: String,
    params: BTreeMap<String, String>,
}

impl ActionView {
    /// タイトルを指定してビューを定義
    pub fn define(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            params: BTreeMap::new(),
        }
    }

    /// 表示ヒントを追加
    pub fn add(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn map(self) -> ViewMap {
        ViewMap {
            title: self.title,
            params: self.params,
        }
    }
}

/// レスポンスに記録されたエラー
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TracedError {
    /// エラーコード（例: "CFG001"）
    pub code: String,
    /// トレースバックのカテゴリ番号（ドメインエラーのみ）
    pub category: Option<u8>,
    pub message: String,
}

/// アクションレスポンス
#[derive(Debug, Clone, Default, Serialize)]
pub struct ActionResponse {
    reload: bool,
    view: Option<ViewMap>,
    error: Option<TracedError>,
}

impl ActionResponse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_reload(&mut self, reload: bool) {
        self.reload = reload;
    }

    pub fn set_view(&mut self, view: ViewMap) {
        self.view = Some(view);
    }

    pub fn set_error(&mut self, error: TracedError) {
        self.error = Some(error);
    }

    #[cfg(test)]
    pub fn reload(&self) -> bool {
        self.reload
    }

    pub fn view(&self) -> Option<&ViewMap> {
        self.view.as_ref()
    }

    pub fn error(&self) -> Option<&TracedError> {
        self.error.as_ref()
    }

    #[cfg(test)]
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
