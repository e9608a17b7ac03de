//! # Relay エラー定義
//!
//! HTTP 呼び出し元に見えるエラーと、axum レスポンスへの変換を定義する。
//!
//! 呼び出し元に返すのは「受理（202）」か「リクエスト不正（400）」のどちらかだけ。
//! メール送信の失敗はディスパッチャ内で完結し、ここには現れない。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use sitewatch_shared::event_log::error as log_error;
use thiserror::Error;

/// エラーレスポンス
///
/// `{"error": "..."}` 形式。
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Relay で発生する HTTP エラー
#[derive(Debug, Error)]
pub enum RelayError {
    /// リクエストボディが空
    #[error("リクエストボディがありません")]
    MissingBody,

    /// リクエストボディが JSON として解釈できない
    #[error("JSON のパースに失敗しました: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        tracing::warn!(
            error.category = log_error::category::REQUEST,
            error.kind = log_error::kind::INVALID_REQUEST_BODY,
            error = %self,
            "JSON として解釈できないリクエストを受信しました"
        );

        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Invalid JSON".to_string(),
            }),
        )
            .into_response()
    }
}
