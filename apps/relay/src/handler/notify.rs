//! # アクセス通知ハンドラ
//!
//! ```text
//! POST /notify
//! ```
//!
//! ボディを JSON として解釈し、アクセス検知イベントを取り出してメール送信を依頼する。
//! 送信の完了は待たずに 202 Accepted を返す。
//!
//! ## レスポンス
//!
//! | 条件 | ステータス | ボディ |
//! |------|-----------|--------|
//! | JSON として解釈できた | 202 | `{"status": "event accepted"}` |
//! | ボディが空 / JSON 不正 | 400 | `{"error": "Invalid JSON"}` |
//!
//! `Content-Type` は検査しない。

use std::sync::Arc;

use axum::{Json, body::Bytes, extract::State, http::StatusCode};
use serde::Serialize;
use serde_json::Value;
use sitewatch_domain::access_event::AccessEvent;
use sitewatch_shared::{event_log::event, log_business_event};

use crate::{error::RelayError, usecase::EmailDispatcher};

/// 受理レスポンスのステータス文字列
pub const EVENT_ACCEPTED: &str = "event accepted";

/// `/notify` ハンドラの共有状態
pub struct NotifyState {
    pub dispatcher: EmailDispatcher,
}

/// 受理レスポンス
#[derive(Debug, Serialize)]
pub struct AcceptedResponse {
    pub status: String,
}

impl AcceptedResponse {
    fn accepted() -> Self {
        Self {
            status: EVENT_ACCEPTED.to_string(),
        }
    }
}

/// アクセス検知イベントを受け付ける
///
/// JSON として正しければ中身の形状は問わない（`{}` や配列も受理する）。
/// メール送信は別タスクで行い、その成否はレスポンスに影響しない。
#[tracing::instrument(skip_all, fields(body_len = body.len()))]
pub async fn notify(
    State(state): State<Arc<NotifyState>>,
    body: Bytes,
) -> Result<(StatusCode, Json<AcceptedResponse>), RelayError> {
    tracing::debug!("アクセス通知リクエストを受信しました");

    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(RelayError::MissingBody);
    }

    let payload: Value = serde_json::from_slice(&body)?;
    let access_event = AccessEvent::from_json(&payload);

    log_business_event!(
        event.category = event::category::ACCESS_EVENT,
        event.action = event::action::ACCESS_EVENT_RECEIVED,
        event.result = event::result::SUCCESS,
        access.client_ip = %access_event.client_ip_or_placeholder(),
        access.domain = %access_event.domain_or_placeholder(),
        access.timestamp = %access_event.timestamp_or_placeholder(),
        "アクセス検知イベントを受理"
    );

    state.dispatcher.dispatch(access_event);

    log_business_event!(
        event.category = event::category::NOTIFICATION,
        event.action = event::action::NOTIFICATION_DISPATCHED,
        event.result = event::result::SUCCESS,
        notification.recipient = %state.dispatcher.recipient(),
        "通知メールの送信を依頼"
    );

    Ok((StatusCode::ACCEPTED, Json(AcceptedResponse::accepted())))
}
