//! # Relay アプリケーション構築
//!
//! State の初期化とルーター構築を担当する。
//! `main.rs` は設定読み込みとサーバー起動に集中する。
//! 結合テストも同じ関数でルーターを組み立てる。

use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use sitewatch_shared::observability::{MakeRequestUuidV7, make_request_span};
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{
    handler::{NotifyState, health_check, notify},
    usecase::EmailDispatcher,
};

/// ルーターを構築する
///
/// ```text
/// GET  /health  → health_check
/// POST /notify  → notify
/// ```
///
/// ボディサイズの上限は設けない。JSON として正しければ大きさによらず 202 を返す。
pub fn build_app(dispatcher: EmailDispatcher) -> Router {
    let notify_state = Arc::new(NotifyState { dispatcher });

    Router::new()
        .route("/health", get(health_check))
        .route("/notify", post(notify))
        .with_state(notify_state)
        .layer(DefaultBodyLimit::disable())
        // Request ID レイヤー（下に書いたものが外側）
        // 1. SetRequestIdLayer（最外）: UUID v7 を生成（クライアント提供値があればそれを使う）
        // 2. TraceLayer: request_id を含むスパンを張る
        // 3. PropagateRequestIdLayer: レスポンスヘッダーに X-Request-Id をコピー
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}
