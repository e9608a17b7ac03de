//! # ヘルスチェックハンドラ
//!
//! ```text
//! GET /health
//! ```
//!
//! プロセスが HTTP リクエストを処理できることだけを確認する。
//! SMTP プロバイダへの疎通は確認しない。

use axum::Json;
use sitewatch_shared::HealthResponse;

/// ヘルスチェックエンドポイント
///
/// 常に 200 OK と `{"status": "ok"}` を返す。
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
