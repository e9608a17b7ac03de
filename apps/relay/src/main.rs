//! # SiteWatch Relay サーバー
//!
//! Web サイトへのアクセス検知イベントを HTTP で受け取り、
//! 固定の宛先にアラートメールを送る中継サーバー。
//!
//! ```text
//! ┌──────────────┐ POST /notify ┌──────────────┐  SMTP (TLS) ┌──────────────┐
//! │   Watcher    │─────────────▶│    Relay     │────────────▶│ SMTP Provider│
//! │  (検知元)     │◀─────────────│  port: 5000  │             │  port: 465   │
//! └──────────────┘     202      └──────────────┘             └──────────────┘
//! ```
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `PORT` | No | ポート番号（デフォルト: `5000`） |
//! | `EMAIL_FROM` | No | SMTP 認証ユーザー名 兼 送信元アドレス |
//! | `EMAIL_PASS` | No | SMTP 認証パスワード |
//! | `LOG_FORMAT` | No | `json` / `pretty`（デフォルト: `pretty`） |
//! | `RUST_LOG` | No | ログレベル（デフォルト: `info,sitewatch=debug`） |
//!
//! `EMAIL_FROM` / `EMAIL_PASS` が未設定でも起動する。その場合は送信のたびに失敗ログが出る。
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境（.env ファイルを使用）
//! cargo run -p sitewatch-relay
//!
//! # 本番環境（環境変数を直接指定）
//! PORT=8080 EMAIL_FROM=... EMAIL_PASS=... LOG_FORMAT=json cargo run -p sitewatch-relay --release
//! ```

use std::sync::Arc;

use sitewatch_infra::SmtpNotificationSender;
use sitewatch_relay::{app_builder::build_app, config::RelayConfig, usecase::EmailDispatcher};
use sitewatch_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

/// Relay サーバーのエントリーポイント
///
/// 以下の順序で初期化を行う:
///
/// 1. 環境変数の読み込み（.env ファイル）
/// 2. トレーシングの初期化
/// 3. アプリケーション設定の読み込み
/// 4. SMTP 送信実装とディスパッチャの構築
/// 5. HTTP サーバーの起動
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    // トレーシング初期化
    let tracing_config = TracingConfig::from_env("sitewatch-relay");
    init_tracing(&tracing_config);
    let _tracing_guard = tracing_config.app_span().entered();

    // 設定読み込み
    let config = RelayConfig::from_env()?;

    tracing::info!(
        "Relay サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    config.notification.log_credential_status();

    // 依存関係の初期化
    let sender = SmtpNotificationSender::new(config.notification.smtp_settings())?;
    let dispatcher = EmailDispatcher::new(Arc::new(sender), config.notification.recipient.clone());

    let app = build_app(dispatcher);

    // サーバー起動
    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Relay サーバーが起動しました: {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
