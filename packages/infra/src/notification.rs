//! # 通知送信
//!
//! メール通知の送信を担当するインフラストラクチャモジュール。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: `NotificationSender` trait でメール送信を抽象化
//! - **SMTP 実装**: lettre の暗黙 TLS（SMTPS, 465 番）で SMTP プロバイダへ送信
//! - **テスト差し替え**: `mock::MockNotificationSender` で遅延・失敗を再現できる

mod smtp;

use async_trait::async_trait;
use sitewatch_domain::notification::{EmailMessage, NotificationError};
pub use smtp::{SmtpCredentials, SmtpNotificationSender, SmtpSettings};

/// メール送信トレイト
///
/// 送信 1 回 = 1 試行。リトライは行わない。
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// メールを送信する
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError>;
}
