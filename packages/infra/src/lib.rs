//! # SiteWatch インフラ層
//!
//! 外部システム（SMTP プロバイダ）との通信を担当するインフラストラクチャ層。
//!
//! ## 依存関係
//!
//! ```text
//! relay → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`notification`] - メール送信（`NotificationSender` trait と SMTP 実装）
//! - `mock` - テスト用のインメモリ送信実装（`test-utils` feature 有効時のみ）

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod notification;

pub use notification::{NotificationSender, SmtpCredentials, SmtpNotificationSender, SmtpSettings};
