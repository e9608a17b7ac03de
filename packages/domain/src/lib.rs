//! # SiteWatch ドメイン層
//!
//! アクセス検知通知の中核となるドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **外部 I/O を持たない**: HTTP や SMTP の詳細は `infra` / `relay` 側の責務
//! - **寛容な入力**: 受信イベントのフィールドは欠落・型違いを許容し、メール本文の生成で落ちない
//!
//! ## 依存関係の方向
//!
//! ```text
//! relay → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`access_event`] - アクセス検知イベント（`POST /notify` のペイロード）
//! - [`notification`] - メールメッセージと通知送信エラー
//!
//! ## 使用例
//!
//! ```rust
//! use sitewatch_domain::{access_event::AccessEvent, notification::AccessNotification};
//!
//! let event = AccessEvent::from_json(&serde_json::json!({ "domain": "example.com" }));
//! let email = AccessNotification::new(event).render("security@example.com");
//!
//! assert!(email.text_body.contains("Domain: example.com"));
//! assert!(email.text_body.contains("Client IP: None"));
//! ```

pub mod access_event;
pub mod notification;

pub use access_event::AccessEvent;
pub use notification::{AccessNotification, EmailMessage, NotificationError};
