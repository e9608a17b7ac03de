//! # SiteWatch Relay ライブラリ
//!
//! アクセス検知イベントを受け取り、固定の宛先へメール通知を中継する HTTP サービスのコアモジュール。
//!
//! ## 処理の流れ
//!
//! ```text
//! POST /notify ──▶ handler::notify ──▶ EmailDispatcher::dispatch ──▶ 202 Accepted
//!                                              │ (tokio::spawn, 待たない)
//!                                              ▼
//!                                     NotificationSender (SMTPS)
//! ```
//!
//! ## モジュール構成
//!
//! - [`app_builder`]: ルーターとレイヤーの組み立て
//! - [`config`]: 環境変数からの設定読み込み
//! - [`error`]: HTTP エラーとレスポンスへの変換
//! - [`handler`]: HTTP ハンドラ
//! - [`usecase`]: メール通知のディスパッチ

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
pub mod usecase;

#[cfg(test)]
mod test_support;
