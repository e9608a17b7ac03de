//! # SiteWatch 共有ユーティリティ
//!
//! ワークスペース全体で使用される共通ユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - トレーシング関連の依存は `observability` feature に閉じ込める

pub mod event_log;
pub mod health;
pub mod observability;

pub use health::HealthResponse;
