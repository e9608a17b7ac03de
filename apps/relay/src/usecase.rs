//! # ユースケース層
//!
//! HTTP ハンドラから呼ばれるアプリケーションロジックを配置する。
//!
//! - [`dispatcher`]: アクセス検知メールの fire-and-forget 送信

pub mod dispatcher;

pub use dispatcher::EmailDispatcher;
