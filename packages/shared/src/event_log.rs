//! # ビジネスイベントログとエラーコンテキストの構造化ヘルパー
//!
//! `jq` でログを絞り込めるよう、フィールドの命名規約とヘルパーマクロを提供する。
//!
//! ## ビジネスイベント
//!
//! [`log_business_event!`] マクロで出力する。`event.kind = "business_event"` マーカーが
//! 自動付与され、`jq 'select(.["event.kind"] == "business_event")'` でフィルタできる。
//!
//! ## エラーコンテキスト
//!
//! `tracing::error!` に `error.category` + `error.kind` フィールドを直接追加する。
//! 定数は [`error`] モジュールで提供。
//!
//! ## フィールド命名規約
//!
//! ドット記法（`event.category`、`error.kind`）を使用する。JSON 出力ではフラットなキーになる。

/// ビジネスイベントを構造化ログとして出力する。
///
/// `event.kind = "business_event"` マーカーを自動付与し、
/// `tracing::info!` レベルで出力する。呼び出し側クレートは `tracing` に依存していること。
///
/// ## 必須フィールド（慣例）
///
/// - `event.category`: イベントカテゴリ（[`event::category`] の定数を使用）
/// - `event.action`: アクション名（[`event::action`] の定数を使用）
/// - `event.result`: 結果（[`event::result`] の定数を使用）
#[macro_export]
macro_rules! log_business_event {
    ($($args:tt)*) => {
        ::tracing::info!(
            event.kind = "business_event",
            $($args)*
        )
    };
}

/// イベントフィールドの定数
pub mod event {
    /// イベントカテゴリ
    pub mod category {
        pub const ACCESS_EVENT: &str = "access_event";
        pub const NOTIFICATION: &str = "notification";
    }

    /// イベントアクション
    pub mod action {
        // アクセス検知
        pub const ACCESS_EVENT_RECEIVED: &str = "access_event.received";

        // 通知
        pub const NOTIFICATION_DISPATCHED: &str = "notification.dispatched";
        pub const NOTIFICATION_SENT: &str = "notification.sent";
        pub const NOTIFICATION_FAILED: &str = "notification.failed";
    }

    /// イベント結果
    pub mod result {
        pub const SUCCESS: &str = "success";
        pub const FAILURE: &str = "failure";
    }
}

/// エラーコンテキストフィールドの定数
pub mod error {
    /// エラーカテゴリ
    pub mod category {
        /// 外部サービス呼び出し（SMTP プロバイダ）
        pub const EXTERNAL_SERVICE: &str = "external_service";
        /// 起動時設定
        pub const CONFIGURATION: &str = "configuration";
        /// 呼び出し元のリクエスト不備
        pub const REQUEST: &str = "request";
    }

    /// エラー種別
    pub mod kind {
        pub const SMTP: &str = "smtp";
        pub const MISSING_CREDENTIALS: &str = "missing_credentials";
        pub const INVALID_REQUEST_BODY: &str = "invalid_request_body";
    }
}
