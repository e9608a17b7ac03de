//! # 通知
//!
//! アクセス検知メールに関するドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **fire-and-forget**: 通知送信の失敗は HTTP レスポンスに影響しない
//! - **固定テンプレート**: 件名・本文は固定のプレーンテキスト。テンプレートエンジンは使わない
//! - **送信との分離**: メール生成（ここ）と送信（`NotificationSender`）は分離する

use thiserror::Error;

use crate::access_event::AccessEvent;

/// アクセス検知メールの件名
pub const ACCESS_DETECTED_SUBJECT: &str = "Website Access Detected";

/// 通知送信エラー
#[derive(Debug, Error)]
pub enum NotificationError {
    /// 送信元・宛先アドレスが不正または未設定
    #[error("メールアドレスが不正です: {0}")]
    InvalidAddress(String),

    /// メッセージの構築に失敗
    #[error("メッセージ構築に失敗: {0}")]
    BuildFailed(String),

    /// メール送信に失敗（接続・TLS・認証・SMTP 応答）
    #[error("メール送信に失敗: {0}")]
    SendFailed(String),
}

/// メールメッセージ
///
/// レンダリングの出力。`NotificationSender` に渡される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// 送信先メールアドレス
    pub to:        String,
    /// 件名
    pub subject:   String,
    /// プレーンテキスト本文
    pub text_body: String,
}

/// アクセス検知通知
///
/// 1 件の [`AccessEvent`] から 1 通のメールを生成する。
#[derive(Debug, Clone)]
pub struct AccessNotification {
    event: AccessEvent,
}

impl AccessNotification {
    pub fn new(event: AccessEvent) -> Self {
        Self { event }
    }

    pub fn event(&self) -> &AccessEvent {
        &self.event
    }

    /// 宛先を指定してメールを生成する
    ///
    /// 欠落フィールドはプレースホルダで埋めるため失敗しない。
    pub fn render(&self, to: &str) -> EmailMessage {
        let text_body = format!(
            "Website access detected\n\
             \n\
             Client IP: {}\n\
             Domain: {}\n\
             Time: {}\n",
            self.event.client_ip_or_placeholder(),
            self.event.domain_or_placeholder(),
            self.event.timestamp_or_placeholder(),
        );

        EmailMessage {
            to: to.to_string(),
            subject: ACCESS_DETECTED_SUBJECT.to_string(),
            text_body,
        }
    }
}
