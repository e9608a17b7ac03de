//! # テスト用モック送信実装
//!
//! ユースケース・ハンドラのテストで使用するインメモリの `NotificationSender`。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! sitewatch-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use sitewatch_domain::notification::{EmailMessage, NotificationError};
use tokio::sync::Notify;

use crate::notification::NotificationSender;

// ===== MockNotificationSender =====

/// 送信されたメールを記録するモック
///
/// - `with_delay`: SMTP の応答遅延を再現する
/// - `failing`: 認証失敗などの送信エラーを再現する
/// - `panicking`: 送信処理内のパニックを再現する
///
/// 失敗時・パニック時も試行は記録される。
#[derive(Clone, Default)]
pub struct MockNotificationSender {
    sent:     Arc<Mutex<Vec<EmailMessage>>>,
    attempts: Arc<Notify>,
    delay:    Option<Duration>,
    failure:  Option<String>,
    panic:    Option<String>,
}

impl MockNotificationSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// 送信完了までに `delay` だけ待つ
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// 常に `NotificationError::SendFailed(message)` を返す
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    /// 試行を記録した直後に `message` でパニックする
    pub fn panicking(mut self, message: impl Into<String>) -> Self {
        self.panic = Some(message.into());
        self
    }

    /// これまでに送信が試行されたメール
    pub fn sent_emails(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }

    /// 送信試行が `count` 件に達するまで待つ
    pub async fn wait_for_attempts(&self, count: usize) {
        loop {
            let notified = self.attempts.notified();
            if self.sent.lock().unwrap().len() >= count {
                return;
            }
            notified.await;
        }
    }
}

#[async_trait]
impl NotificationSender for MockNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.sent.lock().unwrap().push(email.clone());
        self.attempts.notify_waiters();

        if let Some(message) = &self.panic {
            panic!("{message}");
        }

        match &self.failure {
            Some(message) => Err(NotificationError::SendFailed(message.clone())),
            None => Ok(()),
        }
    }
}
