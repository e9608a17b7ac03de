//! # メールディスパッチャ
//!
//! アクセス検知イベントからメールを生成し、`NotificationSender` で送信する。
//!
//! ## 設計方針
//!
//! - **fire-and-forget**: [`EmailDispatcher::dispatch`] はタスクを起動するだけで、
//!   `JoinHandle` を保持しない。配信は保証しない
//! - **失敗の封じ込め**: 送信エラーはログに出して握りつぶす。リトライしない
//! - **同時実行数の上限なし**: リクエストごとに 1 タスク。共有する可変状態はない

use std::sync::Arc;

use sitewatch_domain::{access_event::AccessEvent, notification::AccessNotification};
use sitewatch_infra::NotificationSender;
use sitewatch_shared::{
    event_log::{error as log_error, event},
    log_business_event,
};
use tracing::Instrument;

/// メールディスパッチャ
///
/// 送信実装と宛先だけを持つ不変の値。タスクごとに複製して使う。
#[derive(Clone)]
pub struct EmailDispatcher {
    sender:    Arc<dyn NotificationSender>,
    recipient: String,
}

impl EmailDispatcher {
    pub fn new(sender: Arc<dyn NotificationSender>, recipient: impl Into<String>) -> Self {
        Self {
            sender,
            recipient: recipient.into(),
        }
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    /// 送信タスクを起動して即座に戻る
    ///
    /// tokio ランタイム上で呼ぶこと。タスク内のパニックもランタイムが封じ込める。
    pub fn dispatch(&self, access_event: AccessEvent) {
        let dispatcher = self.clone();

        // JoinHandle は捨てる
        tokio::spawn(
            async move {
                dispatcher.deliver(access_event).await;
            }
            .in_current_span(),
        );

        tracing::debug!(recipient = %self.recipient, "通知メールの送信タスクを起動しました");
    }

    /// 1 件のイベントについて 1 回だけ送信を試みる
    ///
    /// 結果はログにのみ出力し、呼び出し元には返さない。
    pub async fn deliver(&self, access_event: AccessEvent) {
        let notification = AccessNotification::new(access_event);
        let email = notification.render(&self.recipient);
        let domain = notification.event().domain_or_placeholder();
        let client_ip = notification.event().client_ip_or_placeholder();

        match self.sender.send_email(&email).await {
            Ok(()) => {
                log_business_event!(
                    event.category = event::category::NOTIFICATION,
                    event.action = event::action::NOTIFICATION_SENT,
                    event.result = event::result::SUCCESS,
                    notification.recipient = %self.recipient,
                    access.client_ip = %client_ip,
                    access.domain = %domain,
                    "通知メール送信成功"
                );
            }
            Err(e) => {
                tracing::error!(
                    error.category = log_error::category::EXTERNAL_SERVICE,
                    error.kind = log_error::kind::SMTP,
                    error = %e,
                    notification.recipient = %self.recipient,
                    notification.subject = %email.subject,
                    access.client_ip = %client_ip,
                    access.domain = %domain,
                    "通知メールの送信に失敗しました"
                );
                log_business_event!(
                    event.category = event::category::NOTIFICATION,
                    event.action = event::action::NOTIFICATION_FAILED,
                    event.result = event::result::FAILURE,
                    notification.recipient = %self.recipient,
                    access.domain = %domain,
                    "通知メール送信失敗"
                );
            }
        }
    }
}
