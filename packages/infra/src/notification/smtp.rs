//! SMTP 通知送信実装
//!
//! lettre の `AsyncSmtpTransport` を使用してメールを送信する。
//! 接続は暗黙 TLS（接続直後から TLS、SMTPS）で行い、STARTTLS は使わない。

use std::{fmt, time::Duration};

use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport,
    AsyncTransport,
    Tokio1Executor,
    message::{Mailbox, Message, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use sitewatch_domain::notification::{EmailMessage, NotificationError};

use super::NotificationSender;

/// SMTP 認証情報
#[derive(Clone)]
pub struct SmtpCredentials {
    pub username: String,
    pub password: String,
}

impl SmtpCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

// パスワードをログに出さない
impl fmt::Debug for SmtpCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpCredentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// SMTP 接続設定
#[derive(Debug, Clone)]
pub struct SmtpSettings {
    /// SMTP サーバーのホスト名（例: "smtp.gmail.com"）
    pub host:         String,
    /// SMTP サーバーのポート番号（暗黙 TLS の場合は 465）
    pub port:         u16,
    /// 接続・各コマンドのタイムアウト
    pub timeout:      Duration,
    /// 送信元メールアドレス。未設定の場合、送信は毎回失敗する
    pub from_address: Option<String>,
    /// 認証情報。未設定の場合は認証なしで送信を試みる
    pub credentials:  Option<SmtpCredentials>,
}

/// SMTP 通知送信
///
/// `lettre::AsyncSmtpTransport<Tokio1Executor>` をラップする。
/// 送信ごとに新しい SMTP セッションを張る。
///
/// lettre のタイムアウトは TLS ハンドシェイクとグリーティング待ちを含まないため、
/// 送信全体を `tokio::time::timeout` でも囲む。
pub struct SmtpNotificationSender {
    transport:    AsyncSmtpTransport<Tokio1Executor>,
    from_address: Option<String>,
    timeout:      Duration,
}

impl SmtpNotificationSender {
    /// 新しい SMTP 送信インスタンスを作成
    ///
    /// 接続はまだ行わない。TLS パラメータの構築に失敗した場合のみエラーを返す。
    pub fn new(settings: SmtpSettings) -> Result<Self, NotificationError> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)
            .map_err(|e| NotificationError::BuildFailed(format!("TLS 設定の構築に失敗: {e}")))?
            .port(settings.port)
            .timeout(Some(settings.timeout));

        if let Some(credentials) = settings.credentials {
            builder = builder.credentials(Credentials::new(
                credentials.username,
                credentials.password,
            ));
        }

        Ok(Self {
            transport:    builder.build(),
            from_address: settings.from_address,
            timeout:      settings.timeout,
        })
    }

    /// ドメインのメールメッセージを lettre の `Message` に変換する
    fn build_message(&self, email: &EmailMessage) -> Result<Message, NotificationError> {
        let from: Mailbox = self
            .from_address
            .as_deref()
            .ok_or_else(|| {
                NotificationError::InvalidAddress("送信元アドレスが未設定です".to_string())
            })?
            .parse()
            .map_err(|e| NotificationError::InvalidAddress(format!("送信元アドレス不正: {e}")))?;

        let to: Mailbox = email
            .to
            .parse()
            .map_err(|e| NotificationError::InvalidAddress(format!("宛先アドレス不正: {e}")))?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(&email.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(email.text_body.clone())
            .map_err(|e| NotificationError::BuildFailed(e.to_string()))
    }
}

#[async_trait]
impl NotificationSender for SmtpNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError> {
        let message = self.build_message(email)?;

        tracing::debug!(to = %email.to, subject = %email.subject, "SMTP 送信を開始します");

        tokio::time::timeout(self.timeout, self.transport.send(message))
            .await
            .map_err(|_| {
                NotificationError::SendFailed(format!(
                    "SMTP 送信がタイムアウトしました（{:?}）",
                    self.timeout
                ))
            })?
            .map_err(|e| NotificationError::SendFailed(format!("SMTP 送信失敗: {e}")))?;

        tracing::debug!(to = %email.to, "SMTP 送信が完了しました");

        Ok(())
    }
}
