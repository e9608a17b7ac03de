//! # アプリケーション設定
//!
//! 環境変数からリレーサーバーの設定を読み込む。
//! 起動時に一度だけ構築し、SMTP 送信・ディスパッチャに注入する。
//!
//! ## 環境変数一覧
//!
//! | 変数名 | 必須 | デフォルト | 説明 |
//! |--------|------|------------|------|
//! | `PORT` | No | `5000` | 待ち受けポート番号 |
//! | `EMAIL_FROM` | No※ | - | SMTP 認証ユーザー名 兼 送信元アドレス |
//! | `EMAIL_PASS` | No※ | - | SMTP 認証パスワード（アプリパスワード） |
//!
//! ※ 未設定でも起動はする。起動時にエラーログを出し、以降の送信はすべて失敗する。
//!
//! 宛先アドレスと SMTP 接続先は実行時に変更できない定数として持つ。

use std::{
    env,
    fmt,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    time::Duration,
};

use sitewatch_infra::{SmtpCredentials, SmtpSettings};
use sitewatch_shared::event_log::error as log_error;
use thiserror::Error;

/// 待ち受けポートのデフォルト値
pub const DEFAULT_PORT: u16 = 5000;

/// 通知メールの宛先（固定）
pub const NOTIFICATION_RECIPIENT: &str = "security-alerts@example.com";

/// SMTP プロバイダのホスト
pub const SMTP_HOST: &str = "smtp.gmail.com";

/// SMTP プロバイダのポート（暗黙 TLS）
pub const SMTP_PORT: u16 = 465;

/// SMTP の接続・認証タイムアウト
pub const SMTP_TIMEOUT: Duration = Duration::from_secs(10);

/// 設定読み込みエラー
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `PORT` がポート番号として解釈できない
    #[error("PORT は有効なポート番号である必要があります: {0:?}")]
    InvalidPort(String),
}

/// リレーサーバーの設定
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// バインドアドレス（`0.0.0.0` 固定）
    pub host:         IpAddr,
    /// ポート番号
    pub port:         u16,
    /// 通知設定
    pub notification: NotificationConfig,
}

/// メール通知の設定
#[derive(Clone)]
pub struct NotificationConfig {
    /// SMTP 認証ユーザー名 兼 送信元アドレス
    pub email_from:   Option<String>,
    /// SMTP 認証パスワード
    pub email_pass:   Option<String>,
    /// 宛先アドレス
    pub recipient:    String,
    /// SMTP ホスト
    pub smtp_host:    String,
    /// SMTP ポート
    pub smtp_port:    u16,
    /// SMTP タイムアウト
    pub smtp_timeout: Duration,
}

impl RelayConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 任意のキー参照関数から設定を読み込む
    ///
    /// 空文字列の値は未設定として扱う。
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port,
            notification: NotificationConfig {
                email_from:   lookup("EMAIL_FROM"),
                email_pass:   lookup("EMAIL_PASS"),
                recipient:    NOTIFICATION_RECIPIENT.to_string(),
                smtp_host:    SMTP_HOST.to_string(),
                smtp_port:    SMTP_PORT,
                smtp_timeout: SMTP_TIMEOUT,
            },
        })
    }

    /// 待ち受けアドレス
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl NotificationConfig {
    /// `EMAIL_FROM` と `EMAIL_PASS` の両方が設定されているか
    pub fn has_credentials(&self) -> bool {
        self.email_from.is_some() && self.email_pass.is_some()
    }

    /// 起動時に認証情報の有無をログに出す
    ///
    /// 未設定でも起動は止めない。以降の送信がすべて失敗することをエラーログで知らせる。
    pub fn log_credential_status(&self) {
        if self.has_credentials() {
            tracing::info!(
                smtp.host = %self.smtp_host,
                smtp.port = self.smtp_port,
                notification.recipient = %self.recipient,
                "SMTP 認証情報を読み込みました"
            );
        } else {
            tracing::error!(
                error.category = log_error::category::CONFIGURATION,
                error.kind = log_error::kind::MISSING_CREDENTIALS,
                email_from.set = self.email_from.is_some(),
                email_pass.set = self.email_pass.is_some(),
                "EMAIL_FROM / EMAIL_PASS が設定されていません。通知メールはすべて送信に失敗します"
            );
        }
    }

    /// SMTP 送信実装に渡す接続設定を組み立てる
    pub fn smtp_settings(&self) -> SmtpSettings {
        let credentials = match (&self.email_from, &self.email_pass) {
            (Some(username), Some(password)) => Some(SmtpCredentials::new(username, password)),
            _ => None,
        };

        SmtpSettings {
            host: self.smtp_host.clone(),
            port: self.smtp_port,
            timeout: self.smtp_timeout,
            from_address: self.email_from.clone(),
            credentials,
        }
    }
}

// EMAIL_PASS をログに出さない
impl fmt::Debug for NotificationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationConfig")
            .field("email_from", &self.email_from)
            .field("email_pass", &self.email_pass.as_ref().map(|_| "[REDACTED]"))
            .field("recipient", &self.recipient)
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("smtp_timeout", &self.smtp_timeout)
            .finish()
    }
}
