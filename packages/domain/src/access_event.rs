//! # アクセス検知イベント
//!
//! `POST /notify` で受け取るペイロードを表現する。
//!
//! ## ライフサイクル
//!
//! リクエストボディから生成され、メール本文のレンダリングで一度だけ消費されて破棄される。
//! 永続化も識別子も持たない。
//!
//! ## 抽出ルール
//!
//! | JSON の値 | 扱い |
//! |-----------|------|
//! | 文字列 | そのまま採用 |
//! | `null` / キーなし | 欠落（`None`） |
//! | 数値・真偽値・配列・オブジェクト | コンパクトな JSON 表現を採用 |
//!
//! ボディがオブジェクト以外（配列やスカラー）の場合は全フィールドが欠落となる。

use serde_json::Value;

/// 欠落フィールドをメール本文に埋め込む際のプレースホルダ
pub const MISSING_FIELD_PLACEHOLDER: &str = "None";

/// アクセス検知イベント
///
/// すべてのフィールドは任意。形式の検証は行わない。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessEvent {
    /// アクセス元 IP アドレス
    pub client_ip: Option<String>,
    /// アクセス先ドメイン
    pub domain:    Option<String>,
    /// 検知時刻（送信元のフォーマットのまま）
    pub timestamp: Option<String>,
}

impl AccessEvent {
    pub fn new(
        client_ip: Option<String>,
        domain: Option<String>,
        timestamp: Option<String>,
    ) -> Self {
        Self {
            client_ip,
            domain,
            timestamp,
        }
    }

    /// パース済みの JSON からイベントを組み立てる
    ///
    /// 失敗しない。想定外の形状は欠落または JSON 文字列として扱う。
    pub fn from_json(body: &Value) -> Self {
        let Some(object) = body.as_object() else {
            return Self::default();
        };

        let field = |key: &str| object.get(key).and_then(text_of);

        Self {
            client_ip: field("client_ip"),
            domain:    field("domain"),
            timestamp: field("timestamp"),
        }
    }

    /// 本文用のアクセス元 IP（欠落時はプレースホルダ）
    pub fn client_ip_or_placeholder(&self) -> &str {
        or_placeholder(self.client_ip.as_deref())
    }

    /// 本文用のドメイン（欠落時はプレースホルダ）
    pub fn domain_or_placeholder(&self) -> &str {
        or_placeholder(self.domain.as_deref())
    }

    /// 本文用の検知時刻（欠落時はプレースホルダ）
    pub fn timestamp_or_placeholder(&self) -> &str {
        or_placeholder(self.timestamp.as_deref())
    }
}

fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn or_placeholder(value: Option<&str>) -> &str {
    value.unwrap_or(MISSING_FIELD_PLACEHOLDER)
}
