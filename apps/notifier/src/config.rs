//! # Notifier 設定
//!
//! 環境変数から通知ディスパッチャの設定を読み込む。

use std::env;

use ordermail_domain::order::DEFAULT_ORDERS_SECTION;

use crate::error::ConfigError;

/// 通知ディスパッチャの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifierConfig {
    /// 通知対象とする注文セクションのハンドル
    pub orders_section: String,
    /// 通知設定
    pub notification:   NotificationConfig,
}

/// 送信バックエンド
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum NotificationBackend {
    /// Mailpit（開発）/ SMTP サーバー経由で送信
    Smtp,
    /// Amazon SES v2 経由で送信（本番）
    Ses,
    /// 送信しない（ログ出力のみ）
    Noop,
}

/// 通知機能の設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationConfig {
    /// 送信バックエンド
    pub backend:      NotificationBackend,
    /// SMTP ホスト（backend=smtp の場合に使用）
    pub smtp_host:    String,
    /// SMTP ポート（backend=smtp の場合に使用）
    pub smtp_port:    u16,
    /// 送信元メールアドレス
    pub from_address: String,
}

impl NotifierConfig {
    /// 環境変数から設定を読み込む
    ///
    /// `.env` ファイルが存在すれば先に読み込む。
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 任意のキー参照関数から設定を読み込む
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            orders_section: lookup("ORDERS_SECTION")
                .unwrap_or_else(|| DEFAULT_ORDERS_SECTION.to_string()),
            notification:   NotificationConfig::from_lookup(&lookup)?,
        })
    }
}

impl NotificationConfig {
    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let backend = match lookup("NOTIFICATION_BACKEND") {
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
                key: "NOTIFICATION_BACKEND",
                value,
            })?,
            None => NotificationBackend::Noop,
        };

        let smtp_port = match lookup("SMTP_PORT") {
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
                key: "SMTP_PORT",
                value,
            })?,
            None => 1025,
        };

        Ok(Self {
            backend,
            smtp_host: lookup("SMTP_HOST").unwrap_or_else(|| "localhost".to_string()),
            smtp_port,
            from_address: lookup("NOTIFICATION_FROM_ADDRESS")
                .unwrap_or_else(|| "noreply@ordermail.example.com".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn 未設定ならデフォルト値を使う() {
        let config = NotifierConfig::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(
            config,
            NotifierConfig {
                orders_section: "Content\\Orders".to_string(),
                notification:   NotificationConfig {
                    backend:      NotificationBackend::Noop,
                    smtp_host:    "localhost".to_string(),
                    smtp_port:    1025,
                    from_address: "noreply@ordermail.example.com".to_string(),
                },
            }
        );
    }

    #[test]
    fn 環境変数の値で上書きされる() {
        let config = NotifierConfig::from_lookup(lookup_from(&[
            ("NOTIFICATION_BACKEND", "smtp"),
            ("SMTP_HOST", "mailpit"),
            ("SMTP_PORT", "2525"),
            ("NOTIFICATION_FROM_ADDRESS", "shop@example.com"),
            ("ORDERS_SECTION", "Shop\\Orders"),
        ]))
        .unwrap();

        assert_eq!(config.orders_section, "Shop\\Orders");
        assert_eq!(config.notification.backend, NotificationBackend::Smtp);
        assert_eq!(config.notification.smtp_host, "mailpit");
        assert_eq!(config.notification.smtp_port, 2525);
        assert_eq!(config.notification.from_address, "shop@example.com");
    }

    #[test]
    fn 不正なバックエンドはエラー() {
        let result = NotifierConfig::from_lookup(lookup_from(&[("NOTIFICATION_BACKEND", "sendgrid")]));

        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue {
                key: "NOTIFICATION_BACKEND",
                ..
            })
        ));
    }

    #[test]
    fn 不正なポート番号はエラー() {
        let result = NotifierConfig::from_lookup(lookup_from(&[("SMTP_PORT", "70000")]));

        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue {
                key: "SMTP_PORT",
                ..
            })
        ));
    }
}
