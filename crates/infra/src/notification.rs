//! # 通知送信
//!
//! メール通知の送信を担当するインフラストラクチャモジュール。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: `NotificationSender` trait でメール送信を抽象化
//! - **3 つの実装**: SMTP（Mailpit / 自前リレー）、SES（本番用）、Noop（通知無効化）
//! - **設定による切替**: `NOTIFICATION_BACKEND` でランタイム選択（notifier の config）
//!
//! 送信のリトライやバックオフは各トランスポートに任せ、ここでは成功 / 失敗のみを返す。

mod noop;
mod ses;
mod smtp;

use async_trait::async_trait;
pub use noop::NoopNotificationSender;
use ordermail_domain::notification::{EmailMessage, NotificationError};
pub use ses::SesNotificationSender;
pub use smtp::SmtpNotificationSender;

/// メール送信トレイト
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// メールを送信する
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError>;
}

/// 宛先を `表示名 <address>` 形式に整形する
///
/// 表示名がない場合はアドレスのみ。表示名は RFC 5322 の quoted-string にする。
pub(crate) fn format_mailbox(email: &EmailMessage) -> String {
    match email.to_name.as_deref() {
        Some(name) => {
            let escaped = name.replace('\\', "\\\\").replace('"', "\\\"");
            format!("\"{escaped}\" <{}>", email.to)
        }
        None => email.to.clone(),
    }
}
