//! # メーラー
//!
//! ディスパッチャが依存する「テンプレートメールを送る」能力を定義する。
//!
//! ## 設計方針
//!
//! - **依存性注入**: ディスパッチャは [`Mailer`] trait にのみ依存する
//! - **標準実装**: [`TemplateMailer`] は `TemplateRenderer` で本文を生成し、
//!   `NotificationSender` で送信する

use std::sync::Arc;

use async_trait::async_trait;
use ordermail_domain::{
    notification::{MailTemplate, NotificationError},
    value_objects::Recipient,
};
use ordermail_infra::notification::NotificationSender;

use super::TemplateRenderer;

/// テンプレートメールの送信トレイト
#[async_trait]
pub trait Mailer: Send + Sync {
    /// テンプレートに差し込みデータを適用して宛先に送る
    async fn send(
        &self,
        template: MailTemplate,
        recipient: &Recipient,
        payload: &serde_json::Value,
    ) -> Result<(), NotificationError>;
}

/// tera テンプレート + 送信実装によるメーラー
pub struct TemplateMailer {
    renderer: TemplateRenderer,
    sender:   Arc<dyn NotificationSender>,
}

impl TemplateMailer {
    pub fn new(renderer: TemplateRenderer, sender: Arc<dyn NotificationSender>) -> Self {
        Self { renderer, sender }
    }
}

#[async_trait]
impl Mailer for TemplateMailer {
    async fn send(
        &self,
        template: MailTemplate,
        recipient: &Recipient,
        payload: &serde_json::Value,
    ) -> Result<(), NotificationError> {
        let email = self.renderer.render(template, recipient, payload)?;
        self.sender.send_email(&email).await
    }
}

#[cfg(test)]
mod tests {
    use ordermail_domain::value_objects::Email;
    use ordermail_infra::mock::MockNotificationSender;
    use serde_json::json;

    use super::*;

    fn make_mailer(sender: MockNotificationSender) -> TemplateMailer {
        TemplateMailer::new(TemplateRenderer::new().unwrap(), Arc::new(sender))
    }

    fn make_recipient() -> Recipient {
        Recipient::new(Email::new("suzuki@example.com").unwrap(), None)
    }

    #[tokio::test]
    async fn レンダリングしたメールを送信実装に渡す() {
        let sender = MockNotificationSender::new();
        let mailer = make_mailer(sender.clone());
        let payload = json!({
            "site_name": "Tailor Shop",
            "name": "鈴木花子",
            "email": "suzuki@example.com",
            "message": "採寸の予約をしたいです",
        });

        mailer
            .send(MailTemplate::FormSubmission, &make_recipient(), &payload)
            .await
            .unwrap();

        let sent = sender.sent_emails();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "suzuki@example.com");
        assert_eq!(sent[0].subject, "[Tailor Shop] フォームから送信がありました");
    }

    #[tokio::test]
    async fn レンダリングに失敗したら送信しない() {
        let sender = MockNotificationSender::new();
        let mailer = make_mailer(sender.clone());

        let result = mailer
            .send(MailTemplate::NewOrder, &make_recipient(), &json!({}))
            .await;

        assert!(matches!(result, Err(NotificationError::TemplateFailed(_))));
        assert!(sender.sent_emails().is_empty());
    }

    #[tokio::test]
    async fn 送信失敗はそのまま返す() {
        let sender = MockNotificationSender::new();
        sender.fail_for("suzuki@example.com");
        let mailer = make_mailer(sender);
        let payload = json!({
            "site_name": "Tailor Shop",
            "name": "鈴木花子",
            "email": "suzuki@example.com",
            "message": "採寸の予約をしたいです",
        });

        let result = mailer
            .send(MailTemplate::FormSubmission, &make_recipient(), &payload)
            .await;

        assert!(matches!(result, Err(NotificationError::SendFailed(_))));
    }
}
