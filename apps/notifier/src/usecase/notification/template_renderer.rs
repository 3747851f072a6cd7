//! # テンプレートレンダラー
//!
//! tera テンプレートエンジンで通知メールを HTML/plaintext 両形式で生成する。
//!
//! ## 設計方針
//!
//! - **`include_str!` によるコンパイル時埋め込み**: テンプレートはバイナリに埋め込まれる
//! - **件名パターン**: `[{site_name}] {テンプレートごとの件名}`
//! - **差し込みデータ**: キーと値のマップ（`serde_json::Value` のオブジェクト）をそのまま渡す

use ordermail_domain::{
    notification::{EmailMessage, MailTemplate, NotificationError},
    value_objects::Recipient,
};
use tera::{Context, Tera};

/// テンプレートレンダラー
///
/// tera テンプレートエンジンをラップし、[`MailTemplate`] と差し込みデータから
/// `EmailMessage` を生成する。
pub struct TemplateRenderer {
    engine: Tera,
}

impl TemplateRenderer {
    /// 新しいレンダラーインスタンスを作成
    ///
    /// `include_str!` で埋め込んだテンプレートを tera に登録する。
    pub fn new() -> Result<Self, NotificationError> {
        let mut engine = Tera::default();

        engine
            .add_raw_templates(vec![
                (
                    "new_order.html",
                    include_str!("../../../templates/mail/new_order.html"),
                ),
                (
                    "new_order.txt",
                    include_str!("../../../templates/mail/new_order.txt"),
                ),
                (
                    "new_order_admin.html",
                    include_str!("../../../templates/mail/new_order_admin.html"),
                ),
                (
                    "new_order_admin.txt",
                    include_str!("../../../templates/mail/new_order_admin.txt"),
                ),
                (
                    "order_in_progress.html",
                    include_str!("../../../templates/mail/order_in_progress.html"),
                ),
                (
                    "order_in_progress.txt",
                    include_str!("../../../templates/mail/order_in_progress.txt"),
                ),
                (
                    "order_shipped.html",
                    include_str!("../../../templates/mail/order_shipped.html"),
                ),
                (
                    "order_shipped.txt",
                    include_str!("../../../templates/mail/order_shipped.txt"),
                ),
                (
                    "order_cancelled.html",
                    include_str!("../../../templates/mail/order_cancelled.html"),
                ),
                (
                    "order_cancelled.txt",
                    include_str!("../../../templates/mail/order_cancelled.txt"),
                ),
                (
                    "form_submission.html",
                    include_str!("../../../templates/mail/form_submission.html"),
                ),
                (
                    "form_submission.txt",
                    include_str!("../../../templates/mail/form_submission.txt"),
                ),
            ])
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        Ok(Self { engine })
    }

    /// テンプレートと差し込みデータからメールメッセージを生成する
    ///
    /// # 引数
    ///
    /// - `template`: 使用するテンプレート
    /// - `recipient`: 宛先
    /// - `payload`: 差し込みデータ（`site_name` を含むオブジェクト）
    pub fn render(
        &self,
        template: MailTemplate,
        recipient: &Recipient,
        payload: &serde_json::Value,
    ) -> Result<EmailMessage, NotificationError> {
        let context = Context::from_value(payload.clone())
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;
        let template_name: &str = template.into();

        let html_body = self
            .engine
            .render(&format!("{template_name}.html"), &context)
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        let text_body = self
            .engine
            .render(&format!("{template_name}.txt"), &context)
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        let site_name = payload
            .get("site_name")
            .and_then(serde_json::Value::as_str)
            .unwrap_or_default();

        Ok(EmailMessage {
            to: recipient.email().to_string(),
            to_name: recipient.name().map(str::to_string),
            subject: format!("[{site_name}] {}", subject(template)),
            html_body,
            text_body,
        })
    }
}

/// テンプレートごとの件名
fn subject(template: MailTemplate) -> &'static str {
    match template {
        MailTemplate::NewOrder => "ご注文ありがとうございます",
        MailTemplate::NewOrderAdmin => "新しい注文が入りました",
        MailTemplate::OrderInProgress => "ご注文の準備を開始しました",
        MailTemplate::OrderShipped => "ご注文の商品を発送しました",
        MailTemplate::OrderCancelled => "ご注文がキャンセルされました",
        MailTemplate::FormSubmission => "フォームから送信がありました",
    }
}

#[cfg(test)]
mod tests {
    use ordermail_domain::value_objects::Email;
    use serde_json::json;

    use super::*;

    fn make_recipient() -> Recipient {
        Recipient::new(Email::new("yamada@example.com").unwrap(), Some("山田太郎"))
    }

    fn make_payload() -> serde_json::Value {
        json!({
            "site_name": "Tailor Shop",
            "customer_name": "山田太郎",
            "customer_email": "yamada@example.com",
            "shipping_method": "宅配便",
            "customer_address": "東京都千代田区1-1",
            "tracking_number": "1Z999",
            "tracking_url": "https://tracking.example.com/1Z999",
            "cancellation_message": "在庫切れのためキャンセルしました",
            "total": "¥12,000",
            "order_contents": "シャツ x1\nパンツ x2",
        })
    }

    #[test]
    fn newが正常に初期化される() {
        let renderer = TemplateRenderer::new();
        assert!(renderer.is_ok());
    }

    #[test]
    fn new_orderのレンダリングが正しい() {
        let renderer = TemplateRenderer::new().unwrap();

        let email = renderer
            .render(MailTemplate::NewOrder, &make_recipient(), &make_payload())
            .unwrap();

        assert_eq!(email.to, "yamada@example.com");
        assert_eq!(email.to_name.as_deref(), Some("山田太郎"));
        assert_eq!(email.subject, "[Tailor Shop] ご注文ありがとうございます");
        assert!(email.html_body.contains("山田太郎 様"));
        assert!(email.html_body.contains("パンツ x2"));
        assert!(email.text_body.contains("合計: ¥12,000"));
    }

    #[test]
    fn new_order_adminに顧客の連絡先が含まれる() {
        let renderer = TemplateRenderer::new().unwrap();

        let email = renderer
            .render(MailTemplate::NewOrderAdmin, &make_recipient(), &make_payload())
            .unwrap();

        assert_eq!(email.subject, "[Tailor Shop] 新しい注文が入りました");
        assert!(email.text_body.contains("メールアドレス: yamada@example.com"));
        assert!(email.html_body.contains("東京都千代田区1-1"));
    }

    #[test]
    fn order_shippedに追跡情報が含まれる() {
        let renderer = TemplateRenderer::new().unwrap();

        let email = renderer
            .render(MailTemplate::OrderShipped, &make_recipient(), &make_payload())
            .unwrap();

        assert_eq!(email.subject, "[Tailor Shop] ご注文の商品を発送しました");
        assert!(email.html_body.contains("配送状況を確認する"));
        assert!(email.text_body.contains("配送状況: https://tracking.example.com/1Z999"));
        assert!(email.text_body.contains("お問い合わせ番号: 1Z999"));
    }

    #[test]
    fn 追跡urlがなければリンクを出さない() {
        let renderer = TemplateRenderer::new().unwrap();
        let mut payload = make_payload();
        payload["tracking_url"] = json!("");

        let email = renderer
            .render(MailTemplate::OrderShipped, &make_recipient(), &payload)
            .unwrap();

        assert!(!email.html_body.contains("配送状況を確認する"));
    }

    #[test]
    fn order_cancelledにキャンセル理由が含まれる() {
        let renderer = TemplateRenderer::new().unwrap();

        let email = renderer
            .render(MailTemplate::OrderCancelled, &make_recipient(), &make_payload())
            .unwrap();

        assert_eq!(email.subject, "[Tailor Shop] ご注文がキャンセルされました");
        assert!(email.html_body.contains("在庫切れのためキャンセルしました"));
        assert!(email.text_body.contains("在庫切れのためキャンセルしました"));
    }

    #[test]
    fn order_in_progressのレンダリングが正しい() {
        let renderer = TemplateRenderer::new().unwrap();

        let email = renderer
            .render(MailTemplate::OrderInProgress, &make_recipient(), &make_payload())
            .unwrap();

        assert_eq!(email.subject, "[Tailor Shop] ご注文の準備を開始しました");
        assert!(email.text_body.contains("シャツ x1"));
    }

    #[test]
    fn htmlでは差し込み値がエスケープされる() {
        let renderer = TemplateRenderer::new().unwrap();
        let mut payload = make_payload();
        payload["customer_name"] = json!("<script>alert(1)</script>");

        let email = renderer
            .render(MailTemplate::NewOrder, &make_recipient(), &payload)
            .unwrap();

        assert!(!email.html_body.contains("<script>"));
        assert!(email.text_body.contains("<script>"));
    }

    #[test]
    fn form_submissionのレンダリングが正しい() {
        let renderer = TemplateRenderer::new().unwrap();
        let payload = json!({
            "site_name": "Tailor Shop",
            "name": "鈴木花子",
            "email": "suzuki@example.com",
            "message": "採寸の予約をしたいです",
        });

        let email = renderer
            .render(MailTemplate::FormSubmission, &make_recipient(), &payload)
            .unwrap();

        assert_eq!(email.subject, "[Tailor Shop] フォームから送信がありました");
        assert!(email.text_body.contains("採寸の予約をしたいです"));
    }

    #[test]
    fn 差し込みデータが不足していればtemplate_failed() {
        let renderer = TemplateRenderer::new().unwrap();

        let result = renderer.render(
            MailTemplate::NewOrder,
            &make_recipient(),
            &json!({ "site_name": "Tailor Shop" }),
        );

        assert!(matches!(result, Err(NotificationError::TemplateFailed(_))));
    }
}
