//! # 注文通知ディスパッチャ
//!
//! ホストの保存フックから呼ばれ、送信計画の実行とフラグの書き戻しを行う。
//!
//! ## 処理の流れ
//!
//! 1. 注文セクション外のレコードは何もしない
//! 2. ステータスと通知済みフラグから `NotificationPlan` を作る
//! 3. 計画に必要な入力（宛先、サイト名）をすべて検証する（不備なら何も送らずエラー）
//! 4. 通知単位ごとに送信し、すべて成功した単位だけフラグ更新を適用する
//! 5. フラグが変わっていれば 1 回の更新で書き戻す
//!
//! 送信失敗はエラーにしない。フラグが立たないので次回の保存で再試行される。

use std::sync::Arc;

use ordermail_domain::{
    DomainError,
    notification::{
        Audience,
        MailDelivery,
        MailTemplate,
        NotificationPlan,
        NotificationSettings,
        OrderMailPayload,
    },
    order::{NotificationFlags, Order},
    value_objects::Recipient,
};
use ordermail_infra::repository::OrderRepository;
use ordermail_shared::{
    event_log::{self, event},
    log_business_event,
};

use super::Mailer;
use crate::error::DispatchError;

/// 1 回の呼び出しの結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// 送信に成功したテンプレート（送信順）
    pub sent:      Vec<MailTemplate>,
    /// 送信に失敗したテンプレート（送信順）
    pub failed:    Vec<MailTemplate>,
    /// 呼び出し後の通知済みフラグ
    pub flags:     NotificationFlags,
    /// フラグを書き戻したか
    pub persisted: bool,
}

impl DispatchOutcome {
    fn unchanged(flags: NotificationFlags) -> Self {
        Self {
            sent: Vec::new(),
            failed: Vec::new(),
            flags,
            persisted: false,
        }
    }
}

/// 検証済みの宛先
struct Recipients {
    customer: Recipient,
    admin:    Option<Recipient>,
}

impl Recipients {
    fn resolve(
        plan: &NotificationPlan,
        order: &Order,
        settings: &NotificationSettings,
    ) -> Result<Self, DomainError> {
        let customer = order.customer_recipient()?;
        let admin = if plan.requires_admin() {
            Some(settings.admin_recipient(order.notification_email_recipient_name.as_deref())?)
        } else {
            None
        };
        Ok(Self { customer, admin })
    }

    fn for_audience(&self, audience: Audience) -> Option<&Recipient> {
        match audience {
            Audience::Customer => Some(&self.customer),
            Audience::Admin => self.admin.as_ref(),
        }
    }
}

/// 注文通知ディスパッチャ
///
/// ホストの保存処理と同じ流れの中で await される。並行実行はしない。
pub struct OrderNotificationDispatcher {
    mailer:         Arc<dyn Mailer>,
    orders:         Arc<dyn OrderRepository>,
    orders_section: String,
}

impl OrderNotificationDispatcher {
    pub fn new(
        mailer: Arc<dyn Mailer>,
        orders: Arc<dyn OrderRepository>,
        orders_section: impl Into<String>,
    ) -> Self {
        Self {
            mailer,
            orders,
            orders_section: orders_section.into(),
        }
    }

    /// 注文の保存後に呼び出す
    ///
    /// # エラー
    ///
    /// - 計画した送信に必要な項目が欠落・不正: [`DispatchError::InvalidInput`]
    ///   （メールは 1 通も送られない）
    /// - フラグの書き戻しに失敗: [`DispatchError::Persistence`]
    #[tracing::instrument(skip_all, fields(order_id = %order.id, status = %order.status))]
    pub async fn on_order_saved(
        &self,
        order: &Order,
        settings: &NotificationSettings,
    ) -> Result<DispatchOutcome, DispatchError> {
        if !order.belongs_to(&self.orders_section) {
            tracing::debug!(section = %order.section, "注文セクション外のため通知をスキップ");
            return Ok(DispatchOutcome::unchanged(order.flags));
        }

        let plan = NotificationPlan::for_status(order.status, &order.flags);
        if plan.is_empty() {
            tracing::debug!("送信対象の通知なし");
            return Ok(DispatchOutcome::unchanged(order.flags));
        }

        let (recipients, payload) = Self::prepare(&plan, order, settings).inspect_err(|e| {
            tracing::error!(
                error.category = event_log::error::category::INPUT,
                error.kind = event_log::error::kind::VALIDATION,
                error = %e,
                "通知に必要な項目が不足しているため送信を中止"
            );
        })?;

        let mut outcome = DispatchOutcome::unchanged(order.flags);
        for notice in plan.notices() {
            let mut all_sent = true;
            for delivery in &notice.deliveries {
                let sent = self
                    .send_one(order, delivery, &recipients, &payload)
                    .await;
                if sent {
                    outcome.sent.push(delivery.template);
                } else {
                    outcome.failed.push(delivery.template);
                    all_sent = false;
                }
            }
            if all_sent {
                notice.update.apply(&mut outcome.flags);
            }
        }

        if outcome.flags != order.flags {
            self.orders
                .update_notification_flags(&order.id, &outcome.flags)
                .await
                .inspect_err(|e| {
                    tracing::error!(
                        error.category = event_log::error::category::INFRASTRUCTURE,
                        error.kind = event_log::error::kind::PERSISTENCE,
                        error.transient = e.is_transient(),
                        error = %e,
                        "通知済みフラグの書き戻しに失敗"
                    );
                })?;
            outcome.persisted = true;

            log_business_event!(
                event.category = event::category::ORDER,
                event.action = event::action::NOTIFICATION_FLAGS_UPDATED,
                event.entity_type = event::entity_type::ORDER,
                event.entity_id = %order.id,
                event.result = event::result::SUCCESS,
                "通知済みフラグを更新"
            );
        }

        Ok(outcome)
    }

    /// 送信前に宛先と差し込みデータをそろえる
    fn prepare(
        plan: &NotificationPlan,
        order: &Order,
        settings: &NotificationSettings,
    ) -> Result<(Recipients, serde_json::Value), DomainError> {
        let recipients = Recipients::resolve(plan, order, settings)?;
        let payload = OrderMailPayload::from_order(order, settings)?.to_value();
        Ok((recipients, payload))
    }

    /// 1 通送信して結果をログに残す
    async fn send_one(
        &self,
        order: &Order,
        delivery: &MailDelivery,
        recipients: &Recipients,
        payload: &serde_json::Value,
    ) -> bool {
        let template: &str = delivery.template.into();
        let Some(recipient) = recipients.for_audience(delivery.audience) else {
            tracing::error!(template, "宛先が解決されていない配送をスキップ");
            return false;
        };

        match self.mailer.send(delivery.template, recipient, payload).await {
            Ok(()) => {
                log_business_event!(
                    event.category = event::category::NOTIFICATION,
                    event.action = event::action::NOTIFICATION_SENT,
                    event.entity_type = event::entity_type::ORDER,
                    event.entity_id = %order.id,
                    event.result = event::result::SUCCESS,
                    notification.template = template,
                    "通知メール送信成功"
                );
                true
            }
            Err(e) => {
                log_business_event!(
                    event.category = event::category::NOTIFICATION,
                    event.action = event::action::NOTIFICATION_FAILED,
                    event.entity_type = event::entity_type::ORDER,
                    event.entity_id = %order.id,
                    event.result = event::result::FAILURE,
                    notification.template = template,
                    error.category = event_log::error::category::EXTERNAL_SERVICE,
                    error.kind = event_log::error::kind::MAIL_DELIVERY,
                    error = %e,
                    "通知メール送信失敗"
                );
                false
            }
        }
    }
}
