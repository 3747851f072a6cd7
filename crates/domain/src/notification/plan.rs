//! 送信計画
//!
//! 保存された注文のステータスとフラグから、今回の保存で送るメールと
//! 送信成功時に更新するフラグを決める。
//!
//! | 条件 | 送信 | 成功時の更新 |
//! |------|------|-------------|
//! | ステータスの通知が未送信 | 顧客宛て（新規注文は + 管理者宛て） | 送信済みにする |
//! | 再送指示あり・通知は送信済み | 顧客宛てのみ | 再送指示を解除 |
//! | 再送指示あり・通知は未送信 | 上の「未送信」と同じ 1 回分 | 送信済み + 再送指示を解除 |
//!
//! 再送は新規注文でも管理者宛てを送らない。

use super::MailTemplate;
use crate::order::{NotificationFlags, OrderStatus};

/// 宛先の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    /// 注文した顧客
    Customer,
    /// サイト管理者
    Admin,
}

/// 1 通分の配送指示
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MailDelivery {
    pub template: MailTemplate,
    pub audience: Audience,
}

/// 送信成功時に適用するフラグ更新
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagUpdate {
    /// 送信済みにするステータス
    pub mark_sent:    Option<OrderStatus>,
    /// 再送指示を解除するか
    pub clear_resend: bool,
}

impl FlagUpdate {
    /// フラグに更新を適用する
    pub fn apply(&self, flags: &mut NotificationFlags) {
        if let Some(status) = self.mark_sent {
            flags.mark_sent(status);
        }
        if self.clear_resend {
            flags.resend_email = false;
        }
    }
}

/// 通知単位
///
/// 含まれる配送がすべて成功したときだけ `update` を適用する。
/// 1 通でも失敗すればフラグは据え置き、次回の保存で通知単位ごと再試行される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub deliveries: Vec<MailDelivery>,
    pub update:     FlagUpdate,
}

/// 送信計画
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NotificationPlan {
    notices: Vec<Notice>,
}

impl NotificationPlan {
    /// ステータスと通知済みフラグから送信計画を作る
    pub fn for_status(status: OrderStatus, flags: &NotificationFlags) -> Self {
        let customer = MailDelivery {
            template: status.customer_template(),
            audience: Audience::Customer,
        };

        let notice = if !flags.is_sent(status) {
            let mut deliveries = vec![customer];
            deliveries.extend(status.admin_template().map(|template| MailDelivery {
                template,
                audience: Audience::Admin,
            }));
            Some(Notice {
                deliveries,
                update: FlagUpdate {
                    mark_sent:    Some(status),
                    clear_resend: flags.resend_email,
                },
            })
        } else if flags.resend_email {
            Some(Notice {
                deliveries: vec![customer],
                update:     FlagUpdate {
                    mark_sent:    None,
                    clear_resend: true,
                },
            })
        } else {
            None
        };

        Self {
            notices: notice.into_iter().collect(),
        }
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// 計画に含まれる全配送
    pub fn deliveries(&self) -> impl Iterator<Item = &MailDelivery> {
        self.notices.iter().flat_map(|n| n.deliveries.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }

    /// 管理者宛ての配送を含むか
    pub fn requires_admin(&self) -> bool {
        self.deliveries().any(|d| d.audience == Audience::Admin)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use strum::IntoEnumIterator;

    use super::*;

    fn flags(sent: Option<OrderStatus>, resend: bool) -> NotificationFlags {
        let mut flags = NotificationFlags {
            resend_email: resend,
            ..Default::default()
        };
        if let Some(status) = sent {
            flags.mark_sent(status);
        }
        flags
    }

    fn templates(plan: &NotificationPlan) -> Vec<(MailTemplate, Audience)> {
        plan.deliveries().map(|d| (d.template, d.audience)).collect()
    }

    #[test]
    fn 未送信の新規注文は顧客と管理者に送る() {
        let plan = NotificationPlan::for_status(OrderStatus::New, &flags(None, false));

        assert_eq!(
            templates(&plan),
            vec![
                (MailTemplate::NewOrder, Audience::Customer),
                (MailTemplate::NewOrderAdmin, Audience::Admin),
            ]
        );
        assert!(plan.requires_admin());
        assert_eq!(
            plan.notices()[0].update,
            FlagUpdate {
                mark_sent:    Some(OrderStatus::New),
                clear_resend: false,
            }
        );
    }

    #[rstest]
    #[case(OrderStatus::InProgress, MailTemplate::OrderInProgress)]
    #[case(OrderStatus::Shipped, MailTemplate::OrderShipped)]
    #[case(OrderStatus::Cancelled, MailTemplate::OrderCancelled)]
    fn 未送信のステータスは顧客にだけ送る(
        #[case] status: OrderStatus,
        #[case] template: MailTemplate,
    ) {
        let plan = NotificationPlan::for_status(status, &flags(None, false));

        assert_eq!(templates(&plan), vec![(template, Audience::Customer)]);
        assert!(!plan.requires_admin());
    }

    #[test]
    fn 送信済みで再送指示がなければ何も送らない() {
        for status in OrderStatus::iter() {
            let plan = NotificationPlan::for_status(status, &flags(Some(status), false));
            assert!(plan.is_empty(), "{status} で送信計画が空でない");
        }
    }

    #[test]
    fn 他ステータスの送信済みフラグは判断に影響しない() {
        let plan = NotificationPlan::for_status(
            OrderStatus::Shipped,
            &flags(Some(OrderStatus::New), false),
        );

        assert_eq!(
            templates(&plan),
            vec![(MailTemplate::OrderShipped, Audience::Customer)]
        );
    }

    #[test]
    fn 再送は新規注文でも顧客宛てのみ() {
        let plan = NotificationPlan::for_status(
            OrderStatus::New,
            &flags(Some(OrderStatus::New), true),
        );

        assert_eq!(
            templates(&plan),
            vec![(MailTemplate::NewOrder, Audience::Customer)]
        );
        assert_eq!(
            plan.notices()[0].update,
            FlagUpdate {
                mark_sent:    None,
                clear_resend: true,
            }
        );
    }

    #[rstest]
    #[case(true)]
    #[case(false)]
    fn 再送指示があれば発送済みメールをちょうど1通送る(#[case] already_sent: bool) {
        let sent = already_sent.then_some(OrderStatus::Shipped);
        let current = flags(sent, true);

        let plan = NotificationPlan::for_status(OrderStatus::Shipped, &current);

        assert_eq!(
            templates(&plan),
            vec![(MailTemplate::OrderShipped, Audience::Customer)]
        );

        let mut updated = current;
        for notice in plan.notices() {
            notice.update.apply(&mut updated);
        }
        assert!(updated.sent_tracking);
        assert!(!updated.resend_email);
    }
}
