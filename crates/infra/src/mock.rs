//! # テスト用モック
//!
//! ユースケーステストで使用するインメモリ実装。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! ordermail-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::{
    collections::{HashMap, HashSet},
    sync::{
        Arc,
        Mutex,
        atomic::{AtomicBool, Ordering},
    },
};

use async_trait::async_trait;
use ordermail_domain::{
    notification::{EmailMessage, NotificationError},
    order::{NotificationFlags, Order, OrderId},
};

use crate::{error::InfraError, notification::NotificationSender, repository::OrderRepository};

// ===== MockNotificationSender =====

/// 送信したメールを記録する送信モック
///
/// `fail_for()` で登録した宛先への送信は `SendFailed` を返す。
#[derive(Clone, Default)]
pub struct MockNotificationSender {
    sent:    Arc<Mutex<Vec<EmailMessage>>>,
    failing: Arc<Mutex<HashSet<String>>>,
}

impl MockNotificationSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// 指定アドレスへの送信を失敗させる
    pub fn fail_for(&self, address: &str) {
        self.failing.lock().unwrap().insert(address.to_string());
    }

    /// 指定アドレスへの送信失敗を解除する
    pub fn recover(&self, address: &str) {
        self.failing.lock().unwrap().remove(address);
    }

    /// 送信に成功したメール
    pub fn sent_emails(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationSender for MockNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError> {
        if self.failing.lock().unwrap().contains(&email.to) {
            return Err(NotificationError::SendFailed(format!(
                "モック送信失敗: {}",
                email.to
            )));
        }
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

// ===== MockOrderRepository =====

/// 注文ごとのフラグを保持するリポジトリモック
#[derive(Clone, Default)]
pub struct MockOrderRepository {
    flags:   Arc<Mutex<HashMap<OrderId, NotificationFlags>>>,
    updates: Arc<Mutex<Vec<(OrderId, NotificationFlags)>>>,
    failing: Arc<AtomicBool>,
}

impl MockOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注文を登録する
    pub fn add_order(&self, order: &Order) {
        self.flags
            .lock()
            .unwrap()
            .insert(order.id.clone(), order.flags);
    }

    /// 保存されているフラグ
    pub fn flags(&self, id: &OrderId) -> Option<NotificationFlags> {
        self.flags.lock().unwrap().get(id).copied()
    }

    /// 呼び出された更新の履歴
    pub fn updates(&self) -> Vec<(OrderId, NotificationFlags)> {
        self.updates.lock().unwrap().clone()
    }

    /// 以降の更新を失敗させる
    pub fn fail_updates(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl OrderRepository for MockOrderRepository {
    async fn update_notification_flags(
        &self,
        id: &OrderId,
        flags: &NotificationFlags,
    ) -> Result<(), InfraError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(InfraError::unavailable("モック更新失敗"));
        }

        let mut stored = self.flags.lock().unwrap();
        let Some(current) = stored.get_mut(id) else {
            return Err(InfraError::not_found("Order", id.to_string()));
        };
        *current = *flags;
        self.updates.lock().unwrap().push((id.clone(), *flags));
        Ok(())
    }
}
