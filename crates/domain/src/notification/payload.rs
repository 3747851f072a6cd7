//! 注文メールの差し込みデータ

use serde::Serialize;

use super::NotificationSettings;
use crate::{DomainError, order::Order};

/// 注文メールの差し込みデータ
///
/// 全テンプレート共通のキーと値。未入力の任意項目は空文字列になる。
/// `order_contents` は内部識別子の行を除去済み。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderMailPayload {
    pub site_name: String,
    pub customer_name: String,
    pub customer_email: String,
    pub shipping_method: String,
    pub customer_address: String,
    pub tracking_number: String,
    pub tracking_url: String,
    pub cancellation_message: String,
    pub total: String,
    pub order_contents: String,
}

impl OrderMailPayload {
    /// 注文とサイト設定から差し込みデータを組み立てる
    ///
    /// サイト名が未設定の場合はエラー。
    pub fn from_order(order: &Order, settings: &NotificationSettings) -> Result<Self, DomainError> {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();

        Ok(Self {
            site_name: settings.require_site_name()?.to_string(),
            customer_name: text(&order.customer_name),
            customer_email: text(&order.customer_email),
            shipping_method: text(&order.shipping_method),
            customer_address: text(&order.customer_address),
            tracking_number: text(&order.tracking_number),
            tracking_url: text(&order.tracking_url),
            cancellation_message: text(&order.cancellation_message),
            total: text(&order.total),
            order_contents: order.display_contents(),
        })
    }

    /// テンプレートエンジンに渡すキーと値のマップに変換する
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::json!({
            "site_name": self.site_name,
            "customer_name": self.customer_name,
            "customer_email": self.customer_email,
            "shipping_method": self.shipping_method,
            "customer_address": self.customer_address,
            "tracking_number": self.tracking_number,
            "tracking_url": self.tracking_url,
            "cancellation_message": self.cancellation_message,
            "total": self.total,
            "order_contents": self.order_contents,
        })
    }
}
