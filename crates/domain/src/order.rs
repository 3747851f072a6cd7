//! # 注文
//!
//! ホスト CMS が保存する注文レコードと、ステータスごとの通知済みフラグを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 説明 |
//! |---|------------|------|
//! | [`Order`] | 注文レコード | 顧客の購入とその出荷状況 |
//! | [`OrderStatus`] | 注文ステータス | 新規 / 対応中 / 発送済み / キャンセル |
//! | [`NotificationFlags`] | 通知済みフラグ | ステータスごとの送信済み + 再送指示 |
//!
//! ## 注文内容の表示
//!
//! `order_contents` にはカート連携が埋め込む内部識別子（`tailor_id`）の行が
//! 含まれる。メールに載せる前に [`Order::display_contents`] で行ごと取り除く。

use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

use crate::{
    DomainError,
    notification::MailTemplate,
    value_objects::{Email, Recipient},
};

define_uuid_id! {
    /// 注文 ID（一意識別子）
    ///
    /// ホストが採番した UUID をそのまま保持する。
    pub struct OrderId;
}

/// 注文レコードが属するセクションの既定値
pub const DEFAULT_ORDERS_SECTION: &str = "Content\\Orders";

/// 注文内容から取り除く内部識別子のトークン
pub const INTERNAL_ID_TOKEN: &str = "tailor_id";

/// 注文ステータス
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    IntoStaticStr,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OrderStatus {
    /// 新規注文
    New,
    /// 対応中
    InProgress,
    /// 発送済み
    Shipped,
    /// キャンセル
    Cancelled,
}

impl OrderStatus {
    /// このステータスで顧客に送るテンプレート
    pub fn customer_template(self) -> MailTemplate {
        match self {
            Self::New => MailTemplate::NewOrder,
            Self::InProgress => MailTemplate::OrderInProgress,
            Self::Shipped => MailTemplate::OrderShipped,
            Self::Cancelled => MailTemplate::OrderCancelled,
        }
    }

    /// このステータスで管理者に送るテンプレート（新規注文のみ）
    pub fn admin_template(self) -> Option<MailTemplate> {
        match self {
            Self::New => Some(MailTemplate::NewOrderAdmin),
            Self::InProgress | Self::Shipped | Self::Cancelled => None,
        }
    }
}

/// 通知済みフラグ
///
/// ホストのレコード上では独立した真偽値カラムとして保存されている。
/// フィールド名はホスト側のカラム名に合わせる。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationFlags {
    #[serde(default, rename = "sent_email_receipt")]
    pub sent_receipt:     bool,
    #[serde(default)]
    pub sent_in_progress: bool,
    #[serde(default, rename = "sent_tracking_receipt")]
    pub sent_tracking:    bool,
    #[serde(default)]
    pub sent_cancelled:   bool,
    #[serde(default)]
    pub resend_email:     bool,
}

impl NotificationFlags {
    /// 指定ステータスの通知が送信済みか
    pub fn is_sent(&self, status: OrderStatus) -> bool {
        match status {
            OrderStatus::New => self.sent_receipt,
            OrderStatus::InProgress => self.sent_in_progress,
            OrderStatus::Shipped => self.sent_tracking,
            OrderStatus::Cancelled => self.sent_cancelled,
        }
    }

    /// 指定ステータスの通知を送信済みにする
    pub fn mark_sent(&mut self, status: OrderStatus) {
        let flag = match status {
            OrderStatus::New => &mut self.sent_receipt,
            OrderStatus::InProgress => &mut self.sent_in_progress,
            OrderStatus::Shipped => &mut self.sent_tracking,
            OrderStatus::Cancelled => &mut self.sent_cancelled,
        };
        *flag = true;
    }
}

/// 注文レコード
///
/// ホストが保存した直後の値。任意項目は未入力なら `None` になる。
///
/// # 不変条件
///
/// - ディスパッチャが書き換えるのは `flags` のみ
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// 所属セクションのハンドル（例: `Content\Orders`）
    pub section: String,
    #[serde(rename = "order_status")]
    pub status: OrderStatus,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub customer_address: Option<String>,
    #[serde(default)]
    pub shipping_method: Option<String>,
    #[serde(default)]
    pub tracking_number: Option<String>,
    #[serde(default)]
    pub tracking_url: Option<String>,
    #[serde(default)]
    pub cancellation_message: Option<String>,
    #[serde(default)]
    pub total: Option<String>,
    #[serde(default)]
    pub order_contents: Option<String>,
    /// 管理者宛てメールの表示名
    #[serde(default)]
    pub notification_email_recipient_name: Option<String>,
    #[serde(flatten)]
    pub flags: NotificationFlags,
}

impl Order {
    /// 指定セクションに属するか
    pub fn belongs_to(&self, section: &str) -> bool {
        self.section == section
    }

    /// 顧客宛ての宛先を組み立てる
    ///
    /// `customer_email` が未設定または不正な場合はエラー。
    pub fn customer_recipient(&self) -> Result<Recipient, DomainError> {
        let raw = self
            .customer_email
            .as_deref()
            .filter(|e| !e.trim().is_empty())
            .ok_or(DomainError::MissingField {
                entity: "Order",
                field:  "customer_email",
            })?;

        Ok(Recipient::new(
            Email::new(raw)?,
            self.customer_name.as_deref(),
        ))
    }

    /// メール表示用の注文内容（内部識別子の行を除去済み）
    pub fn display_contents(&self) -> String {
        self.order_contents
            .as_deref()
            .map(|contents| strip_lines_containing(contents, INTERNAL_ID_TOKEN))
            .unwrap_or_default()
    }
}

/// `token` を含む行を改行ごと取り除く
///
/// 行の区切りは `\n`（`\r\n` の `\r` は行の一部として一緒に消える）。
/// 最終行が改行で終わっていない場合もそのまま判定する。
pub fn strip_lines_containing(text: &str, token: &str) -> String {
    text.split_inclusive('\n')
        .filter(|line| !line.contains(token))
        .collect()
}
