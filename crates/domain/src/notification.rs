//! # 通知
//!
//! 注文メール通知に関するドメインモデルを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 説明 |
//! |---|------------|------|
//! | [`MailTemplate`] | メールテンプレート | 登録済みの 6 種類 |
//! | [`NotificationSettings`] | サイト設定 | サイト名と管理者通知先 |
//! | [`NotificationPlan`] | 送信計画 | 1 回の保存で送るメールと更新するフラグ |
//! | [`OrderMailPayload`] | 差し込みデータ | テンプレートに渡すキーと値 |
//!
//! ## 設計方針
//!
//! - **判断と実行の分離**: 何を送るかは [`NotificationPlan`] が決め、
//!   送信とフラグの書き戻しはユースケース層が行う
//! - **テンプレート分離**: メール本文の生成は notifier の `TemplateRenderer` が担う

mod payload;
mod plan;

pub use payload::OrderMailPayload;
pub use plan::{Audience, FlagUpdate, MailDelivery, Notice, NotificationPlan};
use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;
use thiserror::Error;

use crate::{
    DomainError,
    value_objects::{Email, Recipient},
};

/// 通知送信エラー
#[derive(Debug, Error)]
pub enum NotificationError {
    /// メール送信に失敗
    #[error("メール送信に失敗: {0}")]
    SendFailed(String),

    /// テンプレートレンダリングに失敗
    #[error("テンプレートレンダリングに失敗: {0}")]
    TemplateFailed(String),
}

/// メールテンプレート
///
/// `form_submission` は問い合わせフォーム用で、注文通知の流れでは使わない。
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
pub enum MailTemplate {
    /// 新規注文（顧客宛て）
    NewOrder,
    /// 新規注文（管理者宛て）
    NewOrderAdmin,
    /// 注文対応中
    OrderInProgress,
    /// 発送済み
    OrderShipped,
    /// キャンセル
    OrderCancelled,
    /// 問い合わせフォーム送信
    FormSubmission,
}

/// メールメッセージ
///
/// テンプレートレンダリングの出力。NotificationSender に渡される。
#[derive(Debug, Clone)]
pub struct EmailMessage {
    /// 送信先メールアドレス
    pub to:        String,
    /// 送信先の表示名
    pub to_name:   Option<String>,
    /// 件名
    pub subject:   String,
    /// HTML 本文
    pub html_body: String,
    /// プレーンテキスト本文
    pub text_body: String,
}

/// サイト設定
///
/// ホストのグローバル設定レコードから渡される。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotificationSettings {
    /// サイト名（件名と本文に差し込む）
    #[serde(default, alias = "website_name")]
    pub site_name:          String,
    /// 管理者の通知先メールアドレス
    #[serde(default)]
    pub notification_email: String,
}

impl NotificationSettings {
    /// サイト名を返す（未設定ならエラー）
    pub fn require_site_name(&self) -> Result<&str, DomainError> {
        let site_name = self.site_name.trim();
        if site_name.is_empty() {
            return Err(DomainError::MissingField {
                entity: "NotificationSettings",
                field:  "site_name",
            });
        }
        Ok(site_name)
    }

    /// 管理者宛ての宛先を組み立てる
    ///
    /// 表示名は注文レコード側の `notification_email_recipient_name` を使う。
    pub fn admin_recipient(&self, name: Option<&str>) -> Result<Recipient, DomainError> {
        if self.notification_email.trim().is_empty() {
            return Err(DomainError::MissingField {
                entity: "NotificationSettings",
                field:  "notification_email",
            });
        }
        Ok(Recipient::new(Email::new(&*self.notification_email)?, name))
    }
}
