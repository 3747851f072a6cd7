//! # OrderMail ドメイン層
//!
//! 注文通知の判断ロジックを担うドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **ホスト非依存**: 注文レコードと設定はホスト CMS から値として受け取る
//! - **純粋な判断ロジック**: 「どのメールを誰に送り、どのフラグを立てるか」の
//!   決定はドメイン層で完結させ、送信と永続化はインフラ層に委ねる
//! - **ドメインエラー**: 入力不備は [`DomainError`] で表現する
//!
//! ## 依存関係の方向
//!
//! ```text
//! notifier → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`error`] - ドメイン層で発生するエラーの定義
//! - [`order`] - 注文レコード、ステータス、通知済みフラグ
//! - [`notification`] - メールテンプレート、送信計画、差し込みデータ
//! - [`value_objects`] - メールアドレスなどの値オブジェクト
//!
//! ## 使用例
//!
//! ```rust
//! use ordermail_domain::{
//!     notification::NotificationPlan,
//!     order::{NotificationFlags, OrderStatus},
//! };
//!
//! let flags = NotificationFlags::default();
//! let plan = NotificationPlan::for_status(OrderStatus::New, &flags);
//!
//! // 新規注文は顧客宛てと管理者宛ての 2 通
//! assert_eq!(plan.deliveries().count(), 2);
//! ```

#[macro_use]
mod macros;

pub mod error;
pub mod notification;
pub mod order;
pub mod value_objects;

pub use error::DomainError;
