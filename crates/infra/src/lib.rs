//! # OrderMail インフラ層
//!
//! メール送信と注文レコードの書き戻しを担当するインフラストラクチャ層。
//!
//! ## 設計方針
//!
//! 外部システムの詳細を trait の背後にカプセル化し、通知ユースケースを
//! 送信手段やホストの永続化方式の違いから保護する。
//!
//! ## 責務
//!
//! - **メール送信**: SMTP / SES / Noop の送信実装
//! - **注文レコードの更新**: ホストが実装する [`repository::OrderRepository`] の定義
//!
//! ## 依存関係
//!
//! ```text
//! notifier → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`error`] - インフラ層エラー定義
//! - [`notification`] - メール送信
//! - [`repository`] - 注文レコードの書き戻し
//! - `mock` - テスト用インメモリ実装（`test-utils` feature）

pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod notification;
pub mod repository;

pub use error::{InfraError, InfraErrorKind};
