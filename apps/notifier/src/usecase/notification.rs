//! # 通知ユースケース
//!
//! 注文保存に伴うメール通知の判断・生成・送信・フラグ書き戻しを統合する。
//!
//! ## モジュール構成
//!
//! - [`template_renderer`] - tera テンプレートエンジンによるメール生成
//! - [`mailer`] - 「テンプレートメールを送る」能力と、その標準実装
//! - [`dispatcher`] - 保存フックから呼ばれるディスパッチャ

pub mod dispatcher;
pub mod mailer;
pub mod template_renderer;

pub use dispatcher::{DispatchOutcome, OrderNotificationDispatcher};
pub use mailer::{Mailer, TemplateMailer};
pub use template_renderer::TemplateRenderer;
