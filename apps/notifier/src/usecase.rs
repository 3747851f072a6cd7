//! # ユースケース層
//!
//! - [`notification`] - 注文保存に伴うメール通知

pub mod notification;
