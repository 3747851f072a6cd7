//! # Notifier エラー定義
//!
//! 通知ディスパッチと設定読み込みで発生するエラーを定義する。
//! メール送信の失敗はここに含まれない（ログに記録し、フラグを立てないことで
//! 次回の保存時に再試行する）。

use ordermail_domain::{DomainError, notification::NotificationError};
use ordermail_infra::InfraError;
use thiserror::Error;

/// 通知ディスパッチで発生する致命的なエラー
///
/// このエラーが返った場合、ホストの注文レコードは一切更新されていない。
#[derive(Debug, Error)]
pub enum DispatchError {
    /// 注文または設定の必須項目が欠落・不正
    #[error("入力が不正です: {0}")]
    InvalidInput(#[from] DomainError),

    /// 通知済みフラグの書き戻しに失敗
    #[error("注文レコードの更新に失敗: {0}")]
    Persistence(#[from] InfraError),
}

/// 設定の読み込み・送信基盤の構築で発生するエラー
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 環境変数の値が不正
    #[error("環境変数 {key} の値が不正です: {value}")]
    InvalidValue { key: &'static str, value: String },

    /// テンプレートの登録に失敗
    #[error("テンプレートの初期化に失敗: {0}")]
    Template(#[from] NotificationError),
}
