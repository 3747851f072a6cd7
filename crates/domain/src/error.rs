//! # ドメイン層エラー定義
//!
//! ホストから受け取った注文・設定の不備を表現するエラー型。
//!
//! ## 設計方針
//!
//! - **型による分類**: エラーの種類を列挙型で明示し、パターンマッチで処理可能に
//! - **thiserror 活用**: `#[error(...)]` マクロでエラーメッセージを自動生成
//! - **送信前に検出**: 通知処理はメール送信前に入力を検証し、
//!   このエラーで中断した場合は何も送らず何も書き戻さない
//!
//! ## 使用例
//!
//! ```rust
//! use ordermail_domain::DomainError;
//!
//! fn require_site_name(name: &str) -> Result<&str, DomainError> {
//!     if name.trim().is_empty() {
//!         return Err(DomainError::MissingField {
//!             entity: "NotificationSettings",
//!             field:  "site_name",
//!         });
//!     }
//!     Ok(name)
//! }
//!
//! assert!(require_site_name("").is_err());
//! ```

use thiserror::Error;

/// ドメイン層で発生するエラー
#[derive(Debug, Error)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// 値は存在するが形式が不正な場合に使用する。
    ///
    /// # 例
    ///
    /// - `@` を含まないメールアドレス
    /// - 文字数制限の超過
    #[error("バリデーションエラー: {0}")]
    Validation(String),

    /// 必須項目の欠落
    ///
    /// 送信に必要なフィールドが未設定（または空文字列）の場合に使用する。
    #[error("{entity} の必須項目が未設定です: {field}")]
    MissingField {
        /// レコードの種類（"Order", "NotificationSettings"）
        entity: &'static str,
        /// 欠落しているフィールド名
        field:  &'static str,
    },
}
