//! # OrderMail Notifier
//!
//! ホスト CMS の注文保存フックから呼び出される通知ディスパッチャ。
//!
//! ## 役割
//!
//! 注文が保存されるたびに、ステータスと通知済みフラグを見て
//! 顧客（新規注文は管理者にも）へテンプレートメールを送り、
//! 送信できた分のフラグを 1 回の更新で書き戻す。
//!
//! ```text
//! ┌──────────────┐ 保存後に呼び出し ┌──────────────────────────────┐
//! │  Host CMS    │────────────────>│ OrderNotificationDispatcher  │
//! │ (save hook)  │<────────────────│                              │
//! └──────────────┘  フラグ書き戻し  └──────────────────────────────┘
//!                                     │ Mailer          │ OrderRepository
//!                                     ↓                 ↓
//!                              TemplateMailer      ホストの ORM
//!                              (tera + Sender)
//! ```
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `NOTIFICATION_BACKEND` | No | `smtp` / `ses` / `noop`（デフォルト: `noop`） |
//! | `SMTP_HOST` | No | SMTP ホスト（デフォルト: `localhost`） |
//! | `SMTP_PORT` | No | SMTP ポート（デフォルト: `1025`） |
//! | `NOTIFICATION_FROM_ADDRESS` | No | 送信元アドレス |
//! | `ORDERS_SECTION` | No | 注文セクションのハンドル（デフォルト: `Content\Orders`） |
//! | `LOG_FORMAT` | No | `json` / `pretty` |
//!
//! ## 使用例
//!
//! ```rust,ignore
//! let config = NotifierConfig::from_env()?;
//! let dispatcher = bootstrap::build_dispatcher(&config, Arc::new(host_orders)).await?;
//!
//! // ホストの保存フック内で
//! let outcome = dispatcher.on_order_saved(&order, &settings).await?;
//! ```

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod usecase;

pub use config::NotifierConfig;
pub use error::{ConfigError, DispatchError};
pub use usecase::notification::{
    DispatchOutcome,
    Mailer,
    OrderNotificationDispatcher,
    TemplateMailer,
    TemplateRenderer,
};
