//! # リポジトリ
//!
//! 通知処理が注文レコードへ書き戻すためのインターフェースを定義する。
//!
//! ## 設計方針
//!
//! - **依存性逆転**: レコードの永続化はホスト CMS の責務。ホストは自分の ORM を
//!   [`OrderRepository`] に適合させてディスパッチャに注入する
//! - **テスタビリティ**: トレイト経由でモック可能な設計

pub mod order_repository;

pub use order_repository::OrderRepository;
