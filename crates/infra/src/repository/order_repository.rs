//! # OrderRepository
//!
//! 注文レコードの通知済みフラグを書き戻すリポジトリ。
//!
//! ディスパッチャは 1 回の保存フックにつき最大 1 回だけ呼び出す。
//! 書き戻しでホストの保存イベントが再発火しても、フラグが立っているため
//! 同じメールが再送されることはない。

use async_trait::async_trait;
use ordermail_domain::order::{NotificationFlags, OrderId};

use crate::error::InfraError;

/// 注文リポジトリトレイト
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// 通知済みフラグと再送指示をまとめて更新する
    ///
    /// `flags` の全フィールドで上書きする。レコードが存在しない場合は
    /// `InfraErrorKind::NotFound` を返す。
    async fn update_notification_flags(
        &self,
        id: &OrderId,
        flags: &NotificationFlags,
    ) -> Result<(), InfraError>;
}
