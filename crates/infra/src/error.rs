//! # インフラ層エラー
//!
//! 注文レコードへの書き戻しで起きる失敗。種別 [`InfraErrorKind`] と、
//! 生成時点のスパン（どの注文を処理していたか）を [`SpanTrace`] で持つ。

use std::fmt;

use derive_more::Display;
use thiserror::Error;
use tracing_error::SpanTrace;

/// インフラ層エラー
#[derive(Display)]
#[display("{kind}")]
pub struct InfraError {
    kind:       InfraErrorKind,
    span_trace: SpanTrace,
}

/// インフラ層エラーの種別
#[derive(Debug, Error)]
pub enum InfraErrorKind {
    /// 更新対象の注文がない（保存フックの途中でホストが削除した等）
    #[error("{entity} が見つかりません: {id}")]
    NotFound { entity: &'static str, id: String },

    /// ホストの保存先に一時的に到達できない
    #[error("保存先を利用できません: {0}")]
    Unavailable(String),

    /// ホストの永続化層が返したその他のエラー
    #[error("予期しないエラー: {0}")]
    Unexpected(String),
}

impl InfraError {
    fn with_kind(kind: InfraErrorKind) -> Self {
        Self {
            kind,
            span_trace: SpanTrace::capture(),
        }
    }

    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::with_kind(InfraErrorKind::NotFound {
            entity,
            id: id.into(),
        })
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::with_kind(InfraErrorKind::Unavailable(reason.into()))
    }

    pub fn unexpected(reason: impl Into<String>) -> Self {
        Self::with_kind(InfraErrorKind::Unexpected(reason.into()))
    }

    pub fn kind(&self) -> &InfraErrorKind {
        &self.kind
    }

    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }

    /// 同じ書き戻しをやり直せば成功しうるか
    pub fn is_transient(&self) -> bool {
        matches!(self.kind, InfraErrorKind::Unavailable(_))
    }
}

impl fmt::Debug for InfraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InfraError")
            .field("kind", &self.kind)
            .field("span_trace", &self.span_trace)
            .finish()
    }
}

impl std::error::Error for InfraError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.kind.source()
    }
}

#[cfg(test)]
mod tests {
    use tracing_subscriber::layer::SubscriberExt as _;

    use super::*;

    #[test]
    fn 生成時のスパンが記録される() {
        let subscriber = tracing_subscriber::registry().with(tracing_error::ErrorLayer::default());
        let _guard = tracing::subscriber::set_default(subscriber);
        let span = tracing::info_span!("on_order_saved", order_id = "ORD-001");
        let _enter = span.enter();

        let err = InfraError::not_found("Order", "ORD-001");

        assert!(matches!(
            err.kind(),
            InfraErrorKind::NotFound { entity: "Order", id } if id == "ORD-001"
        ));
        let trace = err.span_trace().to_string();
        assert!(trace.contains("on_order_saved"), "スパン名を含むこと: {trace}");
    }

    #[test]
    fn 一時的な失敗だけがtransient() {
        assert!(InfraError::unavailable("ロック待ちタイムアウト").is_transient());
        assert!(!InfraError::unexpected("制約違反").is_transient());
        assert!(!InfraError::not_found("Order", "ORD-001").is_transient());
    }

    #[test]
    fn displayは種別のメッセージを返す() {
        let err = InfraError::unavailable("接続が切断されました");

        assert_eq!(err.to_string(), "保存先を利用できません: 接続が切断されました");
    }
}
