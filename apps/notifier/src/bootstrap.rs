//! # 組み立て
//!
//! 設定からメール送信基盤とディスパッチャを構築する。
//! ホストは起動時に一度だけ呼び出し、得たディスパッチャを保存フックで使い回す。

use std::sync::Arc;

use ordermail_infra::{
    notification::{
        NoopNotificationSender,
        NotificationSender,
        SesNotificationSender,
        SmtpNotificationSender,
    },
    repository::OrderRepository,
};
use ordermail_shared::observability::{TracingConfig, init_tracing};

use crate::{
    config::{NotificationBackend, NotificationConfig, NotifierConfig},
    error::ConfigError,
    usecase::notification::{OrderNotificationDispatcher, TemplateMailer, TemplateRenderer},
};

/// ログ出力時のサービス名
pub const SERVICE_NAME: &str = "ordermail-notifier";

/// トレーシングを初期化する
///
/// ホストがすでにサブスクライバを設定していれば何もせず `false` を返す。
pub fn init_observability() -> bool {
    init_tracing(TracingConfig::from_env(SERVICE_NAME))
}

/// 設定されたバックエンドの送信実装を構築する
pub async fn build_sender(config: &NotificationConfig) -> Arc<dyn NotificationSender> {
    tracing::info!(backend = %config.backend, "メール送信バックエンドを初期化します");

    match config.backend {
        NotificationBackend::Smtp => Arc::new(SmtpNotificationSender::new(
            &config.smtp_host,
            config.smtp_port,
            config.from_address.clone(),
        )),
        NotificationBackend::Ses => {
            let aws_config = aws_config::load_from_env().await;
            let client = aws_sdk_sesv2::Client::new(&aws_config);
            Arc::new(SesNotificationSender::new(
                client,
                config.from_address.clone(),
            ))
        }
        NotificationBackend::Noop => Arc::new(NoopNotificationSender),
    }
}

/// ディスパッチャを構築する
///
/// # 引数
///
/// - `config`: 通知設定
/// - `orders`: ホストの注文レコードへの書き戻し実装
pub async fn build_dispatcher(
    config: &NotifierConfig,
    orders: Arc<dyn OrderRepository>,
) -> Result<OrderNotificationDispatcher, ConfigError> {
    let sender = build_sender(&config.notification).await;
    let mailer = TemplateMailer::new(TemplateRenderer::new()?, sender);

    Ok(OrderNotificationDispatcher::new(
        Arc::new(mailer),
        orders,
        config.orders_section.clone(),
    ))
}

#[cfg(test)]
mod tests {
    use ordermail_infra::mock::MockOrderRepository;

    use super::*;

    #[tokio::test]
    async fn noop設定でディスパッチャを構築できる() {
        let config = NotifierConfig::from_lookup(|_| None).unwrap();

        let dispatcher = build_dispatcher(&config, Arc::new(MockOrderRepository::new())).await;

        assert!(dispatcher.is_ok());
    }

    #[tokio::test]
    async fn smtp設定で送信実装を構築できる() {
        let config = NotifierConfig::from_lookup(|key| {
            (key == "NOTIFICATION_BACKEND").then(|| "smtp".to_string())
        })
        .unwrap();

        let _sender = build_sender(&config.notification).await;
    }
}
