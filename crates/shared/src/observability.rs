//! # ログ初期化
//!
//! 通知ライブラリを組み込むホストプロセス向けのサブスクライバ設定。
//! 出力形式は `LOG_FORMAT`、レベルは `RUST_LOG` で決まる。

/// `RUST_LOG` 未設定時のフィルタ
pub const DEFAULT_FILTER: &str = "info,ordermail=debug";

/// ログ出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 1 行 1 JSON（集約基盤向け）
    Json,
    /// 端末向け
    #[default]
    Pretty,
}

impl LogFormat {
    /// `LOG_FORMAT` の値を解釈する
    ///
    /// 未設定は `Pretty`。解釈できない値も `Pretty` に倒し、stderr に一度だけ警告する
    /// （サブスクライバ初期化前なので tracing は使えない）。
    pub fn from_value(value: Option<&str>) -> Self {
        match value {
            None => Self::default(),
            Some("json") => Self::Json,
            Some("pretty") => Self::Pretty,
            Some(other) => {
                eprintln!("ordermail: LOG_FORMAT={other:?} は未対応のため pretty で出力します");
                Self::Pretty
            }
        }
    }
}

/// サブスクライバの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    /// 初期化ログに出すサービス名
    pub service_name: String,
    pub log_format:   LogFormat,
    /// `RUST_LOG` がないときに使うフィルタ
    pub fallback_filter: String,
}

impl TracingConfig {
    pub fn new(service_name: impl Into<String>, log_format: LogFormat) -> Self {
        Self {
            service_name: service_name.into(),
            log_format,
            fallback_filter: DEFAULT_FILTER.to_string(),
        }
    }

    /// 任意のキー参照関数から読み取る
    pub fn from_lookup(
        service_name: impl Into<String>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Self {
        Self::new(
            service_name,
            LogFormat::from_value(lookup("LOG_FORMAT").as_deref()),
        )
    }

    /// プロセス環境変数から読み取る
    pub fn from_env(service_name: impl Into<String>) -> Self {
        Self::from_lookup(service_name, |key| std::env::var(key).ok())
    }
}

/// グローバルサブスクライバを設定する
///
/// 設定できた場合は `true`。ホストが先に設定済みなら何もせず `false` を返す。
#[cfg(feature = "observability")]
pub fn init_tracing(config: TracingConfig) -> bool {
    use tracing_subscriber::{EnvFilter, Layer as _, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.fallback_filter));

    let output = match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .with_span_list(false)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer().with_target(false).boxed(),
    };

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(output)
        .try_init()
        .is_ok();

    if installed {
        tracing::info!(
            service = %config.service_name,
            format = ?config.log_format,
            "ログ出力を初期化"
        );
    }
    installed
}
