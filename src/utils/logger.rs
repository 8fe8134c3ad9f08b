use serde::{Deserialize, Serialize};
use tracing::Dispatch;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 日誌輸出格式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// 每行一個 JSON 物件，不含時間欄位
    #[default]
    Json,
    Compact,
}

/// 預設過濾規則需同時涵蓋函式庫與執行檔 (`fizzbuzz`) 兩個 target
fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "fizzbuzz_pipeline=debug,fizzbuzz=debug,info"
    } else {
        "fizzbuzz_pipeline=info,fizzbuzz=info"
    }
}

fn default_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)))
}

/// 建立一個獨立的 `Dispatch`，可直接交給 sink 使用而不必依賴全域 subscriber
pub fn build_dispatch<W>(format: LogFormat, filter: EnvFilter, writer: W) -> Dispatch
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => Dispatch::new(
            registry.with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .flatten_event(true)
                    .without_time()
                    .with_target(false)
                    .with_current_span(false)
                    .with_span_list(false)
                    .with_writer(writer),
            ),
        ),
        LogFormat::Compact => Dispatch::new(
            registry.with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false)
                    .compact()
                    .with_writer(writer),
            ),
        ),
    }
}

pub fn init_cli_logger(verbose: bool, format: LogFormat) -> Dispatch {
    let dispatch = build_dispatch(format, default_filter(verbose), std::io::stdout);
    dispatch.clone().init();
    dispatch
}
