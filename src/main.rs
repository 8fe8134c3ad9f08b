use anyhow::Context;
use clap::Parser;
use fizzbuzz_pipeline::adapters::TracingSink;
use fizzbuzz_pipeline::utils::error::ErrorSeverity;
use fizzbuzz_pipeline::utils::{logger, validation::Validate};
use fizzbuzz_pipeline::{build_classifier, AppConfig, CliArgs, FizzBuzzError, FizzBuzzRunner, TomlConfig};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    // 合併設定：預設值 < TOML < 命令列
    let mut config = AppConfig::default();
    if let Some(path) = &args.config {
        match TomlConfig::from_file(path) {
            Ok(file) => config.apply_toml(&file),
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path.display(), e);
                eprintln!("💡 {}", e.recovery_suggestion());
                std::process::exit(1);
            }
        }
    }
    config.apply_cli(&args);

    // 初始化日誌
    let dispatch = logger::init_cli_logger(config.verbose, config.log_format);
    tracing::debug!("Resolved config: {:?}", config);

    // 驗證配置，任何錯誤都在開始工作前結束程式
    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "Invalid configuration");
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }
    let upper_limit = config.upper_limit()?;

    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("Interrupt received, stopping generation");
                cancel.cancel();
            }
        }
    });

    let (classifier, service) = match build_classifier(config.adapter, &config.remote, &cancel).await {
        Ok(built) => built,
        Err(e) => exit_with(e),
    };

    tracing::info!(upper_limit, adapter = %config.adapter, "Starting FizzBuzz");

    let runner = FizzBuzzRunner::new(
        upper_limit,
        Arc::new(classifier),
        Arc::new(TracingSink::with_dispatch(dispatch)),
    );
    let outcome = runner.run(cancel.clone()).await;

    if let Some(service) = service {
        service
            .shutdown()
            .await
            .context("failed to stop the division service")?;
    }

    match outcome {
        Ok(summary) => {
            tracing::debug!(
                emitted = summary.emitted,
                fizz = summary.fizz,
                buzz = summary.buzz,
                fizz_buzz = summary.fizz_buzz,
                cancelled = summary.cancelled,
                "FizzBuzz finished"
            );
            if summary.masked_failures > 0 {
                tracing::warn!(
                    masked_failures = summary.masked_failures,
                    "Some classifications failed and were reported as not divisible"
                );
            }
        }
        Err(e) => exit_with(e),
    }

    Ok(())
}

fn exit_with(e: FizzBuzzError) -> ! {
    tracing::error!(
        "❌ FizzBuzz failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    // 依嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code)
}
