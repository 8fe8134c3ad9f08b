use crate::adapters::AdapterKind;
use crate::config::AppConfig;
use crate::utils::logger::LogFormat;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "fizzbuzz")]
#[command(about = "FizzBuzz through a bounded producer/consumer pipeline")]
pub struct CliArgs {
    /// The upper limit for the FizzBuzz sequence, must be higher than 0 [default: 64]
    #[arg(long, allow_negative_numbers = true)]
    pub limit: Option<i64>,

    /// The adapter to use for FizzBuzz logic [default: math]
    #[arg(long, value_enum)]
    pub adapter: Option<AdapterKind>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Base URL of an external division service for the http adapter
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Largest accepted response from the division service [default: 1024]
    #[arg(long)]
    pub max_response_bytes: Option<usize>,

    /// Log output format [default: json]
    #[arg(long, value_enum)]
    pub log_format: Option<LogFormat>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl AppConfig {
    /// 套用命令列上有指定的參數
    pub fn apply_cli(&mut self, args: &CliArgs) {
        if let Some(limit) = args.limit {
            self.limit = limit;
        }
        if let Some(adapter) = args.adapter {
            self.adapter = adapter;
        }
        if let Some(endpoint) = &args.endpoint {
            self.remote.endpoint = Some(endpoint.clone());
        }
        if let Some(max) = args.max_response_bytes {
            self.remote.max_response_bytes = max;
        }
        if let Some(format) = args.log_format {
            self.log_format = format;
        }
        if args.verbose {
            self.verbose = true;
        }
    }
}
