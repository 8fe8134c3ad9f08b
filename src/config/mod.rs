#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::adapters::http::DEFAULT_MAX_RESPONSE_BYTES;
use crate::adapters::AdapterKind;
use crate::utils::error::{FizzBuzzError, Result};
use crate::utils::logger::LogFormat;
use crate::utils::validation::{validate_positive_number, validate_range, validate_url, Validate};
use std::time::Duration;

pub const DEFAULT_LIMIT: i64 = 64;

/// 遠端除法服務相關設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteSettings {
    /// 未設定時啟動本機服務
    pub endpoint: Option<String>,
    pub max_response_bytes: usize,
    pub timeout_seconds: Option<u64>,
}

impl Default for RemoteSettings {
    fn default() -> Self {
        Self {
            endpoint: None,
            max_response_bytes: DEFAULT_MAX_RESPONSE_BYTES,
            timeout_seconds: None,
        }
    }
}

impl RemoteSettings {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

/// 合併預設值、TOML 與命令列後的最終設定
///
/// 優先順序：命令列 > TOML > 預設值
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub limit: i64,
    pub adapter: AdapterKind,
    pub remote: RemoteSettings,
    pub log_format: LogFormat,
    pub verbose: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            adapter: AdapterKind::default(),
            remote: RemoteSettings::default(),
            log_format: LogFormat::default(),
            verbose: false,
        }
    }
}

impl AppConfig {
    /// 驗證後的上限
    pub fn upper_limit(&self) -> Result<u64> {
        validate_range("limit", self.limit, 1, i64::MAX)?;
        u64::try_from(self.limit).map_err(|_| FizzBuzzError::config("limit", self.limit, "Value must be at least 1"))
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        // 上限必須大於 0
        self.upper_limit()?;

        validate_positive_number("remote.max_response_bytes", self.remote.max_response_bytes, 1)?;

        if let Some(endpoint) = &self.remote.endpoint {
            validate_url("remote.endpoint", endpoint)?;
        }

        if let Some(timeout) = self.remote.timeout_seconds {
            validate_range("remote.timeout_seconds", timeout, 1, 3600)?;
        }

        Ok(())
    }
}
