use crate::adapters::AdapterKind;
use crate::config::AppConfig;
use crate::utils::error::{FizzBuzzError, Result};
use crate::utils::logger::LogFormat;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    pub fizzbuzz: Option<FizzBuzzSection>,
    pub remote: Option<RemoteSection>,
    pub logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FizzBuzzSection {
    pub limit: Option<i64>,
    pub adapter: Option<AdapterKind>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RemoteSection {
    pub endpoint: Option<String>,
    pub max_response_bytes: Option<usize>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingSection {
    pub format: Option<LogFormat>,
    pub verbose: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| FizzBuzzError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DIVIDE_ENDPOINT})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").map_err(|e| {
            FizzBuzzError::ConfigValidationError {
                field: "env_substitution".to_string(),
                message: e.to_string(),
            }
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }
}

impl AppConfig {
    /// 套用 TOML 中有設定的欄位
    pub fn apply_toml(&mut self, file: &TomlConfig) {
        if let Some(section) = &file.fizzbuzz {
            if let Some(limit) = section.limit {
                self.limit = limit;
            }
            if let Some(adapter) = section.adapter {
                self.adapter = adapter;
            }
        }

        if let Some(section) = &file.remote {
            if let Some(endpoint) = &section.endpoint {
                self.remote.endpoint = Some(endpoint.clone());
            }
            if let Some(max) = section.max_response_bytes {
                self.remote.max_response_bytes = max;
            }
            if let Some(timeout) = section.timeout_seconds {
                self.remote.timeout_seconds = Some(timeout);
            }
        }

        if let Some(section) = &file.logging {
            if let Some(format) = section.format {
                self.log_format = format;
            }
            if let Some(verbose) = section.verbose {
                self.verbose = verbose;
            }
        }
    }
}
