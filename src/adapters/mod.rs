// Adapters layer: concrete classifiers, the loopback division service and output sinks.

pub mod http;
pub mod math;
pub mod sink;

use crate::config::RemoteSettings;
use crate::domain::ports::Classifier;
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use tokio_util::sync::CancellationToken;

pub use http::{DivisionServer, HttpClassifier};
pub use math::MathClassifier;
pub use sink::{MemorySink, TracingSink};

/// 可選用的分類器種類
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum AdapterKind {
    /// 本地取餘數
    #[default]
    Math,
    /// 透過 HTTP 除法服務判斷
    #[cfg_attr(feature = "cli", value(alias = "httpapi"))]
    #[serde(alias = "httpapi")]
    Http,
}

impl fmt::Display for AdapterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdapterKind::Math => write!(f, "math"),
            AdapterKind::Http => write!(f, "http"),
        }
    }
}

/// 封閉的分類器集合
pub enum AnyClassifier {
    Math(MathClassifier),
    Http(HttpClassifier),
}

#[async_trait]
impl Classifier for AnyClassifier {
    async fn is_fizz(&self, n: u64) -> bool {
        match self {
            AnyClassifier::Math(c) => c.is_fizz(n).await,
            AnyClassifier::Http(c) => c.is_fizz(n).await,
        }
    }

    async fn is_buzz(&self, n: u64) -> bool {
        match self {
            AnyClassifier::Math(c) => c.is_buzz(n).await,
            AnyClassifier::Http(c) => c.is_buzz(n).await,
        }
    }

    fn masked_failures(&self) -> u64 {
        match self {
            AnyClassifier::Math(c) => c.masked_failures(),
            AnyClassifier::Http(c) => c.masked_failures(),
        }
    }
}

/// 依種類建立分類器
///
/// `http` 未指定 endpoint 時會啟動本機除法服務並一併回傳，
/// 呼叫端負責在結束時 `shutdown`。
pub async fn build_classifier(
    kind: AdapterKind,
    remote: &RemoteSettings,
    cancel: &CancellationToken,
) -> Result<(AnyClassifier, Option<DivisionServer>)> {
    match kind {
        AdapterKind::Math => Ok((AnyClassifier::Math(MathClassifier), None)),
        AdapterKind::Http => {
            let (endpoint, server) = match &remote.endpoint {
                Some(endpoint) => (endpoint.clone(), None),
                None => {
                    let server = DivisionServer::start(cancel).await?;
                    (server.base_url().to_string(), Some(server))
                }
            };

            tracing::debug!(%endpoint, "Using remote division service");
            let classifier =
                HttpClassifier::with_options(&endpoint, remote.max_response_bytes, remote.timeout())?;
            Ok((AnyClassifier::Http(classifier), server))
        }
    }
}
