use crate::adapters::http::server::{DivisionResult, ErrorResult};
use crate::domain::ports::Classifier;
use crate::utils::error::{FizzBuzzError, Result, StatusClass};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use url::Url;

/// 回應內容的預設上限 (1 KB)
pub const DEFAULT_MAX_RESPONSE_BYTES: usize = 1024;

/// 把整除判斷委派給遠端除法服務的分類器
///
/// 任何呼叫失敗都會記錄錯誤並回傳 `false`，呼叫端無法區分
/// 「不能整除」和「判斷失敗」。`masked_failures` 提供被遮蔽的次數，
/// 需要區分時請直接使用 `divide`。
pub struct HttpClassifier {
    client: Client,
    divide_url: Url,
    max_response_bytes: usize,
    failures: AtomicU64,
}

impl HttpClassifier {
    pub fn new(endpoint: &str) -> Result<Self> {
        Self::with_options(endpoint, DEFAULT_MAX_RESPONSE_BYTES, None)
    }

    pub fn with_options(
        endpoint: &str,
        max_response_bytes: usize,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let divide_url = Url::parse(&format!("{}/divide", endpoint.trim_end_matches('/')))
            .map_err(|e| {
                FizzBuzzError::config("remote.endpoint", endpoint, format!("Invalid URL format: {}", e))
            })?;

        let mut builder = Client::builder().redirect(reqwest::redirect::Policy::none());
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            divide_url,
            max_response_bytes,
            failures: AtomicU64::new(0),
        })
    }

    pub fn max_response_bytes(&self) -> usize {
        self.max_response_bytes
    }

    /// 向遠端服務請求 `a % b`
    pub async fn divide(&self, a: i64, b: i64) -> Result<i64> {
        tracing::debug!(a, b, "Calling divide API");
        let response = self
            .client
            .get(self.divide_url.clone())
            .query(&[("a", a), ("b", b)])
            .send()
            .await?;

        let status = response.status();

        // 讀取內容前先檢查宣告的長度
        match response.content_length() {
            None => return Err(FizzBuzzError::ResponseSizeUnknown),
            Some(size) if size > self.max_response_bytes as u64 => {
                return Err(FizzBuzzError::ResponseTooLarge {
                    size,
                    limit: self.max_response_bytes,
                });
            }
            Some(_) => {}
        }

        let body = response.bytes().await?;

        if status == StatusCode::OK {
            let result: DivisionResult =
                serde_json::from_slice(&body).map_err(|source| FizzBuzzError::DecodeError {
                    context: "failed to decode result response".to_string(),
                    source,
                })?;
            return Ok(result.remainder);
        }

        let error: ErrorResult =
            serde_json::from_slice(&body).map_err(|source| FizzBuzzError::DecodeError {
                context: format!(
                    "failed to decode error response for status code {}",
                    status.as_u16()
                ),
                source,
            })?;

        Err(FizzBuzzError::RemoteStatusError {
            class: StatusClass::from_status(status),
            status: status.to_string(),
            message: error.message,
        })
    }

    /// 判斷 `n` 能否被 `divisor` 整除，失敗時記錄錯誤並回傳 `false`
    pub async fn is_divisible_by(&self, n: u64, divisor: i64) -> bool {
        let outcome = match i64::try_from(n) {
            Ok(dividend) => self.divide(dividend, divisor).await,
            Err(_) => Err(FizzBuzzError::NumberOutOfRange { number: n }),
        };

        match outcome {
            Ok(remainder) => remainder == 0,
            Err(e) => {
                self.failures.fetch_add(1, Ordering::Relaxed);
                tracing::error!(error = %e, dividend = n, divisor, "Error calling divide API");
                false
            }
        }
    }
}

#[async_trait]
impl Classifier for HttpClassifier {
    async fn is_fizz(&self, n: u64) -> bool {
        self.is_divisible_by(n, 3).await
    }

    async fn is_buzz(&self, n: u64) -> bool {
        self.is_divisible_by(n, 5).await
    }

    fn masked_failures(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    const IGNORED_VALUE: i64 = 0;

    async fn divide_against(status: u16, body: String) -> Result<i64> {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/divide");
                then.status(status)
                    .header("Content-Type", "application/json")
                    .body(body);
            })
            .await;

        let classifier = HttpClassifier::new(&server.base_url()).unwrap();
        let result = classifier.divide(IGNORED_VALUE, IGNORED_VALUE).await;

        mock.assert_async().await;
        result
    }

    #[tokio::test]
    async fn test_divide_valid_response() {
        let result = divide_against(200, r#"{"remainder":1}"#.to_string()).await;
        assert_eq!(result.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_divide_error_statuses() {
        let cases = [
            (
                400,
                "Division by zero is not allowed",
                "400 Bad Request: Division by zero is not allowed",
            ),
            (
                409,
                "Some other client-side error",
                "409 Conflict: Some other client-side error",
            ),
            (
                500,
                "Internal server error",
                "500 Internal Server Error: Internal server error",
            ),
            (
                303,
                "These are not the droids you're looking for",
                "unexpected status code: 303 See Other: These are not the droids you're looking for",
            ),
        ];

        for (status, message, expected) in cases {
            let body = serde_json::json!({ "message": message }).to_string();
            let err = divide_against(status, body).await.unwrap_err();
            assert_eq!(err.to_string(), expected);
        }
    }

    #[tokio::test]
    async fn test_divide_bogus_json() {
        let err = divide_against(200, r#""this is not JSON""#.to_string())
            .await
            .unwrap_err();
        assert!(err
            .to_string()
            .starts_with("failed to decode result response: "));

        let err = divide_against(400, r#""this is not JSON""#.to_string())
            .await
            .unwrap_err();
        assert!(err
            .to_string()
            .starts_with("failed to decode error response for status code 400: "));
    }

    #[tokio::test]
    async fn test_divide_rejects_oversized_response() {
        let padding = " ".repeat(DEFAULT_MAX_RESPONSE_BYTES + 1);
        let body = format!(r#"{{"remainder":1}}{}"#, padding);
        let expected_size = body.len();

        let err = divide_against(200, body).await.unwrap_err();
        assert!(matches!(err, FizzBuzzError::ResponseTooLarge { limit: 1024, .. }));
        assert_eq!(err.to_string(), format!("response too large: {} bytes", expected_size));
    }

    #[tokio::test]
    async fn test_divide_sends_query_parameters() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/divide")
                    .query_param("a", "14")
                    .query_param("b", "5");
                then.status(200).json_body(serde_json::json!({"remainder": 4}));
            })
            .await;

        let classifier = HttpClassifier::new(&format!("{}/", server.base_url())).unwrap();
        assert_eq!(classifier.divide(14, 5).await.unwrap(), 4);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fizz_and_buzz_mask_failures() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/divide").query_param("a", "9");
                then.status(200).json_body(serde_json::json!({"remainder": 0}));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/divide").query_param("a", "7");
                then.status(200).json_body(serde_json::json!({"remainder": 1}));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/divide").query_param("a", "13");
                then.status(500)
                    .json_body(serde_json::json!({"message": "Error from server test case"}));
            })
            .await;

        let classifier = HttpClassifier::new(&server.base_url()).unwrap();

        assert!(classifier.is_fizz(9).await);
        assert!(classifier.is_buzz(9).await);
        assert!(!classifier.is_fizz(7).await);
        assert!(!classifier.is_buzz(7).await);
        assert_eq!(classifier.masked_failures(), 0);

        assert!(!classifier.is_fizz(13).await);
        assert!(!classifier.is_buzz(13).await);
        assert_eq!(classifier.masked_failures(), 2);
    }

    #[tokio::test]
    async fn test_number_out_of_range_is_masked() {
        let classifier = HttpClassifier::new("http://127.0.0.1:9").unwrap();
        assert!(!classifier.is_fizz(u64::MAX).await);
        assert_eq!(classifier.masked_failures(), 1);
    }

    #[test]
    fn test_invalid_endpoint() {
        assert!(HttpClassifier::new("not a url").is_err());
    }
}
