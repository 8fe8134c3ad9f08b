//! 本機迴路的除法服務，模擬外部的取餘數 API。
//!
//! 只綁定 127.0.0.1 的隨機埠，生命週期由 `CancellationToken` 控制。

use crate::utils::error::Result;
use axum::extract::RawQuery;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::Router;
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DivisionResult {
    pub remainder: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResult {
    pub message: String,
}

pub fn router() -> Router {
    Router::new()
        .route("/divide", any(divide))
        .fallback(unsupported_path)
}

async fn divide(RawQuery(query): RawQuery) -> Response {
    let query = query.unwrap_or_default();

    let Some(a) = query_int(&query, "a") else {
        return error_response(StatusCode::BAD_REQUEST, "Invalid query parameter: 'a'");
    };
    let Some(b) = query_int(&query, "b") else {
        return error_response(StatusCode::BAD_REQUEST, "Invalid query parameter: 'b'");
    };

    if b == 0 {
        return error_response(StatusCode::BAD_REQUEST, "Division by zero is not allowed");
    }

    // i64::MIN % -1 溢位，結果視為 0
    let result = DivisionResult {
        remainder: a.wrapping_rem(b),
    };

    match serde_json::to_vec(&result) {
        Ok(body) => json_response(StatusCode::OK, body),
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode division result");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to marshal JSON")
        }
    }
}

async fn unsupported_path() -> Response {
    error_response(StatusCode::NOT_FOUND, "Unsupported path")
}

/// 取查詢字串中第一個同名參數並解析為整數
fn query_int(query: &str, name: &str) -> Option<i64> {
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == name)
        .and_then(|(_, value)| value.parse().ok())
}

fn json_response(status: StatusCode, body: Vec<u8>) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}

fn error_response(status: StatusCode, message: &str) -> Response {
    let body = serde_json::to_vec(&ErrorResult {
        message: message.to_string(),
    })
    .unwrap_or_else(|_| br#"{"message":"Internal Server Error"}"#.to_vec());
    json_response(status, body)
}

/// 執行中的除法服務
pub struct DivisionServer {
    base_url: String,
    cancel: CancellationToken,
    handle: JoinHandle<std::io::Result<()>>,
}

impl DivisionServer {
    /// 啟動服務。`parent` 被取消時服務也會停止，`shutdown` 只會停止此服務本身。
    pub async fn start(parent: &CancellationToken) -> Result<Self> {
        let listener = TcpListener::bind(("127.0.0.1", 0)).await?;
        let addr = listener.local_addr()?;
        let cancel = parent.child_token();

        let shutdown = cancel.clone();
        let handle = tokio::spawn(async move {
            axum::serve(listener, router())
                .with_graceful_shutdown(shutdown.cancelled_owned())
                .await
        });

        tracing::debug!(%addr, "Division service listening");

        Ok(Self {
            base_url: format!("http://{}", addr),
            cancel,
            handle,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    pub async fn shutdown(self) -> Result<()> {
        self.cancel.cancel();
        self.handle.await??;
        tracing::debug!("Division service stopped");
        Ok(())
    }
}
