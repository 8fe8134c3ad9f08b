use crate::domain::model::{ClassificationResult, Tag};
use crate::domain::ports::ResultSink;
use std::sync::Mutex;
use tracing::Dispatch;

/// 以 tracing 事件輸出結果：訊息為標籤，欄位為 `number`
#[derive(Clone)]
pub struct TracingSink {
    dispatch: Dispatch,
}

impl TracingSink {
    /// 固定輸出到指定的 `Dispatch`
    pub fn with_dispatch(dispatch: Dispatch) -> Self {
        Self { dispatch }
    }

    fn scoped<F: FnOnce()>(&self, f: F) {
        tracing::dispatcher::with_default(&self.dispatch, f)
    }
}

impl ResultSink for TracingSink {
    fn emit(&self, result: &ClassificationResult) {
        self.scoped(|| tracing::info!(number = result.number, "{}", result.tag()));
    }

    fn end_of_stream(&self) {
        self.scoped(|| tracing::debug!("Channel closed"));
    }
}

/// 把標籤收集在記憶體中
#[derive(Default)]
pub struct MemorySink {
    tags: Mutex<Vec<Tag>>,
    closed: Mutex<bool>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tags(&self) -> Vec<Tag> {
        self.tags.lock().map(|tags| tags.clone()).unwrap_or_default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.tags().iter().map(Tag::to_string).collect()
    }

    pub fn saw_end_of_stream(&self) -> bool {
        self.closed.lock().map(|closed| *closed).unwrap_or(false)
    }
}

impl ResultSink for MemorySink {
    fn emit(&self, result: &ClassificationResult) {
        if let Ok(mut tags) = self.tags.lock() {
            tags.push(result.tag());
        }
    }

    fn end_of_stream(&self) {
        if let Ok(mut closed) = self.closed.lock() {
            *closed = true;
        }
    }
}
