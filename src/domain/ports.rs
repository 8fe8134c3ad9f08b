use crate::domain::model::ClassificationResult;
use async_trait::async_trait;

/// 判斷整數可否被 3 或 5 整除的策略
///
/// 兩個判斷彼此獨立，除了記錄內部失敗外不得有其他副作用。
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn is_fizz(&self, n: u64) -> bool;
    async fn is_buzz(&self, n: u64) -> bool;

    /// 被遮蔽成 `false` 的失敗次數
    fn masked_failures(&self) -> u64 {
        0
    }
}

/// 消費端的輸出介面，每筆結果呼叫一次
pub trait ResultSink: Send + Sync {
    fn emit(&self, result: &ClassificationResult);

    fn end_of_stream(&self) {}
}
