use crate::core::queue::BoundedQueue;
use crate::core::{ClassificationResult, Classifier, Result, ResultSink, RunSummary};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

type ResultQueue = BoundedQueue<ClassificationResult>;

/// 生產端結束 (包含 panic) 時關閉佇列
struct CloseOnDrop(Arc<ResultQueue>);

impl Drop for CloseOnDrop {
    fn drop(&mut self) {
        self.0.close();
    }
}

/// 產生 1..=N、逐一分類，並經由有界佇列交給單一消費端輸出
pub struct FizzBuzzRunner<C, S> {
    upper_limit: u64,
    classifier: Arc<C>,
    sink: Arc<S>,
}

impl<C, S> FizzBuzzRunner<C, S>
where
    C: Classifier + 'static,
    S: ResultSink + 'static,
{
    pub fn new(upper_limit: u64, classifier: Arc<C>, sink: Arc<S>) -> Self {
        Self {
            upper_limit,
            classifier,
            sink,
        }
    }

    /// 佇列容量為上限的一半，N = 1 時為 0
    pub fn queue_capacity(&self) -> usize {
        usize::try_from(self.upper_limit / 2).unwrap_or(usize::MAX)
    }

    /// 執行到消費端取完佇列為止
    ///
    /// `cancel` 在每次分類前與等待寫入時檢查。取消後生產端關閉佇列，
    /// 消費端把已排入的結果輸出完才返回，摘要中 `cancelled` 為 true。
    pub async fn run(&self, cancel: CancellationToken) -> Result<RunSummary> {
        let queue = Arc::new(ResultQueue::new(self.queue_capacity()));
        tracing::debug!(
            upper_limit = self.upper_limit,
            capacity = queue.capacity(),
            "Pipeline starting"
        );

        let producer = tokio::spawn(produce(
            self.upper_limit,
            Arc::clone(&self.classifier),
            Arc::clone(&queue),
            cancel,
        ));
        let consumer = tokio::spawn(consume(Arc::clone(&self.sink), Arc::clone(&queue)));

        let (cancelled, mut summary) = tokio::try_join!(producer, consumer)?;
        summary.cancelled = cancelled;
        summary.masked_failures = self.classifier.masked_failures();

        tracing::debug!(emitted = summary.emitted, cancelled, "Pipeline finished");
        Ok(summary)
    }
}

async fn produce<C: Classifier>(
    upper_limit: u64,
    classifier: Arc<C>,
    queue: Arc<ResultQueue>,
    cancel: CancellationToken,
) -> bool {
    let _close = CloseOnDrop(Arc::clone(&queue));

    for number in 1..=upper_limit {
        if cancel.is_cancelled() {
            tracing::warn!(next = number, "Generation cancelled");
            return true;
        }

        let result = ClassificationResult::new(
            number,
            classifier.is_fizz(number).await,
            classifier.is_buzz(number).await,
        );

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::warn!(next = number, "Generation cancelled while queue was full");
                return true;
            }
            pushed = queue.push(result) => {
                if let Err(e) = pushed {
                    tracing::warn!(error = %e, "Producer stopped early");
                    return false;
                }
            }
        }
    }

    false
}

async fn consume<S: ResultSink>(sink: Arc<S>, queue: Arc<ResultQueue>) -> RunSummary {
    let mut summary = RunSummary::default();

    while let Some(result) = queue.pop().await {
        sink.emit(&result);
        summary.record(result.tag());
    }
    sink.end_of_stream();

    summary
}
