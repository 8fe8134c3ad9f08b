use crate::domain::ports::Classifier;
use async_trait::async_trait;

/// 直接以取餘數計算的本地分類器
#[derive(Debug, Clone, Copy, Default)]
pub struct MathClassifier;

#[async_trait]
impl Classifier for MathClassifier {
    async fn is_fizz(&self, n: u64) -> bool {
        n % 3 == 0
    }

    async fn is_buzz(&self, n: u64) -> bool {
        n % 5 == 0
    }
}
