use std::fmt;

/// 單一整數的分類結果，產生後不可變
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassificationResult {
    pub number: u64,
    pub divisible_by_three: bool,
    pub divisible_by_five: bool,
}

impl ClassificationResult {
    pub fn new(number: u64, divisible_by_three: bool, divisible_by_five: bool) -> Self {
        Self {
            number,
            divisible_by_three,
            divisible_by_five,
        }
    }

    pub fn tag(&self) -> Tag {
        match (self.divisible_by_three, self.divisible_by_five) {
            (true, true) => Tag::FizzBuzz,
            (true, false) => Tag::Fizz,
            (false, true) => Tag::Buzz,
            (false, false) => Tag::Number(self.number),
        }
    }
}

/// 輸出階段對每筆結果的呈現
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    FizzBuzz,
    Fizz,
    Buzz,
    Number(u64),
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tag::FizzBuzz => write!(f, "FizzBuzz"),
            Tag::Fizz => write!(f, "Fizz"),
            Tag::Buzz => write!(f, "Buzz"),
            Tag::Number(n) => write!(f, "{}", n),
        }
    }
}

/// 一次執行的統計摘要
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub emitted: u64,
    pub fizz: u64,
    pub buzz: u64,
    pub fizz_buzz: u64,
    pub plain: u64,
    pub cancelled: bool,
    pub masked_failures: u64,
}

impl RunSummary {
    pub fn record(&mut self, tag: Tag) {
        self.emitted += 1;
        match tag {
            Tag::FizzBuzz => self.fizz_buzz += 1,
            Tag::Fizz => self.fizz += 1,
            Tag::Buzz => self.buzz += 1,
            Tag::Number(_) => self.plain += 1,
        }
    }
}
