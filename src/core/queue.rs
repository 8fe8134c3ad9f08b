use crate::utils::error::{FizzBuzzError, Result};
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};
use tokio::sync::Notify;

struct QueueState<T> {
    items: VecDeque<T>,
    closed: bool,
    pushed: u64,
    popped: u64,
}

/// 固定容量的 FIFO 佇列
///
/// - `push` 在佇列已滿時暫停，直到消費端取走一筆
/// - `pop` 在佇列為空時暫停，關閉且取空後回傳 `None`
/// - 容量 0 表示每次 `push` 都要等到對應的 `pop` 才返回
/// - `close` 之後不再接受寫入，已排入的資料仍可讀出
pub struct BoundedQueue<T> {
    capacity: usize,
    state: Mutex<QueueState<T>>,
    not_empty: Notify,
    not_full: Notify,
}

impl<T> BoundedQueue<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            state: Mutex::new(QueueState {
                items: VecDeque::new(),
                closed: false,
                pushed: 0,
                popped: 0,
            }),
            not_empty: Notify::new(),
            not_full: Notify::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    fn lock(&self) -> MutexGuard<'_, QueueState<T>> {
        // 鎖內不會 panic，poison 狀態的資料仍然一致
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub async fn push(&self, item: T) -> Result<()> {
        // 容量 0 時借用一個暫存格交接，再等待對方取走
        let slots = self.capacity.max(1);

        let ticket = loop {
            let notified = self.not_full.notified();
            {
                let mut state = self.lock();
                if state.closed {
                    return Err(FizzBuzzError::QueueClosed);
                }
                if state.items.len() < slots {
                    state.items.push_back(item);
                    state.pushed += 1;
                    break state.pushed;
                }
            }
            notified.await;
        };
        self.not_empty.notify_waiters();

        if self.capacity == 0 {
            loop {
                let notified = self.not_full.notified();
                let taken = self.lock().popped >= ticket;
                if taken {
                    break;
                }
                notified.await;
            }
        }

        Ok(())
    }

    pub async fn pop(&self) -> Option<T> {
        loop {
            let notified = self.not_empty.notified();
            {
                let mut state = self.lock();
                if let Some(item) = state.items.pop_front() {
                    state.popped += 1;
                    drop(state);
                    self.not_full.notify_waiters();
                    return Some(item);
                }
                if state.closed {
                    return None;
                }
            }
            notified.await;
        }
    }

    /// 關閉寫入端，喚醒所有等待中的一方
    pub fn close(&self) {
        self.lock().closed = true;
        self.not_empty.notify_waiters();
        self.not_full.notify_waiters();
    }
}
