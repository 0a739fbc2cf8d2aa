use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// How long the head of the queue stays on screen
pub const DEFAULT_DISPLAY_TIMEOUT: Duration = Duration::from_secs(5);

pub const CREATED_MESSAGE: &str = "Boat created successfully";
pub const MODIFIED_MESSAGE: &str = "Boat modified successfully";
pub const DELETED_MESSAGE: &str = "Boat deleted successfully";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub level: NoticeLevel,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NoticeLevel::Success,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NoticeLevel::Failure,
        }
    }
}

/// FIFO of pending user-facing messages.
///
/// Only the head is displayed. Its timer starts the first time it is shown,
/// and [`Notifications::expire`] drops it once the timeout has elapsed.
#[derive(Debug, Clone)]
pub struct Notifications {
    queue: VecDeque<Notice>,
    shown_since: Option<Instant>,
    timeout: Duration,
}

impl Notifications {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_DISPLAY_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            queue: VecDeque::new(),
            shown_since: None,
            timeout,
        }
    }

    pub fn push(&mut self, notice: Notice) {
        self.queue.push_back(notice);
    }

    /// Head of the queue, arming its display timer
    pub fn current(&mut self, now: Instant) -> Option<&Notice> {
        if self.queue.is_empty() {
            return None;
        }
        self.shown_since.get_or_insert(now);
        self.queue.front()
    }

    /// Head of the queue without touching its timer
    pub fn peek(&self) -> Option<&Notice> {
        self.queue.front()
    }

    /// Drops the head if it has been displayed for the whole timeout
    pub fn expire(&mut self, now: Instant) -> Option<Notice> {
        let since = self.shown_since?;
        if now.saturating_duration_since(since) < self.timeout {
            return None;
        }

        self.shown_since = None;
        self.queue.pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.queue.iter()
    }
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let mut queue = Notifications::with_timeout(Duration::from_secs(1));
        queue.push(Notice::success("first"));
        queue.push(Notice::failure("second"));

        let start = Instant::now();
        assert_eq!(queue.current(start).unwrap().message, "first");
        assert!(queue.expire(start).is_none());

        let popped = queue.expire(start + Duration::from_secs(1)).unwrap();
        assert_eq!(popped.message, "first");
        assert_eq!(queue.peek().unwrap().level, NoticeLevel::Failure);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_timer_starts_on_first_display() {
        let mut queue = Notifications::with_timeout(Duration::from_secs(2));
        queue.push(Notice::success("a"));
        queue.push(Notice::success("b"));

        let start = Instant::now();
        // Never displayed, never expires.
        assert!(queue.expire(start + Duration::from_secs(60)).is_none());

        queue.current(start);
        queue.expire(start + Duration::from_secs(2)).unwrap();

        // Second message gets a fresh timer.
        let later = start + Duration::from_secs(3);
        queue.current(later);
        assert!(queue.expire(later + Duration::from_secs(1)).is_none());
        assert_eq!(queue.expire(later + Duration::from_secs(2)).unwrap().message, "b");
        assert!(queue.is_empty());
    }

    #[test]
    fn test_empty_queue() {
        let mut queue = Notifications::new();
        assert!(queue.current(Instant::now()).is_none());
        assert!(queue.expire(Instant::now()).is_none());
        assert_eq!(queue.iter().count(), 0);
    }
}
