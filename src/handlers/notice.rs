// src/handlers/notice.rs
use std::time::Duration;

use tokio::time::Instant;

/// How long toasts and timed banners stay up.
pub const NOTICE_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A user-facing message. Timed notices disappear on their own; the rest stay
/// until dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    expires_at: Option<Instant>,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
            expires_at: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
            expires_at: None,
        }
    }

    pub fn timed(mut self) -> Self {
        self.expires_at = Some(Instant::now() + NOTICE_TTL);
        self
    }

    pub fn is_timed(&self) -> bool {
        self.expires_at.is_some()
    }

    pub fn is_visible(&self) -> bool {
        self.expires_at.is_none_or(|at| Instant::now() < at)
    }
}

/// The notice in `slot`, unless it has already expired.
pub(crate) fn visible(slot: &Option<Notice>) -> Option<&Notice> {
    slot.as_ref().filter(|n| n.is_visible())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn timed_notice_expires_after_three_seconds() {
        let notice = Notice::success("Biodata berhasil disimpan!").timed();
        assert!(notice.is_visible());

        tokio::time::advance(Duration::from_millis(2_999)).await;
        assert!(notice.is_visible());

        tokio::time::advance(Duration::from_millis(1)).await;
        assert!(!notice.is_visible());
        assert_eq!(visible(&Some(notice)), None);
    }

    #[tokio::test(start_paused = true)]
    async fn sticky_notice_stays() {
        let notice = Notice::error("Failed to fetch biodata");
        tokio::time::advance(Duration::from_secs(60)).await;
        assert!(notice.is_visible());
        assert!(!notice.is_timed());
    }
}
