use std::time::{Duration, Instant};

/// Default lifetime of a transient notice.
pub const NOTICE_TTL: Duration = Duration::from_secs(2);

/// A transient, auto-expiring message shown to the viewer.
#[derive(Debug, Clone)]
pub struct Notice {
    pub text: String,
    pub expires_at: Instant,
}

impl Notice {
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Queue of live notices. Expired entries are pruned on read.
#[derive(Debug, Default)]
pub struct NoticeBoard {
    notices: Vec<Notice>,
}

impl NoticeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Post a notice that expires after `ttl`. Returns a copy for
    /// immediate display.
    pub fn post(&mut self, text: impl Into<String>, ttl: Duration, now: Instant) -> Notice {
        let notice = Notice {
            text: text.into(),
            expires_at: now + ttl,
        };
        tracing::debug!(text = %notice.text, ttl_ms = ttl.as_millis() as u64, "notice posted");
        self.notices.push(notice.clone());
        notice
    }

    /// Currently visible notices, dropping anything past its deadline.
    pub fn active(&mut self, now: Instant) -> &[Notice] {
        self.notices.retain(|n| !n.is_expired(now));
        &self.notices
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }
}
