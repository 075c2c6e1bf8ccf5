//! Transient user-facing messages with stale-timer protection.
//!
//! Wrong-answer banners auto-clear after a fixed delay. The host environment
//! owns the actual timer; the engine hands it a token carrying the notice
//! generation, and a fired timer whose generation no longer matches is a
//! no-op. Skipping to a new round therefore invalidates pending timers
//! without any cancellation machinery.

use std::time::Duration;

/// How long a transient notice stays visible before its timer clears it.
pub const NOTICE_TTL: Duration = Duration::from_secs(2);

/// Handle the host passes back when a notice's timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoticeToken {
    generation: u64,
}

/// A user-facing message slot with a monotonically increasing generation.
#[derive(Debug, Clone, Default)]
pub struct Notice {
    text: Option<String>,
    generation: u64,
}

impl Notice {
    /// Current message text, if any.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Sets a transient message and returns the token the host should pass
    /// to [`Notice::expire`] after [`NOTICE_TTL`].
    pub fn set_transient(&mut self, text: impl Into<String>) -> NoticeToken {
        self.generation += 1;
        self.text = Some(text.into());
        NoticeToken {
            generation: self.generation,
        }
    }

    /// Sets a message that no pending timer may clear (win banners).
    pub fn set_sticky(&mut self, text: impl Into<String>) {
        self.generation += 1;
        self.text = Some(text.into());
    }

    /// Clears the message immediately and invalidates outstanding tokens.
    pub fn clear(&mut self) {
        self.generation += 1;
        self.text = None;
    }

    /// Timer callback: clears the message only if `token` is still current.
    pub fn expire(&mut self, token: NoticeToken) {
        if token.generation == self.generation {
            self.text = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expire_clears_current_notice() {
        let mut notice = Notice::default();
        let token = notice.set_transient("not quite");
        assert_eq!(notice.text(), Some("not quite"));
        notice.expire(token);
        assert_eq!(notice.text(), None);
    }

    #[test]
    fn test_stale_timer_is_noop() {
        let mut notice = Notice::default();
        let stale = notice.set_transient("first");
        let _current = notice.set_transient("second");
        notice.expire(stale);
        assert_eq!(notice.text(), Some("second"));
    }

    #[test]
    fn test_sticky_survives_pending_timer() {
        let mut notice = Notice::default();
        let token = notice.set_transient("try again");
        notice.set_sticky("you won!");
        notice.expire(token);
        assert_eq!(notice.text(), Some("you won!"));
    }

    #[test]
    fn test_clear_invalidates_tokens() {
        let mut notice = Notice::default();
        let token = notice.set_transient("msg");
        notice.clear();
        notice.set_sticky("kept");
        notice.expire(token);
        assert_eq!(notice.text(), Some("kept"));
    }
}
