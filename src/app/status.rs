use std::time::{Duration, Instant};

pub const READY_STATUS: &str = "Ready. Press Ctrl+S to save.";

/// Short-lived message shown above the status line.
#[derive(Debug, Clone)]
struct Notice {
    message: String,
    expires_at: Instant,
}

#[derive(Debug, Clone)]
pub struct StatusLine {
    message: String,
    notice: Option<Notice>,
    notice_duration: Duration,
}

impl Default for StatusLine {
    fn default() -> Self {
        Self::new(Duration::from_secs(3))
    }
}

impl StatusLine {
    pub fn new(notice_duration: Duration) -> Self {
        Self {
            message: READY_STATUS.to_string(),
            notice: None,
            notice_duration,
        }
    }

    pub fn set_raw(&mut self, msg: impl Into<String>) {
        self.message = msg.into();
    }

    pub fn ready(&mut self) {
        self.message = READY_STATUS.to_string();
    }

    pub fn editing(&mut self, label: &str) {
        self.message = format!("Editing {label}");
    }

    pub fn saved(&mut self, schema: &str) {
        self.message = format!("{schema} saved");
        self.notify("Changes saved");
    }

    pub fn issues_remaining(&mut self, count: usize) {
        self.message = format!("{count} issue(s) remaining");
    }

    pub fn pending_exit(&mut self) {
        self.message = "Unsaved changes. Press Ctrl+Q again to quit without saving.".to_string();
    }

    pub fn notify(&mut self, msg: impl Into<String>) {
        self.notice = Some(Notice {
            message: msg.into(),
            expires_at: Instant::now() + self.notice_duration,
        });
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Drop the notice once it expired. Returns `true` when something changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self
            .notice
            .as_ref()
            .is_some_and(|notice| notice.expires_at <= now)
        {
            self.notice = None;
            return true;
        }
        false
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_ref().map(|notice| notice.message.as_str())
    }
}
