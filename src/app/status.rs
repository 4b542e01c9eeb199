#[derive(Debug, Clone)]
pub struct StatusLine {
    message: String,
}

pub const READY_STATUS: &str = "Ready. Press Ctrl+S to submit the parameters.";

impl Default for StatusLine {
    fn default() -> Self {
        Self {
            message: READY_STATUS.to_string(),
        }
    }
}

impl StatusLine {
    pub fn set_raw(&mut self, msg: impl Into<String>) {
        self.message = msg.into();
    }

    pub fn editing(&mut self, label: &str) {
        self.message = format!("Editing {label}");
    }

    pub fn value_updated(&mut self, label: &str) {
        self.message = format!("{label} updated");
    }

    pub fn defaults_restored(&mut self) {
        self.message = "Defaults restored".to_string();
    }

    pub fn issues_remaining(&mut self, count: usize) {
        self.message = format!("{count} parameter(s) still need attention");
    }

    pub fn pending_exit(&mut self) {
        self.message = "Unsubmitted changes. Press Ctrl+Q again to quit.".to_string();
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
