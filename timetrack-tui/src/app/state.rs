use std::time::{Duration, Instant};
use timetrack_client::{ActivityId, TaskId};

/// How long a status message stays visible before it expires on its own.
pub const STATUS_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum View {
    Activities,
    Tasks,
    TimeEntries,
    ActivityForm,
    TaskForm,
    ConfirmDelete,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatusKind {
    Success,
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
    pub shown_at: Instant,
}

impl StatusMessage {
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= STATUS_TIMEOUT
    }
}

/// What a pending delete confirmation will remove.
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteTarget {
    Activity { id: ActivityId, name: String },
    Task { id: TaskId, name: String },
}

impl DeleteTarget {
    pub fn label(&self) -> String {
        match self {
            DeleteTarget::Activity { name, .. } => format!("Activity: {}", name),
            DeleteTarget::Task { name, .. } => format!("Task: {}", name),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteContext {
    pub target: DeleteTarget,
    /// View to go back to once the dialog closes.
    pub origin: View,
}

/// A text input with mid-string cursor support.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextInput {
    pub value: String,
    pub cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_str(s: &str) -> Self {
        Self {
            value: s.to_string(),
            cursor: s.len(),
        }
    }

    /// Insert a character at the cursor position.
    pub fn insert(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Delete the character immediately before the cursor (backspace).
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let new_cursor = self.prev_boundary(self.cursor);
        self.value.drain(new_cursor..self.cursor);
        self.cursor = new_cursor;
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.prev_boundary(self.cursor);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.value.len() {
            self.cursor = self.next_boundary(self.cursor);
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }
    pub fn end(&mut self) {
        self.cursor = self.value.len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Returns the string split at the cursor: (before, after).
    pub fn split_at_cursor(&self) -> (&str, &str) {
        (&self.value[..self.cursor], &self.value[self.cursor..])
    }

    fn prev_boundary(&self, pos: usize) -> usize {
        let mut p = pos;
        loop {
            p -= 1;
            if self.value.is_char_boundary(p) {
                return p;
            }
        }
    }

    fn next_boundary(&self, pos: usize) -> usize {
        let mut p = pos + 1;
        while p <= self.value.len() && !self.value.is_char_boundary(p) {
            p += 1;
        }
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_input_edits_at_cursor() {
        let mut input = TextInput::from_str("Drft");
        input.move_left();
        input.move_left();
        input.insert('a');
        assert_eq!(input.value, "Draft");
        assert_eq!(input.split_at_cursor(), ("Dra", "ft"));

        input.end();
        input.backspace();
        assert_eq!(input.value, "Draf");
    }

    #[test]
    fn text_input_handles_multibyte_chars() {
        let mut input = TextInput::from_str("Möte");
        input.move_left();
        input.move_left();
        input.backspace();
        assert_eq!(input.value, "Mte");
        assert_eq!(input.cursor, 1);
    }

    #[test]
    fn status_expires_after_timeout() {
        let shown_at = Instant::now();
        let status = StatusMessage {
            kind: StatusKind::Info,
            text: "Saved".to_string(),
            shown_at,
        };
        assert!(!status.is_expired(shown_at + Duration::from_millis(2900)));
        assert!(status.is_expired(shown_at + STATUS_TIMEOUT));
    }
}
