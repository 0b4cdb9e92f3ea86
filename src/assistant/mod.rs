//! Mood-input assistant: the free-text mood form with suggestion pills.
//!
//! Purely local — no network, no shared state. Validation blocks empty
//! submissions with a single error banner that any subsequent edit clears.

use unicode_width::UnicodeWidthChar;

/// Canned prompts offered under the input field.
pub const SUGGESTIONS: &[&str] = &[
    "I'm feeling really happy and energetic today!",
    "I've been feeling a bit down lately",
    "Need to focus on my work right now",
    "Looking for something to help me relax after a long day",
];

/// Display budget for a pill label before it gets an ellipsis marker.
pub const PILL_LABEL_BUDGET: usize = 25;

const EMPTY_INPUT_ERROR: &str = "Please tell us how you're feeling";

/// Truncate a suggestion to its pill label. The full text is what a pill
/// applies; only the label is shortened.
pub fn pill_label(text: &str) -> String {
    let mut width = 0usize;
    let mut cut = text.len();
    for (idx, ch) in text.char_indices() {
        let w = ch.width().unwrap_or(0);
        if width + w > PILL_LABEL_BUDGET {
            cut = idx;
            break;
        }
        width += w;
    }
    if cut == text.len() {
        text.to_string()
    } else {
        format!("{}...", &text[..cut])
    }
}

#[derive(Debug, Clone, Default)]
pub struct MoodInput {
    pub buffer: String,
    pub error: Option<String>,
    pub invalid: bool,
    pub selected_pill: usize,
}

impl MoodInput {
    pub fn push_char(&mut self, c: char) {
        self.buffer.push(c);
        self.clear_error();
    }

    pub fn backspace(&mut self) {
        self.buffer.pop();
        self.clear_error();
    }

    pub fn select_prev_pill(&mut self) {
        if self.selected_pill > 0 {
            self.selected_pill -= 1;
        }
    }

    pub fn select_next_pill(&mut self) {
        if self.selected_pill + 1 < SUGGESTIONS.len() {
            self.selected_pill += 1;
        }
    }

    /// Overwrite the buffer with the selected pill's full text.
    pub fn apply_selected_pill(&mut self) {
        if let Some(text) = SUGGESTIONS.get(self.selected_pill) {
            self.buffer = text.to_string();
            self.clear_error();
        }
    }

    /// Validate and take the mood text. Empty or whitespace-only input is
    /// blocked: the field is marked invalid and one error banner is shown
    /// (replacing any prior one).
    pub fn submit(&mut self) -> Option<String> {
        let trimmed = self.buffer.trim();
        if trimmed.is_empty() {
            self.error = Some(EMPTY_INPUT_ERROR.to_string());
            self.invalid = true;
            return None;
        }
        Some(trimmed.to_string())
    }

    fn clear_error(&mut self) {
        self.error = None;
        self.invalid = false;
    }
}
