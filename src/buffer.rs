//! Bounded accumulator for the rendered prompt.

use log::warn;

/// Largest prompt, in bytes, a single render may produce.
pub const PROMPT_CAPACITY: usize = 4096;

/// Append-only text buffer with a fixed capacity.
///
/// Once a fragment has been cut short every later append is dropped, so the
/// buffer always holds a prefix of the fragments in the order they arrived.
#[derive(Debug)]
pub struct PromptBuffer {
    text: String,
    capacity: usize,
    full: bool,
}

impl Default for PromptBuffer {
    fn default() -> Self {
        Self::with_capacity(PROMPT_CAPACITY)
    }
}

impl PromptBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            text: String::with_capacity(capacity),
            capacity,
            full: false,
        }
    }

    /// Append a fragment, returning how many of its bytes were kept.
    pub fn append(&mut self, fragment: &str) -> usize {
        if self.full {
            return 0;
        }
        let room = self.capacity - self.text.len();
        let mut end = fragment.len().min(room);
        while !fragment.is_char_boundary(end) {
            end -= 1;
        }
        self.text.push_str(&fragment[..end]);
        if end < fragment.len() {
            warn!(
                "prompt buffer full at {} bytes, dropped {} bytes",
                self.capacity,
                fragment.len() - end
            );
            self.full = true;
        }
        end
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn into_string(self) -> String {
        self.text
    }
}
