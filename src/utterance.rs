//! Output buffer for spoken text
//!
//! The verbalizer pushes words and prosodic breaks; the buffer decides the
//! spacing. A break is only written once a later word arrives, so breaks at
//! the very start or end of the output vanish and back-to-back breaks
//! collapse into the strongest one.

/// A prosodic break between words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Break {
    /// A short pause, written `,`.
    Pause,
    /// A longer stop between items such as matrix rows, written `;`.
    Stop,
}

/// Spoken text under construction.
#[derive(Debug, Default)]
pub struct Utterance {
    text: String,
    pending: Option<Break>,
}

impl Utterance {
    /// Creates an empty utterance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a word or phrase. Empty input is ignored.
    pub fn word(&mut self, word: &str) {
        let word = word.trim();
        if word.is_empty() {
            return;
        }
        if !self.text.is_empty() {
            match self.pending.take() {
                Some(Break::Pause) => self.text.push_str(", "),
                Some(Break::Stop) => self.text.push_str("; "),
                None => self.text.push(' '),
            }
        }
        self.pending = None;
        self.text.push_str(word);
    }

    /// Requests a short pause before the next word.
    pub fn pause(&mut self) {
        self.request(Break::Pause);
    }

    /// Requests a stop before the next word.
    pub fn stop(&mut self) {
        self.request(Break::Stop);
    }

    fn request(&mut self, brk: Break) {
        if self.text.is_empty() {
            return;
        }
        self.pending = self.pending.max(Some(brk));
    }

    /// Returns `true` when nothing has been spoken yet.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Finishes the utterance; a trailing break is dropped.
    #[must_use]
    pub fn finish(self) -> String {
        self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breaks_collapse() {
        let mut out = Utterance::new();
        out.pause();
        out.word("row one");
        out.pause();
        out.word("a");
        out.pause();
        out.stop();
        out.word("row two");
        out.stop();
        assert_eq!(out.finish(), "row one, a; row two");
    }

    #[test]
    fn test_empty_words_are_skipped() {
        let mut out = Utterance::new();
        out.word("");
        out.word("x");
        out.word("  ");
        out.word("squared");
        assert_eq!(out.finish(), "x squared");
    }
}
