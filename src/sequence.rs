//! Detection of a fixed key sequence (the Konami code by default).

/// Keys of the Konami code, as reported by `KeyboardEvent.key`.
pub const KONAMI_CODE: [&str; 10] = [
    "ArrowUp",
    "ArrowUp",
    "ArrowDown",
    "ArrowDown",
    "ArrowLeft",
    "ArrowRight",
    "ArrowLeft",
    "ArrowRight",
    "b",
    "a",
];

/// Matches key presses against a sequence.
///
/// A wrong key restarts matching from the beginning; the wrong key itself
/// is not counted as a new start.
///
/// ## Example
///
/// ```rust
/// use landing_fx::{SequenceDetector, KONAMI_CODE};
///
/// let mut detector = SequenceDetector::konami();
/// let completed = KONAMI_CODE.iter().filter(|key| detector.push(key)).count();
/// assert_eq!(completed, 1);
/// assert_eq!(detector.position(), 0);
/// ```
#[derive(Clone, Debug)]
pub struct SequenceDetector {
    keys: Vec<String>,
    position: usize,
}

impl Default for SequenceDetector {
    fn default() -> Self {
        Self::konami()
    }
}

impl SequenceDetector {
    /// Create a detector for the given keys.
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            position: 0,
        }
    }

    /// Create a detector for the Konami code.
    pub fn konami() -> Self {
        Self::new(KONAMI_CODE)
    }

    /// Number of keys already matched.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Get the expected sequence.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Feed one key press.
    ///
    /// Returns `true` when the key completes the sequence; matching then
    /// starts over.
    pub fn push(&mut self, key: &str) -> bool {
        if self.keys.is_empty() {
            return false;
        }
        if self.keys[self.position] != key {
            self.position = 0;
            return false;
        }
        self.position += 1;
        if self.position == self.keys.len() {
            self.position = 0;
            return true;
        }
        false
    }
}
