//! Parsing of counter display strings such as `"₹500K+"`.

/// Error type for counter text parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The text contains no digit at all
    NoDigits { text: String },
    /// The digits do not fit in a `u64`
    Overflow { digits: String },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::NoDigits { text } => {
                write!(f, "No digits in counter text {:?}", text)
            }
            ParseError::Overflow { digits } => {
                write!(f, "Counter value too large: {}", digits)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Characters allowed around the number of a counter.
///
/// The defaults match the statistics shown on the landing page
/// (`₹` and `+` before the number, `+`, `L` and `K` after it).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CounterGlyphs {
    /// Characters that may lead the number
    pub prefix: String,
    /// Characters that may trail the number
    pub suffix: String,
}

impl Default for CounterGlyphs {
    fn default() -> Self {
        Self {
            prefix: "₹+".to_string(),
            suffix: "+LK".to_string(),
        }
    }
}

impl CounterGlyphs {
    /// Create a glyph set from explicit prefix and suffix characters.
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }
}

/// A counter split into its decorations and its numeric target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CounterText {
    /// Glyphs before the number (may be empty)
    pub prefix: String,
    /// Target value
    pub value: u64,
    /// Glyphs after the number (may be empty)
    pub suffix: String,
}

impl CounterText {
    /// Create a counter text from its parts.
    pub fn new(prefix: impl Into<String>, value: u64, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            value,
            suffix: suffix.into(),
        }
    }

    /// Render an intermediate value with this counter's decorations.
    pub fn format(&self, value: u64) -> String {
        format!("{}{}{}", self.prefix, value, self.suffix)
    }

    /// Render the target value with this counter's decorations.
    #[inline]
    pub fn final_text(&self) -> String {
        self.format(self.value)
    }
}

/// Parse a counter display string into prefix, value and suffix.
///
/// The prefix is the leading run of `glyphs.prefix` characters and the
/// suffix is the trailing run of `glyphs.suffix` characters. The value is
/// every ASCII digit of the text read as one base-10 number, so separators
/// such as `,` are dropped.
///
/// ## Example
///
/// ```rust
/// use landing_fx::{parse_counter_text, CounterGlyphs};
///
/// let counter = parse_counter_text("₹500K+", &CounterGlyphs::default()).unwrap();
/// assert_eq!(counter.prefix, "₹");
/// assert_eq!(counter.value, 500);
/// assert_eq!(counter.suffix, "K+");
/// assert_eq!(counter.final_text(), "₹500K+");
/// ```
pub fn parse_counter_text(text: &str, glyphs: &CounterGlyphs) -> Result<CounterText, ParseError> {
    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return Err(ParseError::NoDigits {
            text: text.to_string(),
        });
    }
    let value = digits
        .parse::<u64>()
        .map_err(|_| ParseError::Overflow { digits: digits.clone() })?;

    let prefix_len: usize = text
        .chars()
        .take_while(|c| glyphs.prefix.contains(*c))
        .map(char::len_utf8)
        .sum();
    let prefix = &text[..prefix_len];

    // The suffix is taken from what follows the prefix so the two never overlap.
    let rest = &text[prefix_len..];
    let suffix_len: usize = rest
        .chars()
        .rev()
        .take_while(|c| glyphs.suffix.contains(*c))
        .map(char::len_utf8)
        .sum();
    let suffix = &rest[rest.len() - suffix_len..];

    Ok(CounterText::new(prefix, value, suffix))
}
