//! Frame-stepped counter animation.

use crate::{parse_counter_text, CounterGlyphs, CounterText, ParseError};

/// Ease-out quadratic curve: fast start, gentle stop.
///
/// `t` is clamped to `0.0..=1.0`.
#[inline]
pub fn ease_out_quad(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * (2.0 - t)
}

/// Duration and frame rate of a counter animation.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FrameTiming {
    /// Total wall-clock duration in milliseconds
    pub duration_ms: u32,
    /// Frames per second
    pub fps: u32,
}

impl Default for FrameTiming {
    fn default() -> Self {
        Self {
            duration_ms: 2000,
            fps: 60,
        }
    }
}

impl FrameTiming {
    /// Create a timing with the given duration and frame rate.
    pub fn new(duration_ms: u32, fps: u32) -> Self {
        Self {
            duration_ms,
            fps: fps.max(1),
        }
    }

    /// Exact time between two frames in milliseconds.
    #[inline]
    pub fn frame_interval_ms(&self) -> f64 {
        1000.0 / self.fps.max(1) as f64
    }

    /// Get the interval in whole milliseconds between frames.
    ///
    /// Use this to configure your timer.
    #[inline]
    pub fn interval_ms(&self) -> u32 {
        self.frame_interval_ms().max(1.0) as u32
    }

    /// Number of frames the animation runs for (at least one).
    pub fn total_frames(&self) -> u32 {
        let frames = (self.duration_ms as f64 / self.frame_interval_ms()).round() as u32;
        frames.max(1)
    }
}

/// Current state of a counter animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CounterState {
    /// No frame has been produced yet
    Pending,
    /// At least one frame has been produced
    Running,
    /// The final text has been produced
    Finished,
}

/// Platform-agnostic counter animation.
///
/// Like a frame player, this type does not handle timing itself. The caller
/// calls `tick()` every `timing().interval_ms()` and writes the returned text
/// into the element. The final frame always yields the exact target text.
///
/// ## Example
///
/// ```rust
/// use landing_fx::{CounterAnimation, CounterState, CounterText, FrameTiming};
///
/// let mut anim = CounterAnimation::new(CounterText::new("₹", 500, "+"), FrameTiming::default());
/// assert_eq!(anim.state(), CounterState::Pending);
///
/// let first = anim.tick().unwrap();
/// assert!(first.starts_with('₹') && first.ends_with('+'));
///
/// let last = anim.by_ref().last().unwrap();
/// assert_eq!(last, "₹500+");
/// assert_eq!(anim.state(), CounterState::Finished);
/// assert_eq!(anim.tick(), None);
/// ```
#[derive(Clone, Debug)]
pub struct CounterAnimation {
    /// Target and decorations
    target: CounterText,
    /// Duration and cadence
    timing: FrameTiming,
    /// Last produced frame (1-indexed, 0 before the first tick)
    frame: u32,
    /// Total number of frames
    total_frames: u32,
}

impl CounterAnimation {
    /// Create an animation counting from zero up to `target.value`.
    pub fn new(target: CounterText, timing: FrameTiming) -> Self {
        Self {
            total_frames: timing.total_frames(),
            target,
            timing,
            frame: 0,
        }
    }

    /// Create an animation from an element's current display text.
    ///
    /// Text that cannot be parsed is not animatable and must be left as is.
    pub fn from_display(
        text: &str,
        glyphs: &CounterGlyphs,
        timing: FrameTiming,
    ) -> Result<Self, ParseError> {
        parse_counter_text(text, glyphs).map(|target| Self::new(target, timing))
    }

    /// Get the counter being animated.
    #[inline]
    pub fn target(&self) -> &CounterText {
        &self.target
    }

    /// Get the timing of this animation.
    #[inline]
    pub fn timing(&self) -> FrameTiming {
        self.timing
    }

    /// Get the last produced frame number (0 before the first tick).
    #[inline]
    pub fn current_frame(&self) -> u32 {
        self.frame
    }

    /// Get the total number of frames.
    #[inline]
    pub fn total_frames(&self) -> u32 {
        self.total_frames
    }

    /// Linear progress (0.0 - 1.0) of the last produced frame.
    pub fn progress(&self) -> f64 {
        self.frame as f64 / self.total_frames as f64
    }

    /// Get the current state.
    pub fn state(&self) -> CounterState {
        if self.frame == 0 {
            CounterState::Pending
        } else if self.frame >= self.total_frames {
            CounterState::Finished
        } else {
            CounterState::Running
        }
    }

    /// Check if the final frame has been produced.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.state() == CounterState::Finished
    }

    /// Value displayed on the given frame, before decorations.
    pub fn value_at(&self, frame: u32) -> u64 {
        if frame >= self.total_frames {
            return self.target.value;
        }
        let t = frame as f64 / self.total_frames as f64;
        (self.target.value as f64 * ease_out_quad(t)).round() as u64
    }

    /// Advance one frame and return the text to display.
    ///
    /// Returns `None` once the animation has finished.
    pub fn tick(&mut self) -> Option<String> {
        if self.is_finished() {
            return None;
        }
        self.frame += 1;
        if self.frame == self.total_frames {
            // Exact target text, whatever the rounding of earlier frames.
            Some(self.target.final_text())
        } else {
            Some(self.target.format(self.value_at(self.frame)))
        }
    }
}

impl Iterator for CounterAnimation {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.tick()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.total_frames.saturating_sub(self.frame) as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for CounterAnimation {}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter(prefix: &str, value: u64, suffix: &str) -> CounterAnimation {
        CounterAnimation::new(CounterText::new(prefix, value, suffix), FrameTiming::default())
    }

    #[test]
    fn test_ease_out_quad() {
        assert_eq!(ease_out_quad(0.0), 0.0);
        assert_eq!(ease_out_quad(0.5), 0.75);
        assert_eq!(ease_out_quad(1.0), 1.0);
        // Clamped outside 0..=1
        assert_eq!(ease_out_quad(-1.0), 0.0);
        assert_eq!(ease_out_quad(2.0), 1.0);
    }

    #[test]
    fn test_default_timing() {
        let timing = FrameTiming::default();
        assert_eq!(timing.total_frames(), 120);
        assert_eq!(timing.interval_ms(), 16); // 1000/60 ≈ 16.67
        assert!((timing.frame_interval_ms() - 16.666).abs() < 0.01);
    }

    #[test]
    fn test_zero_duration_still_has_one_frame() {
        let mut anim = CounterAnimation::new(CounterText::new("", 7, ""), FrameTiming::new(0, 60));
        assert_eq!(anim.total_frames(), 1);
        assert_eq!(anim.tick().as_deref(), Some("7"));
        assert!(anim.is_finished());
    }

    #[test]
    fn test_frame_count_and_final_text() {
        let anim = counter("₹", 500, "+");
        let frames: Vec<String> = anim.collect();
        assert_eq!(frames.len(), 120);
        assert_eq!(frames.last().map(String::as_str), Some("₹500+"));
    }

    #[test]
    fn test_suffix_only_final_text() {
        let frames: Vec<String> = counter("", 24, "K").collect();
        assert_eq!(frames.last().map(String::as_str), Some("24K"));
    }

    #[test]
    fn test_values_follow_easing() {
        let mut anim = counter("", 500, "");
        // Frame 60 of 120 is halfway: 500 * 0.75
        let halfway = anim.by_ref().nth(59).unwrap();
        assert_eq!(halfway, "375");
        assert_eq!(anim.current_frame(), 60);
        assert!((anim.progress() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_values_never_decrease() {
        let anim = counter("", 987, "");
        let values: Vec<u64> = anim.map(|s| s.parse().unwrap()).collect();
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(*values.last().unwrap(), 987);
    }

    #[test]
    fn test_state_transitions() {
        let mut anim = counter("", 10, "");
        assert_eq!(anim.state(), CounterState::Pending);
        anim.tick();
        assert_eq!(anim.state(), CounterState::Running);
        for _ in 0..200 {
            anim.tick();
        }
        assert_eq!(anim.state(), CounterState::Finished);
        assert_eq!(anim.current_frame(), 120);
        assert_eq!(anim.tick(), None);
    }

    #[test]
    fn test_size_hint() {
        let mut anim = counter("", 3, "");
        assert_eq!(anim.len(), 120);
        anim.tick();
        assert_eq!(anim.len(), 119);
    }

    #[test]
    fn test_from_display() {
        let glyphs = CounterGlyphs::default();
        let anim =
            CounterAnimation::from_display("₹500+", &glyphs, FrameTiming::default()).unwrap();
        assert_eq!(anim.target(), &CounterText::new("₹", 500, "+"));
        assert_eq!(anim.last().as_deref(), Some("₹500+"));
    }

    #[test]
    fn test_from_display_not_animatable() {
        let glyphs = CounterGlyphs::default();
        let result = CounterAnimation::from_display("Unlimited", &glyphs, FrameTiming::default());
        assert!(matches!(result, Err(ParseError::NoDigits { .. })));
    }

    #[test]
    fn test_zero_target() {
        let frames: Vec<String> = counter("₹", 0, "+").collect();
        assert!(frames.iter().all(|f| f == "₹0+"));
    }
}
