//! Scroll-driven state: navbar flag, anchor destinations and parallax.

/// Navbar "scrolled" flag driven by the vertical scroll offset.
#[derive(Clone, Debug, PartialEq)]
pub struct NavbarScroll {
    /// Offset in pixels above which the page counts as scrolled
    threshold: f64,
    /// Current flag
    scrolled: bool,
}

impl Default for NavbarScroll {
    fn default() -> Self {
        Self::new(50.0)
    }
}

impl NavbarScroll {
    /// Create a flag that flips once the offset exceeds `threshold`.
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            scrolled: false,
        }
    }

    /// Get the threshold in pixels.
    #[inline]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Check if the page currently counts as scrolled.
    #[inline]
    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    /// Re-evaluate the flag for a new scroll offset.
    ///
    /// Returns the new flag when it changed, `None` otherwise.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use landing_fx::NavbarScroll;
    ///
    /// let mut navbar = NavbarScroll::new(50.0);
    /// assert_eq!(navbar.update(80.0), Some(true));
    /// assert_eq!(navbar.update(120.0), None);
    /// assert_eq!(navbar.update(30.0), Some(false));
    /// ```
    pub fn update(&mut self, offset: f64) -> Option<bool> {
        let scrolled = offset > self.threshold;
        if scrolled == self.scrolled {
            return None;
        }
        self.scrolled = scrolled;
        Some(scrolled)
    }
}

/// Get the element selector behind a same-page anchor href.
///
/// Returns `None` for the bare `"#"` and for links leaving the page.
pub fn anchor_selector(href: &str) -> Option<&str> {
    if href.len() > 1 && href.starts_with('#') {
        Some(href)
    } else {
        None
    }
}

/// Compute the page offset to scroll to so a target clears the header.
///
/// ## Arguments
///
/// * `target_top` - Top of the target relative to the viewport
/// * `page_offset` - Current vertical scroll offset
/// * `header_height` - Height of the fixed header
/// * `margin` - Extra space kept above the target
#[inline]
pub fn scroll_destination(
    target_top: f64,
    page_offset: f64,
    header_height: f64,
    margin: f64,
) -> f64 {
    target_top + page_offset - header_height - margin
}

/// Parallax offset calculation with per-frame coalescing.
///
/// Scroll events only schedule work; at most one animation frame is
/// pending at a time and it reads the latest scroll offset.
///
/// ## Example
///
/// ```rust
/// use landing_fx::Parallax;
///
/// let mut parallax = Parallax::new(0.3);
/// assert!(parallax.on_scroll());   // schedule a frame
/// assert!(!parallax.on_scroll());  // coalesced
/// assert_eq!(parallax.on_frame(100.0), -30.0);
/// assert!(parallax.on_scroll());   // next burst
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Parallax {
    /// Fraction of the scroll offset applied to elements
    speed: f64,
    /// Whether a frame is already scheduled
    ticking: bool,
}

impl Default for Parallax {
    fn default() -> Self {
        Self::new(0.3)
    }
}

impl Parallax {
    /// Create a parallax moving elements at `speed` times the scroll offset.
    pub fn new(speed: f64) -> Self {
        Self {
            speed,
            ticking: false,
        }
    }

    /// Get the speed factor.
    #[inline]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Check if a frame is already scheduled.
    #[inline]
    pub fn is_ticking(&self) -> bool {
        self.ticking
    }

    /// Handle a scroll event.
    ///
    /// Returns `true` when the caller must schedule an animation frame.
    pub fn on_scroll(&mut self) -> bool {
        if self.ticking {
            return false;
        }
        self.ticking = true;
        true
    }

    /// Run the scheduled frame and return the vertical offset to apply.
    pub fn on_frame(&mut self, scroll_y: f64) -> f64 {
        self.ticking = false;
        self.offset(scroll_y)
    }

    /// Forget a scheduled frame that will never run.
    pub fn cancel_frame(&mut self) {
        self.ticking = false;
    }

    /// Vertical offset for a scroll position (opposite to the scroll).
    pub fn offset(&self, scroll_y: f64) -> f64 {
        let y = -(scroll_y * self.speed);
        // Avoid rendering "-0px"
        if y == 0.0 {
            0.0
        } else {
            y
        }
    }
}

/// Render a vertical offset as a CSS transform.
pub fn translate_y(offset: f64) -> String {
    format!("translateY({}px)", offset)
}
