//! Page configuration: selectors, thresholds and timings.
//!
//! Every default matches the Lekka landing page. With the `toml` feature
//! a partial document overrides only the keys it names.

use crate::{CounterGlyphs, FrameTiming, ObserveOptions, KONAMI_CODE};

/// Error returned by [`PageConfig::validate`] and [`PageConfig::from_toml_str`].
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A visibility threshold outside 0.0 - 1.0
    InvalidThreshold { field: &'static str, value: f64 },
    /// A frame rate of zero
    ZeroFps,
    /// A required selector or id is empty
    EmptySelector { field: &'static str },
    /// Counter glyphs may not contain digits
    DigitGlyph { glyph: char },
    /// The TOML document could not be parsed
    Toml(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidThreshold { field, value } => {
                write!(f, "Invalid threshold for {}: {} (expected 0.0 - 1.0)", field, value)
            }
            ConfigError::ZeroFps => write!(f, "Counter fps must be greater than zero"),
            ConfigError::EmptySelector { field } => write!(f, "Empty selector: {}", field),
            ConfigError::DigitGlyph { glyph } => {
                write!(f, "Counter glyphs may not contain digits: {:?}", glyph)
            }
            ConfigError::Toml(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Navbar scrolled state.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NavbarConfig {
    pub id: String,
    pub scrolled_class: String,
    /// Scroll offset in pixels past which the navbar counts as scrolled
    pub scroll_threshold: f64,
}

impl Default for NavbarConfig {
    fn default() -> Self {
        Self {
            id: "navbar".into(),
            scrolled_class: "navbar--scrolled".into(),
            scroll_threshold: 50.0,
        }
    }
}

/// Mobile menu elements.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MenuConfig {
    pub toggle_id: String,
    pub menu_id: String,
    /// Links that close the menu when clicked
    pub link_selector: String,
    pub active_class: String,
    /// Class put on `<body>` while the menu is open
    pub body_open_class: String,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            toggle_id: "hamburger".into(),
            menu_id: "mobile-menu".into(),
            link_selector: ".mobile-menu__link, .mobile-menu__cta".into(),
            active_class: "active".into(),
            body_open_class: "menu-open".into(),
        }
    }
}

/// Smooth scrolling for same-page anchors.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AnchorConfig {
    pub link_selector: String,
    /// Space kept between the header and the target, in pixels
    pub margin: f64,
}

impl Default for AnchorConfig {
    fn default() -> Self {
        Self {
            link_selector: "a[href^=\"#\"]".into(),
            margin: 20.0,
        }
    }
}

/// Scroll reveal animations.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RevealConfig {
    pub selector: String,
    /// Containers whose children reveal one after another
    pub stagger_selector: String,
    pub observe: ObserveOptions,
    pub pending_class: String,
    pub stagger_class: String,
    pub revealed_class: String,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            selector: ".section-header, .feature-card, .problem__card, .step, .use-case, .trust__content, .cta__content".into(),
            stagger_selector: ".features__grid, .problem__cards, .use-cases__grid".into(),
            observe: ObserveOptions::reveal(),
            pending_class: "scroll-reveal".into(),
            stagger_class: "stagger-children".into(),
            revealed_class: "revealed".into(),
        }
    }
}

/// Parallax decoration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParallaxConfig {
    pub selector: String,
    /// Fraction of the scroll offset applied to the elements
    pub speed: f64,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            selector: ".hero__gradient, .phone-mockup__glow".into(),
            speed: 0.3,
        }
    }
}

/// Animated statistics.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CounterConfig {
    pub selector: String,
    pub observe: ObserveOptions,
    pub timing: FrameTiming,
    pub glyphs: CounterGlyphs,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            selector: ".cta__stat-number".into(),
            observe: ObserveOptions::counter(),
            timing: FrameTiming::default(),
            glyphs: CounterGlyphs::default(),
        }
    }
}

/// Hidden key sequence effect.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SequenceConfig {
    pub enabled: bool,
    pub keys: Vec<String>,
    /// CSS `animation` applied to `<body>`
    pub animation: String,
    /// How long the animation stays applied, in milliseconds
    pub duration_ms: u32,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            keys: KONAMI_CODE.iter().map(|k| k.to_string()).collect(),
            animation: "rainbow 2s linear".into(),
            duration_ms: 2000,
        }
    }
}

/// Configuration for every page behaviour.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PageConfig {
    pub navbar: NavbarConfig,
    pub menu: MenuConfig,
    pub anchor: AnchorConfig,
    pub reveal: RevealConfig,
    pub parallax: ParallaxConfig,
    pub counter: CounterConfig,
    pub sequence: SequenceConfig,
    /// Print the banner messages to the console at start-up
    pub banner: bool,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            navbar: NavbarConfig::default(),
            menu: MenuConfig::default(),
            anchor: AnchorConfig::default(),
            reveal: RevealConfig::default(),
            parallax: ParallaxConfig::default(),
            counter: CounterConfig::default(),
            sequence: SequenceConfig::default(),
            banner: true,
        }
    }
}

impl PageConfig {
    /// Parse a TOML document into a validated `PageConfig`.
    ///
    /// Missing tables and keys keep their defaults.
    #[cfg(feature = "toml")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(|e| ConfigError::Toml(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check thresholds, frame rate, selectors and glyphs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("reveal.observe.threshold", self.reveal.observe.threshold),
            ("counter.observe.threshold", self.counter.observe.threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidThreshold { field, value });
            }
        }

        if self.counter.timing.fps == 0 {
            return Err(ConfigError::ZeroFps);
        }

        for (field, value) in [
            ("navbar.id", &self.navbar.id),
            ("menu.toggle_id", &self.menu.toggle_id),
            ("menu.menu_id", &self.menu.menu_id),
            ("anchor.link_selector", &self.anchor.link_selector),
            ("reveal.selector", &self.reveal.selector),
            ("parallax.selector", &self.parallax.selector),
            ("counter.selector", &self.counter.selector),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::EmptySelector { field });
            }
        }

        if self.sequence.enabled && self.sequence.keys.is_empty() {
            return Err(ConfigError::EmptySelector {
                field: "sequence.keys",
            });
        }

        let glyphs = &self.counter.glyphs;
        if let Some(glyph) = glyphs
            .prefix
            .chars()
            .chain(glyphs.suffix.chars())
            .find(|c| c.is_ascii_digit())
        {
            return Err(ConfigError::DigitGlyph { glyph });
        }

        Ok(())
    }
}
