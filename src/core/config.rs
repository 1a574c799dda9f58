//! Spinner configuration: defaults, validation and persistence.
//!
//! Options can be written as a simple key-value text file, one option per
//! line:
//!
//! ```text
//! # ring-spinner configuration
//! ticks = 12
//! color = "#4fc3f7"
//! speed = 100
//! fade_curve = easeOut
//! ```
//!
//! Unknown keys are ignored.  A value that does not parse is logged and the
//! option keeps its default.

use std::path::Path;
use std::time::Duration;

use super::color::Rgb;
use super::curve::Curve;
use super::error::{SpinnerError, SpinnerResult};

// ───────────────────────────────────────── config ────────────

/// Everything a spinner needs to know at construction time.
///
/// Treated as immutable once handed to a widget; the widget keeps its own
/// copy.
#[derive(Debug, Clone, PartialEq)]
pub struct SpinnerConfig {
    /// Number of tick elements around the ring.
    pub ticks: usize,
    /// Tick width (short side).
    pub tick_width: f64,
    /// Tick height (long side, pointing outward).
    pub tick_height: f64,
    /// Overall widget diameter; the ring radius is half of this.
    pub size: f64,
    pub color: Rgb,
    /// Time between two animation steps.
    pub speed: Duration,
    pub fade_duration: Duration,
    pub fade_curve: Curve,
    /// Centre offset of the ring inside its container.
    pub offset: (f64, f64),
    pub border_radius: f64,
    /// Pull ticks inward by half their long side, for hosts that anchor
    /// the widget by its centre rather than a corner.
    pub origin_compensation: bool,
}

impl Default for SpinnerConfig {
    fn default() -> Self {
        Self {
            ticks: 12,
            tick_width: 2.0,
            tick_height: 6.0,
            size: 24.0,
            color: Rgb::WHITE,
            speed: Duration::from_millis(100),
            fade_duration: Duration::from_millis(1000),
            fade_curve: Curve::EaseOut,
            offset: (0.0, 0.0),
            border_radius: 1.0,
            origin_compensation: false,
        }
    }
}

impl SpinnerConfig {
    // ── builder-style setters ─────────────────────────────────

    pub fn with_ticks(mut self, ticks: usize) -> Self {
        self.ticks = ticks;
        self
    }

    pub fn with_tick_size(mut self, width: f64, height: f64) -> Self {
        self.tick_width = width;
        self.tick_height = height;
        self
    }

    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    pub fn with_speed(mut self, speed: Duration) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_fade(mut self, duration: Duration, curve: Curve) -> Self {
        self.fade_duration = duration;
        self.fade_curve = curve;
        self
    }

    pub fn with_origin_compensation(mut self, on: bool) -> Self {
        self.origin_compensation = on;
        self
    }

    // ── derived values ────────────────────────────────────────

    /// Ring radius after optional origin compensation.
    pub fn radius(&self) -> f64 {
        let base = self.size / 2.0;
        if self.origin_compensation {
            base - self.tick_width.max(self.tick_height) / 2.0
        } else {
            base
        }
    }

    /// Reject configurations that cannot produce a ring.
    pub fn validate(&self) -> SpinnerResult<()> {
        if self.ticks == 0 {
            return Err(SpinnerError::InvalidTickCount(self.ticks));
        }
        for (name, value) in [
            ("tick width", self.tick_width),
            ("tick height", self.tick_height),
            ("size", self.size),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(SpinnerError::InvalidDimension { name, value });
            }
        }
        if self.speed.is_zero() {
            return Err(SpinnerError::InvalidSpeed);
        }
        let radius = self.radius();
        if radius <= 0.0 {
            return Err(SpinnerError::InvalidDimension {
                name: "compensated radius",
                value: radius,
            });
        }
        Ok(())
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load a config file, layering its options over the defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(Self::parse(&contents))
    }

    /// Parse `key = value` lines over the defaults.
    pub fn parse(s: &str) -> Self {
        let mut config = Self::default();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim().trim_matches('"');

            match config.set_option(key, value) {
                Ok(true) => {}
                Ok(false) => tracing::debug!("ignoring unknown option {key:?}"),
                Err(e) => tracing::warn!("keeping default for {key:?}: {e}"),
            }
        }

        config
    }

    /// Apply a single named option.  Returns `Ok(false)` for keys this
    /// widget does not recognise.
    pub fn set_option(&mut self, key: &str, value: &str) -> anyhow::Result<bool> {
        match key {
            "ticks" => self.ticks = value.parse()?,
            "width" | "tick_width" => self.tick_width = value.parse()?,
            "height" | "tick_height" => self.tick_height = value.parse()?,
            "size" => self.size = value.parse()?,
            "color" => self.color = value.parse()?,
            "speed" => self.speed = Duration::from_millis(value.parse()?),
            "fade_duration" => self.fade_duration = Duration::from_millis(value.parse()?),
            "fade_curve" => self.fade_curve = value.parse()?,
            "offset" => self.offset = parse_pair(value)?,
            "border_radius" => self.border_radius = value.parse()?,
            "origin_compensation" => self.origin_compensation = value.parse()?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    /// Render back to the file format understood by [`SpinnerConfig::parse`].
    pub fn serialise(&self) -> String {
        let lines = [
            "# ring-spinner configuration".to_string(),
            format!("ticks = {}", self.ticks),
            format!("width = {}", self.tick_width),
            format!("height = {}", self.tick_height),
            format!("size = {}", self.size),
            format!("color = \"{}\"", self.color),
            format!("speed = {}", self.speed.as_millis()),
            format!("fade_duration = {}", self.fade_duration.as_millis()),
            format!("fade_curve = {}", self.fade_curve),
            format!("offset = {}, {}", self.offset.0, self.offset.1),
            format!("border_radius = {}", self.border_radius),
            format!("origin_compensation = {}", self.origin_compensation),
            String::new(),
        ];
        lines.join("\n")
    }
}

/// Parse `"x, y"` or `"[x, y]"`.
fn parse_pair(s: &str) -> anyhow::Result<(f64, f64)> {
    let inner = s.trim().trim_start_matches('[').trim_end_matches(']');
    let Some((x, y)) = inner.split_once(',') else {
        anyhow::bail!("expected two comma-separated numbers, got {s:?}");
    };
    Ok((x.trim().parse()?, y.trim().parse()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = SpinnerConfig::default();
        assert_eq!(config.ticks, 12);
        assert_eq!(config.speed, Duration::from_millis(100));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validation_rejects_degenerate_rings() {
        assert_eq!(
            SpinnerConfig::default().with_ticks(0).validate(),
            Err(SpinnerError::InvalidTickCount(0))
        );
        assert!(matches!(
            SpinnerConfig::default().with_tick_size(0.0, 4.0).validate(),
            Err(SpinnerError::InvalidDimension { name: "tick width", .. })
        ));
        assert!(matches!(
            SpinnerConfig::default().with_size(f64::NAN).validate(),
            Err(SpinnerError::InvalidDimension { name: "size", .. })
        ));
        assert_eq!(
            SpinnerConfig::default().with_speed(Duration::ZERO).validate(),
            Err(SpinnerError::InvalidSpeed)
        );
    }

    #[test]
    fn origin_compensation_pulls_radius_in_by_half_the_long_side() {
        let config = SpinnerConfig::default()
            .with_size(40.0)
            .with_tick_size(2.0, 8.0);
        assert_eq!(config.radius(), 20.0);
        assert_eq!(config.with_origin_compensation(true).radius(), 16.0);
    }

    #[test]
    fn compensation_that_swallows_the_ring_is_rejected() {
        let config = SpinnerConfig::default()
            .with_size(4.0)
            .with_tick_size(2.0, 6.0)
            .with_origin_compensation(true);
        assert!(matches!(
            config.validate(),
            Err(SpinnerError::InvalidDimension { name: "compensated radius", .. })
        ));
    }

    #[test]
    fn parse_layers_over_defaults_and_ignores_unknown_keys() {
        let config = SpinnerConfig::parse(
            "# comment\n\
             [spinner]\n\
             ticks = 8\n\
             color = \"#ff0000\"\n\
             speed = 80\n\
             fade_curve = linear\n\
             offset = [1.5, -2]\n\
             origin_compensation = true\n\
             wobble = 11\n",
        );
        assert_eq!(config.ticks, 8);
        assert_eq!(config.color, Rgb(0xff, 0, 0));
        assert_eq!(config.speed, Duration::from_millis(80));
        assert_eq!(config.fade_curve, Curve::Linear);
        assert_eq!(config.offset, (1.5, -2.0));
        assert!(config.origin_compensation);
        assert_eq!(config.size, SpinnerConfig::default().size);
    }

    #[test]
    fn malformed_values_keep_their_defaults() {
        let config = SpinnerConfig::parse("ticks = many\nfade_curve = wiggle\nsize = 30\n");
        assert_eq!(config.ticks, 12);
        assert_eq!(config.fade_curve, Curve::EaseOut);
        assert_eq!(config.size, 30.0);
    }

    #[test]
    fn serialised_config_parses_back_identically() {
        let config = SpinnerConfig::default()
            .with_ticks(9)
            .with_color(Rgb(1, 2, 3))
            .with_fade(Duration::from_millis(750), Curve::OutBack);
        assert_eq!(SpinnerConfig::parse(&config.serialise()), config);
    }

    #[test]
    fn load_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spinner.conf");
        std::fs::write(&path, "ticks = 6\nsize = 50\n").unwrap();

        let config = SpinnerConfig::load(&path).unwrap();
        assert_eq!(config.ticks, 6);
        assert_eq!(config.size, 50.0);

        assert!(SpinnerConfig::load(&dir.path().join("missing.conf")).is_err());
    }
}
