//! Easing curves used by animated opacity transitions.

use std::fmt;
use std::str::FromStr;

use super::error::SpinnerError;

/// An easing curve mapping normalised time `t ∈ [0, 1]` to progress.
///
/// Every curve satisfies `apply(0) == 0` and `apply(1) == 1`; `OutBack`
/// overshoots past 1 in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Curve {
    Linear,
    EaseIn,
    #[default]
    EaseOut,
    EaseInOut,
    OutBack,
}

impl Curve {
    pub const ALL: &[Curve] = &[
        Curve::Linear,
        Curve::EaseIn,
        Curve::EaseOut,
        Curve::EaseInOut,
        Curve::OutBack,
    ];

    /// Progress at normalised time `t`.  Input outside `[0, 1]` is clamped.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Curve::Linear => t,
            Curve::EaseIn => t * t,
            Curve::EaseOut => t * (2.0 - t),
            Curve::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Curve::OutBack => {
                const C1: f64 = 1.70158;
                const C3: f64 = C1 + 1.0;
                let u = t - 1.0;
                1.0 + C3 * u * u * u + C1 * u * u
            }
        }
    }

    /// Canonical name as written in config files.
    pub fn name(self) -> &'static str {
        match self {
            Curve::Linear => "linear",
            Curve::EaseIn => "easeIn",
            Curve::EaseOut => "easeOut",
            Curve::EaseInOut => "easeInOut",
            Curve::OutBack => "outBack",
        }
    }
}

impl FromStr for Curve {
    type Err = SpinnerError;

    /// Case-insensitive; `easeInOut`, `ease_in_out` and `ease-in-out` all match.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "linear" => Ok(Curve::Linear),
            "easein" => Ok(Curve::EaseIn),
            "easeout" => Ok(Curve::EaseOut),
            "easeinout" => Ok(Curve::EaseInOut),
            "outback" | "easeoutback" => Ok(Curve::OutBack),
            _ => Err(SpinnerError::UnknownCurve(s.trim().to_string())),
        }
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
