//! Tick colours.

use std::fmt;
use std::str::FromStr;

use super::error::SpinnerError;

/// A 24-bit colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(0xff, 0xff, 0xff);

    /// Blend toward black by `opacity` (clamped to `0.0..=1.0`).
    ///
    /// Terminals have no alpha channel, so an opaque tick over a dark
    /// background is the closest stand-in.
    pub fn scaled(self, opacity: f64) -> Rgb {
        let o = opacity.clamp(0.0, 1.0);
        let s = |c: u8| (c as f64 * o).round() as u8;
        Rgb(s(self.0), s(self.1), s(self.2))
    }

    fn named(name: &str) -> Option<Rgb> {
        Some(match name {
            "white" => Rgb(0xff, 0xff, 0xff),
            "black" => Rgb(0x00, 0x00, 0x00),
            "gray" | "grey" => Rgb(0x80, 0x80, 0x80),
            "red" => Rgb(0xff, 0x00, 0x00),
            "green" => Rgb(0x00, 0x80, 0x00),
            "blue" => Rgb(0x00, 0x00, 0xff),
            "yellow" => Rgb(0xff, 0xff, 0x00),
            "cyan" => Rgb(0x00, 0xff, 0xff),
            "magenta" => Rgb(0xff, 0x00, 0xff),
            "orange" => Rgb(0xff, 0xa5, 0x00),
            _ => return None,
        })
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Rgb::WHITE
    }
}

impl FromStr for Rgb {
    type Err = SpinnerError;

    /// Accepts `#rrggbb`, `#rgb` or a basic colour name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || SpinnerError::InvalidColor(trimmed.to_string());

        if let Some(hex) = trimmed.strip_prefix('#') {
            if !hex.is_ascii() {
                return Err(invalid());
            }
            let digit = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
            return match hex.len() {
                6 => Ok(Rgb(digit(&hex[0..2])?, digit(&hex[2..4])?, digit(&hex[4..6])?)),
                // #abc expands to #aabbcc
                3 => Ok(Rgb(
                    digit(&hex[0..1])? * 0x11,
                    digit(&hex[1..2])? * 0x11,
                    digit(&hex[2..3])? * 0x11,
                )),
                _ => Err(invalid()),
            };
        }

        Rgb::named(&trimmed.to_lowercase()).ok_or_else(invalid)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_forms_and_names() {
        assert_eq!("#1a2b3c".parse::<Rgb>().unwrap(), Rgb(0x1a, 0x2b, 0x3c));
        assert_eq!("#fff".parse::<Rgb>().unwrap(), Rgb::WHITE);
        assert_eq!("Orange".parse::<Rgb>().unwrap(), Rgb(0xff, 0xa5, 0x00));
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!("#12345".parse::<Rgb>(), Err(SpinnerError::InvalidColor(_))));
        assert!("#gghhii".parse::<Rgb>().is_err());
        assert!("chartreuse-ish".parse::<Rgb>().is_err());
    }

    #[test]
    fn scaling_blends_toward_black() {
        assert_eq!(Rgb(200, 100, 50).scaled(0.5), Rgb(100, 50, 25));
        assert_eq!(Rgb::WHITE.scaled(0.0), Rgb(0, 0, 0));
        assert_eq!(Rgb::WHITE.scaled(3.0), Rgb::WHITE);
    }

    #[test]
    fn display_round_trips_through_hex() {
        let c = Rgb(0x0a, 0xb0, 0xff);
        assert_eq!(c.to_string(), "#0ab0ff");
    }
}
