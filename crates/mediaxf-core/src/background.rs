//! Background fill for padding modes.

use std::fmt;
use std::str::FromStr;

use crate::error::TransformError;

/// Background used to fill padded areas.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Background {
    /// A named color, e.g. `red`.
    Color(String),
    /// Hex RGB(A) without the leading `#`, rendered as `rgb:<hex>`.
    Rgb(String),
    /// Pick a color from the image edges.
    Auto,
}

impl Background {
    pub fn color(name: impl Into<String>) -> Self {
        Background::Color(name.into())
    }

    /// A hex color; a leading `#` is accepted and dropped.
    pub fn rgb(hex: &str) -> Self {
        Background::Rgb(hex.trim_start_matches('#').to_ascii_lowercase())
    }

    pub fn auto() -> Self {
        Background::Auto
    }

    pub fn red() -> Self {
        Self::color("red")
    }

    pub fn white() -> Self {
        Self::color("white")
    }

    pub fn black() -> Self {
        Self::color("black")
    }
}

impl fmt::Display for Background {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Background::Color(name) => f.write_str(name),
            Background::Rgb(hex) => write!(f, "rgb:{}", hex),
            Background::Auto => f.write_str("auto"),
        }
    }
}

impl FromStr for Background {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "auto" {
            return Ok(Background::Auto);
        }
        if let Some(hex) = s.strip_prefix("rgb:").or_else(|| s.strip_prefix('#')) {
            if hex.is_empty() || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(TransformError::type_error(format!("invalid hex color '{}'", s)));
            }
            return Ok(Background::rgb(hex));
        }
        if s.is_empty() || !s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(TransformError::type_error(format!("invalid color name '{}'", s)));
        }
        Ok(Background::color(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named() {
        assert_eq!(Background::red().to_string(), "red");
        assert_eq!(Background::color("lightblue").to_string(), "lightblue");
    }

    #[test]
    fn test_rgb() {
        assert_eq!(Background::rgb("#FF0000").to_string(), "rgb:ff0000");
        assert_eq!(Background::auto().to_string(), "auto");
    }

    #[test]
    fn test_parse() {
        assert_eq!("#00ff00".parse::<Background>().unwrap(), Background::rgb("00ff00"));
        assert_eq!("rgb:abc".parse::<Background>().unwrap(), Background::rgb("abc"));
        assert_eq!("white".parse::<Background>().unwrap(), Background::white());
        assert!("#xyz".parse::<Background>().unwrap_err().is_type());
        assert!("not a color".parse::<Background>().is_err());
    }
}
