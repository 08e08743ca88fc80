//! Two-dimensional sizes such as `200 x 100` or `200px x 100px`.

use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};

use toolbelt_macros::{reflect_methods, Reflect};

/// Default unit of a [`Size`].
pub const DEFAULT_UNIT: &str = "px";

/// Default separator between width and height.
pub const DEFAULT_SEPARATOR: &str = " x ";

/// A width and height with a unit.
///
/// ```
/// use toolbelt::Size;
///
/// let size = Size::parse("200 x 100").unwrap();
/// assert_eq!(size.to_string(), "200 x 100");
/// assert_eq!(size.to_string_with_unit(), "200px x 100px");
/// assert_eq!(size.to_array(true), ["200px", "100px"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Reflect)]
#[serde(default)]
#[reflect(methods)]
pub struct Size {
    pub width: u32,
    pub height: u32,
    pub unit: String,
    pub separator: String,
}

impl Default for Size {
    fn default() -> Self {
        Size::new(0, 0)
    }
}

impl Size {
    /// Creates a size with the default unit and separator.
    pub fn new(width: u32, height: u32) -> Self {
        Size {
            width,
            height,
            unit: DEFAULT_UNIT.to_string(),
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }

    /// Sets the unit.
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    /// Sets the separator.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Parses `"<width><separator><height>"` with the default unit and
    /// separator.
    pub fn parse(text: &str) -> Option<Self> {
        Size::from_str_with(text, DEFAULT_UNIT, DEFAULT_SEPARATOR)
    }

    /// Parses `"<width><separator><height>"`.
    ///
    /// Both dimensions may carry `unit` as a suffix. Whitespace around the
    /// separator is not significant. Returns `None` if the text does not
    /// match.
    pub fn from_str_with(text: &str, unit: &str, separator: &str) -> Option<Self> {
        let separator_pattern = match separator.trim() {
            "" => r"\s+".to_string(),
            trimmed => format!(r"\s*{}\s*", regex::escape(trimmed)),
        };
        let unit_pattern = if unit.is_empty() {
            String::new()
        } else {
            format!("(?:{})?", regex::escape(unit))
        };
        let pattern = format!(
            r"^\s*(\d+){unit}{separator}(\d+){unit}\s*$",
            unit = unit_pattern,
            separator = separator_pattern,
        );

        let captures = Regex::new(&pattern).ok()?.captures(text)?;
        Some(
            Size::new(captures[1].parse().ok()?, captures[2].parse().ok()?)
                .with_unit(unit)
                .with_separator(separator),
        )
    }

    /// Returns the width, with the unit appended if requested.
    pub fn width_string(&self, with_unit: bool) -> String {
        self.dimension(self.width, with_unit)
    }

    /// Returns the height, with the unit appended if requested.
    pub fn height_string(&self, with_unit: bool) -> String {
        self.dimension(self.height, with_unit)
    }

    /// Returns `[width, height]`, with the unit appended if requested.
    pub fn to_array(&self, with_unit: bool) -> [String; 2] {
        [self.width_string(with_unit), self.height_string(with_unit)]
    }

    /// Renders the size with the unit on both dimensions.
    pub fn to_string_with_unit(&self) -> String {
        self.to_array(true).join(&self.separator)
    }

    fn dimension(&self, value: u32, with_unit: bool) -> String {
        if with_unit {
            format!("{}{}", value, self.unit)
        } else {
            value.to_string()
        }
    }
}

#[reflect_methods]
impl Size {
    pub fn get_area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    pub fn is_square(&self) -> bool {
        self.width == self.height
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_array(false).join(&self.separator))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let size = Size::new(3, 4);
        assert_eq!(size.unit, "px");
        assert_eq!(size.separator, " x ");
        assert_eq!(Size::default(), Size::new(0, 0));
    }

    #[test]
    fn renders_with_and_without_unit() {
        let size = Size::new(200, 100).with_unit("mm").with_separator("/");

        assert_eq!(size.to_string(), "200/100");
        assert_eq!(size.to_string_with_unit(), "200mm/100mm");
        assert_eq!(size.to_array(false), ["200", "100"]);
        assert_eq!(size.width_string(true), "200mm");
    }

    #[test]
    fn parses_with_default_separator() {
        assert_eq!(Size::parse("200 x 100"), Some(Size::new(200, 100)));
        assert_eq!(Size::parse("200x100"), Some(Size::new(200, 100)));
        assert_eq!(Size::parse("200px x 100px"), Some(Size::new(200, 100)));
    }

    #[test]
    fn parses_with_custom_unit_and_separator() {
        let size = Size::from_str_with("30cm * 40cm", "cm", " * ").unwrap();

        assert_eq!((size.width, size.height), (30, 40));
        assert_eq!(size.unit, "cm");
        assert_eq!(size.to_string(), "30 * 40");
    }

    #[test]
    fn parses_with_whitespace_separator() {
        let size = Size::from_str_with("640 480", "", " ").unwrap();
        assert_eq!((size.width, size.height), (640, 480));
    }

    #[test]
    fn rejects_invalid_text() {
        for text in ["", "200", "200 x", "x 100", "200 x 100 x 50", "a x b", "200em x 100em"] {
            assert_eq!(Size::parse(text), None, "{text:?} should not parse");
        }
    }

    #[test]
    fn accessors() {
        assert_eq!(Size::new(5, 5).get_area(), 25);
        assert!(Size::new(5, 5).is_square());
        assert!(!Size::new(5, 6).is_square());
    }
}
