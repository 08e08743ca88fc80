//! Semantic `major.minor.patch` versions.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use toolbelt_macros::Reflect;

static VERSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)\.(\d+)\.(\d+)$").expect("version pattern is valid"));

/// A `major.minor.patch` version.
///
/// Versions order by major, then minor, then patch.
///
/// ```
/// use toolbelt::Version;
///
/// let version = Version::parse("1.10.2").unwrap();
/// assert!(version > Version::new(1, 9, 7));
/// assert_eq!(version.to_string(), "1.10.2");
/// assert_eq!(Version::parse("1.10"), None);
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Reflect,
)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    /// Creates a version.
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Version {
            major,
            minor,
            patch,
        }
    }

    /// Parses `major.minor.patch`, ignoring surrounding whitespace.
    ///
    /// Returns `None` for anything else, including components that do not
    /// fit in a `u32`.
    pub fn parse(text: &str) -> Option<Self> {
        let captures = VERSION.captures(text.trim())?;
        let component = |index: usize| captures[index].parse::<u32>().ok();
        Some(Version::new(component(1)?, component(2)?, component(3)?))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
