//! Qt release versions.
//!
//! Parses `major.minor.patch` strings, orders them numerically and renders the
//! compact digit form used in upstream folder and package names.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ModelError, Result};

/// A Qt release version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct QtVersion {
    /// Major version number.
    pub major: u32,
    /// Minor version number.
    pub minor: u32,
    /// Patch version number.
    pub patch: u32,
}

impl QtVersion {
    /// Create a version from its components.
    #[must_use]
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Digit-concatenated form used in folder and package names.
    ///
    /// Qt 5.9.0 was packaged as `59` rather than `590`; every other release
    /// uses all three components.
    #[must_use]
    pub fn compact(&self) -> String {
        if *self == Self::new(5, 9, 0) {
            format!("{}{}", self.major, self.minor)
        } else {
            format!("{}{}{}", self.major, self.minor, self.patch)
        }
    }

    /// Rebuild a version from the digit run of a folder name such as `qt5_1212`.
    ///
    /// Four or more digits split after the first and third digit, three digits
    /// split after the first and second, and two digits leave the patch at 0.
    #[must_use]
    pub fn from_compact_digits(digits: &str) -> Option<Self> {
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let (major, minor, patch) = match digits.len() {
            0 | 1 => return None,
            2 => (&digits[..1], &digits[1..], "0"),
            3 => (&digits[..1], &digits[1..2], &digits[2..]),
            _ => (&digits[..1], &digits[1..3], &digits[3..]),
        };
        Some(Self::new(
            major.parse().ok()?,
            minor.parse().ok()?,
            patch.parse().ok()?,
        ))
    }

    /// The `(major, minor)` pair used to group related releases.
    #[must_use]
    pub const fn major_minor(&self) -> (u32, u32) {
        (self.major, self.minor)
    }
}

impl FromStr for QtVersion {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let invalid = || ModelError::InvalidVersion(s.to_string());

        let parts: Vec<&str> = s.split('.').collect();
        if !(2..=3).contains(&parts.len()) {
            return Err(invalid());
        }

        let major = parts[0].parse().map_err(|_| invalid())?;
        let minor = parts[1].parse().map_err(|_| invalid())?;
        let patch = match parts.get(2) {
            Some(patch) => patch.parse().map_err(|_| invalid())?,
            None => 0,
        };

        Ok(Self::new(major, minor, patch))
    }
}

impl fmt::Display for QtVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl PartialOrd for QtVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QtVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then(self.minor.cmp(&other.minor))
            .then(self.patch.cmp(&other.patch))
    }
}

impl Serialize for QtVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for QtVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> QtVersion {
        s.parse().unwrap()
    }

    #[test]
    fn test_compact_exception() {
        assert_eq!(v("5.9.0").compact(), "59");
        assert_eq!(v("5.9.1").compact(), "591");
        assert_eq!(v("6.2.0").compact(), "620");
        assert_eq!(v("5.15.2").compact(), "5152");
    }

    #[test]
    fn test_from_compact_digits() {
        assert_eq!(QtVersion::from_compact_digits("5152"), Some(v("5.15.2")));
        assert_eq!(QtVersion::from_compact_digits("51212"), Some(v("5.12.12")));
        assert_eq!(QtVersion::from_compact_digits("620"), Some(v("6.2.0")));
        assert_eq!(QtVersion::from_compact_digits("59"), Some(v("5.9.0")));
        assert_eq!(QtVersion::from_compact_digits("5"), None);
        assert_eq!(QtVersion::from_compact_digits("6a0"), None);
    }

    #[test]
    fn test_parse() {
        assert_eq!(v("6.2"), QtVersion::new(6, 2, 0));
        assert_eq!(v(" 6.5.3 "), QtVersion::new(6, 5, 3));
        assert!("6".parse::<QtVersion>().is_err());
        assert!("6.2.0.1".parse::<QtVersion>().is_err());
        assert!("6.x.0".parse::<QtVersion>().is_err());
    }

    #[test]
    fn test_ordering_is_numeric() {
        assert!(v("5.9.0") < v("5.12.0"));
        assert!(v("5.15.2") < v("6.0.0"));
        assert!(v("6.2.0") < v("6.2.10"));
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&v("6.2.4")).unwrap();
        assert_eq!(json, "\"6.2.4\"");
        let back: QtVersion = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v("6.2.4"));
    }
}
