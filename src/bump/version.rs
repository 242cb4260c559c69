//! Three-part version numbers.

use std::fmt;
use std::str::FromStr;

use crate::error::BumpError;

use super::level::BumpLevel;

/// A `major.minor.patch` version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Version {
    /// Major component.
    pub major: u64,
    /// Minor component.
    pub minor: u64,
    /// Patch component.
    pub patch: u64,
}

impl Version {
    /// Construct a version.
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Return the version after applying `level`.
    ///
    /// Fails rather than wrapping when the bumped component is `u64::MAX`.
    pub fn bump(self, level: BumpLevel) -> Result<Self, BumpError> {
        let overflow = || BumpError::VersionOverflow {
            version: self.to_string(),
            level,
        };

        Ok(match level {
            BumpLevel::Major => Self::new(self.major.checked_add(1).ok_or_else(overflow)?, 0, 0),
            BumpLevel::Minor => {
                Self::new(self.major, self.minor.checked_add(1).ok_or_else(overflow)?, 0)
            }
            BumpLevel::Patch => Self::new(
                self.major,
                self.minor,
                self.patch.checked_add(1).ok_or_else(overflow)?,
            ),
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Leading decimal digits of `part`, if any.
fn leading_number(part: &str) -> Option<u64> {
    let end = part
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(part.len());
    part[..end].parse().ok()
}

impl FromStr for Version {
    type Err = BumpError;

    /// Lenient parse: missing trailing components are zero, each component
    /// keeps only its leading digits, anything past the third is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || BumpError::InvalidVersion(s.to_string());

        let mut parts = [0u64; 3];
        for (slot, part) in parts.iter_mut().zip(s.trim().split('.')) {
            *slot = leading_number(part).ok_or_else(invalid)?;
        }

        Ok(Self::new(parts[0], parts[1], parts[2]))
    }
}

/// Bump a version string by `level`.
pub fn bump_version(current: &str, level: BumpLevel) -> Result<String, BumpError> {
    let version: Version = current.parse()?;
    Ok(version.bump(level)?.to_string())
}
