//! Commit message classification.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Which version component a commit bumps.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum BumpLevel {
    /// Bug fixes and everything unclassified.
    Patch,
    /// New features.
    Minor,
    /// Breaking changes.
    Major,
}

static BREAKING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"BREAKING[ -]CHANGE").expect("valid regex"));
static FEAT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^feat").expect("valid regex"));

/// Classify a commit message.
///
/// A breaking-change marker anywhere wins, then a leading `feat`.
/// A leading `fix` and anything unrecognised are both patches.
pub fn classify(message: &str) -> BumpLevel {
    if BREAKING.is_match(message) {
        return BumpLevel::Major;
    }
    if FEAT.is_match(message) {
        return BumpLevel::Minor;
    }
    BumpLevel::Patch
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn classifies_conventional_messages() {
        assert_eq!(classify("BREAKING CHANGE: drop support"), BumpLevel::Major);
        assert_eq!(classify("feat: add x"), BumpLevel::Minor);
        assert_eq!(classify("fix: bug"), BumpLevel::Patch);
        assert_eq!(classify("chore: cleanup"), BumpLevel::Patch);
    }

    #[test]
    fn breaking_marker_outranks_feat() {
        assert_eq!(
            classify("feat(api): new shape\n\nBREAKING-CHANGE: old clients fail"),
            BumpLevel::Major
        );
    }

    #[test]
    fn breaking_marker_is_case_sensitive() {
        assert_eq!(classify("chore: breaking change ahead"), BumpLevel::Patch);
    }

    #[test]
    fn feat_prefix_accepts_scope_and_case() {
        assert_eq!(classify("feat(store): merge"), BumpLevel::Minor);
        assert_eq!(classify("Feat: shout"), BumpLevel::Minor);
    }

    #[test]
    fn feat_must_lead_the_message() {
        assert_eq!(classify("docs: describe feat flag"), BumpLevel::Patch);
        assert_eq!(classify(""), BumpLevel::Patch);
    }

    #[test]
    fn levels_parse_and_display_lowercase() {
        assert_eq!(BumpLevel::from_str("MINOR").unwrap(), BumpLevel::Minor);
        assert_eq!(BumpLevel::Major.to_string(), "major");
        assert!(BumpLevel::Major > BumpLevel::Minor);
    }
}
