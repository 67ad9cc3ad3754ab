//! Release version ordering using PEP 440
//!
//! Index listings carry version strings that may be missing or malformed.
//! [`ReleaseVersion`] puts every listing on one total order:
//!
//! - a missing version is treated as `0.0.0`
//! - [`ReleaseVersion::Sentinel`] sorts below every parsed version
//! - a malformed version is an error, not a low value

use std::fmt;
use std::str::FromStr;

use pep508_rs::pep440_rs::Version;

use crate::version::error::VersionError;

/// Placeholder used when a release file has no version
const MISSING_VERSION: &str = "0.0.0";

/// Textual form of the sentinel, kept in persisted records
const SENTINEL_TEXT: &str = "-1";

#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReleaseVersion {
    /// Below every real version; initial state of a running maximum
    #[default]
    Sentinel,
    Parsed(Version),
}

impl ReleaseVersion {
    /// Parse an optional version string from an index listing
    pub fn parse(version: Option<&str>) -> Result<Self, VersionError> {
        let raw = version.map(str::trim).unwrap_or(MISSING_VERSION);
        Version::from_str(raw)
            .map(ReleaseVersion::Parsed)
            .map_err(|e| VersionError::Invalid {
                version: raw.to_string(),
                message: e.to_string(),
            })
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseVersion::Sentinel => f.write_str(SENTINEL_TEXT),
            ReleaseVersion::Parsed(version) => write!(f, "{}", version),
        }
    }
}
