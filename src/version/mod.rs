//! Release version ordering and latest-release selection
//!
//! # Modules
//!
//! - [`release`]: PEP 440 based total order with a sentinel and a missing-version default
//! - [`selector`]: Picks one sdist or wheel as a project's latest release
//! - [`error`]: Error types for version parsing and selection

pub mod error;
pub mod release;
pub mod selector;

pub use error::{SelectError, VersionError};
pub use release::ReleaseVersion;
pub use selector::{SelectedRelease, select_latest};
