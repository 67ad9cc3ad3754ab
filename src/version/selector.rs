//! Latest release selection for a project

use tracing::debug;

use crate::index::types::{PackageType, ReleaseFile};
use crate::version::error::SelectError;
use crate::version::release::ReleaseVersion;

/// The file chosen as a project's latest release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedRelease {
    pub version: ReleaseVersion,
    pub file: ReleaseFile,
}

/// Pick the latest sdist or wheel from a project's file listing
///
/// The highest version wins. On an exact version tie a wheel replaces an
/// sdist, whatever the listing order. Equal-version sdists keep the first
/// listed, while an equal-version wheel always replaces the current pick,
/// so the last listed wheel wins. Every file's version is parsed, so a
/// malformed version anywhere in the listing fails the selection.
pub fn select_latest(project: &str, files: &[ReleaseFile]) -> Result<SelectedRelease, SelectError> {
    let mut best_version = ReleaseVersion::Sentinel;
    let mut best_file: Option<&ReleaseFile> = None;

    for file in files {
        let version = ReleaseVersion::parse(file.version.as_deref())?;
        if !file.package_type.is_selectable() {
            continue;
        }

        let replaces = version > best_version
            || (version == best_version && file.package_type == PackageType::Wheel);
        if replaces {
            best_version = version;
            best_file = Some(file);
        }
    }

    let Some(file) = best_file else {
        return Err(SelectError::MissingFiles {
            project: project.to_string(),
        });
    };

    debug!(
        "Selected {} ({}) as latest for {}",
        file.filename,
        file.package_type.as_str(),
        project
    );

    Ok(SelectedRelease {
        version: best_version,
        file: file.clone(),
    })
}
