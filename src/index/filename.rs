//! Distribution filename parsing
//!
//! The Simple Repository API lists only filenames and URLs, so the package
//! type and version of each file are recovered from the filename.

use crate::index::types::PackageType;

const WHEEL_SUFFIX: &str = ".whl";
const EGG_SUFFIX: &str = ".egg";

/// Source distribution suffixes, longest first
const SDIST_SUFFIXES: &[&str] = &[
    ".tar.gz", ".tar.bz2", ".tar.xz", ".tar.z", ".tgz", ".tbz", ".tar", ".zip",
];

/// Installer formats that are listed but never selected
const OTHER_SUFFIXES: &[(&str, PackageType)] = &[
    (".exe", PackageType::Wininst),
    (".msi", PackageType::Msi),
    (".rpm", PackageType::Rpm),
    (".dmg", PackageType::Dmg),
];

/// Normalize a project name following PEP 503
///
/// Lowercases the name and collapses runs of `-`, `_` and `.` into a single `-`.
pub fn normalize_project_name(name: &str) -> String {
    let mut normalized = String::with_capacity(name.len());
    let mut in_separator = false;
    for c in name.chars() {
        if matches!(c, '-' | '_' | '.') {
            if !in_separator {
                normalized.push('-');
                in_separator = true;
            }
        } else {
            normalized.push(c.to_ascii_lowercase());
            in_separator = false;
        }
    }
    normalized
}

/// Derive package type and version from a distribution filename
///
/// Returns `None` for the version when the filename does not carry one.
pub fn parse_filename(project: &str, filename: &str) -> (PackageType, Option<String>) {
    let lower = filename.to_ascii_lowercase();
    let stem_without = |suffix: &str| {
        lower
            .ends_with(suffix)
            .then(|| &filename[..filename.len() - suffix.len()])
    };

    if let Some(stem) = stem_without(WHEEL_SUFFIX) {
        return (PackageType::Wheel, wheel_version(stem));
    }

    for suffix in SDIST_SUFFIXES {
        if let Some(stem) = stem_without(suffix) {
            return (PackageType::Sdist, sdist_version(project, stem));
        }
    }

    if let Some(stem) = stem_without(EGG_SUFFIX) {
        return (PackageType::Egg, stem.split('-').nth(1).map(str::to_string));
    }

    OTHER_SUFFIXES
        .iter()
        .find(|(suffix, _)| lower.ends_with(suffix))
        .map(|(_, package_type)| (*package_type, None))
        .unwrap_or((PackageType::Unknown, None))
}

/// `{name}-{version}(-{build})?-{python}-{abi}-{platform}`
fn wheel_version(stem: &str) -> Option<String> {
    let parts: Vec<&str> = stem.split('-').collect();
    if parts.len() < 5 {
        return None;
    }
    Some(parts[1].to_string())
}

/// `{name}-{version}`, where the name itself may contain dashes
fn sdist_version(project: &str, stem: &str) -> Option<String> {
    let normalized = normalize_project_name(project);

    let version = stem
        .match_indices('-')
        .find(|(i, _)| normalize_project_name(&stem[..*i]) == normalized)
        .map(|(i, _)| &stem[i + 1..])
        .or_else(|| stem.rsplit_once('-').map(|(_, version)| version))?;

    (!version.is_empty()).then(|| version.to_string())
}
