//! Dependency scan over the extraction cache
//!
//! Dependencies are not parsed. A `setup.py` contributes the first bracketed
//! list following `install_requires`, a wheel's `METADATA` contributes its
//! `Requires-Dist:` lines, and a project matches when that text contains the
//! prefix anywhere.

use tracing::debug;

use crate::mirror::{CacheMap, OutcomeKind};

/// The `[...]` list following the first `install_requires`, or `""`
pub fn install_requires_from_setup(text: &str) -> &str {
    let Some(start) = text.find("install_requires") else {
        return "";
    };
    let Some(left) = text[start..].find('[').map(|offset| start + offset) else {
        return "";
    };
    let Some(right) = text[left..].find(']').map(|offset| left + offset) else {
        return "";
    };

    &text[left..=right]
}

/// Newline-joined lines containing `Requires-Dist:`
pub fn requires_dist_from_metadata(text: &str) -> String {
    text.lines()
        .filter(|line| line.contains("Requires-Dist:"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Projects, in cache order, whose declared dependencies mention `prefix`
pub fn find_dependents<'a>(cache: &'a CacheMap, prefix: &str) -> Vec<&'a str> {
    let dependents: Vec<&str> = cache
        .iter()
        .filter(|(_, record)| match record.kind {
            OutcomeKind::SetupPy => install_requires_from_setup(&record.content).contains(prefix),
            OutcomeKind::Metadata => requires_dist_from_metadata(&record.content).contains(prefix),
            _ => false,
        })
        .map(|(project, _)| project.as_str())
        .collect();

    debug!(
        "{} of {} cached projects depend on '{}'",
        dependents.len(),
        cache.len(),
        prefix
    );
    dependents
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mirror::ExtractionRecord;
    use rstest::rstest;

    fn record(kind: OutcomeKind, content: &str) -> ExtractionRecord {
        ExtractionRecord {
            kind,
            content: content.to_string(),
            version: "1.0".to_string(),
        }
    }

    #[rstest]
    #[case(
        "setup(name='x', install_requires=['azure-core>=1.0', 'requests'])",
        "['azure-core>=1.0', 'requests']"
    )]
    #[case("setup(\n    install_requires=[\n        'six',\n    ],\n)", "[\n        'six',\n    ]")]
    #[case("setup(name='x')", "")]
    #[case("install_requires=REQUIREMENTS", "")]
    #[case("install_requires=['unterminated'", "")]
    #[case("deps = ['early']\nsetup(install_requires=['late'])", "['late']")]
    fn install_requires_extraction(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(install_requires_from_setup(text), expected);
    }

    #[test]
    fn non_list_install_requires_picks_up_a_later_list() {
        let text = "install_requires=reqs,\nextras_require={'azure': ['azure-identity']}";

        assert_eq!(install_requires_from_setup(text), "['azure-identity']");
    }

    #[test]
    fn requires_dist_lines_are_kept_in_order() {
        let text = "Metadata-Version: 2.1\nName: pkg\nRequires-Dist: azure-core\nSummary: x\nRequires-Dist: six; extra == 'six'\n";

        assert_eq!(
            requires_dist_from_metadata(text),
            "Requires-Dist: azure-core\nRequires-Dist: six; extra == 'six'"
        );
    }

    #[test]
    fn metadata_without_requires_dist_is_empty() {
        assert_eq!(requires_dist_from_metadata("Name: pkg\nSummary: azure-ish\n"), "");
    }

    #[test]
    fn find_dependents_keeps_cache_order_and_ignores_failures() {
        let mut cache = CacheMap::new();
        cache.insert(
            "zeta".to_string(),
            record(OutcomeKind::Metadata, "Requires-Dist: azure-storage-blob\n"),
        );
        cache.insert(
            "plain".to_string(),
            record(OutcomeKind::SetupPy, "setup(install_requires=['requests'])"),
        );
        cache.insert(
            "summary-only".to_string(),
            record(OutcomeKind::Metadata, "Summary: an azure- helper\n"),
        );
        cache.insert(
            "failed".to_string(),
            record(OutcomeKind::Unknown, "*** Error azure-core unreachable"),
        );
        cache.insert(
            "alpha".to_string(),
            record(OutcomeKind::SetupPy, "setup(install_requires=['azure-core'])"),
        );

        assert_eq!(find_dependents(&cache, "azure-"), vec!["zeta", "alpha"]);
    }

    #[test]
    fn find_dependents_on_empty_cache_is_empty() {
        assert!(find_dependents(&CacheMap::new(), "azure-").is_empty());
    }
}
