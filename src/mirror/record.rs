//! Persisted per-project extraction records

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::extract::{ExtractError, MetadataKind};
use crate::mirror::error::PipelineError;
use crate::version::{ReleaseVersion, SelectError};

/// Cache contents keyed by project name, in processing order
pub type CacheMap = IndexMap<String, ExtractionRecord>;

/// Closed set of per-project outcomes, serialized as the record's `type`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutcomeKind {
    #[serde(rename = "setup.py")]
    SetupPy,
    #[serde(rename = "metadata")]
    Metadata,
    #[serde(rename = "UnicodeDecodeError")]
    DecodeFailure,
    #[serde(rename = "MissingManifestError")]
    MissingManifest,
    #[serde(rename = "MissingSetupError")]
    MissingSetup,
    #[serde(rename = "MissingFilesError")]
    MissingFiles,
    #[serde(rename = "tarfile.ReadError")]
    TarRead,
    #[serde(rename = "UnknownError")]
    Unknown,
}

impl OutcomeKind {
    pub const ALL: [OutcomeKind; 8] = [
        OutcomeKind::SetupPy,
        OutcomeKind::Metadata,
        OutcomeKind::DecodeFailure,
        OutcomeKind::MissingManifest,
        OutcomeKind::MissingSetup,
        OutcomeKind::MissingFiles,
        OutcomeKind::TarRead,
        OutcomeKind::Unknown,
    ];

    /// Returns the tag stored in the cache file
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeKind::SetupPy => "setup.py",
            OutcomeKind::Metadata => "metadata",
            OutcomeKind::DecodeFailure => "UnicodeDecodeError",
            OutcomeKind::MissingManifest => "MissingManifestError",
            OutcomeKind::MissingSetup => "MissingSetupError",
            OutcomeKind::MissingFiles => "MissingFilesError",
            OutcomeKind::TarRead => "tarfile.ReadError",
            OutcomeKind::Unknown => "UnknownError",
        }
    }

    /// Single character printed to the progress stream
    pub fn progress_mark(&self) -> char {
        match self {
            OutcomeKind::SetupPy | OutcomeKind::Metadata => '.',
            OutcomeKind::DecodeFailure => 'U',
            OutcomeKind::MissingManifest => 'X',
            OutcomeKind::MissingSetup => 'S',
            OutcomeKind::MissingFiles => 'M',
            OutcomeKind::TarRead => 'R',
            OutcomeKind::Unknown => '?',
        }
    }
}

impl From<MetadataKind> for OutcomeKind {
    fn from(kind: MetadataKind) -> Self {
        match kind {
            MetadataKind::SetupPy => OutcomeKind::SetupPy,
            MetadataKind::Metadata => OutcomeKind::Metadata,
        }
    }
}

impl PipelineError {
    /// Map the failure onto the closed outcome set
    pub fn outcome(&self) -> OutcomeKind {
        match self {
            PipelineError::Decode(_) => OutcomeKind::DecodeFailure,
            PipelineError::Select(SelectError::MissingFiles { .. }) => OutcomeKind::MissingFiles,
            PipelineError::Extract(ExtractError::MissingManifest) => OutcomeKind::MissingManifest,
            PipelineError::Extract(ExtractError::MissingSetup) => OutcomeKind::MissingSetup,
            PipelineError::Extract(ExtractError::TarRead(_)) => OutcomeKind::TarRead,
            _ => OutcomeKind::Unknown,
        }
    }

    /// Diagnostic text stored as the record's content
    pub fn diagnostic(&self) -> String {
        match self.outcome() {
            OutcomeKind::DecodeFailure => self.to_string(),
            OutcomeKind::MissingManifest => "*** No MANIFEST in whl".to_string(),
            OutcomeKind::MissingSetup => "*** No setup in sdist".to_string(),
            OutcomeKind::MissingFiles => "*** No SDIST or whl in pkg".to_string(),
            OutcomeKind::TarRead => "*** Failed to read Tarfile?".to_string(),
            OutcomeKind::SetupPy | OutcomeKind::Metadata | OutcomeKind::Unknown => {
                format!("*** Error {}", self)
            }
        }
    }
}

/// One project's cache entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionRecord {
    #[serde(rename = "type")]
    pub kind: OutcomeKind,
    /// Decoded declaration text on success, diagnostic on failure
    pub content: String,
    /// Selected version, or the sentinel when selection did not complete
    #[serde(default)]
    pub version: String,
}

impl ExtractionRecord {
    pub fn success(kind: MetadataKind, content: String, version: &ReleaseVersion) -> Self {
        Self {
            kind: kind.into(),
            content,
            version: version.to_string(),
        }
    }

    pub fn failure(error: &PipelineError, version: &ReleaseVersion) -> Self {
        Self {
            kind: error.outcome(),
            content: error.diagnostic(),
            version: version.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::decode_utf8_sig;
    use crate::index::IndexError;
    use crate::version::VersionError;
    use rstest::rstest;
    use serde_json::json;

    fn decode_error() -> PipelineError {
        decode_utf8_sig(b"\xff").unwrap_err().into()
    }

    #[rstest]
    #[case(PipelineError::Extract(ExtractError::MissingManifest), OutcomeKind::MissingManifest, "*** No MANIFEST in whl")]
    #[case(PipelineError::Extract(ExtractError::MissingSetup), OutcomeKind::MissingSetup, "*** No setup in sdist")]
    #[case(
        PipelineError::Select(SelectError::MissingFiles { project: "pkg".to_string() }),
        OutcomeKind::MissingFiles,
        "*** No SDIST or whl in pkg"
    )]
    #[case(
        PipelineError::Extract(ExtractError::TarRead(std::io::Error::other("bad header"))),
        OutcomeKind::TarRead,
        "*** Failed to read Tarfile?"
    )]
    #[case(
        PipelineError::Index(IndexError::NotFound("pkg".to_string())),
        OutcomeKind::Unknown,
        "*** Error Project not found: pkg"
    )]
    fn failure_maps_to_outcome_and_diagnostic(
        #[case] error: PipelineError,
        #[case] expected_kind: OutcomeKind,
        #[case] expected_content: &str,
    ) {
        assert_eq!(error.outcome(), expected_kind);
        assert_eq!(error.diagnostic(), expected_content);
    }

    #[test]
    fn version_error_is_unknown() {
        let error = PipelineError::Select(SelectError::Version(VersionError::Invalid {
            version: "latest".to_string(),
            message: "bad".to_string(),
        }));

        assert_eq!(error.outcome(), OutcomeKind::Unknown);
        assert!(error.diagnostic().starts_with("*** Error Invalid version 'latest'"));
    }

    #[test]
    fn zip_error_is_unknown() {
        let error = PipelineError::Extract(ExtractError::Zip(zip::result::ZipError::FileNotFound));

        assert_eq!(error.outcome(), OutcomeKind::Unknown);
    }

    #[test]
    fn decode_failure_keeps_decoder_message() {
        let error = decode_error();
        let record = ExtractionRecord::failure(&error, &ReleaseVersion::Sentinel);

        assert_eq!(record.kind, OutcomeKind::DecodeFailure);
        assert_eq!(record.content, error.to_string());
        assert!(record.content.contains("invalid utf-8"));
    }

    #[test]
    fn failure_before_selection_records_sentinel_version() {
        let error = PipelineError::Select(SelectError::MissingFiles {
            project: "pkg".to_string(),
        });

        let record = ExtractionRecord::failure(&error, &ReleaseVersion::Sentinel);

        assert_eq!(record.version, "-1");
    }

    #[test]
    fn record_serializes_with_type_content_version() {
        let version = ReleaseVersion::parse(Some("1.0")).unwrap();
        let record =
            ExtractionRecord::success(MetadataKind::SetupPy, "setup()".to_string(), &version);

        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({"type": "setup.py", "content": "setup()", "version": "1.0"})
        );
    }

    #[test]
    fn every_outcome_tag_round_trips() {
        for kind in OutcomeKind::ALL {
            let value = serde_json::to_value(kind).unwrap();
            assert_eq!(value, json!(kind.as_str()));
            assert_eq!(serde_json::from_value::<OutcomeKind>(value).unwrap(), kind);
        }
    }

    #[test]
    fn record_without_version_defaults_to_empty() {
        let record: ExtractionRecord =
            serde_json::from_value(json!({"type": "metadata", "content": "Name: pkg"})).unwrap();

        assert_eq!(record.kind, OutcomeKind::Metadata);
        assert_eq!(record.version, "");
    }
}
