//! Metadata member lookup inside release artifacts

use std::io::{self, BufRead, BufReader, Cursor, Read};

use tracing::debug;
use zip::ZipArchive;
use zip::result::ZipError;

use crate::extract::compression::Compression;
use crate::extract::error::ExtractError;
use crate::extract::MetadataKind;

const SETUP_SUFFIX: &str = "/setup.py";
const METADATA_SUFFIX: &str = "/METADATA";

/// Container format of a release artifact, decided by filename suffix only
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    /// Source distribution packed as `.zip`
    SdistZip,
    /// Built wheel (`.whl`, a zip file)
    Wheel,
    /// Everything else is read as a (possibly compressed) tar archive
    Tar,
}

impl ArchiveFormat {
    pub fn from_filename(filename: &str) -> Self {
        if filename.ends_with(".zip") {
            ArchiveFormat::SdistZip
        } else if filename.ends_with(".whl") {
            ArchiveFormat::Wheel
        } else {
            ArchiveFormat::Tar
        }
    }
}

/// Return the dependency-declaration member of an artifact
///
/// Source distributions yield their first `*/setup.py`, wheels their first
/// `*/METADATA`, in archive order.
pub fn extract_metadata(
    filename: &str,
    bytes: &[u8],
) -> Result<(MetadataKind, Vec<u8>), ExtractError> {
    let format = ArchiveFormat::from_filename(filename);
    debug!("Reading {} as {:?} ({} bytes)", filename, format, bytes.len());

    match format {
        ArchiveFormat::SdistZip => read_zip_member(bytes, SETUP_SUFFIX)?
            .map(|content| (MetadataKind::SetupPy, content))
            .ok_or(ExtractError::MissingSetup),
        ArchiveFormat::Wheel => read_zip_member(bytes, METADATA_SUFFIX)?
            .map(|content| (MetadataKind::Metadata, content))
            .ok_or(ExtractError::MissingManifest),
        ArchiveFormat::Tar => read_tar_member(bytes, SETUP_SUFFIX)?
            .map(|content| (MetadataKind::SetupPy, content))
            .ok_or(ExtractError::MissingSetup),
    }
}

fn read_zip_member(bytes: &[u8], suffix: &str) -> Result<Option<Vec<u8>>, ExtractError> {
    let mut zip = ZipArchive::new(Cursor::new(bytes))?;

    let Some(name) = zip
        .file_names()
        .find(|name| name.ends_with(suffix))
        .map(str::to_string)
    else {
        return Ok(None);
    };

    let mut entry = zip.by_name(&name)?;
    let mut content = Vec::new();
    entry.read_to_end(&mut content).map_err(ZipError::from)?;
    Ok(Some(content))
}

/// Scans the whole archive so that a corrupt tail is reported even when
/// the member was already found. An archive that decompresses to nothing
/// is unreadable; one holding only end-of-archive blocks is merely empty.
fn read_tar_member(bytes: &[u8], suffix: &str) -> Result<Option<Vec<u8>>, ExtractError> {
    let mut reader = BufReader::new(Compression::from_magic_bytes(bytes).wrap_reader(bytes));
    if reader.fill_buf().map_err(ExtractError::TarRead)?.is_empty() {
        return Err(ExtractError::TarRead(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "empty file",
        )));
    }

    let mut archive = tar::Archive::new(reader);
    let mut found = None;

    for entry in archive.entries().map_err(ExtractError::TarRead)? {
        let mut entry = entry.map_err(ExtractError::TarRead)?;
        if found.is_some() || !entry.path_bytes().ends_with(suffix.as_bytes()) {
            continue;
        }

        let mut content = Vec::new();
        entry
            .read_to_end(&mut content)
            .map_err(ExtractError::TarRead)?;
        found = Some(content);
    }

    Ok(found)
}
