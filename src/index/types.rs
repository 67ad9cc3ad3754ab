//! Common types for package index listings

/// Kind of distribution file published for a release
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageType {
    /// Source distribution (.tar.gz, .zip, ...)
    Sdist,
    /// Built wheel (.whl)
    Wheel,
    /// Legacy egg (.egg)
    Egg,
    /// Windows installer (.exe)
    Wininst,
    /// Windows MSI installer (.msi)
    Msi,
    /// RPM package (.rpm)
    Rpm,
    /// macOS disk image (.dmg)
    Dmg,
    Unknown,
}

impl PackageType {
    /// Returns the string representation of the package type
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageType::Sdist => "sdist",
            PackageType::Wheel => "wheel",
            PackageType::Egg => "egg",
            PackageType::Wininst => "wininst",
            PackageType::Msi => "msi",
            PackageType::Rpm => "rpm",
            PackageType::Dmg => "dmg",
            PackageType::Unknown => "unknown",
        }
    }

    /// Whether files of this type can be picked as a project's latest release
    pub fn is_selectable(&self) -> bool {
        matches!(self, PackageType::Sdist | PackageType::Wheel)
    }
}

/// A downloadable file listed for a project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseFile {
    pub filename: String,
    pub url: String,
    /// Version declared by the index or derived from the filename
    pub version: Option<String>,
    pub package_type: PackageType,
}

impl ReleaseFile {
    pub fn new(
        filename: impl Into<String>,
        url: impl Into<String>,
        version: Option<&str>,
        package_type: PackageType,
    ) -> Self {
        Self {
            filename: filename.into(),
            url: url.into(),
            version: version.map(str::to_string),
            package_type,
        }
    }
}
