//! Operating system families and their native package managers

use crate::ConfigError;
use serde::{Deserialize, Serialize};

/// Supported operating system families
///
/// The family selects both the base image (`{family}:{version}`) and the
/// package manager used inside the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OsFamily {
    Ubuntu,
    Debian,
    Centos,
    Fedora,
    Alpine,
    Archlinux,
}

impl OsFamily {
    /// All supported families, in declaration order
    pub const ALL: [OsFamily; 6] = [
        OsFamily::Ubuntu,
        OsFamily::Debian,
        OsFamily::Centos,
        OsFamily::Fedora,
        OsFamily::Alpine,
        OsFamily::Archlinux,
    ];

    /// The package manager native to this family.
    ///
    /// Total over the enum — a new family must pick its manager here
    /// before the crate compiles again.
    pub fn package_manager(self) -> PackageManagerKind {
        match self {
            Self::Ubuntu | Self::Debian => PackageManagerKind::Apt,
            Self::Centos => PackageManagerKind::Yum,
            Self::Fedora => PackageManagerKind::Dnf,
            Self::Alpine => PackageManagerKind::Apk,
            Self::Archlinux => PackageManagerKind::Pacman,
        }
    }
}

impl std::fmt::Display for OsFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ubuntu => write!(f, "ubuntu"),
            Self::Debian => write!(f, "debian"),
            Self::Centos => write!(f, "centos"),
            Self::Fedora => write!(f, "fedora"),
            Self::Alpine => write!(f, "alpine"),
            Self::Archlinux => write!(f, "archlinux"),
        }
    }
}

impl std::str::FromStr for OsFamily {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ubuntu" => Ok(Self::Ubuntu),
            "debian" => Ok(Self::Debian),
            "centos" => Ok(Self::Centos),
            "fedora" => Ok(Self::Fedora),
            "alpine" => Ok(Self::Alpine),
            "archlinux" => Ok(Self::Archlinux),
            _ => Err(ConfigError::UnsupportedOs(s.to_string())),
        }
    }
}

/// Package manager kinds, one per packaging ecosystem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManagerKind {
    Apt,
    Yum,
    Dnf,
    Pacman,
    Zypper,
    Apk,
}

impl std::fmt::Display for PackageManagerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Apt => write!(f, "apt"),
            Self::Yum => write!(f, "yum"),
            Self::Dnf => write!(f, "dnf"),
            Self::Pacman => write!(f, "pacman"),
            Self::Zypper => write!(f, "zypper"),
            Self::Apk => write!(f, "apk"),
        }
    }
}
