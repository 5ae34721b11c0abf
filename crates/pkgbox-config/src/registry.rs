//! Package-manager registry
//!
//! One profile per package-manager kind: the literal command templates for
//! each abstract verb plus the packages the manager itself needs installed
//! before it is fully usable in a freshly pulled base image.
//!
//! Adding a distribution is a data edit: one [`OsFamily`] variant, its
//! entry in [`OsFamily::package_manager`], and (for a new ecosystem) one
//! profile here.

use crate::{OsFamily, PackageManagerKind};

/// Command templates and bootstrap packages for one package manager
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackageManagerProfile {
    pub kind: PackageManagerKind,
    pub update: &'static str,
    pub install: &'static str,
    pub remove: &'static str,
    pub upgrade: &'static str,
    pub search: &'static str,
    pub list: &'static str,
    pub show: &'static str,
    pub clean: &'static str,
    /// Packages required for the manager itself to function, installed in order
    pub bootstrap_packages: &'static [&'static str],
}

const APT: PackageManagerProfile = PackageManagerProfile {
    kind: PackageManagerKind::Apt,
    update: "apt update",
    install: "apt install -y",
    remove: "apt remove -y",
    upgrade: "apt upgrade -y",
    search: "apt search",
    list: "apt list",
    show: "apt show",
    clean: "apt clean",
    bootstrap_packages: &[
        "apt",
        "apt-utils",
        "apt-transport-https",
        "ca-certificates",
        "curl",
        "gnupg-agent",
        "software-properties-common",
    ],
};

const YUM: PackageManagerProfile = PackageManagerProfile {
    kind: PackageManagerKind::Yum,
    update: "yum update -y",
    install: "yum install -y",
    remove: "yum remove -y",
    upgrade: "yum upgrade -y",
    search: "yum search",
    list: "yum list",
    show: "yum show",
    clean: "yum clean",
    bootstrap_packages: &["yum", "yum-utils", "epel-release", "python3", "python3-pip"],
};

const DNF: PackageManagerProfile = PackageManagerProfile {
    kind: PackageManagerKind::Dnf,
    update: "dnf update -y",
    install: "dnf install -y",
    remove: "dnf remove -y",
    upgrade: "dnf upgrade -y",
    search: "dnf search",
    list: "dnf list",
    show: "dnf show",
    clean: "dnf clean",
    bootstrap_packages: &["dnf", "python3", "python3-pip"],
};

const PACMAN: PackageManagerProfile = PackageManagerProfile {
    kind: PackageManagerKind::Pacman,
    update: "pacman -Syu --noconfirm",
    install: "pacman -S --noconfirm",
    remove: "pacman -Rns --noconfirm",
    upgrade: "pacman -Su --noconfirm",
    search: "pacman -Ss",
    list: "pacman -Ql",
    show: "pacman -Qi",
    clean: "pacman -Sc",
    bootstrap_packages: &["pacman", "python3", "python3-pip"],
};

const ZYPPER: PackageManagerProfile = PackageManagerProfile {
    kind: PackageManagerKind::Zypper,
    update: "zypper refresh",
    install: "zypper install -y",
    remove: "zypper remove -y",
    upgrade: "zypper update -y",
    search: "zypper search",
    list: "zypper list",
    show: "zypper info",
    clean: "zypper clean",
    bootstrap_packages: &["zypper", "python3", "python3-pip"],
};

const APK: PackageManagerProfile = PackageManagerProfile {
    kind: PackageManagerKind::Apk,
    update: "apk update",
    install: "apk add",
    remove: "apk del",
    upgrade: "apk upgrade",
    search: "apk search",
    list: "apk list",
    show: "apk info",
    clean: "apk cache clean",
    bootstrap_packages: &["apk-tools", "python3", "python3-pip"],
};

/// Profile for a package-manager kind
pub fn profile_for_kind(kind: PackageManagerKind) -> &'static PackageManagerProfile {
    match kind {
        PackageManagerKind::Apt => &APT,
        PackageManagerKind::Yum => &YUM,
        PackageManagerKind::Dnf => &DNF,
        PackageManagerKind::Pacman => &PACMAN,
        PackageManagerKind::Zypper => &ZYPPER,
        PackageManagerKind::Apk => &APK,
    }
}

/// Profile for the package manager native to an OS family
pub fn profile_for(family: OsFamily) -> &'static PackageManagerProfile {
    profile_for_kind(family.package_manager())
}
