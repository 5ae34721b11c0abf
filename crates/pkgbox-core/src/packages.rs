//! Package operations inside the managed container
//!
//! Translates abstract verbs into the native command line for the bound
//! container's OS family and routes them through the manager's `execute`.
//! Pure command formatting: all state lives in the manager.

use crate::{CoreError, LifecycleManager, Result};
use pkgbox_config::{profile_for, PackageManagerProfile};

/// Package operations bound to one manager and its active spec
pub struct PackageOps<'a> {
    manager: &'a mut LifecycleManager,
    profile: &'static PackageManagerProfile,
}

impl LifecycleManager {
    /// Package operations for the bound container's OS family.
    ///
    /// Fails with [`CoreError::NoActiveConfiguration`] when no container
    /// is bound.
    pub fn packages(&mut self) -> Result<PackageOps<'_>> {
        let family = self
            .spec()
            .map(|s| s.os_type)
            .ok_or(CoreError::NoActiveConfiguration)?;
        Ok(PackageOps {
            profile: profile_for(family),
            manager: self,
        })
    }
}

impl PackageOps<'_> {
    /// The profile backing this translator
    pub fn profile(&self) -> &'static PackageManagerProfile {
        self.profile
    }

    /// Refresh the package index
    pub async fn update(&mut self) -> Result<String> {
        self.manager.execute(self.profile.update).await
    }

    /// Install a package
    pub async fn install(&mut self, package: &str) -> Result<String> {
        let cmd = format!("{} {}", self.profile.install, package);
        self.manager.execute(&cmd).await
    }

    /// Remove a package
    pub async fn remove(&mut self, package: &str) -> Result<String> {
        let cmd = format!("{} {}", self.profile.remove, package);
        self.manager.execute(&cmd).await
    }

    /// Search the package index
    pub async fn search(&mut self, query: &str) -> Result<String> {
        let cmd = format!("{} {}", self.profile.search, query);
        self.manager.execute(&cmd).await
    }

    /// List installed packages
    pub async fn list(&mut self) -> Result<String> {
        self.manager.execute(self.profile.list).await
    }

    /// Clean the package cache
    pub async fn clean(&mut self) -> Result<String> {
        self.manager.execute(self.profile.clean).await
    }

    /// Install the packages the manager itself needs in a fresh base
    /// image, in profile order
    pub async fn bootstrap(&mut self) -> Result<()> {
        for package in self.profile.bootstrap_packages {
            self.install(package).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;
    use pkgbox_config::{ContainerSpec, OsFamily};

    async fn bound_manager(mock: MockEngine, family: OsFamily) -> LifecycleManager {
        let mut mgr = LifecycleManager::with_engine(Box::new(mock));
        let mut spec = ContainerSpec::new(family, "latest");
        spec.name = Some("pkgtest".to_string());
        mgr.create(&spec).await.unwrap();
        mgr
    }

    fn exec_commands(calls: &[EngineCall]) -> Vec<String> {
        calls
            .iter()
            .filter_map(|c| match c {
                EngineCall::Exec { cmd, .. } => cmd.last().cloned(),
                _ => None,
            })
            .collect()
    }

    #[tokio::test]
    async fn test_packages_requires_active_configuration() {
        let mut mgr = LifecycleManager::with_engine(Box::new(MockEngine::new()));
        let err = mgr.packages().err().unwrap();
        assert!(matches!(err, CoreError::NoActiveConfiguration));
    }

    #[tokio::test]
    async fn test_install_formats_apt_command_verbatim() {
        let mock = MockEngine::new();
        let calls = mock.calls.clone();
        let mut mgr = bound_manager(mock, OsFamily::Debian).await;

        mgr.packages().unwrap().install("curl").await.unwrap();

        let recorded = calls.lock().unwrap();
        assert_eq!(exec_commands(&recorded), vec!["apt install -y curl"]);
    }

    #[tokio::test]
    async fn test_update_uses_bare_template() {
        let mock = MockEngine::new();
        let calls = mock.calls.clone();
        let mut mgr = bound_manager(mock, OsFamily::Ubuntu).await;

        mgr.packages().unwrap().update().await.unwrap();

        let recorded = calls.lock().unwrap();
        assert_eq!(exec_commands(&recorded), vec!["apt update"]);
    }

    #[tokio::test]
    async fn test_search_interpolates_query() {
        let mock = MockEngine::new();
        let calls = mock.calls.clone();
        let mut mgr = bound_manager(mock, OsFamily::Archlinux).await;

        mgr.packages().unwrap().search("vim").await.unwrap();

        let recorded = calls.lock().unwrap();
        assert_eq!(exec_commands(&recorded), vec!["pacman -Ss vim"]);
    }

    #[tokio::test]
    async fn test_remove_uses_family_verbs() {
        let mock = MockEngine::new();
        let calls = mock.calls.clone();
        let mut mgr = bound_manager(mock, OsFamily::Alpine).await;

        mgr.packages().unwrap().remove("curl").await.unwrap();

        let recorded = calls.lock().unwrap();
        assert_eq!(exec_commands(&recorded), vec!["apk del curl"]);
    }

    #[tokio::test]
    async fn test_bootstrap_installs_profile_packages_in_order() {
        let mock = MockEngine::new();
        let calls = mock.calls.clone();
        let mut mgr = bound_manager(mock, OsFamily::Alpine).await;

        mgr.packages().unwrap().bootstrap().await.unwrap();

        let recorded = calls.lock().unwrap();
        assert_eq!(
            exec_commands(&recorded),
            vec![
                "apk add apk-tools",
                "apk add python3",
                "apk add python3-pip"
            ]
        );
    }
}
