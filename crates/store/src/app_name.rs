//! Where the application keeps its files

use std::path::PathBuf;

use directories::ProjectDirs;

/// Identity of the application on the local machine
///
/// Directories follow the platform conventions of [`ProjectDirs`]:
/// - Linux: `$XDG_CONFIG_HOME/<application>` or `~/.config/<application>`
/// - macOS: `~/Library/Application Support/<qualifier>.<organization>.<application>`
/// - Windows: `%APPDATA%\<organization>\<application>\config`
///
/// Without a home directory every location falls back to the working
/// directory.
///
/// ```
/// use plant_store::AppName;
///
/// let app_name = AppName::new("com", "example", "plants");
/// assert!(app_name.storage_dir().ends_with("store"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppName {
    pub qualifier: String,
    pub organization: String,
    pub application: String,
}

impl AppName {
    /// `qualifier` is usually a reverse domain such as "com"
    pub fn new(
        qualifier: impl Into<String>,
        organization: impl Into<String>,
        application: impl Into<String>,
    ) -> Self {
        Self {
            qualifier: qualifier.into(),
            organization: organization.into(),
            application: application.into(),
        }
    }

    pub fn project_dirs(&self) -> Option<ProjectDirs> {
        ProjectDirs::from(&self.qualifier, &self.organization, &self.application)
    }

    /// Directory for user-editable settings
    pub fn config_dir(&self) -> PathBuf {
        self.project_dirs()
            .map(|dirs| dirs.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Directory holding the storage group files
    pub fn storage_dir(&self) -> PathBuf {
        self.project_dirs()
            .map(|dirs| dirs.config_local_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
            .join("store")
    }
}
