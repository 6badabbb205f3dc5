use serde::Deserialize;

/// Configuration as stored in TOML files; every field is optional so that
/// command-line flags can fill the gaps
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct FileConfig {
    #[serde(default)]
    pub registry: RegistrySection,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct RegistrySection {
    /// Maximum number of loaded plugins, 0 for unlimited
    pub max_loaded: Option<usize>,
}

impl FileConfig {
    /// Effective plugin limit: the command-line flag wins over the file,
    /// and an unset limit means unlimited (0)
    pub fn max_loaded(&self, flag: Option<usize>) -> usize {
        flag.or(self.registry.max_loaded).unwrap_or_default()
    }
}
