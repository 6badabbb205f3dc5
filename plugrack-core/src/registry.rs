//! PluginRegistry - discovers plugins and tracks the loaded ones

use indexmap::IndexMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::RegistryConfig;
use crate::error::RegistryError;
use crate::loader::{DylibLoader, ModuleLoader};

/// A plugin found in the plugin directory, loaded or not
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginDescriptor {
    /// File name without extension
    pub name: String,
    /// Directory the plugin was found in
    pub location: PathBuf,
}

/// A plugin the registry has imported
#[derive(Debug)]
pub struct PluginRecord<M> {
    pub name: String,
    pub location: PathBuf,
    /// Shared with callers of [`PluginRegistry::get_loaded_module`]
    pub module: Arc<M>,
}

/// What an import did when it did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportOutcome {
    /// The plugin was loaded and is now tracked
    Loaded,
    /// The plugin was already tracked; nothing was reloaded
    AlreadyLoaded,
    /// The registry is full; the plugin was not loaded
    CapacityReached,
}

/// Per-plugin results of [`PluginRegistry::import_all`]
#[derive(Debug, Default)]
pub struct ImportReport {
    /// Plugins loaded by this call, in import order
    pub loaded: Vec<String>,
    /// Plugins skipped because they were already loaded or the registry was full
    pub skipped: Vec<(String, ImportOutcome)>,
    /// Plugins whose load failed
    pub failures: Vec<(String, RegistryError)>,
}

impl ImportReport {
    /// True when no plugin failed to load
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Registry of plugins in a single plugin directory.
///
/// Loaded plugins are kept in import order. The registry is not synchronized;
/// callers sharing it across threads must wrap it in a lock.
pub struct PluginRegistry<L: ModuleLoader = DylibLoader> {
    plugin_dir: PathBuf,
    /// 0 means unlimited
    max_loaded: usize,
    loader: L,
    loaded: IndexMap<String, PluginRecord<L::Module>>,
}

impl PluginRegistry<DylibLoader> {
    /// Create a registry that loads plugins as shared libraries
    pub fn new(config: RegistryConfig) -> Self {
        Self::with_loader(config, DylibLoader)
    }
}

impl<L: ModuleLoader> PluginRegistry<L> {
    /// Create a registry backed by a custom loader
    pub fn with_loader(config: RegistryConfig, loader: L) -> Self {
        Self {
            plugin_dir: config.plugin_dir,
            max_loaded: config.max_loaded,
            loader,
            loaded: IndexMap::new(),
        }
    }

    pub fn plugin_dir(&self) -> &Path {
        &self.plugin_dir
    }

    pub fn max_loaded(&self) -> usize {
        self.max_loaded
    }

    /// Scan the plugin directory.
    ///
    /// Returns one descriptor per plugin name in directory iteration order,
    /// which depends on the filesystem. A missing directory has no plugins.
    pub fn list_available(&self) -> Result<Vec<PluginDescriptor>, RegistryError> {
        if !self.plugin_dir.exists() {
            tracing::debug!(dir = %self.plugin_dir.display(), "Plugin directory does not exist");
            return Ok(Vec::new());
        }

        let mut found: IndexMap<String, PluginDescriptor> = IndexMap::new();

        for entry in std::fs::read_dir(&self.plugin_dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) != Some(self.loader.extension()) {
                continue;
            }
            let Some(name) = path
                .file_stem()
                .and_then(|n| n.to_str())
                .filter(|n| !n.is_empty())
            else {
                continue;
            };

            found.insert(
                name.to_string(),
                PluginDescriptor {
                    name: name.to_string(),
                    location: self.plugin_dir.clone(),
                },
            );
        }

        tracing::debug!(
            dir = %self.plugin_dir.display(),
            count = found.len(),
            "Scanned plugin directory"
        );

        Ok(found.into_values().collect())
    }

    /// Loaded plugins in import order
    pub fn list_loaded(&self) -> &IndexMap<String, PluginRecord<L::Module>> {
        &self.loaded
    }

    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }

    pub fn is_loaded(&self, name: &str) -> bool {
        self.loaded.contains_key(name)
    }

    /// Module handle of a loaded plugin, or `None` if the name is empty or
    /// not loaded
    pub fn get_loaded_module(&self, name: &str) -> Option<Arc<L::Module>> {
        if name.is_empty() {
            return None;
        }
        self.loaded.get(name).map(|record| Arc::clone(&record.module))
    }

    /// Import a single plugin by name.
    ///
    /// Importing a plugin that is already loaded, or importing while the
    /// registry is full, is not an error; the returned outcome says which.
    pub fn import_one(&mut self, name: &str) -> Result<ImportOutcome, RegistryError> {
        let available = self.list_available()?;

        let Some(descriptor) = available.into_iter().find(|d| d.name == name) else {
            tracing::error!(
                plugin = %name,
                dir = %self.plugin_dir.display(),
                "Plugin not found"
            );
            return Err(RegistryError::NotFound {
                name: name.to_string(),
                dir: self.plugin_dir.clone(),
            });
        };

        self.import_descriptor(descriptor)
    }

    /// Import every available plugin.
    ///
    /// A failed load is recorded in the report and the remaining plugins are
    /// still imported. Only a failure to scan the directory is returned as
    /// an error.
    pub fn import_all(&mut self) -> Result<ImportReport, RegistryError> {
        let available = self.list_available()?;
        let mut report = ImportReport::default();

        for descriptor in available {
            let name = descriptor.name.clone();
            match self.import_descriptor(descriptor) {
                Ok(ImportOutcome::Loaded) => report.loaded.push(name),
                Ok(outcome) => report.skipped.push((name, outcome)),
                Err(e) => report.failures.push((name, e)),
            }
        }

        Ok(report)
    }

    /// Stop tracking a loaded plugin.
    ///
    /// The remaining plugins keep their order. The module itself stays alive
    /// as long as callers hold handles to it.
    pub fn remove(&mut self, name: &str) -> Result<PluginRecord<L::Module>, RegistryError> {
        match self.loaded.shift_remove(name) {
            Some(record) => {
                tracing::info!(plugin = %name, "Plugin removed");
                Ok(record)
            }
            None => {
                tracing::warn!(plugin = %name, "Plugin is not loaded, nothing to remove");
                Err(RegistryError::NotLoaded {
                    name: name.to_string(),
                })
            }
        }
    }

    fn at_capacity(&self) -> bool {
        self.max_loaded > 0 && self.loaded.len() >= self.max_loaded
    }

    fn import_descriptor(
        &mut self,
        descriptor: PluginDescriptor,
    ) -> Result<ImportOutcome, RegistryError> {
        if self.loaded.contains_key(&descriptor.name) {
            tracing::warn!(plugin = %descriptor.name, "Plugin is already loaded");
            return Ok(ImportOutcome::AlreadyLoaded);
        }

        if self.at_capacity() {
            tracing::warn!(
                plugin = %descriptor.name,
                max_loaded = self.max_loaded,
                "Maximum number of loaded plugins reached, remove a plugin or raise max_loaded to load another"
            );
            return Ok(ImportOutcome::CapacityReached);
        }

        let module = match self.loader.load(&self.plugin_dir, &descriptor.name) {
            Ok(module) => module,
            Err(source) => {
                tracing::error!(plugin = %descriptor.name, error = %source, "Failed to load plugin");
                return Err(RegistryError::Load {
                    name: descriptor.name,
                    source,
                });
            }
        };

        tracing::info!(plugin = %descriptor.name, "Plugin imported");

        self.loaded.insert(
            descriptor.name.clone(),
            PluginRecord {
                name: descriptor.name,
                location: descriptor.location,
                module: Arc::new(module),
            },
        );

        Ok(ImportOutcome::Loaded)
    }
}
