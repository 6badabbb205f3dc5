//! Module loading - turns a plugin file into a module handle

use libloading::{Library, Symbol};
use std::panic::AssertUnwindSafe;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use plugrack_api::{API_VERSION, API_VERSION_SYMBOL, CREATE_SYMBOL, Plugin};

use crate::error::{ExecuteError, LoadError};

/// File extension of plugin libraries on this platform.
#[cfg(target_os = "macos")]
pub const PLUGIN_EXTENSION: &str = "dylib";

#[cfg(target_os = "windows")]
pub const PLUGIN_EXTENSION: &str = "dll";

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
pub const PLUGIN_EXTENSION: &str = "so";

/// Loads a named plugin from a plugin directory.
///
/// The directory is passed on every call; loaders keep no search path of
/// their own.
pub trait ModuleLoader {
    /// Handle produced by a successful load
    type Module;

    /// Extension (without the dot) of files this loader can load
    fn extension(&self) -> &str;

    /// Load `<dir>/<name>.<extension>`
    fn load(&self, dir: &Path, name: &str) -> Result<Self::Module, LoadError>;
}

/// Loads plugins as native shared libraries
#[derive(Debug, Default, Clone, Copy)]
pub struct DylibLoader;

impl DylibLoader {
    /// Path of the library for `name` in `dir`
    pub fn library_path(dir: &Path, name: &str) -> PathBuf {
        dir.join(format!("{}.{}", name, PLUGIN_EXTENSION))
    }
}

impl ModuleLoader for DylibLoader {
    type Module = DylibModule;

    fn extension(&self) -> &str {
        PLUGIN_EXTENSION
    }

    fn load(&self, dir: &Path, name: &str) -> Result<DylibModule, LoadError> {
        let path = Self::library_path(dir, name);

        // SAFETY: Loading runs the library's initializers. Only libraries the
        // user placed in the plugin directory are opened.
        let library = unsafe { Library::new(&path)? };

        let found = {
            // SAFETY: `export_plugin!` defines this symbol with this signature.
            let api_version_fn: Symbol<extern "C" fn() -> u32> =
                unsafe { library.get(API_VERSION_SYMBOL)? };
            api_version_fn()
        };
        check_api_version(found)?;

        tracing::debug!(plugin = %name, path = %path.display(), "Library opened");

        Ok(DylibModule {
            name: name.to_string(),
            path,
            library: Arc::new(library),
        })
    }
}

/// A loaded plugin library
///
/// The library stays mapped while this handle or any [`PluginInstance`]
/// created from it is alive.
#[derive(Debug)]
pub struct DylibModule {
    name: String,
    path: PathBuf,
    library: Arc<Library>,
}

impl DylibModule {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Construct the plugin type exported by this library
    pub fn create_plugin(&self) -> Result<PluginInstance, LoadError> {
        let instance = {
            // SAFETY: `export_plugin!` defines this symbol with this signature
            // and returns a pointer from `Box::into_raw`.
            let create_fn: Symbol<extern "C" fn() -> *mut dyn Plugin> =
                unsafe { self.library.get(CREATE_SYMBOL)? };
            unsafe { Box::from_raw(create_fn()) }
        };

        Ok(PluginInstance {
            name: self.name.clone(),
            instance,
            _library: Arc::clone(&self.library),
        })
    }
}

/// A plugin instance together with the library its code lives in
pub struct PluginInstance {
    name: String,
    /// Dropped before `_library`
    instance: Box<dyn Plugin>,
    _library: Arc<Library>,
}

impl PluginInstance {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        self.instance.description()
    }

    /// Run the plugin. A panic inside the plugin is caught and reported as
    /// [`ExecuteError::Panicked`].
    pub fn execute(&mut self) -> Result<(), ExecuteError> {
        execute_isolated(&self.name, self.instance.as_mut())
    }
}

fn check_api_version(found: u32) -> Result<(), LoadError> {
    if found != API_VERSION {
        return Err(LoadError::ApiVersionMismatch {
            expected: API_VERSION,
            found,
        });
    }
    Ok(())
}

/// Run `plugin`, turning a returned error or a panic into an [`ExecuteError`]
fn execute_isolated(name: &str, plugin: &mut dyn Plugin) -> Result<(), ExecuteError> {
    match std::panic::catch_unwind(AssertUnwindSafe(|| plugin.execute())) {
        Ok(Ok(())) => Ok(()),
        Ok(Err(source)) => Err(ExecuteError::Plugin {
            name: name.to_string(),
            source,
        }),
        Err(_) => Err(ExecuteError::Panicked {
            name: name.to_string(),
        }),
    }
}

impl std::fmt::Debug for PluginInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginInstance")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
