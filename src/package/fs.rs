//! Packages laid out as directories of module files.
//!
//! # Layout
//! ```text
//! api/                 package `api` (root)
//!   helloworld.toml    module  `api.helloworld`
//!   images/            package `api.images`
//!     mod.toml         handlers of `api.images` itself
//!     popular.toml     module  `api.images.popular`
//! ```
//!
//! # Design Decisions
//! - Entries are visited sorted by name, a package before its children
//! - Names that are not identifiers are ignored, like non-module files
//! - A directory that cannot be listed is logged and treated as empty

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::LoadError;
use crate::handler::ModulePath;
use crate::package::manifest::ModuleFile;
use crate::package::{Module, Package};

/// Extension of module files.
pub const MODULE_EXT: &str = "toml";

/// File holding a package's own handlers.
pub const PACKAGE_FILE: &str = "mod.toml";

/// A package rooted at a directory.
#[derive(Debug, Clone)]
pub struct DirPackage {
    root: PathBuf,
    name: ModulePath,
}

impl DirPackage {
    /// Package named after the directory itself.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, LoadError> {
        let root = root.into();
        let resolved = root.canonicalize().unwrap_or_else(|_| root.clone());
        let name = resolved
            .file_name()
            .and_then(|n| n.to_str())
            .filter(|n| is_identifier(n))
            .map(ModulePath::parse)
            .ok_or_else(|| LoadError::NotFound(root.display().to_string()))?;
        Self::with_name(root, name)
    }

    /// Package at `root` under an explicit dotted name.
    pub fn with_name(
        root: impl Into<PathBuf>,
        name: impl Into<ModulePath>,
    ) -> Result<Self, LoadError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(LoadError::NotFound(root.display().to_string()));
        }
        Ok(Self {
            root,
            name: name.into(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn collect(&self, dir: &Path, prefix: &ModulePath, out: &mut Vec<ModulePath>) {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "Cannot list package directory");
                return;
            }
        };

        let mut children: Vec<(String, PathBuf, bool)> = entries
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let path = entry.path();
                let is_dir = path.is_dir();
                let name = if is_dir {
                    path.file_name()?.to_str()?.to_string()
                } else if path.extension().and_then(|e| e.to_str()) == Some(MODULE_EXT) {
                    path.file_stem()?.to_str()?.to_string()
                } else {
                    return None;
                };
                (is_identifier(&name) && (is_dir || name != "mod")).then_some((name, path, is_dir))
            })
            .collect();
        children.sort();

        for (name, path, is_dir) in &children {
            if !is_dir && children.iter().any(|(other, _, d)| *d && other == name) {
                tracing::warn!(file = %path.display(), "Module file shadowed by package directory");
                continue;
            }
            let module = prefix.join(name);
            tracing::trace!(module = %module, "Found module");
            out.push(module.clone());
            if *is_dir {
                self.collect(path, &module, out);
            }
        }
    }

    /// File holding `module`, if the module exists at all.
    fn locate(&self, module: &ModulePath) -> Option<PathBuf> {
        if !module.starts_with(&self.name) {
            return None;
        }
        let rel = &module.components()[self.name.components().len()..];
        let mut dir = self.root.clone();
        dir.extend(rel);
        if dir.is_dir() {
            return Some(dir.join(PACKAGE_FILE));
        }
        let file = dir.with_extension(MODULE_EXT);
        file.is_file().then_some(file)
    }
}

impl Package for DirPackage {
    fn name(&self) -> &ModulePath {
        &self.name
    }

    fn submodules(&self) -> Vec<ModulePath> {
        let mut out = Vec::new();
        self.collect(&self.root, &self.name, &mut out);
        out
    }

    fn load(&self, module: &ModulePath) -> Result<Module, LoadError> {
        let path = self
            .locate(module)
            .ok_or_else(|| LoadError::NotFound(module.to_string()))?;

        // A package directory without mod.toml simply defines nothing.
        if path.file_name().and_then(|n| n.to_str()) == Some(PACKAGE_FILE) && !path.exists() {
            return Ok(Module::new(module.clone()));
        }

        let content = fs::read_to_string(&path)?;
        let file: ModuleFile = toml::from_str(&content)?;
        tracing::debug!(module = %module, handlers = file.handlers.len(), "Loaded module");
        Ok(file.into_module(module)?)
    }
}

/// ASCII identifier: letters, digits and `_`, not starting with a digit.
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
