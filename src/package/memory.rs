//! Packages assembled in code.

use crate::error::LoadError;
use crate::handler::ModulePath;
use crate::package::{Module, Package};

/// A package whose modules are registered explicitly.
///
/// Modules are walked in registration order.
#[derive(Debug, Clone)]
pub struct StaticPackage {
    name: ModulePath,
    modules: Vec<Module>,
}

impl StaticPackage {
    pub fn new(name: impl Into<ModulePath>) -> Self {
        Self {
            name: name.into(),
            modules: Vec::new(),
        }
    }

    /// Register a module, building its contents with `build`.
    ///
    /// Registering the same path twice adds to the existing module.
    pub fn module<F>(mut self, path: impl Into<ModulePath>, build: F) -> Self
    where
        F: FnOnce(Module) -> Module,
    {
        let path = path.into();
        match self.modules.iter().position(|m| m.name() == &path) {
            Some(idx) => {
                let existing = std::mem::take(&mut self.modules[idx]);
                self.modules[idx] = build(existing);
            }
            None => self.modules.push(build(Module::new(path))),
        }
        self
    }
}

impl Package for StaticPackage {
    fn name(&self) -> &ModulePath {
        &self.name
    }

    fn submodules(&self) -> Vec<ModulePath> {
        self.modules
            .iter()
            .map(Module::name)
            .filter(|path| path.starts_with(&self.name) && *path != &self.name)
            .cloned()
            .collect()
    }

    fn load(&self, module: &ModulePath) -> Result<Module, LoadError> {
        self.modules
            .iter()
            .find(|m| m.name() == module)
            .cloned()
            .ok_or_else(|| LoadError::NotFound(module.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::HandlerClass;

    #[test]
    fn test_submodules_exclude_root_and_strangers() {
        let pkg = StaticPackage::new("api")
            .module("api", |m| m)
            .module("api.users", |m| m)
            .module("other.users", |m| m)
            .module("api.images", |m| m);

        let names: Vec<_> = pkg.submodules().iter().map(ToString::to_string).collect();
        assert_eq!(names, vec!["api.users", "api.images"]);
    }

    #[test]
    fn test_module_registered_twice_is_merged() {
        let pkg = StaticPackage::new("api")
            .module("api.users", |m| m.class(HandlerClass::new("api.users", "UsersHandler")))
            .module("api.users", |m| m.class(HandlerClass::new("api.users", "UserHandler")));

        let module = pkg.load(&"api.users".into()).unwrap();
        assert_eq!(module.defined_classes().count(), 2);
        assert!(matches!(pkg.load(&"api.nope".into()), Err(LoadError::NotFound(_))));
    }
}
