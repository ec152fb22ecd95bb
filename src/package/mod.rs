//! Handler packages and the best-effort walk over their modules.
//!
//! # Data Flow
//! ```text
//! Package (in-code StaticPackage or on-disk DirPackage)
//!     → submodules()  deterministic traversal order, root excluded
//!     → load(module)  per module, may fail
//!     → Walk          yields loaded modules, records skipped ones
//! ```
//!
//! # Design Decisions
//! - A module that cannot be read or parsed contributes nothing; the walk
//!   logs it and keeps going
//! - A module that parses but declares an invalid route is a configuration
//!   error and stops the walk
//! - Only classes defined in a module count for that module

pub mod fs;
pub mod manifest;
pub mod memory;

use crate::error::{LoadError, RouteResult};
use crate::handler::{HandlerClass, HandlerRef, ModulePath, RequestHandler};

pub use fs::DirPackage;
pub use memory::StaticPackage;

/// Source of handler modules.
pub trait Package {
    /// Fully-qualified name of the root package.
    fn name(&self) -> &ModulePath;

    /// Every module below the root, in traversal order.
    fn submodules(&self) -> Vec<ModulePath>;

    /// Load one module.
    fn load(&self, module: &ModulePath) -> Result<Module, LoadError>;
}

/// A loaded module and the classes visible in it.
#[derive(Debug, Clone, Default)]
pub struct Module {
    name: ModulePath,
    classes: Vec<HandlerRef>,
}

impl Module {
    pub fn new(name: impl Into<ModulePath>) -> Self {
        Self {
            name: name.into(),
            classes: Vec::new(),
        }
    }

    /// Add a class visible in this module, defined here or elsewhere.
    pub fn class(mut self, class: impl Into<HandlerRef>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Add a Rust handler type.
    pub fn handler<T: RequestHandler>(self) -> Self {
        self.class(HandlerClass::of::<T>())
    }

    pub fn name(&self) -> &ModulePath {
        &self.name
    }

    /// Classes defined directly in this module, skipping re-exports.
    pub fn defined_classes(&self) -> impl Iterator<Item = &HandlerRef> + '_ {
        self.classes.iter().filter(move |c| c.module() == &self.name)
    }
}

/// Lazy walk over a package's modules.
///
/// Modules that fail to load are logged and recorded in [`Walk::skipped`].
pub struct Walk<'a> {
    package: &'a dyn Package,
    pending: std::vec::IntoIter<ModulePath>,
    skipped: Vec<(ModulePath, LoadError)>,
}

impl Walk<'_> {
    /// Modules skipped so far, with the reason.
    pub fn skipped(&self) -> &[(ModulePath, LoadError)] {
        &self.skipped
    }

    pub fn into_skipped(self) -> Vec<(ModulePath, LoadError)> {
        self.skipped
    }
}

impl Iterator for Walk<'_> {
    type Item = RouteResult<Module>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let path = self.pending.next()?;
            match self.package.load(&path) {
                Ok(module) => return Some(Ok(module)),
                Err(LoadError::Invalid(e)) => return Some(Err(e)),
                Err(e) => {
                    tracing::warn!(
                        module = %path,
                        error = %e,
                        "Skipping module that failed to load"
                    );
                    self.skipped.push((path, e));
                }
            }
        }
    }
}

/// Start walking `package`.
pub fn walk(package: &dyn Package) -> Walk<'_> {
    Walk {
        package,
        pending: package.submodules().into_iter(),
        skipped: Vec::new(),
    }
}
