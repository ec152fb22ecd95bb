//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use autoroute::package::DirPackage;
use regex::Regex;

/// Directory holding the fixture packages.
pub fn fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

/// The `helloworld` fixture package.
pub fn helloworld() -> DirPackage {
    DirPackage::open(fixtures().join("helloworld")).expect("fixture package missing")
}

/// Compile a route pattern the way a regex dispatcher would, anchored at the start.
pub fn compile(pattern: &str) -> Regex {
    Regex::new(&format!("^{}", pattern))
        .unwrap_or_else(|e| panic!("pattern `{}` does not compile: {}", pattern, e))
}

/// Capture group names of a pattern, in order.
pub fn capture_names(pattern: &str) -> Vec<String> {
    compile(pattern)
        .capture_names()
        .flatten()
        .map(str::to_string)
        .collect()
}
