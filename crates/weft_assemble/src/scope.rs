//! Hierarchical assembly scopes.

use std::fmt;

/// The path of an assembler in the board hierarchy, e.g. `carfield/hostd`.
///
/// The root scope is the board name; each composite subsystem assembles its
/// internals in a child scope named after the instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Scope {
    segments: Vec<String>,
}

impl Scope {
    /// Creates a root scope.
    pub fn root(name: impl Into<String>) -> Self {
        Self {
            segments: vec![name.into()],
        }
    }

    /// Returns the scope of a child instance named `name`.
    pub fn child(&self, name: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(name.to_string());
        Self { segments }
    }

    /// The `/`-joined path.
    pub fn path(&self) -> String {
        self.segments.join("/")
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
