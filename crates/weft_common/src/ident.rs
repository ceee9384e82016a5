//! Interned names for components, ports, and subsystem types.

use std::fmt;

use lasso::ThreadedRodeo;
use serde::{Deserialize, Serialize};

/// An interned name: a clock, a subsystem, a port, or a type tag.
///
/// Every binding names two components and two ports, and a composite board
/// repeats `clock` hundreds of times, so names are stored once and compared
/// as indices.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ident(u32);

impl Ident {
    /// Wraps a raw index. Real identifiers come from [`Interner::intern`].
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }

    /// The raw index.
    pub fn as_raw(self) -> u32 {
        self.0
    }
}

// SAFETY: `into_usize` and `try_from_usize` round-trip every `u32`, and
// `try_from_usize` rejects anything wider.
unsafe impl lasso::Key for Ident {
    fn into_usize(self) -> usize {
        self.0 as usize
    }

    fn try_from_usize(int: usize) -> Option<Self> {
        u32::try_from(int).ok().map(Self)
    }
}

/// The name table shared by a board's assemblers and its finalized graph.
///
/// Composites assemble their internals with the same interner as the parent,
/// so an [`Ident`] means the same name at every depth of the hierarchy.
/// Backed by [`lasso::ThreadedRodeo`], so engines may resolve names from any
/// thread.
pub struct Interner {
    names: ThreadedRodeo<Ident>,
}

impl Interner {
    /// Creates an empty name table.
    pub fn new() -> Self {
        Self {
            names: ThreadedRodeo::new(),
        }
    }

    /// Returns the identifier for `name`, adding it if needed.
    pub fn intern(&self, name: &str) -> Ident {
        self.names.get_or_intern(name)
    }

    /// Returns the identifier for `name` if it was ever interned.
    ///
    /// A name that was never interned cannot belong to any component or
    /// port, so lookups by user-supplied names go through here.
    pub fn lookup(&self, name: &str) -> Option<Ident> {
        self.names.get(name)
    }

    /// The name behind `ident`.
    ///
    /// # Panics
    ///
    /// Panics if `ident` came from another interner.
    pub fn resolve(&self, ident: Ident) -> &str {
        self.names.resolve(&ident)
    }

    /// Number of distinct names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if no name was interned yet.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Interner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interner").field("names", &self.len()).finish()
    }
}
