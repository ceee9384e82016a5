//! Subsystem factories and their opaque configuration descriptors.

use std::collections::BTreeMap;
use std::sync::Arc;

use weft_common::Interner;
use weft_topology::{PortSpec, Subsystem};

use crate::assembler::Assembler;
use crate::errors::AssembleError;
use crate::scope::Scope;

/// Opaque key-value parameters for one subsystem instance.
///
/// Assembly passes the descriptor through untouched; only the factory that
/// receives it reads its keys. The typed getters are conveniences for
/// factories and report a wrongly typed value as [`FactoryError::InvalidParam`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigDescriptor {
    table: toml::Table,
}

impl ConfigDescriptor {
    /// Wraps a parameter table.
    pub fn new(table: toml::Table) -> Self {
        Self { table }
    }

    /// A descriptor with no parameters.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns a copy with `key` set to `value`.
    pub fn with(mut self, key: &str, value: impl Into<toml::Value>) -> Self {
        self.table.insert(key.to_string(), value.into());
        self
    }

    /// The raw table.
    pub fn table(&self) -> &toml::Table {
        &self.table
    }

    /// The raw value under `key`.
    pub fn get(&self, key: &str) -> Option<&toml::Value> {
        self.table.get(key)
    }

    /// Reads an integer parameter.
    pub fn integer(&self, key: &str) -> Result<Option<i64>, FactoryError> {
        match self.table.get(key) {
            None => Ok(None),
            Some(toml::Value::Integer(v)) => Ok(Some(*v)),
            Some(other) => Err(FactoryError::invalid(
                key,
                format!("expected an integer, found {}", other.type_str()),
            )),
        }
    }

    /// Reads a string parameter.
    pub fn string(&self, key: &str) -> Result<Option<&str>, FactoryError> {
        match self.table.get(key) {
            None => Ok(None),
            Some(toml::Value::String(v)) => Ok(Some(v.as_str())),
            Some(other) => Err(FactoryError::invalid(
                key,
                format!("expected a string, found {}", other.type_str()),
            )),
        }
    }
}

impl From<toml::Table> for ConfigDescriptor {
    fn from(table: toml::Table) -> Self {
        Self::new(table)
    }
}

/// Errors a factory reports when it cannot build a subsystem.
#[derive(Debug, thiserror::Error)]
pub enum FactoryError {
    /// A parameter is present but unusable.
    #[error("invalid parameter `{param}`: {message}")]
    InvalidParam {
        /// The parameter key.
        param: String,
        /// What is wrong with it.
        message: String,
    },

    /// Assembling a composite's internals failed.
    #[error("in `{scope}`: {source}")]
    Inner {
        /// Scope of the failing inner assembly.
        scope: String,
        /// The inner error.
        #[source]
        source: Box<AssembleError>,
    },
}

impl FactoryError {
    /// Shorthand for [`FactoryError::InvalidParam`].
    pub fn invalid(param: &str, message: impl Into<String>) -> Self {
        FactoryError::InvalidParam {
            param: param.to_string(),
            message: message.into(),
        }
    }
}

/// Everything a factory may use while constructing a subsystem.
///
/// Passed explicitly on every construction; there is no global registry.
pub struct BuildContext<'a> {
    /// The scope of the assembler registering the subsystem.
    pub scope: &'a Scope,
    /// The interner shared across the whole board.
    pub interner: &'a Arc<Interner>,
    /// Factories available to composites for their internals.
    pub factories: &'a FactoryRegistry,
}

impl<'a> BuildContext<'a> {
    /// Starts a child assembler for a composite named `name`.
    ///
    /// The child runs in scope `<scope>/<name>` and already contains the
    /// boundary component `self`, whose ports mirror `boundary` with flipped
    /// direction.
    pub fn nested(&self, name: &str, boundary: &[PortSpec]) -> Result<Assembler<'a>, FactoryError> {
        let scope = self.scope.child(name);
        let path = scope.path();
        let mut child = Assembler::with_interner(scope, Arc::clone(self.interner), self.factories);
        child
            .add_boundary(boundary)
            .map_err(|e| FactoryError::Inner {
                scope: path,
                source: Box::new(e),
            })?;
        Ok(child)
    }
}

/// Builds subsystems of one type.
pub trait SubsystemFactory: Send + Sync {
    /// The type tag board descriptions use to select this factory.
    fn type_tag(&self) -> &str;

    /// Constructs an instance named `name` from its parameters.
    fn construct(
        &self,
        ctx: &BuildContext<'_>,
        name: &str,
        config: &ConfigDescriptor,
    ) -> Result<Box<dyn Subsystem>, FactoryError>;
}

/// Maps type tags to factories.
#[derive(Default)]
pub struct FactoryRegistry {
    factories: BTreeMap<String, Box<dyn SubsystemFactory>>,
}

impl FactoryRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a factory under its type tag, replacing any previous one.
    pub fn register(&mut self, factory: Box<dyn SubsystemFactory>) -> &mut Self {
        self.factories.insert(factory.type_tag().to_string(), factory);
        self
    }

    /// Looks up the factory for `type_tag`.
    pub fn get(&self, type_tag: &str) -> Option<&dyn SubsystemFactory> {
        self.factories.get(type_tag).map(|f| f.as_ref())
    }

    /// Registered type tags, sorted.
    pub fn type_tags(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    /// Number of registered factories.
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Returns `true` if no factory is registered.
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl std::fmt::Debug for FactoryRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.factories.keys()).finish()
    }
}
