//! Subsystems whose ports are declared entirely in the board description.
//!
//! ```toml
//! [[subsystems]]
//! name = "uart"
//! type = "generic"
//! [subsystems.params]
//! ports = [
//!     { name = "clock", direction = "input", kind = "clock", required = true },
//!     { name = "input", direction = "input", kind = "interconnect" },
//! ]
//! ```

use weft_assemble::{BuildContext, ConfigDescriptor, FactoryError, SubsystemFactory};
use weft_topology::{PortDirection, PortSpec, Subsystem};

/// A subsystem with an arbitrary declared port list and no behavior.
#[derive(Debug)]
pub struct Generic {
    ports: Vec<PortSpec>,
}

impl Generic {
    /// Creates a subsystem exposing `ports`.
    pub fn new(ports: Vec<PortSpec>) -> Self {
        Self { ports }
    }
}

impl Subsystem for Generic {
    fn ports(&self) -> &[PortSpec] {
        &self.ports
    }
}

/// Builds [`Generic`] subsystems from a `ports` array.
pub struct GenericFactory;

impl SubsystemFactory for GenericFactory {
    fn type_tag(&self) -> &str {
        "generic"
    }

    fn construct(
        &self,
        _ctx: &BuildContext<'_>,
        _name: &str,
        config: &ConfigDescriptor,
    ) -> Result<Box<dyn Subsystem>, FactoryError> {
        let ports: Vec<PortSpec> = match config.get("ports") {
            None => Vec::new(),
            Some(value) => value
                .clone()
                .try_into::<Vec<PortSpec>>()
                .map_err(|e: toml::de::Error| FactoryError::invalid("ports", e.message()))?,
        };
        if let Some(port) = ports
            .iter()
            .find(|p| p.required && p.direction == PortDirection::Output)
        {
            return Err(FactoryError::invalid(
                "ports",
                format!("output `{}` cannot be required", port.name),
            ));
        }
        Ok(Box::new(Generic::new(ports)))
    }
}
