//! Board description types deserialized from `board.toml`.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::fmt;
use weft_common::Frequency;

/// The top-level board description parsed from `board.toml`.
///
/// Clocks, subsystems, and bindings are arrays of tables so that their
/// declaration order survives parsing; assembly issues them in that order.
#[derive(Debug, Clone, Deserialize)]
pub struct BoardConfig {
    /// Board metadata.
    pub board: BoardMeta,
    /// Clock domains, in declaration order.
    #[serde(default)]
    pub clocks: Vec<ClockDecl>,
    /// Subsystems, in construction order.
    #[serde(default)]
    pub subsystems: Vec<SubsystemDecl>,
    /// Bindings, in wiring order.
    #[serde(default)]
    pub bindings: Vec<BindingDecl>,
    /// Named variants overriding frequencies and parameters.
    #[serde(default)]
    pub variants: BTreeMap<String, VariantConfig>,
}

/// Board metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct BoardMeta {
    /// The board name; also the root scope of assembly.
    pub name: String,
    /// A brief description.
    #[serde(default)]
    pub description: String,
}

/// A clock domain declaration.
#[derive(Debug, Clone, Deserialize)]
pub struct ClockDecl {
    /// Clock domain name.
    pub name: String,
    /// Frequency, either a string with a unit (`"10MHz"`) or an integer in Hz.
    #[serde(deserialize_with = "deserialize_frequency")]
    pub frequency: Frequency,
}

/// A subsystem declaration.
#[derive(Debug, Clone, Deserialize)]
pub struct SubsystemDecl {
    /// Instance name, unique across clocks and subsystems.
    pub name: String,
    /// Type tag selecting the subsystem factory.
    #[serde(rename = "type")]
    pub type_tag: String,
    /// Opaque parameters handed to the factory untouched.
    #[serde(default)]
    pub params: toml::Table,
}

/// A binding declaration from an output port to an input port.
#[derive(Debug, Clone, Deserialize)]
pub struct BindingDecl {
    /// The driving port.
    pub from: EndpointDecl,
    /// The driven port.
    pub to: EndpointDecl,
}

/// A `component.port` reference as written in a board description.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct EndpointDecl {
    /// Clock or subsystem name.
    pub component: String,
    /// Port name on that component.
    pub port: String,
}

impl TryFrom<String> for EndpointDecl {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.split_once('.') {
            Some((component, port)) if !component.is_empty() && !port.is_empty() => {
                Ok(Self {
                    component: component.to_string(),
                    port: port.to_string(),
                })
            }
            _ => Err(format!(
                "invalid endpoint '{value}': expected `component.port`"
            )),
        }
    }
}

impl fmt::Display for EndpointDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.component, self.port)
    }
}

/// A named board variant.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VariantConfig {
    /// A brief description.
    #[serde(default)]
    pub description: String,
    /// Clock frequency overrides by clock name.
    #[serde(default, deserialize_with = "deserialize_frequency_map")]
    pub clocks: BTreeMap<String, Frequency>,
    /// Parameter overrides by subsystem name, shallow-merged over the base params.
    #[serde(default)]
    pub params: BTreeMap<String, toml::Table>,
}

struct FrequencyVisitor;

impl<'de> Visitor<'de> for FrequencyVisitor {
    type Value = Frequency;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a frequency such as \"10MHz\" or an integer in Hz")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Frequency::from_hz(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        u64::try_from(v)
            .map(Frequency::from_hz)
            .map_err(|_| E::custom(format!("negative frequency: {v}")))
    }
}

/// Deserializes a frequency given either as a unit string or as integer Hz.
fn deserialize_frequency<'de, D>(deserializer: D) -> Result<Frequency, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(FrequencyVisitor)
}

struct FrequencyValue(Frequency);

impl<'de> Deserialize<'de> for FrequencyValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(FrequencyVisitor).map(FrequencyValue)
    }
}

/// Deserializes a name-to-frequency map, accepting both frequency forms.
fn deserialize_frequency_map<'de, D>(
    deserializer: D,
) -> Result<BTreeMap<String, Frequency>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, FrequencyValue>::deserialize(deserializer)?;
    Ok(raw.into_iter().map(|(k, v)| (k, v.0)).collect())
}
