//! Case file schema definitions.

use psim_equipment::{
    CalculationMode, ComponentError, CunninghamMethod, EfficiencyModelKind, PressureDropModelKind,
};
use psim_thermo::LiquidProperties;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Case {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub streams: Vec<StreamDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scrubber: Option<ScrubberDef>,
}

/// A number in SI units or a string with a unit tag, e.g. `"1.2 bar"`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ValueDef {
    Number(f64),
    Text(String),
}

impl From<f64> for ValueDef {
    fn from(v: f64) -> Self {
        ValueDef::Number(v)
    }
}

impl From<&str> for ValueDef {
    fn from(s: &str) -> Self {
        ValueDef::Text(s.to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StreamDef {
    pub id: String,
    pub backend: BackendDef,
    pub temperature: ValueDef,
    pub pressure: ValueDef,
    pub mass_flow: ValueDef,
    pub composition: CompositionDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solid: Option<SolidDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BackendDef {
    IdealGas {
        /// Emit the advanced property set
        #[serde(default)]
        advanced: bool,
    },
    Incompressible {
        /// Liquid properties; water when absent
        #[serde(default, skip_serializing_if = "Option::is_none")]
        properties: Option<LiquidProperties>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CompositionDef {
    Pure { species: String },
    MoleFractions { fractions: Vec<(String, f64)> },
    MassFractions { fractions: Vec<(String, f64)> },
}

/// Particle-size distribution carried by a stream.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SolidDef {
    pub mass_flow: ValueDef,
    pub density: ValueDef,
    pub diameters_um: Vec<f64>,
    pub fractions: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScrubberDef {
    pub id: String,
    /// Id of the dusty gas stream
    pub gas: String,
    /// Id of the scrubbing liquid stream
    pub liquid: String,
    #[serde(default, deserialize_with = "name_or_id")]
    pub mode: CalculationMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diameter_m: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_efficiency: Option<f64>,
    #[serde(default, deserialize_with = "name_or_id")]
    pub efficiency_model: EfficiencyModelKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub k: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub f: Option<f64>,
    #[serde(default, deserialize_with = "name_or_id")]
    pub pressure_drop_model: PressureDropModelKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub throat_length_m: Option<f64>,
    #[serde(default)]
    pub pressure_drop_allowance_pa: f64,
    #[serde(default)]
    pub cunningham: CunninghamMethod,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NameOrId<T> {
    Id(u8),
    Name(T),
}

/// Model selectors accept their snake_case name or their numeric id.
fn name_or_id<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + TryFrom<u8, Error = ComponentError>,
{
    match NameOrId::<T>::deserialize(deserializer)? {
        NameOrId::Id(id) => T::try_from(id).map_err(serde::de::Error::custom),
        NameOrId::Name(value) => Ok(value),
    }
}
