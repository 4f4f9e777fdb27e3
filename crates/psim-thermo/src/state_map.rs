//! Plain key → number mapping used to persist and restore thermodynamic states.

use crate::catalog::{PropertyDef, Shape, ThermoVariant};
use crate::error::{ThermoError, ThermoResult};
use crate::units::Quantity;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A stored value: a scalar or a per-component list, always in SI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StateValue {
    Number(f64),
    List(Vec<f64>),
}

impl From<f64> for StateValue {
    fn from(v: f64) -> Self {
        StateValue::Number(v)
    }
}

impl From<Vec<f64>> for StateValue {
    fn from(v: Vec<f64>) -> Self {
        StateValue::List(v)
    }
}

pub type StateMap = BTreeMap<String, StateValue>;

/// A catalog value: one quantity or one per component.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Scalar(Quantity),
    List(Vec<Quantity>),
}

impl PropertyValue {
    pub fn scalar(&self) -> Option<Quantity> {
        match self {
            PropertyValue::Scalar(q) => Some(*q),
            PropertyValue::List(_) => None,
        }
    }

    pub fn list(&self) -> Option<&[Quantity]> {
        match self {
            PropertyValue::Scalar(_) => None,
            PropertyValue::List(items) => Some(items),
        }
    }

    /// Strip units for storage.
    pub fn to_state_value(&self) -> StateValue {
        match self {
            PropertyValue::Scalar(q) => StateValue::Number(q.si()),
            PropertyValue::List(items) => StateValue::List(items.iter().map(|q| q.si()).collect()),
        }
    }

    /// Re-wrap a stored value with the catalog unit, element-wise for lists.
    pub fn from_state_value(def: &PropertyDef, value: &StateValue) -> ThermoResult<Self> {
        match (def.shape, value) {
            (Shape::Scalar, StateValue::Number(v)) => {
                Ok(PropertyValue::Scalar(Quantity::new(def.unit, *v)))
            }
            (Shape::PerComponent, StateValue::List(items)) => Ok(PropertyValue::List(
                items.iter().map(|v| Quantity::new(def.unit, *v)).collect(),
            )),
            _ => Err(ThermoError::ShapeMismatch { key: def.key }),
        }
    }

    /// Check shape and unit against a catalog entry.
    pub fn check(&self, def: &PropertyDef) -> ThermoResult<()> {
        let found = match (def.shape, self) {
            (Shape::Scalar, PropertyValue::Scalar(q)) => Some(q.kind()),
            (Shape::PerComponent, PropertyValue::List(items)) => items.first().map(|q| q.kind()),
            _ => return Err(ThermoError::ShapeMismatch { key: def.key }),
        };
        let mismatch = match self {
            PropertyValue::Scalar(q) => q.kind() != def.unit,
            PropertyValue::List(items) => items.iter().any(|q| q.kind() != def.unit),
        };
        if mismatch {
            return Err(ThermoError::UnitMismatch {
                key: def.key,
                expected: def.unit,
                found: found.unwrap_or(def.unit),
            });
        }
        Ok(())
    }
}

/// Serialized form of a whole fluid state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FluidStateMap {
    pub variant: ThermoVariant,
    #[serde(default)]
    pub global: StateMap,
    #[serde(default)]
    pub liquid: StateMap,
    #[serde(default)]
    pub gas: StateMap,
}

impl FluidStateMap {
    pub fn to_json(&self) -> ThermoResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(text: &str) -> ThermoResult<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::UnitKind;

    #[test]
    fn untagged_values_serialize_plainly() {
        let mut map = StateMap::new();
        map.insert("h".into(), 1234.5.into());
        map.insert("fi".into(), vec![1.0, 0.98].into());
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"fi":[1.0,0.98],"h":1234.5}"#);
        let back: StateMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }

    #[test]
    fn shape_is_checked_on_rewrap() {
        let cat = ThermoVariant::Base.catalog();
        let fi = cat.lookup("fi").unwrap();
        assert!(PropertyValue::from_state_value(fi, &StateValue::Number(1.0)).is_err());
        let v = PropertyValue::from_state_value(fi, &StateValue::List(vec![0.9])).unwrap();
        assert_eq!(v.list().unwrap()[0].kind(), UnitKind::Dimensionless);
    }

    #[test]
    fn unit_mismatch_detected() {
        let cat = ThermoVariant::Base.catalog();
        let h = cat.lookup("h").unwrap();
        let wrong = PropertyValue::Scalar(Quantity::new(UnitKind::Pressure, 1.0));
        assert!(matches!(
            wrong.check(h),
            Err(ThermoError::UnitMismatch { key: "h", .. })
        ));
    }
}
