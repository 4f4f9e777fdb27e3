//! Unit kinds and unit-tagged values for thermodynamic properties.
//!
//! Most catalog properties (J/kg/Pa, m⁶/kg², ...) have no uom type, so every
//! property value is stored as a [`Quantity`]: the canonical SI number plus
//! the [`UnitKind`] that says how to read it.
//!
//! # Key Design
//!
//! - **Canonical value**: always SI (K, Pa, kg/m³, J/kg, ...)
//! - **Unit kind**: one per catalog unit type, owns its table of accepted units
//! - **Parser boundary**: [`parse_quantity`] turns `"14.7 psia"` into SI for case files

use std::fmt;

/// Conversion from a display unit to SI: `si = value * factor + offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitDef {
    pub symbol: &'static str,
    pub factor: f64,
    pub offset: f64,
}

const fn u(symbol: &'static str, factor: f64) -> UnitDef {
    UnitDef {
        symbol,
        factor,
        offset: 0.0,
    }
}

const fn u_off(symbol: &'static str, factor: f64, offset: f64) -> UnitDef {
    UnitDef {
        symbol,
        factor,
        offset,
    }
}

/// Dimension/unit family of a property value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitKind {
    Temperature,
    Pressure,
    Dimensionless,
    Density,
    MolarDensity,
    SpecificVolume,
    SpecificVolumeSquare,
    Enthalpy,
    MolarEnthalpy,
    SpecificHeat,
    MolarSpecificHeat,
    Speed,
    InvTemperature,
    InvPressure,
    TemperaturePressure,
    EnthalpyPressure,
    PressureTemperature,
    PressureDensity,
    DensityTemperature,
    DensityPressure,
    EnthalpyDensity,
    Viscosity,
    ThermalConductivity,
    Diffusivity,
    Tension,
    MolarMass,
    VolFlow,
    MassFlow,
    MolarFlow,
}

impl UnitKind {
    pub const ALL: [UnitKind; 29] = [
        Self::Temperature,
        Self::Pressure,
        Self::Dimensionless,
        Self::Density,
        Self::MolarDensity,
        Self::SpecificVolume,
        Self::SpecificVolumeSquare,
        Self::Enthalpy,
        Self::MolarEnthalpy,
        Self::SpecificHeat,
        Self::MolarSpecificHeat,
        Self::Speed,
        Self::InvTemperature,
        Self::InvPressure,
        Self::TemperaturePressure,
        Self::EnthalpyPressure,
        Self::PressureTemperature,
        Self::PressureDensity,
        Self::DensityTemperature,
        Self::DensityPressure,
        Self::EnthalpyDensity,
        Self::Viscosity,
        Self::ThermalConductivity,
        Self::Diffusivity,
        Self::Tension,
        Self::MolarMass,
        Self::VolFlow,
        Self::MassFlow,
        Self::MolarFlow,
    ];

    /// Accepted units; the first entry is the SI unit.
    pub fn units(&self) -> &'static [UnitDef] {
        match self {
            Self::Temperature => const { &[
                u("K", 1.0),
                u_off("C", 1.0, 273.15),
                u_off("F", 5.0 / 9.0, 459.67 * 5.0 / 9.0),
                u("R", 5.0 / 9.0),
            ] },
            Self::Pressure => const { &[
                u("Pa", 1.0),
                u("kPa", 1e3),
                u("MPa", 1e6),
                u("bar", 1e5),
                u("atm", 101_325.0),
                u("psia", 6_894.757),
                u("mmHg", 133.322_4),
            ] },
            Self::Dimensionless => const { &[u("", 1.0), u("%", 0.01)] },
            Self::Density => const { &[
                u("kg/m3", 1.0),
                u("g/cm3", 1e3),
                u("lb/ft3", 16.018_46),
            ] },
            Self::MolarDensity => const { &[u("kmol/m3", 1.0), u("mol/L", 1.0), u("mol/m3", 1e-3)] },
            Self::SpecificVolume => const { &[
                u("m3/kg", 1.0),
                u("cm3/g", 1e-3),
                u("ft3/lb", 0.062_427_96),
            ] },
            Self::SpecificVolumeSquare => const { &[u("m6/kg2", 1.0), u("cm6/g2", 1e-6)] },
            Self::Enthalpy => const { &[u("J/kg", 1.0), u("kJ/kg", 1e3), u("Btu/lb", 2_326.0)] },
            Self::MolarEnthalpy => const { &[u("J/kmol", 1.0), u("kJ/kmol", 1e3), u("J/mol", 1e3)] },
            Self::SpecificHeat => const { &[
                u("J/kgK", 1.0),
                u("kJ/kgK", 1e3),
                u("Btu/lbR", 4_186.8),
            ] },
            Self::MolarSpecificHeat => const { &[
                u("J/kmolK", 1.0),
                u("kJ/kmolK", 1e3),
                u("J/molK", 1e3),
            ] },
            Self::Speed => const { &[
                u("m/s", 1.0),
                u("cm/s", 1e-2),
                u("km/h", 1.0 / 3.6),
                u("ft/s", 0.3048),
            ] },
            Self::InvTemperature => const { &[u("1/K", 1.0)] },
            Self::InvPressure => const { &[u("1/Pa", 1.0), u("1/kPa", 1e-3), u("1/bar", 1e-5)] },
            Self::TemperaturePressure => const { &[u("K/Pa", 1.0), u("K/bar", 1e-5), u("K/MPa", 1e-6)] },
            Self::EnthalpyPressure => const { &[u("J/kgPa", 1.0), u("kJ/kgMPa", 1e-3)] },
            Self::PressureTemperature => const { &[u("Pa/K", 1.0), u("kPa/K", 1e3), u("bar/K", 1e5)] },
            Self::PressureDensity => const { &[u("Pa·m3/kg", 1.0), u("kPa·m3/kg", 1e3)] },
            Self::DensityTemperature => const { &[u("kg/m3K", 1.0)] },
            Self::DensityPressure => const { &[u("kg/m3Pa", 1.0), u("kg/m3MPa", 1e-6)] },
            Self::EnthalpyDensity => const { &[u("J·m3/kg2", 1.0), u("kJ·m3/kg2", 1e3)] },
            Self::Viscosity => const { &[u("Pa·s", 1.0), u("cP", 1e-3), u("mPa·s", 1e-3), u("P", 0.1)] },
            Self::ThermalConductivity => const { &[u("W/mK", 1.0), u("mW/mK", 1e-3)] },
            Self::Diffusivity => const { &[u("m2/s", 1.0), u("cm2/s", 1e-4), u("cSt", 1e-6)] },
            Self::Tension => const { &[u("N/m", 1.0), u("mN/m", 1e-3), u("dyn/cm", 1e-3)] },
            Self::MolarMass => const { &[u("kg/kmol", 1.0), u("g/mol", 1.0)] },
            Self::VolFlow => const { &[
                u("m3/s", 1.0),
                u("m3/h", 1.0 / 3600.0),
                u("L/s", 1e-3),
                u("cm3/s", 1e-6),
            ] },
            Self::MassFlow => const { &[u("kg/s", 1.0), u("kg/h", 1.0 / 3600.0), u("g/s", 1e-3)] },
            Self::MolarFlow => const { &[u("kmol/s", 1.0), u("kmol/h", 1.0 / 3600.0), u("mol/s", 1e-3)] },
        }
    }

    /// SI symbol of this kind.
    pub fn si_symbol(&self) -> &'static str {
        self.units()[0].symbol
    }

    fn find(&self, symbol: &str) -> Option<&'static UnitDef> {
        let wanted = symbol.trim();
        self.units()
            .iter()
            .find(|def| def.symbol == wanted)
            .or_else(|| {
                self.units()
                    .iter()
                    .find(|def| def.symbol.eq_ignore_ascii_case(wanted))
            })
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Error in unit parsing or conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum UnitError {
    /// Input text did not parse to a number + optional unit
    ParseError(String),
    /// Unit not recognized for this kind
    UnknownUnit { unit: String, kind: UnitKind },
    /// Value out of physical range (e.g., negative absolute temperature)
    OutOfRange { value: f64, reason: String },
}

impl fmt::Display for UnitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ParseError(msg) => write!(f, "Parse error: {}", msg),
            Self::UnknownUnit { unit, kind } => {
                write!(f, "Unknown unit '{}' for {}", unit, kind)
            }
            Self::OutOfRange { value, reason } => {
                write!(f, "Value {} out of range: {}", value, reason)
            }
        }
    }
}

impl std::error::Error for UnitError {}

/// A property value: canonical SI number tagged with its unit kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantity {
    kind: UnitKind,
    si: f64,
}

impl Quantity {
    pub fn new(kind: UnitKind, si: f64) -> Self {
        Self { kind, si }
    }

    /// Build from a value expressed in `unit`.
    pub fn from_unit(kind: UnitKind, value: f64, unit: &str) -> Result<Self, UnitError> {
        let def = kind.find(unit).ok_or_else(|| UnitError::UnknownUnit {
            unit: unit.to_string(),
            kind,
        })?;
        Ok(Self::new(kind, value * def.factor + def.offset))
    }

    pub fn kind(&self) -> UnitKind {
        self.kind
    }

    pub fn si(&self) -> f64 {
        self.si
    }

    /// Value expressed in `unit` (e.g. `"bar"`, `"cm/s"`).
    pub fn in_unit(&self, unit: &str) -> Result<f64, UnitError> {
        let def = self.kind.find(unit).ok_or_else(|| UnitError::UnknownUnit {
            unit: unit.to_string(),
            kind: self.kind,
        })?;
        Ok((self.si - def.offset) / def.factor)
    }
}

impl From<Quantity> for f64 {
    fn from(q: Quantity) -> Self {
        q.si
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = self.kind.si_symbol();
        if symbol.is_empty() {
            write!(f, "{}", self.si)
        } else {
            write!(f, "{} {}", self.si, symbol)
        }
    }
}

/// Parse a value with an optional unit tag and return SI.
///
/// A missing unit means SI. Absolute temperatures must stay above 0 K and
/// densities above zero.
pub fn parse_quantity(raw_text: &str, kind: UnitKind) -> Result<f64, UnitError> {
    let (value, unit) = split_value_and_unit(raw_text)?;
    let si = if unit.is_empty() {
        value
    } else {
        Quantity::from_unit(kind, value, &unit)?.si()
    };

    match kind {
        UnitKind::Temperature if si <= 0.0 => Err(UnitError::OutOfRange {
            value: si,
            reason: "Absolute temperature must be > 0 K".to_string(),
        }),
        UnitKind::Pressure if si < 0.0 => Err(UnitError::OutOfRange {
            value: si,
            reason: "Absolute pressure cannot be negative".to_string(),
        }),
        UnitKind::Density if si <= 0.0 => Err(UnitError::OutOfRange {
            value: si,
            reason: "Density must be positive".to_string(),
        }),
        _ => Ok(si),
    }
}

/// Split a value+unit string into (numeric_value, unit_string).
///
/// Examples:
/// - "70F" -> (70.0, "F")
/// - "14.7 psia" -> (14.7, "psia")
/// - "300" -> (300.0, "")
fn split_value_and_unit(input: &str) -> Result<(f64, String), UnitError> {
    let trimmed = input.trim();

    if let Some(number) = trimmed.strip_suffix('%') {
        let value: f64 = number.trim().parse().map_err(|_| {
            UnitError::ParseError(format!("Could not parse numeric value from '{}'", input))
        })?;
        return Ok((value, "%".to_string()));
    }

    // An exponent marker only counts as numeric when a digit or sign follows it.
    let bytes = trimmed.as_bytes();
    let mut split_idx = trimmed.len();
    for (i, c) in trimmed.char_indices() {
        let numeric = c.is_ascii_digit()
            || c == '.'
            || ((c == '-' || c == '+') && (i == 0 || matches!(bytes[i - 1], b'e' | b'E')))
            || ((c == 'e' || c == 'E')
                && i > 0
                && bytes
                    .get(i + 1)
                    .is_some_and(|n| n.is_ascii_digit() || *n == b'-' || *n == b'+'));
        if !numeric {
            split_idx = i;
            break;
        }
    }

    let (num_part, unit_part) = trimmed.split_at(split_idx);
    let value: f64 = num_part.trim().parse().map_err(|_| {
        UnitError::ParseError(format!("Could not parse numeric value from '{}'", input))
    })?;

    Ok((value, unit_part.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_a_unit_table() {
        for kind in UnitKind::ALL {
            let units = kind.units();
            assert!(!units.is_empty(), "{kind}");
            assert_eq!(units[0].factor, 1.0, "{kind}");
            assert_eq!(units[0].offset, 0.0, "{kind}");
            assert_eq!(kind.si_symbol(), units[0].symbol);
            for (i, def) in units.iter().enumerate() {
                assert!(
                    units[i + 1..].iter().all(|other| other.symbol != def.symbol),
                    "{kind}: duplicate {}",
                    def.symbol
                );
                let q = Quantity::from_unit(kind, 2.5, def.symbol).unwrap();
                assert!((q.in_unit(def.symbol).unwrap() - 2.5).abs() < 1e-9, "{kind} {}", def.symbol);
            }
        }
    }

    #[test]
    fn parse_kelvin_and_celsius() {
        assert_eq!(parse_quantity("300 K", UnitKind::Temperature).unwrap(), 300.0);
        assert_eq!(parse_quantity("300", UnitKind::Temperature).unwrap(), 300.0);
        let c0 = parse_quantity("0C", UnitKind::Temperature).unwrap();
        assert!((c0 - 273.15).abs() < 1e-9);
    }

    #[test]
    fn parse_fahrenheit() {
        let f32 = parse_quantity("32F", UnitKind::Temperature).unwrap();
        assert!((f32 - 273.15).abs() < 1e-9);
    }

    #[test]
    fn reject_negative_temperature() {
        assert!(parse_quantity("-100K", UnitKind::Temperature).is_err());
    }

    #[test]
    fn parse_pressure_units() {
        assert_eq!(parse_quantity("101325 Pa", UnitKind::Pressure).unwrap(), 101_325.0);
        assert_eq!(parse_quantity("1 bar", UnitKind::Pressure).unwrap(), 1e5);
        assert_eq!(parse_quantity("1 atm", UnitKind::Pressure).unwrap(), 101_325.0);
    }

    #[test]
    fn parse_scientific_notation() {
        let d = parse_quantity("1.75e-5 m3/kg", UnitKind::SpecificVolume).unwrap();
        assert!((d - 1.75e-5).abs() < 1e-18);
    }

    #[test]
    fn reject_unknown_unit() {
        assert!(matches!(
            parse_quantity("3 furlongs", UnitKind::Pressure),
            Err(UnitError::UnknownUnit { .. })
        ));
    }

    #[test]
    fn percent_dimensionless() {
        assert_eq!(parse_quantity("75%", UnitKind::Dimensionless).unwrap(), 0.75);
    }

    #[test]
    fn quantity_unit_accessors() {
        let p = Quantity::new(UnitKind::Pressure, 250_000.0);
        assert!((p.in_unit("bar").unwrap() - 2.5).abs() < 1e-12);
        let v = Quantity::new(UnitKind::Speed, 1.25);
        assert!((v.in_unit("cm/s").unwrap() - 125.0).abs() < 1e-9);
        let t = Quantity::from_unit(UnitKind::Temperature, 25.0, "C").unwrap();
        assert!((t.si() - 298.15).abs() < 1e-12);
        assert!((t.in_unit("C").unwrap() - 25.0).abs() < 1e-12);
        let raw: f64 = t.into();
        assert_eq!(raw, t.si());
    }

    #[test]
    fn si_unit_is_first() {
        assert_eq!(UnitKind::Pressure.si_symbol(), "Pa");
        assert_eq!(UnitKind::Dimensionless.si_symbol(), "");
        assert_eq!(Quantity::new(UnitKind::Pressure, 1.0).to_string(), "1 Pa");
    }
}
