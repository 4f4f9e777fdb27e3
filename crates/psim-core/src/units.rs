// psim-core/src/units.rs

use uom::si::f64::{
    Area as UomArea, DynamicViscosity as UomDynamicViscosity, Length as UomLength,
    MassDensity as UomMassDensity, MassRate as UomMassRate, Pressure as UomPressure,
    Ratio as UomRatio, ThermodynamicTemperature as UomThermodynamicTemperature,
    Velocity as UomVelocity, VolumeRate as UomVolumeRate,
};

// Public canonical unit types (SI, f64)
pub type Area = UomArea;
pub type DynVisc = UomDynamicViscosity;
pub type Length = UomLength;
pub type Density = UomMassDensity;
pub type MassRate = UomMassRate;
pub type Pressure = UomPressure;
pub type Ratio = UomRatio;
pub type Temperature = UomThermodynamicTemperature;
pub type Velocity = UomVelocity;
pub type VolumeRate = UomVolumeRate;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn kgps(v: f64) -> MassRate {
    use uom::si::mass_rate::kilogram_per_second;
    MassRate::new::<kilogram_per_second>(v)
}

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn um(v: f64) -> Length {
    use uom::si::length::micrometer;
    Length::new::<micrometer>(v)
}

#[inline]
pub fn m2(v: f64) -> Area {
    use uom::si::area::square_meter;
    Area::new::<square_meter>(v)
}

#[inline]
pub fn mps(v: f64) -> Velocity {
    use uom::si::velocity::meter_per_second;
    Velocity::new::<meter_per_second>(v)
}

#[inline]
pub fn m3ps(v: f64) -> VolumeRate {
    use uom::si::volume_rate::cubic_meter_per_second;
    VolumeRate::new::<cubic_meter_per_second>(v)
}

#[inline]
pub fn kg_m3(v: f64) -> Density {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    Density::new::<kilogram_per_cubic_meter>(v)
}

#[inline]
pub fn pa_s(v: f64) -> DynVisc {
    use uom::si::dynamic_viscosity::pascal_second;
    DynVisc::new::<pascal_second>(v)
}

#[inline]
pub fn unitless(v: f64) -> Ratio {
    use uom::si::ratio::ratio;
    Ratio::new::<ratio>(v)
}

/// Pressure read in engineering units.
pub trait PressureExt {
    fn bar(&self) -> f64;
    fn atm(&self) -> f64;
}

impl PressureExt for Pressure {
    fn bar(&self) -> f64 {
        self.get::<uom::si::pressure::bar>()
    }

    fn atm(&self) -> f64 {
        self.get::<uom::si::pressure::atmosphere>()
    }
}

/// Velocity in cm/s, the unit the CGS scrubber correlations expect.
pub trait VelocityExt {
    fn cms(&self) -> f64;
}

impl VelocityExt for Velocity {
    fn cms(&self) -> f64 {
        self.get::<uom::si::velocity::centimeter_per_second>()
    }
}

pub trait DensityExt {
    /// g/cm³
    fn gcc(&self) -> f64;
}

impl DensityExt for Density {
    fn gcc(&self) -> f64 {
        self.get::<uom::si::mass_density::gram_per_cubic_centimeter>()
    }
}

pub trait AreaExt {
    fn cm2(&self) -> f64;
}

impl AreaExt for Area {
    fn cm2(&self) -> f64 {
        self.get::<uom::si::area::square_centimeter>()
    }
}

pub trait VolumeRateExt {
    /// cm³/s
    fn ccs(&self) -> f64;
}

impl VolumeRateExt for VolumeRate {
    fn ccs(&self) -> f64 {
        self.get::<uom::si::volume_rate::cubic_centimeter_per_second>()
    }
}

pub trait LengthExt {
    fn micron(&self) -> f64;
}

impl LengthExt for Length {
    fn micron(&self) -> f64 {
        self.get::<uom::si::length::micrometer>()
    }
}

pub mod constants {
    /// Universal gas constant [J/(kmol·K)]
    pub const R_UNIVERSAL: f64 = 8314.462618;

    /// Standard atmosphere [Pa]
    pub const P_ATM: f64 = 101_325.0;

    /// Reference temperature for enthalpy/entropy zero [K]
    pub const T_REF: f64 = 298.15;
}
