//! Pure-component constants used by the built-in backends.

/// Sutherland viscosity law parameters: μ = μ₀ (T/T₀)^1.5 (T₀ + S)/(T + S).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sutherland {
    /// Reference viscosity [Pa·s]
    pub mu0: f64,
    /// Reference temperature [K]
    pub t0: f64,
    /// Sutherland constant [K]
    pub s: f64,
}

impl Sutherland {
    pub fn viscosity(&self, t: f64) -> f64 {
        self.mu0 * (t / self.t0).powf(1.5) * (self.t0 + self.s) / (t + self.s)
    }
}

/// Components known to the built-in backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    /// Air (pseudo-pure)
    Air,
    /// Nitrogen (N₂)
    N2,
    /// Oxygen (O₂)
    O2,
    /// Argon (Ar)
    Ar,
    /// Carbon dioxide (CO₂)
    CO2,
    /// Water (H₂O)
    H2O,
    /// Methane (CH₄)
    CH4,
}

impl Component {
    pub const ALL: [Component; 7] = [
        Component::Air,
        Component::N2,
        Component::O2,
        Component::Ar,
        Component::CO2,
        Component::H2O,
        Component::CH4,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Component::Air => "Air",
            Component::N2 => "N2",
            Component::O2 => "O2",
            Component::Ar => "Ar",
            Component::CO2 => "CO2",
            Component::H2O => "H2O",
            Component::CH4 => "CH4",
        }
    }

    /// Molar mass [kg/kmol].
    pub fn molar_mass(&self) -> f64 {
        match self {
            Component::Air => 28.9647,
            Component::N2 => 28.0134,
            Component::O2 => 31.9988,
            Component::Ar => 39.948,
            Component::CO2 => 44.0095,
            Component::H2O => 18.015_28,
            Component::CH4 => 16.0425,
        }
    }

    /// Critical temperature [K].
    pub fn critical_temperature(&self) -> f64 {
        match self {
            Component::Air => 132.5306,
            Component::N2 => 126.192,
            Component::O2 => 154.581,
            Component::Ar => 150.687,
            Component::CO2 => 304.1282,
            Component::H2O => 647.096,
            Component::CH4 => 190.564,
        }
    }

    /// Critical pressure [Pa].
    pub fn critical_pressure(&self) -> f64 {
        match self {
            Component::Air => 3.786e6,
            Component::N2 => 3.3958e6,
            Component::O2 => 5.043e6,
            Component::Ar => 4.863e6,
            Component::CO2 => 7.3773e6,
            Component::H2O => 22.064e6,
            Component::CH4 => 4.5992e6,
        }
    }

    /// Ideal-gas specific heat near room temperature [J/(kg·K)].
    pub fn ideal_cp(&self) -> f64 {
        match self {
            Component::Air => 1006.0,
            Component::N2 => 1040.0,
            Component::O2 => 918.0,
            Component::Ar => 520.3,
            Component::CO2 => 844.0,
            Component::H2O => 1864.0,
            Component::CH4 => 2226.0,
        }
    }

    /// Dilute-gas viscosity correlation.
    pub fn sutherland(&self) -> Sutherland {
        let (mu0, t0, s) = match self {
            Component::Air => (1.716e-5, 273.15, 110.4),
            Component::N2 => (1.663e-5, 273.15, 107.0),
            Component::O2 => (1.919e-5, 273.15, 139.0),
            Component::Ar => (2.125e-5, 273.15, 114.0),
            Component::CO2 => (1.370e-5, 273.15, 222.0),
            Component::H2O => (1.12e-5, 350.0, 1064.0),
            Component::CH4 => (1.03e-5, 273.15, 164.0),
        };
        Sutherland { mu0, t0, s }
    }
}

impl std::str::FromStr for Component {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "AIR" => Ok(Component::Air),
            "N2" | "NITROGEN" => Ok(Component::N2),
            "O2" | "OXYGEN" => Ok(Component::O2),
            "AR" | "ARGON" => Ok(Component::Ar),
            "CO2" | "CARBONDIOXIDE" | "CARBON DIOXIDE" => Ok(Component::CO2),
            "H2O" | "WATER" => Ok(Component::H2O),
            "CH4" | "METHANE" => Ok(Component::CH4),
            _ => Err("unknown component"),
        }
    }
}

impl std::fmt::Display for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip_through_from_str() {
        for c in Component::ALL {
            assert_eq!(c.key().parse::<Component>().unwrap(), c);
        }
        assert_eq!("water".parse::<Component>().unwrap(), Component::H2O);
        assert!("unobtainium".parse::<Component>().is_err());
    }

    #[test]
    fn air_viscosity_at_reference() {
        let mu = Component::Air.sutherland().viscosity(273.15);
        assert!((mu - 1.716e-5).abs() < 1e-12);
        let hot = Component::Air.sutherland().viscosity(350.0);
        assert!(hot > mu);
    }
}
