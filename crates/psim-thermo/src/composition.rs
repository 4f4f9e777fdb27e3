//! Stream composition (pure component or mixture).

use crate::component::Component;
use crate::error::{ThermoError, ThermoResult};
use psim_core::numeric::{Tolerances, nearly_equal};

/// Composition defined by normalized mole fractions.
///
/// Order of components is preserved; per-component property lists follow it.
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    items: Vec<(Component, f64)>,
}

impl Composition {
    pub fn pure(component: Component) -> Self {
        Self {
            items: vec![(component, 1.0)],
        }
    }

    /// Create a composition from mole fractions.
    ///
    /// Validates that all fractions are finite, non-negative, and have a positive sum,
    /// then normalizes to sum=1.
    pub fn new_mole_fractions(fractions: Vec<(Component, f64)>) -> ThermoResult<Self> {
        if fractions.is_empty() {
            return Err(ThermoError::InvalidArg {
                what: "empty composition",
            });
        }

        let mut sum = 0.0;
        for (_, frac) in &fractions {
            if !frac.is_finite() {
                return Err(ThermoError::NonPhysical {
                    what: "non-finite mole fraction",
                });
            }
            if *frac < 0.0 {
                return Err(ThermoError::NonPhysical {
                    what: "negative mole fraction",
                });
            }
            sum += frac;
        }

        if sum <= 0.0 || !sum.is_finite() {
            return Err(ThermoError::NonPhysical {
                what: "mole fractions sum to zero or non-finite",
            });
        }

        for (i, (c, _)) in fractions.iter().enumerate() {
            if fractions[..i].iter().any(|(other, _)| other == c) {
                return Err(ThermoError::InvalidArg {
                    what: "duplicate component in composition",
                });
            }
        }

        let items = fractions.into_iter().map(|(c, f)| (c, f / sum)).collect();
        Ok(Self { items })
    }

    /// Create a composition from mass fractions.
    pub fn new_mass_fractions(fractions: Vec<(Component, f64)>) -> ThermoResult<Self> {
        let moles = fractions
            .into_iter()
            .map(|(c, w)| (c, w / c.molar_mass()))
            .collect();
        Self::new_mole_fractions(moles)
    }

    /// Mole fraction of a component (0.0 if not present).
    pub fn mole_fraction(&self, component: Component) -> f64 {
        self.items
            .iter()
            .find(|(c, _)| *c == component)
            .map(|(_, f)| *f)
            .unwrap_or(0.0)
    }

    /// Returns `Some(component)` if exactly one component has fraction ≈1.0.
    pub fn is_pure(&self) -> Option<Component> {
        if self.items.len() == 1 {
            let (component, frac) = self.items[0];
            let tol = Tolerances {
                abs: 1e-10,
                rel: 1e-10,
            };
            if nearly_equal(frac, 1.0, tol) {
                return Some(component);
            }
        }
        None
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Component, f64)> + '_ {
        self.items.iter().copied()
    }

    pub fn components(&self) -> impl Iterator<Item = Component> + '_ {
        self.items.iter().map(|(c, _)| *c)
    }

    pub fn mole_fractions(&self) -> Vec<f64> {
        self.items.iter().map(|(_, f)| *f).collect()
    }

    /// Mixture molar mass [kg/kmol]: M = Σ yᵢ Mᵢ.
    pub fn molar_mass(&self) -> f64 {
        self.items
            .iter()
            .map(|(c, y)| c.molar_mass() * y)
            .sum()
    }

    /// Mass fractions wᵢ = yᵢ Mᵢ / M, in component order.
    pub fn mass_fractions(&self) -> Vec<f64> {
        let m = self.molar_mass();
        self.items
            .iter()
            .map(|(c, y)| y * c.molar_mass() / m)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tol() -> Tolerances {
        Tolerances {
            abs: 1e-10,
            rel: 1e-10,
        }
    }

    #[test]
    fn pure_composition() {
        let comp = Composition::pure(Component::Air);
        assert_eq!(comp.is_pure(), Some(Component::Air));
        assert_eq!(comp.mole_fraction(Component::Air), 1.0);
        assert_eq!(comp.mole_fraction(Component::N2), 0.0);
        assert_eq!(comp.molar_mass(), Component::Air.molar_mass());
    }

    #[test]
    fn mixture_normalization_non_unit_sum() {
        let comp =
            Composition::new_mole_fractions(vec![(Component::O2, 2.0), (Component::N2, 8.0)])
                .unwrap();
        assert_eq!(comp.is_pure(), None);
        assert!(nearly_equal(comp.mole_fraction(Component::O2), 0.2, tol()));
        assert!(nearly_equal(comp.mole_fraction(Component::N2), 0.8, tol()));
    }

    #[test]
    fn mass_fractions_round_trip() {
        let comp =
            Composition::new_mass_fractions(vec![(Component::H2O, 0.5), (Component::CO2, 0.5)])
                .unwrap();
        let w = comp.mass_fractions();
        assert!(nearly_equal(w[0], 0.5, tol()));
        assert!(nearly_equal(w[1], 0.5, tol()));
    }

    #[test]
    fn invalid_inputs() {
        assert!(Composition::new_mole_fractions(vec![]).is_err());
        assert!(
            Composition::new_mole_fractions(vec![(Component::O2, -0.5), (Component::N2, 1.5)])
                .is_err()
        );
        assert!(
            Composition::new_mole_fractions(vec![(Component::O2, 0.0), (Component::N2, 0.0)])
                .is_err()
        );
        assert!(Composition::new_mole_fractions(vec![(Component::O2, f64::NAN)]).is_err());
        assert!(
            Composition::new_mole_fractions(vec![(Component::O2, 0.5), (Component::O2, 0.5)])
                .is_err()
        );
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn normalized_sum_is_one(fracs in prop::collection::vec(0.0_f64..1.0_f64, 1..6)) {
            let input: Vec<(Component, f64)> = fracs
                .iter()
                .enumerate()
                .map(|(i, &f)| (Component::ALL[i], f))
                .collect();

            if let Ok(comp) = Composition::new_mole_fractions(input) {
                let sum: f64 = comp.iter().map(|(_, f)| f).sum();
                let tol = Tolerances { abs: 1e-9, rel: 1e-9 };
                prop_assert!(nearly_equal(sum, 1.0, tol));
                let wsum: f64 = comp.mass_fractions().iter().sum();
                prop_assert!(nearly_equal(wsum, 1.0, tol));
            }
        }
    }
}
