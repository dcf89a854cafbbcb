//! Scaled quantities with a display unit.
//!
//! Values are stored in base units and carry a `displayUnit` hint so tools
//! show them the way they were entered:
//!
//! ```
//! use modelwright_model::Scalar;
//! use modelwright_model::units::KV;
//!
//! let v = KV.quantity(110.0);
//! assert_eq!(v.value(), Some(&Scalar::Real(110_000.0)));
//! ```

use std::f64::consts::PI;

use crate::value::{Assign, Value};

/// Significant digits used for quantities unless overridden.
pub const DEFAULT_PRECISION: usize = 9;

/// A display unit and its factor to the base unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unit {
    pub symbol: &'static str,
    pub factor: f64,
}

impl Unit {
    pub const fn new(symbol: &'static str, factor: f64) -> Self {
        Self { symbol, factor }
    }

    /// `x` in this unit, as an assignment in base units.
    pub fn quantity(self, x: f64) -> Assign {
        self.quantity_with_precision(x, DEFAULT_PRECISION)
    }

    pub fn quantity_with_precision(self, x: f64, digits: usize) -> Assign {
        Assign::new(x * self.factor)
            .with_modification("displayUnit", Value::quoted(self.symbol))
            .with_precision(digits)
    }
}

pub const KM: Unit = Unit::new("km", 1e3);
pub const KV: Unit = Unit::new("kV", 1e3);
pub const KW: Unit = Unit::new("kW", 1e3);
pub const KVAR: Unit = Unit::new("kvar", 1e3);
pub const KVA: Unit = Unit::new("kVA", 1e3);
pub const KA: Unit = Unit::new("kA", 1e3);
pub const KWH: Unit = Unit::new("kWh", 1e3);

pub const MV: Unit = Unit::new("MV", 1e6);
pub const MW: Unit = Unit::new("MW", 1e6);
pub const MVAR: Unit = Unit::new("Mvar", 1e6);
pub const MVA: Unit = Unit::new("MVA", 1e6);
pub const MWH: Unit = Unit::new("MWh", 1e6);

pub const DEGREES: Unit = Unit::new("deg", PI / 180.0);
