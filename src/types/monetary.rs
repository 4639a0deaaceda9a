use rust_decimal::Decimal;
use std::fmt;
use std::fmt::{Display, Formatter};

use crate::models::FieldValue;

/// Decimal places between tinybars and hbars.
const HBAR_SCALE: u32 = 8;

/// Amount of hbar in its smallest denomination, 10^-8 hbar.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Ord, PartialOrd)]
pub struct Tinybars(i64);

impl Tinybars {
    pub fn new(value: i64) -> Self {
        Tinybars(value)
    }

    pub fn value(self) -> i64 {
        self.0
    }

    /// Exact amount in hbars, with trailing zeros removed.
    pub fn to_hbars(self) -> Decimal {
        Decimal::new(self.0, HBAR_SCALE).normalize()
    }
}

impl Display for Tinybars {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "{} ℏ", self.to_hbars())
    }
}

impl From<Tinybars> for FieldValue {
    fn from(value: Tinybars) -> Self {
        FieldValue::Decimal(value.to_hbars())
    }
}
