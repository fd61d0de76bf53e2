//! Currency amounts in minor units.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An amount in pence (minor units of the configured currency).
///
/// Prize pots, entry fees and snapshotted claim prizes all use this type so the
/// checkout amount sent to the payment processor never goes through floats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pence(pub i64);

impl Pence {
    pub const ZERO: Pence = Pence(0);

    pub fn is_free(self) -> bool {
        self.0 <= 0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }
}

impl fmt::Display for Pence {
    /// Renders as pounds with two decimals, e.g. `£12.50`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}£{}.{:02}", abs / 100, abs % 100)
    }
}

impl From<i64> for Pence {
    fn from(v: i64) -> Self {
        Self(v)
    }
}
