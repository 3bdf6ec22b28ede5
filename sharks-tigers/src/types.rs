use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};

/// An escrowed value in indivisible units.
///
/// The crate never touches a real ledger; participants are opaque ids with a
/// balance, and settlement returns the amount the host environment owes them.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Amount(u64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    /// Largest stake one player may escrow. Capped so that a game's full
    /// pot, two stakes, always fits in a `u64`.
    pub const MAX_WAGER: Amount = Amount(u64::MAX / 2);

    pub const fn from_units(units: u64) -> Self {
        Amount(units)
    }

    pub const fn to_units(self) -> u64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub const fn checked_add(self, rhs: Amount) -> Option<Amount> {
        match self.0.checked_add(rhs.0) {
            Some(units) => Some(Amount(units)),
            None => None,
        }
    }

    pub const fn checked_mul(self, rhs: u64) -> Option<Amount> {
        match self.0.checked_mul(rhs) {
            Some(units) => Some(Amount(units)),
            None => None,
        }
    }
}

// The operator impls panic on overflow like `u64` itself would; the factory
// rejects stakes above MAX_WAGER, so escrow sums stay in range.
impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        self.checked_add(rhs).expect("amount overflow in addition")
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Amount) {
        *self = *self + rhs;
    }
}

impl Mul<u64> for Amount {
    type Output = Amount;

    fn mul(self, rhs: u64) -> Amount {
        self.checked_mul(rhs)
            .expect("amount overflow in multiplication")
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Amount {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} units", self.0)
    }
}
