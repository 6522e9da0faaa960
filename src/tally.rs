//! Cash counting.
//!
//! The operator counts bills and coins one unit at a time.  The counts
//! are kept in sparse lists of [`DenominationCount`] (an entry only
//! exists while its count is positive) and the displayed amount is
//! recomputed from them after every change.  Nothing here depends on a
//! particular currency: any `(value, count)` pairs are accepted.

use crate::error::ValidationError;
use crate::models::DenominationCount;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Sum of `value × count` over both lists.
///
/// Fails with [`ValidationError::InvalidAmount`] when the sum does not
/// fit in a [`Decimal`].
pub fn total(
    bills: &[DenominationCount],
    coins: &[DenominationCount],
) -> Result<Decimal, ValidationError> {
    bills
        .iter()
        .chain(coins.iter())
        .try_fold(Decimal::ZERO, |acc, entry| {
            entry.subtotal().and_then(|subtotal| acc.checked_add(subtotal))
        })
        .ok_or(ValidationError::InvalidAmount("total overflow"))
}

/// Sets the count for `value`, clamping negatives to zero.
///
/// An entry whose count becomes zero is removed.  A new denomination
/// is appended to the end of the list.
pub fn set_count(list: &mut Vec<DenominationCount>, value: Decimal, new_count: i64) {
    let count = u32::try_from(new_count.max(0)).unwrap_or(u32::MAX);
    let position = list.iter().position(|entry| entry.value == value);
    match (position, count) {
        (Some(idx), 0) => {
            list.remove(idx);
        }
        (Some(idx), count) => list[idx].count = count,
        (None, 0) => {}
        (None, count) => list.push(DenominationCount::new(value, count)),
    }
}

/// Current count for `value`, zero when absent.
pub fn count_of(list: &[DenominationCount], value: Decimal) -> u32 {
    list.iter()
        .find(|entry| entry.value == value)
        .map(|entry| entry.count)
        .unwrap_or(0)
}

pub fn increment(list: &mut Vec<DenominationCount>, value: Decimal) {
    let current = i64::from(count_of(list, value));
    set_count(list, value, current + 1);
}

pub fn decrement(list: &mut Vec<DenominationCount>, value: Decimal) {
    let current = i64::from(count_of(list, value));
    set_count(list, value, current - 1);
}

/// Bills and coins counted so far for one collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CashCount {
    #[serde(default)]
    pub bills: Vec<DenominationCount>,
    #[serde(default)]
    pub coins: Vec<DenominationCount>,
}

impl CashCount {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_bill(&mut self, value: Decimal) {
        increment(&mut self.bills, value);
    }

    pub fn remove_bill(&mut self, value: Decimal) {
        decrement(&mut self.bills, value);
    }

    pub fn add_coin(&mut self, value: Decimal) {
        increment(&mut self.coins, value);
    }

    pub fn remove_coin(&mut self, value: Decimal) {
        decrement(&mut self.coins, value);
    }

    pub fn total(&self) -> Result<Decimal, ValidationError> {
        total(&self.bills, &self.coins)
    }

    pub fn is_empty(&self) -> bool {
        self.bills.is_empty() && self.coins.is_empty()
    }
}
