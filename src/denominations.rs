//! Denomination sets.
//!
//! The `denominations` module describes which bills and coins an
//! operator may count for a given currency.  The tally itself accepts
//! any value; these sets drive what the counting screen offers and let
//! the API reject values that do not exist in the active currency.
//! Sets can be shipped as versioned JSON files, much like any other
//! piece of reference data.

use crate::error::ValidationError;
use crate::models::DenominationCount;
use anyhow::Result;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

/// Allowed bill and coin values for one currency.
///
/// Values are listed from the largest to the smallest, which is the
/// order the counting screen presents them in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenominationSet {
    /// ISO 4217 code such as `"BRL"`.
    pub currency: String,
    /// Version string, e.g. `"2024"`.  Lets a file replace an older
    /// set when a currency introduces or withdraws a denomination.
    pub version: String,
    pub bills: Vec<Decimal>,
    pub coins: Vec<Decimal>,
}

impl DenominationSet {
    /// Brazilian real notes and coins in circulation.
    pub fn brl() -> Self {
        DenominationSet {
            currency: "BRL".into(),
            version: "2020".into(),
            bills: [200, 100, 50, 20, 10, 5, 2]
                .into_iter()
                .map(Decimal::from)
                .collect(),
            coins: vec![
                Decimal::from(1),
                Decimal::new(50, 2),
                Decimal::new(25, 2),
                Decimal::new(10, 2),
                Decimal::new(5, 2),
                Decimal::new(1, 2),
            ],
        }
    }

    pub fn contains_bill(&self, value: Decimal) -> bool {
        self.bills.contains(&value)
    }

    pub fn contains_coin(&self, value: Decimal) -> bool {
        self.coins.contains(&value)
    }

    /// Checks that every counted value is a positive bill or coin of
    /// this set.  The first offending entry is reported.
    pub fn check_counts(
        &self,
        bills: &[DenominationCount],
        coins: &[DenominationCount],
    ) -> Result<(), ValidationError> {
        if bills
            .iter()
            .chain(coins.iter())
            .any(|entry| entry.value <= Decimal::ZERO)
        {
            return Err(ValidationError::InvalidAmount("denomination must be positive"));
        }
        if !bills.iter().all(|entry| self.contains_bill(entry.value)) {
            return Err(ValidationError::InvalidAmount("unknown bill denomination"));
        }
        if !coins.iter().all(|entry| self.contains_coin(entry.value)) {
            return Err(ValidationError::InvalidAmount("unknown coin denomination"));
        }
        Ok(())
    }
}

impl Default for DenominationSet {
    fn default() -> Self {
        Self::brl()
    }
}

/// Load all denomination sets from a directory.
///
/// This helper scans a directory and attempts to parse any `.json`
/// files as [`DenominationSet`] objects.  Files that fail to parse are
/// logged and skipped.  A missing directory yields an empty vector.
pub fn load_denomination_sets_from_dir(path: &Path) -> Result<Vec<DenominationSet>> {
    let mut sets = Vec::new();
    if !path.is_dir() {
        debug!(dir = %path.display(), "denomination directory not found");
        return Ok(sets);
    }
    for entry in std::fs::read_dir(path)? {
        let entry = entry?;
        let file_path = entry.path();
        if !entry.file_type()?.is_file() || file_path.extension().map_or(true, |ext| ext != "json") {
            continue;
        }
        let data = std::fs::read_to_string(&file_path)?;
        match serde_json::from_str::<DenominationSet>(&data) {
            Ok(set) => sets.push(set),
            Err(err) => warn!(file = %file_path.display(), error = %err, "failed to parse denomination set"),
        }
    }
    Ok(sets)
}

/// Picks the newest set for `currency`, or the built-in BRL set.
pub fn select_set(sets: Vec<DenominationSet>, currency: &str) -> DenominationSet {
    sets.into_iter()
        .filter(|set| set.currency.eq_ignore_ascii_case(currency))
        .max_by(|a, b| a.version.cmp(&b.version))
        .unwrap_or_else(DenominationSet::brl)
}
