//! Business rules applied to a gasofilaço record before it is stored.
//!
//! Rules run in a fixed order and the first one that fails is the one
//! reported:
//!
//! 1. `cultDate` is present
//! 2. `amount` is present and positive
//! 3. `registeredBy` is not empty
//! 4. `cultDate` is not in the future
//! 5. `cultDate` is at most one year old
//! 6. `amount` does not exceed the ceiling (inclusive)

use crate::clock::Clock;
use crate::error::ValidationError;
use crate::models::NewGasofilacoRecord;
use chrono::{DateTime, Months, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;

/// Largest amount accepted for a single collection.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Checks `record` against the rules above using `now` as the current
/// instant and [`MAX_AMOUNT`] as the ceiling.
pub fn validate(record: &NewGasofilacoRecord, now: DateTime<Utc>) -> Result<(), ValidationError> {
    validate_with_ceiling(record, now, MAX_AMOUNT)
}

pub fn validate_with_ceiling(
    record: &NewGasofilacoRecord,
    now: DateTime<Utc>,
    max_amount: Decimal,
) -> Result<(), ValidationError> {
    let cult_date = record
        .cult_date
        .ok_or(ValidationError::MissingField("cultDate"))?;

    let amount = match record.amount {
        Some(amount) if amount > Decimal::ZERO => amount,
        _ => return Err(ValidationError::InvalidAmount("amount must be positive")),
    };

    if record.registered_by.trim().is_empty() {
        return Err(ValidationError::MissingField("registeredBy"));
    }

    if cult_date > now {
        return Err(ValidationError::InvalidDate("future date"));
    }

    // Subtracting twelve months from a far-past instant cannot fail in
    // practice; treat overflow as "no lower bound".
    if let Some(one_year_ago) = now.checked_sub_months(Months::new(12)) {
        if cult_date < one_year_ago {
            return Err(ValidationError::InvalidDate("too old"));
        }
    }

    if amount > max_amount {
        return Err(ValidationError::InvalidAmount("exceeds maximum"));
    }

    Ok(())
}

/// Validator bound to a clock and a ceiling.
#[derive(Clone)]
pub struct GasofilacoValidator {
    clock: Arc<dyn Clock>,
    max_amount: Decimal,
}

impl GasofilacoValidator {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            max_amount: MAX_AMOUNT,
        }
    }

    pub fn with_max_amount(clock: Arc<dyn Clock>, max_amount: Decimal) -> Self {
        Self { clock, max_amount }
    }

    pub fn max_amount(&self) -> Decimal {
        self.max_amount
    }

    pub fn validate(&self, record: &NewGasofilacoRecord) -> Result<(), ValidationError> {
        validate_with_ceiling(record, self.clock.now(), self.max_amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 16, 20, 0, 0).unwrap()
    }

    fn record(amount: Decimal) -> NewGasofilacoRecord {
        NewGasofilacoRecord {
            cult_date: Some(now()),
            amount: Some(amount),
            registered_by: "user-1".into(),
            description: None,
            notes: Some("Culto de domingo".into()),
        }
    }

    #[test]
    fn test_accepts_valid_record_today() {
        assert_eq!(validate(&record(Decimal::new(75075, 2)), now()), Ok(()));
    }

    #[test]
    fn test_rejects_non_positive_amounts() {
        for amount in [Decimal::ZERO, Decimal::from(-100)] {
            assert_eq!(
                validate(&record(amount), now()),
                Err(ValidationError::InvalidAmount("amount must be positive"))
            );
        }
        let mut missing = record(Decimal::ONE);
        missing.amount = None;
        assert_eq!(
            validate(&missing, now()),
            Err(ValidationError::InvalidAmount("amount must be positive"))
        );
    }

    #[test]
    fn test_ceiling_is_inclusive() {
        assert_eq!(validate(&record(Decimal::from(1_000_000)), now()), Ok(()));
        assert_eq!(
            validate(&record(Decimal::from(2_000_000)), now()),
            Err(ValidationError::InvalidAmount("exceeds maximum"))
        );
    }

    #[test]
    fn test_date_bounds() {
        let mut future = record(Decimal::TEN);
        future.cult_date = Some(now() + Duration::days(1));
        assert_eq!(
            validate(&future, now()),
            Err(ValidationError::InvalidDate("future date"))
        );

        let mut old = record(Decimal::TEN);
        old.cult_date = Some(Utc.with_ymd_and_hms(2022, 6, 16, 20, 0, 0).unwrap());
        assert_eq!(
            validate(&old, now()),
            Err(ValidationError::InvalidDate("too old"))
        );

        let mut edge = record(Decimal::TEN);
        edge.cult_date = Some(Utc.with_ymd_and_hms(2023, 6, 16, 20, 0, 0).unwrap());
        assert_eq!(validate(&edge, now()), Ok(()));
    }

    #[test]
    fn test_missing_fields() {
        let mut no_date = record(Decimal::TEN);
        no_date.cult_date = None;
        assert_eq!(
            validate(&no_date, now()),
            Err(ValidationError::MissingField("cultDate"))
        );

        let mut no_user = record(Decimal::TEN);
        no_user.registered_by = "  ".into();
        assert_eq!(
            validate(&no_user, now()),
            Err(ValidationError::MissingField("registeredBy"))
        );
    }

    #[test]
    fn test_first_failing_rule_wins() {
        // Missing date, zero amount, empty user and excessive amount at
        // once: only the date is reported.
        let everything_wrong = NewGasofilacoRecord::default();
        assert_eq!(
            validate(&everything_wrong, now()),
            Err(ValidationError::MissingField("cultDate"))
        );

        // A future date is reported before the ceiling.
        let mut future_and_huge = record(Decimal::from(5_000_000));
        future_and_huge.cult_date = Some(now() + Duration::hours(1));
        assert_eq!(
            validate(&future_and_huge, now()),
            Err(ValidationError::InvalidDate("future date"))
        );
    }

    #[test]
    fn test_validator_uses_clock_and_ceiling() {
        let validator =
            GasofilacoValidator::with_max_amount(Arc::new(FixedClock(now())), Decimal::from(500));
        assert_eq!(validator.validate(&record(Decimal::from(500))), Ok(()));
        assert_eq!(
            validator.validate(&record(Decimal::from(501))),
            Err(ValidationError::InvalidAmount("exceeds maximum"))
        );
    }
}
