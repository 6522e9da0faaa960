//! Gasofilaço report aggregation.
//!
//! The `report` module turns a flat list of [`Donation`]s and a date
//! window into a [`GasofilacoReport`].  Only gasofilaço donations
//! carrying their payload and dated inside the window are kept; they
//! are grouped by the UTC calendar day of their `cultDate` and the
//! period statistics are computed over the per-day totals.  Filtering
//! uses the [`rayon`] crate, which keeps the input order so that the
//! "first record of a day" is well defined.

use crate::error::ValidationError;
use crate::models::{
    CultDonationSummary, Donation, GasofilacoDetails, GasofilacoReport, ReportPeriod,
    ReportSummary,
};
use chrono::{DateTime, Duration, Months, NaiveDate, Utc};
use rayon::prelude::*;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Checks a requested window.  The first failing rule is reported.
///
/// The minimum length compares instants, so a window whose start and
/// end are the same midnight is rejected as shorter than a day.
pub fn validate_period(
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Result<ReportPeriod, ValidationError> {
    let start = start.ok_or(ValidationError::MissingField("startDate"))?;
    let end = end.ok_or(ValidationError::MissingField("endDate"))?;

    if start > end {
        return Err(ValidationError::InvalidRange("start after end"));
    }
    if let Some(two_years_ago) = now.checked_sub_months(Months::new(24)) {
        if start < two_years_ago {
            return Err(ValidationError::InvalidRange("exceeds 2 years"));
        }
    }
    if end - start < Duration::days(1) {
        return Err(ValidationError::InvalidRange("less than 1 day"));
    }
    Ok(ReportPeriod { start, end })
}

/// Builds a report for `[start, end]` out of `donations`.
pub fn build_report(
    donations: &[Donation],
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Result<GasofilacoReport, ValidationError> {
    let period = validate_period(start, end, now)?;

    let in_window: Vec<(&Donation, &GasofilacoDetails)> = donations
        .par_iter()
        .filter_map(|donation| donation.gasofilaco().map(|details| (donation, details)))
        .filter(|(_, details)| period.start <= details.cult_date && details.cult_date <= period.end)
        .collect();

    let mut cults = group_by_day(&in_window);
    cults.sort_by_key(|cult| cult.cult_date);
    let summary = summarize(&cults);

    Ok(GasofilacoReport {
        period,
        summary,
        cults,
    })
}

fn group_by_day(records: &[(&Donation, &GasofilacoDetails)]) -> Vec<CultDonationSummary> {
    let mut index: HashMap<NaiveDate, usize> = HashMap::new();
    let mut cults: Vec<CultDonationSummary> = Vec::new();

    for (donation, details) in records {
        let day = details.cult_date.date_naive();
        match index.get(&day).copied() {
            Some(idx) => {
                let cult = &mut cults[idx];
                cult.gasofilaco_amount += donation.amount;
                cult.total_amount += donation.amount;
            }
            None => {
                index.insert(day, cults.len());
                cults.push(CultDonationSummary {
                    cult_date: details.cult_date,
                    gasofilaco_amount: donation.amount,
                    electronic_amount: Decimal::ZERO,
                    total_amount: donation.amount,
                    registered_by: details.registered_by.clone(),
                    notes: details.notes.clone(),
                });
            }
        }
    }
    cults
}

fn summarize(cults: &[CultDonationSummary]) -> ReportSummary {
    let totals = cults.iter().map(|cult| cult.total_amount);
    let total_amount: Decimal = totals.clone().sum();
    let total_cults = cults.len();
    let average_per_cult = if total_cults == 0 {
        Decimal::ZERO
    } else {
        total_amount / Decimal::from(total_cults)
    };

    ReportSummary {
        total_amount,
        total_cults,
        average_per_cult,
        highest_amount: totals.clone().max().unwrap_or(Decimal::ZERO),
        lowest_amount: totals.min().unwrap_or(Decimal::ZERO),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DonationKind;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 30, 12, 0, 0).unwrap()
    }

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, day, hour, 0, 0).unwrap()
    }

    fn gasofilaco(amount: Decimal, cult_date: DateTime<Utc>, by: &str) -> Donation {
        Donation {
            id: Uuid::new_v4(),
            kind: DonationKind::Gasofilaco,
            amount,
            gasofilaco_data: Some(GasofilacoDetails {
                cult_date,
                registered_by: by.into(),
                notes: Some(format!("counted by {by}")),
            }),
            created_at: cult_date,
        }
    }

    fn window() -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
        (Some(at(1, 0)), Some(at(30, 0)))
    }

    #[test]
    fn test_empty_input() {
        let (start, end) = window();
        let report = build_report(&[], start, end, now()).unwrap();
        assert!(report.cults.is_empty());
        assert_eq!(report.summary.total_amount, Decimal::ZERO);
        assert_eq!(report.summary.total_cults, 0);
        assert_eq!(report.summary.average_per_cult, Decimal::ZERO);
        assert_eq!(report.summary.highest_amount, Decimal::ZERO);
        assert_eq!(report.summary.lowest_amount, Decimal::ZERO);
        assert_eq!(report.period.start, at(1, 0));
    }

    #[test]
    fn test_filters_other_kinds_and_out_of_range() {
        let mut pix = gasofilaco(Decimal::from(999), at(9, 10), "u1");
        pix.kind = DonationKind::Pix;
        let mut no_payload = gasofilaco(Decimal::from(5), at(9, 10), "u1");
        no_payload.gasofilaco_data = None;
        let outside = gasofilaco(
            Decimal::from(300),
            Utc.with_ymd_and_hms(2024, 5, 31, 23, 0, 0).unwrap(),
            "u1",
        );
        let inside = gasofilaco(Decimal::from(100), at(9, 10), "u2");

        let (start, end) = window();
        let report = build_report(&[pix, no_payload, outside, inside], start, end, now()).unwrap();
        assert_eq!(report.summary.total_cults, 1);
        assert_eq!(report.summary.total_amount, Decimal::from(100));
        assert_eq!(report.cults[0].registered_by, "u2");
    }

    #[test]
    fn test_window_bounds_are_inclusive() {
        let first = gasofilaco(Decimal::from(10), at(1, 0), "u1");
        let last = gasofilaco(Decimal::from(20), at(30, 0), "u1");
        let (start, end) = window();
        let report = build_report(&[first, last], start, end, now()).unwrap();
        assert_eq!(report.summary.total_cults, 2);
    }

    #[test]
    fn test_same_day_records_merge() {
        let morning = gasofilaco(Decimal::new(50050, 2), at(9, 9), "first");
        let evening = gasofilaco(Decimal::new(25025, 2), at(9, 19), "second");
        let (start, end) = window();
        let report = build_report(&[morning, evening], start, end, now()).unwrap();

        assert_eq!(report.summary.total_cults, 1);
        let cult = &report.cults[0];
        assert_eq!(cult.gasofilaco_amount, Decimal::new(75075, 2));
        assert_eq!(cult.total_amount, Decimal::new(75075, 2));
        assert_eq!(cult.electronic_amount, Decimal::ZERO);
        // first record wins for the timestamp and metadata
        assert_eq!(cult.cult_date, at(9, 9));
        assert_eq!(cult.registered_by, "first");
        assert_eq!(cult.notes.as_deref(), Some("counted by first"));
    }

    #[test]
    fn test_sorted_and_statistics_over_days() {
        let donations = vec![
            gasofilaco(Decimal::from(300), at(23, 10), "u"),
            gasofilaco(Decimal::from(100), at(2, 10), "u"),
            gasofilaco(Decimal::from(50), at(16, 10), "u"),
            gasofilaco(Decimal::from(150), at(16, 19), "u"),
        ];
        let (start, end) = window();
        let report = build_report(&donations, start, end, now()).unwrap();

        let dates: Vec<_> = report.cults.iter().map(|c| c.cult_date).collect();
        assert_eq!(dates, vec![at(2, 10), at(16, 10), at(23, 10)]);
        assert_eq!(report.summary.total_amount, Decimal::from(600));
        assert_eq!(report.summary.total_cults, 3);
        assert_eq!(report.summary.average_per_cult, Decimal::from(200));
        assert_eq!(report.summary.highest_amount, Decimal::from(300));
        // 50 + 150 on the 16th is one day worth 200
        assert_eq!(report.summary.lowest_amount, Decimal::from(100));
    }

    #[test]
    fn test_invalid_ranges() {
        assert_eq!(
            build_report(&[], Some(at(10, 0)), Some(at(5, 0)), now()).unwrap_err(),
            ValidationError::InvalidRange("start after end")
        );
        let too_old = Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(
            build_report(&[], Some(too_old), Some(at(5, 0)), now()).unwrap_err(),
            ValidationError::InvalidRange("exceeds 2 years")
        );
        assert_eq!(
            build_report(&[], Some(at(5, 0)), Some(at(5, 23)), now()).unwrap_err(),
            ValidationError::InvalidRange("less than 1 day")
        );
        assert_eq!(
            build_report(&[], None, Some(at(5, 0)), now()).unwrap_err(),
            ValidationError::MissingField("startDate")
        );
    }

    #[test]
    fn test_same_midnight_start_and_end_is_rejected() {
        assert_eq!(
            validate_period(Some(at(5, 0)), Some(at(5, 0)), now()).unwrap_err(),
            ValidationError::InvalidRange("less than 1 day")
        );
        assert!(validate_period(Some(at(5, 0)), Some(at(6, 0)), now()).is_ok());
    }
}
