//! Gasofilaço service.
//!
//! Wires the validator and the report aggregator to a
//! [`DonationRepository`].  Collaborators are passed in through the
//! constructor; the service owns no global state.

use crate::clock::Clock;
use crate::error::ServiceError;
use crate::models::{GasofilacoRecord, GasofilacoReport, NewGasofilacoRecord};
use crate::report::build_report;
use crate::repository::DonationRepository;
use crate::validator::GasofilacoValidator;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub struct GasofilacoService {
    repository: Arc<dyn DonationRepository>,
    clock: Arc<dyn Clock>,
    validator: GasofilacoValidator,
}

impl GasofilacoService {
    pub fn new(repository: Arc<dyn DonationRepository>, clock: Arc<dyn Clock>) -> Self {
        let validator = GasofilacoValidator::new(clock.clone());
        Self {
            repository,
            clock,
            validator,
        }
    }

    /// Replaces the validator, e.g. to apply a configured ceiling.
    pub fn with_validator(mut self, validator: GasofilacoValidator) -> Self {
        self.validator = validator;
        self
    }

    /// Validate `input` and hand it to the repository.  A rejected
    /// record never reaches the repository.
    pub async fn register(&self, input: NewGasofilacoRecord) -> Result<GasofilacoRecord, ServiceError> {
        if let Err(err) = self.validator.validate(&input) {
            warn!(error = %err, registered_by = %input.registered_by, "rejected gasofilaco record");
            return Err(err.into());
        }
        let record = self
            .repository
            .create_gasofilaco_record(input)
            .await
            .map_err(ServiceError::Repository)?;
        info!(id = %record.id, amount = %record.amount, cult_date = %record.cult_date, "registered gasofilaco record");
        Ok(record)
    }

    /// Build a report for `[start, end]` over every stored donation.
    ///
    /// Aggregation runs on the blocking pool since it fans out to
    /// rayon.
    pub async fn report(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<GasofilacoReport, ServiceError> {
        let donations = self
            .repository
            .find_all_donations(None)
            .await
            .map_err(ServiceError::Repository)?;
        let fetched = donations.len();
        let now = self.clock.now();
        let report =
            tokio::task::spawn_blocking(move || build_report(&donations, start, end, now)).await??;
        info!(
            donations = fetched,
            cults = report.summary.total_cults,
            total = %report.summary.total_amount,
            "built gasofilaco report"
        );
        Ok(report)
    }
}
