//! Data models for the Gasofilaço Engine.
//!
//! The `models` module defines the serialisable structs and enums
//! exchanged between the tally, the validator, the report aggregator
//! and the persistence collaborator.  Monetary values are
//! [`Decimal`]s and instants are UTC timestamps.  Field names are
//! serialised in camelCase so that they match the JSON produced by the
//! mobile client.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How many units of one bill or coin denomination were counted.
///
/// Counts live in sparse lists: an entry only exists while its
/// `count` is above zero.  See [`crate::tally::set_count`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DenominationCount {
    /// Face value of the bill or coin.
    pub value: Decimal,
    pub count: u32,
}

impl DenominationCount {
    pub fn new(value: Decimal, count: u32) -> Self {
        Self { value, count }
    }

    /// Monetary value represented by this entry, `None` on overflow.
    pub fn subtotal(&self) -> Option<Decimal> {
        self.value.checked_mul(Decimal::from(self.count))
    }
}

/// Input used to create a gasofilaço record.
///
/// Every field the validator checks is optional here so that a record
/// decoded from a client request can be rejected with a precise
/// [`crate::error::ValidationError`] instead of a decoding failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGasofilacoRecord {
    /// Date and time of the service the collection belongs to.
    pub cult_date: Option<DateTime<Utc>>,
    /// Total collected, either from a [`crate::tally::CashCount`] or
    /// typed in directly.
    pub amount: Option<Decimal>,
    /// Identifier of the user who performed the count.
    #[serde(default)]
    pub registered_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A gasofilaço record after the persistence collaborator stored it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GasofilacoRecord {
    pub id: Uuid,
    pub cult_date: DateTime<Utc>,
    pub amount: Decimal,
    pub registered_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The channel a donation arrived through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DonationKind {
    /// Cash collected and counted by hand during a service.
    Gasofilaco,
    Pix,
    Cartao,
    Transferencia,
}

/// Payload carried by donations of kind [`DonationKind::Gasofilaco`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GasofilacoDetails {
    pub cult_date: DateTime<Utc>,
    pub registered_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A donation of any kind as returned by the persistence collaborator.
///
/// Only gasofilaço donations carry a [`GasofilacoDetails`] payload.
/// A gasofilaço donation whose payload is missing is ignored by the
/// report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Donation {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: DonationKind,
    pub amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gasofilaco_data: Option<GasofilacoDetails>,
    pub created_at: DateTime<Utc>,
}

impl Donation {
    /// Returns the gasofilaço payload if this donation is a gasofilaço
    /// donation that actually carries one.
    pub fn gasofilaco(&self) -> Option<&GasofilacoDetails> {
        match self.kind {
            DonationKind::Gasofilaco => self.gasofilaco_data.as_ref(),
            _ => None,
        }
    }
}

impl From<&GasofilacoRecord> for Donation {
    fn from(record: &GasofilacoRecord) -> Self {
        Donation {
            id: record.id,
            kind: DonationKind::Gasofilaco,
            amount: record.amount,
            gasofilaco_data: Some(GasofilacoDetails {
                cult_date: record.cult_date,
                registered_by: record.registered_by.clone(),
                notes: record.notes.clone(),
            }),
            created_at: record.created_at,
        }
    }
}

/// Offset/limit window applied when listing donations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub offset: usize,
    pub limit: Option<usize>,
}

/// Totals for a single service (one calendar day).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CultDonationSummary {
    /// Timestamp of the first record seen for this day.
    pub cult_date: DateTime<Utc>,
    pub gasofilaco_amount: Decimal,
    /// Always zero in a gasofilaço report.
    pub electronic_amount: Decimal,
    pub total_amount: Decimal,
    pub registered_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// The requested report window, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportPeriod {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Statistics computed over the per-day totals of a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total_amount: Decimal,
    pub total_cults: usize,
    pub average_per_cult: Decimal,
    pub highest_amount: Decimal,
    pub lowest_amount: Decimal,
}

/// The aggregate result of a report request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GasofilacoReport {
    pub period: ReportPeriod,
    pub summary: ReportSummary,
    /// One entry per distinct day, ascending.
    pub cults: Vec<CultDonationSummary>,
}
