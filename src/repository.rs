//! Persistence collaborator.
//!
//! The engine never talks to a database directly.  It consumes a
//! [`DonationRepository`] handed to it by the caller, which stores new
//! gasofilaço records and lists donations of every kind.  An in-memory
//! implementation is provided for the bundled server and for tests.

use crate::clock::Clock;
use crate::models::{Donation, GasofilacoRecord, NewGasofilacoRecord, Pagination};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

/// Storage for donations.
///
/// Implementations must be thread‑safe (`Send + Sync`) because a
/// single repository is shared by every request handler.
#[async_trait]
pub trait DonationRepository: Send + Sync {
    /// Store a record that already passed validation.  The repository
    /// assigns its identity and timestamps.
    async fn create_gasofilaco_record(&self, record: NewGasofilacoRecord) -> Result<GasofilacoRecord>;

    /// List donations of every kind in insertion order.
    async fn find_all_donations(&self, pagination: Option<Pagination>) -> Result<Vec<Donation>>;
}

/// A [`DonationRepository`] that keeps everything in process memory.
///
/// Record timestamps are read from the given [`Clock`].
pub struct InMemoryDonationRepository {
    clock: Arc<dyn Clock>,
    donations: RwLock<Vec<Donation>>,
}

impl InMemoryDonationRepository {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_donations(clock, Vec::new())
    }

    /// Seed the store with donations that did not go through
    /// [`DonationRepository::create_gasofilaco_record`], such as
    /// electronic donations imported from a payment provider.
    pub fn with_donations(clock: Arc<dyn Clock>, donations: Vec<Donation>) -> Self {
        Self {
            clock,
            donations: RwLock::new(donations),
        }
    }

    pub async fn len(&self) -> usize {
        self.donations.read().await.len()
    }
}

#[async_trait]
impl DonationRepository for InMemoryDonationRepository {
    async fn create_gasofilaco_record(&self, record: NewGasofilacoRecord) -> Result<GasofilacoRecord> {
        let cult_date = record
            .cult_date
            .ok_or_else(|| anyhow!("cannot store a record without cultDate"))?;
        let amount = record
            .amount
            .ok_or_else(|| anyhow!("cannot store a record without amount"))?;
        let now = self.clock.now();
        let stored = GasofilacoRecord {
            id: Uuid::new_v4(),
            cult_date,
            amount,
            registered_by: record.registered_by,
            description: record.description,
            notes: record.notes,
            created_at: now,
            updated_at: now,
        };
        self.donations.write().await.push(Donation::from(&stored));
        debug!(id = %stored.id, "stored gasofilaco record");
        Ok(stored)
    }

    async fn find_all_donations(&self, pagination: Option<Pagination>) -> Result<Vec<Donation>> {
        let donations = self.donations.read().await;
        let page = pagination.unwrap_or_default();
        let limit = page.limit.unwrap_or(usize::MAX);
        Ok(donations
            .iter()
            .skip(page.offset)
            .take(limit)
            .cloned()
            .collect())
    }
}
