//! Gasofilaço Engine library crate.
//!
//! This crate exposes the cash counting, validation and reporting
//! logic behind a church's gasofilaço (hand-counted offering)
//! collections as reusable modules.  External applications may depend
//! on the `gasofilaco_engine` crate and call into `tally::total`,
//! `validator::validate` and `report::build_report` directly, or embed
//! the API via `api::build_router`.

pub mod api;
pub mod clock;
pub mod config;
pub mod denominations;
pub mod error;
pub mod models;
pub mod report;
pub mod repository;
pub mod service;
pub mod tally;
pub mod telemetry;
pub mod validator;
