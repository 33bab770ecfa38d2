//! Ordercast Core — order records, daily aggregation, calendar features,
//! series statistics.
//!
//! This crate contains the pure data pipeline:
//! - Domain types (order records, daily and augmented series)
//! - CSV order loading with a single fixed date format
//! - Daily aggregation of ordered quantity
//! - Calendar feature derivation and the US exchange holiday calendar
//! - Trailing mean and autocorrelation
//!
//! Every stage is a synchronous, side-effect-free transformation that
//! consumes one table and produces a new one. Orchestration, evaluation,
//! and artifact export live in `ordercast-runner`.

pub mod aggregate;
pub mod calendar;
pub mod data;
pub mod domain;
pub mod stats;
