//! Gravida persistence layer.
//!
//! PostgreSQL-backed storage for patient intake records and scored
//! predictions. One repository per concern over a shared pooled
//! [`Database`] handle; connections are checked out lazily, so the
//! scoring path stays up while the database is down.

pub mod database;
pub mod error;
pub mod patients;
pub mod predictions;
pub mod query;
pub mod schema;

pub use database::{ConnectOptions, Database, DatabaseStats};
pub use error::{DbError, Result};
pub use patients::{DailyCount, GeneralInfoFilter, PatientRepository};
pub use predictions::{ModelCounts, ModelKind, PredictionFilter, PredictionRepository};
pub use query::{DateRange, StoredRecord};
pub use schema::{GeneralInfoRecord, HomeMonitoringRecord, LabPanelRecord};
