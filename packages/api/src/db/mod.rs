//! # Database module — PostgreSQL pool and the profile store
//!
//! - [`connect`] opens the pool described by [`crate::settings::Database`].
//! - [`missing_tables`] probes for the tables the edit-profile feature reads and
//!   writes. Schema creation is owned elsewhere, so startup only warns.
//! - [`PgProfileStore`] implements [`store::ProfileStore`] with parameterized
//!   queries. A whole submission runs in one transaction.

mod pool;
mod profiles;

pub use pool::{connect, missing_tables, PROFILE_TABLES};
pub use profiles::PgProfileStore;
