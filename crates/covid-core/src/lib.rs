//! Covid Graph Core Library
//!
//! Data model for the COVID-19 knowledge graph: countries, regions, dates,
//! case/death statistics, vaccination statistics and vaccine adoption.
//!
//! The query service and the ingestion job share this model and talk to the
//! graph only through the [`CovidQueries`] and [`CovidWriter`] traits.

pub mod error;
pub mod field;
pub mod model;
pub mod query;
pub mod record;
pub mod store;

pub use error::{CovidError, CovidResult};
pub use field::Field;
pub use model::{CovidStats, VaccinationStats, Vaccine};
pub use query::{CasesDeaths, HighestCases, VaccinatedTotal, VaccineAdoption, VaccineStart};
pub use record::{CovidStatsRow, VaccinationRow, VaccineMetadataRow};
pub use store::{CovidQueries, CovidWriter};
