#![deny(unsafe_code)]

pub mod csv;
pub mod doctor;
pub mod error;
pub mod hash;
pub mod manifest;
pub mod paths;
pub mod store;
pub mod table;

pub use crate::csv::reference::{parse_reference_csv, parse_reference_reader};
pub use crate::doctor::DoctorReport;
pub use crate::error::StandardsError;
pub use crate::manifest::TableRole;
pub use crate::paths::{TABLES_ENV_VAR, tables_root};
pub use crate::store::{ReferenceTableStore, VerifySummary};
pub use crate::table::{AgeGroup, HeightBand, ReferenceTable};
