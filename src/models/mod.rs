//! Core data models for the anniversary engine.
//!
//! This module contains all the domain models used throughout the engine.

mod employee;
mod selection;
mod tenure;

pub use employee::{EmployeeRecord, PersonGroup, RawEmployeeRow};
pub use selection::{RehiredSelection, TenureAnniversary};
pub use tenure::{ConsolidatedTenure, EmploymentInterval};
