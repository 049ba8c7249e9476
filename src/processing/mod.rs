//! Snapshot processing pipeline.
//!
//! The stages run in a fixed order: [`normalize_rows`] turns raw snapshot
//! rows into typed records, [`classify`] partitions people into disjoint
//! outcome categories, [`consolidate_all`] reconciles rehired timelines,
//! and the `select` functions project anniversary sets against a
//! reference date.

mod classify;
mod normalize;
mod select;
mod tenure;

pub use classify::{PersonClassification, Partitions, classify, classify_person, group_by_person};
pub use normalize::{
    IntegrityWarning, NormalizedSnapshot, RejectedRow, normalize_person_id, normalize_row,
    normalize_rows, repair_integrity,
};
pub use select::{
    birthdays_next_month, birthdays_today, next_month, rehired_next_month, split_milestones,
    tenure_next_month, tenure_today, years_between,
};
pub use tenure::{build_intervals, consolidate, consolidate_all, merge_intervals};
