//! Record normalization.
//!
//! Coerces raw snapshot rows into typed [`EmployeeRecord`]s: the tax id is
//! zero-padded to the configured width, status codes become integers (a
//! missing manager status defaults to 0, active), and date fields are
//! parsed. The source marks still-employed rows with a sentinel termination
//! date of 1900-12-31, which normalizes to `None`.
//!
//! Rows with unparseable fields are rejected and logged, never fatal to the
//! batch. Rows whose termination date precedes the hire date are repaired
//! (termination cleared) and surfaced as integrity warnings.

use chrono::NaiveDate;
use tracing::warn;

use crate::config::PolicyConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{EmployeeRecord, RawEmployeeRow};

/// Date format the snapshot delivers all date columns in.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// The termination date the source writes on still-employed rows.
fn termination_sentinel() -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(1900, 12, 31)
}

/// A row excluded from the batch, with the reason.
#[derive(Debug)]
pub struct RejectedRow {
    /// Zero-based index of the row in the snapshot.
    pub row_index: usize,
    /// The parse failure that excluded it.
    pub error: EngineError,
}

/// A repaired hire/termination ordering violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegrityWarning {
    /// Normalized tax identifier of the affected record.
    pub person_id: String,
    /// The record's hire date.
    pub hire_date: NaiveDate,
    /// The termination date that preceded it; cleared on the record.
    pub cleared_termination_date: NaiveDate,
}

/// The outcome of normalizing a full snapshot.
#[derive(Debug)]
pub struct NormalizedSnapshot {
    /// Rows that parsed cleanly, in snapshot order.
    pub records: Vec<EmployeeRecord>,
    /// Rows excluded for unparseable fields.
    pub rejected: Vec<RejectedRow>,
    /// Hire/termination ordering violations that were repaired.
    pub warnings: Vec<IntegrityWarning>,
}

/// Zero-pads a tax identifier to the configured fixed width.
///
/// # Example
///
/// ```
/// use anniversary_engine::processing::normalize_person_id;
///
/// assert_eq!(normalize_person_id(" 12345678 ", 11), "00012345678");
/// assert_eq!(normalize_person_id("98765432100", 11), "98765432100");
/// ```
pub fn normalize_person_id(raw: &str, width: usize) -> String {
    let trimmed = raw.trim();
    if trimmed.len() >= width {
        return trimmed.to_string();
    }
    let mut padded = "0".repeat(width - trimmed.len());
    padded.push_str(trimmed);
    padded
}

/// Parses a required date field.
fn parse_required_date(field: &str, value: Option<&str>) -> EngineResult<NaiveDate> {
    let value = value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| EngineError::DataFormat {
            field: field.to_string(),
            value: String::new(),
            message: "missing required date".to_string(),
        })?;

    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|e| EngineError::DataFormat {
        field: field.to_string(),
        value: value.to_string(),
        message: e.to_string(),
    })
}

/// Parses an optional date field; blank and absent are both `None`.
fn parse_optional_date(field: &str, value: Option<&str>) -> EngineResult<Option<NaiveDate>> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => NaiveDate::parse_from_str(v, DATE_FORMAT)
            .map(Some)
            .map_err(|e| EngineError::DataFormat {
                field: field.to_string(),
                value: v.to_string(),
                message: e.to_string(),
            }),
    }
}

/// Parses a required integer status code.
fn parse_status(field: &str, value: Option<&str>) -> EngineResult<i32> {
    let value = value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| EngineError::DataFormat {
            field: field.to_string(),
            value: String::new(),
            message: "missing required status code".to_string(),
        })?;

    value.parse::<i32>().map_err(|e| EngineError::DataFormat {
        field: field.to_string(),
        value: value.to_string(),
        message: e.to_string(),
    })
}

/// Parses an optional integer status code, defaulting to 0 (active).
fn parse_optional_status(field: &str, value: Option<&str>) -> EngineResult<i32> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(0),
        Some(v) => v.parse::<i32>().map_err(|e| EngineError::DataFormat {
            field: field.to_string(),
            value: v.to_string(),
            message: e.to_string(),
        }),
    }
}

/// Returns a trimmed optional string, mapping blanks to `None`.
fn clean(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Normalizes a single raw row into a typed record.
///
/// Fails with [`EngineError::DataFormat`] when a required field is missing
/// or unparseable; the caller excludes such rows and continues.
pub fn normalize_row(row: &RawEmployeeRow, policy: &PolicyConfig) -> EngineResult<EmployeeRecord> {
    let tax_id = clean(&row.tax_id).ok_or_else(|| EngineError::DataFormat {
        field: "tax_id".to_string(),
        value: String::new(),
        message: "missing tax identifier".to_string(),
    })?;
    let name = clean(&row.name).ok_or_else(|| EngineError::DataFormat {
        field: "name".to_string(),
        value: String::new(),
        message: "missing employee name".to_string(),
    })?;

    let status_code = parse_status("status_code", row.status_code.as_deref())?;
    let manager_status_code =
        parse_optional_status("manager_status_code", row.manager_status_code.as_deref())?;

    let hire_date = parse_required_date("hire_date", row.hire_date.as_deref())?;
    let birth_date = parse_required_date("birth_date", row.birth_date.as_deref())?;
    let termination_date = parse_optional_date("termination_date", row.termination_date.as_deref())?
        .filter(|d| Some(*d) != termination_sentinel());

    Ok(EmployeeRecord {
        person_id: normalize_person_id(&tax_id, policy.person_id_width),
        name,
        status_code,
        registration_number: clean(&row.registration_number),
        personal_email: clean(&row.personal_email),
        corporate_email: clean(&row.corporate_email),
        hire_date,
        termination_date,
        birth_date,
        manager_name: clean(&row.manager_name),
        manager_email: clean(&row.manager_email),
        workplace_name: clean(&row.workplace_name),
        manager_status_code,
    })
}

/// Clears a termination date that precedes the hire date.
///
/// Returns the warning describing the repair, or `None` when the record is
/// already consistent.
pub fn repair_integrity(record: &mut EmployeeRecord) -> Option<IntegrityWarning> {
    let termination = record.termination_date?;
    if termination >= record.hire_date {
        return None;
    }
    record.termination_date = None;
    Some(IntegrityWarning {
        person_id: record.person_id.clone(),
        hire_date: record.hire_date,
        cleared_termination_date: termination,
    })
}

/// Normalizes a full snapshot, collecting good records, rejected rows, and
/// repaired integrity violations.
pub fn normalize_rows(rows: &[RawEmployeeRow], policy: &PolicyConfig) -> NormalizedSnapshot {
    let mut records = Vec::with_capacity(rows.len());
    let mut rejected = Vec::new();
    let mut warnings = Vec::new();

    for (row_index, row) in rows.iter().enumerate() {
        match normalize_row(row, policy) {
            Ok(mut record) => {
                if let Some(warning) = repair_integrity(&mut record) {
                    warn!(
                        person_id = %warning.person_id,
                        hire_date = %warning.hire_date,
                        termination_date = %warning.cleared_termination_date,
                        "Termination date precedes hire date; cleared"
                    );
                    warnings.push(warning);
                }
                records.push(record);
            }
            Err(error) => {
                warn!(row_index, %error, "Row excluded from batch");
                rejected.push(RejectedRow { row_index, error });
            }
        }
    }

    NormalizedSnapshot {
        records,
        rejected,
        warnings,
    }
}
