//! Employee record models.
//!
//! This module defines the raw snapshot row shape delivered by the data
//! source and the normalized [`EmployeeRecord`] that the rest of the engine
//! operates on. One record corresponds to one employment contract; a person
//! who left and was rehired has several records sharing one `person_id`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One raw row of the employee snapshot, exactly as the source query
/// delivers it: every field is an optional string.
///
/// The columns mirror the HR extract: tax id, name, status code,
/// registration number, emails, hire/termination/birth dates, the
/// denormalized reporting-line fields, and the workplace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEmployeeRow {
    /// The person's tax identifier, possibly unpadded.
    pub tax_id: Option<String>,
    /// The employee's full name.
    pub name: Option<String>,
    /// The employment status code as text.
    pub status_code: Option<String>,
    /// The registration (contract) number for this employment stint.
    pub registration_number: Option<String>,
    /// Personal email address.
    pub personal_email: Option<String>,
    /// Corporate email address.
    pub corporate_email: Option<String>,
    /// Hire date in `%Y-%m-%d` form.
    pub hire_date: Option<String>,
    /// Termination date in `%Y-%m-%d` form; the source uses a sentinel
    /// date for still-employed rows.
    pub termination_date: Option<String>,
    /// Birth date in `%Y-%m-%d` form.
    pub birth_date: Option<String>,
    /// The manager responsible for the employee's position.
    pub manager_name: Option<String>,
    /// The manager's corporate email address.
    pub manager_email: Option<String>,
    /// The name of the workplace/site.
    pub workplace_name: Option<String>,
    /// The manager's employment status code as text.
    pub manager_status_code: Option<String>,
}

/// A normalized employment record.
///
/// Produced from a [`RawEmployeeRow`] by the record normalizer: the tax id
/// is zero-padded to a fixed width, status codes are integers, and all date
/// fields are parsed. A `termination_date` of `None` means the record is
/// still employed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    /// Normalized tax identifier grouping all records for one person.
    pub person_id: String,
    /// The employee's full name.
    pub name: String,
    /// Employment status code; one configured value means terminated.
    pub status_code: i32,
    /// The registration (contract) number for this stint.
    pub registration_number: Option<String>,
    /// Personal email address, if registered.
    pub personal_email: Option<String>,
    /// Corporate email address, if registered.
    pub corporate_email: Option<String>,
    /// The date this employment stint started.
    pub hire_date: NaiveDate,
    /// The date this stint ended; `None` while still employed.
    pub termination_date: Option<NaiveDate>,
    /// The employee's date of birth.
    pub birth_date: NaiveDate,
    /// The manager responsible for the position, if occupied.
    pub manager_name: Option<String>,
    /// The manager's email address.
    pub manager_email: Option<String>,
    /// The name of the workplace/site.
    pub workplace_name: Option<String>,
    /// The manager's status code; 0 (active) when no manager row joined.
    pub manager_status_code: i32,
}

impl EmployeeRecord {
    /// Returns true if this record carries the terminated status code.
    pub fn is_terminated(&self, terminated_status_code: i32) -> bool {
        self.status_code == terminated_status_code
    }

    /// Returns true if the record names a manager whose own status is not
    /// terminated.
    pub fn has_valid_manager(&self, terminated_status_code: i32) -> bool {
        self.manager_name
            .as_deref()
            .is_some_and(|name| !name.trim().is_empty())
            && self.manager_status_code != terminated_status_code
    }

    /// Returns true if the record has a non-empty personal email address.
    pub fn has_personal_email(&self) -> bool {
        self.personal_email
            .as_deref()
            .is_some_and(|email| !email.trim().is_empty())
    }
}

/// All normalized records belonging to one person.
///
/// Groups are the unit of classification: every record in a group shares
/// the same `person_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonGroup {
    /// The shared normalized tax identifier.
    pub person_id: String,
    /// The person's records, in snapshot order.
    pub records: Vec<EmployeeRecord>,
}
