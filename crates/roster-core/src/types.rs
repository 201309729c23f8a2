//! Core domain types for the Roster employee directory.
//!
//! `Employee` mirrors the properties stored on an `Employee` node in the
//! graph. `EmployeeRecord` is the shape list queries return to clients.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RosterError;

// ── Employee ──────────────────────────────────────────────────────

/// An employee as stored on an `Employee` node.
///
/// `name` is the lookup key for updates and deletes. It is not unique:
/// several nodes may share a name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Employee {
    pub name: String,
    pub surname: String,
    pub position: String,
}

impl Employee {
    pub fn new(
        name: impl Into<String>,
        surname: impl Into<String>,
        position: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            surname: surname.into(),
            position: position.into(),
        }
    }

    /// Value of the property a list query orders by.
    pub fn sort_key(&self, field: SortField) -> &str {
        match field {
            SortField::Name => &self.name,
            SortField::Surname => &self.surname,
            SortField::Position => &self.position,
        }
    }
}

/// A row of the employee listing.
///
/// Clients read the employee's name from the `employee` key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmployeeRecord {
    pub employee: String,
    pub surname: String,
    pub position: String,
}

impl From<Employee> for EmployeeRecord {
    fn from(e: Employee) -> Self {
        Self {
            employee: e.name,
            surname: e.surname,
            position: e.position,
        }
    }
}

// ── Sorting ───────────────────────────────────────────────────────

/// Properties a listing may be ordered by.
///
/// These names end up in Cypher text, so only this fixed set is accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortField {
    Name,
    #[default]
    Surname,
    Position,
}

impl SortField {
    /// Node property name for this field.
    pub fn property(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Surname => "surname",
            Self::Position => "position",
        }
    }
}

impl FromStr for SortField {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "surname" => Ok(Self::Surname),
            "position" => Ok(Self::Position),
            other => Err(RosterError::InvalidSortField(other.to_string())),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.property())
    }
}

/// Direction of a listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Cypher keyword for this direction.
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl FromStr for SortOrder {
    type Err = RosterError;

    /// Cypher keywords are case-insensitive, so `asc` and `Desc` are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("ASC") {
            Ok(Self::Asc)
        } else if s.eq_ignore_ascii_case("DESC") {
            Ok(Self::Desc)
        } else {
            Err(RosterError::InvalidSortOrder(s.to_string()))
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

// ── Filtering ─────────────────────────────────────────────────────

/// Validated options for listing employees.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    /// Exact `position` match. `None` lists every employee.
    pub position: Option<String>,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
}

impl ListFilter {
    /// Build a filter from raw request parameters.
    ///
    /// An empty `position` is treated as no filter. Absent sort options
    /// fall back to `surname` / `ASC`.
    pub fn from_params(
        position: Option<String>,
        sort_by: Option<&str>,
        sort_order: Option<&str>,
    ) -> Result<Self, RosterError> {
        Ok(Self {
            position: position.filter(|p| !p.is_empty()),
            sort_by: sort_by
                .map(str::parse::<SortField>)
                .transpose()?
                .unwrap_or_default(),
            sort_order: sort_order
                .map(str::parse::<SortOrder>)
                .transpose()?
                .unwrap_or_default(),
        })
    }

    /// Whether an employee passes the position filter.
    pub fn matches(&self, employee: &Employee) -> bool {
        self.position
            .as_deref()
            .map_or(true, |p| employee.position == p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_uses_employee_key() {
        let record = EmployeeRecord::from(Employee::new("Jo", "Doe", "Engineer"));
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"employee": "Jo", "surname": "Doe", "position": "Engineer"})
        );
    }

    #[test]
    fn test_employee_requires_all_fields() {
        let err = serde_json::from_str::<Employee>(r#"{"name": "Jo", "surname": "Doe"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_sort_field_allow_list() {
        assert_eq!("name".parse::<SortField>().unwrap(), SortField::Name);
        assert_eq!("surname".parse::<SortField>().unwrap(), SortField::Surname);
        assert_eq!("position".parse::<SortField>().unwrap(), SortField::Position);
        assert!("Surname".parse::<SortField>().is_err());
        assert!("surname; DETACH DELETE e".parse::<SortField>().is_err());
    }

    #[test]
    fn test_sort_order_case_insensitive() {
        assert_eq!("ASC".parse::<SortOrder>().unwrap(), SortOrder::Asc);
        assert_eq!("desc".parse::<SortOrder>().unwrap(), SortOrder::Desc);
        assert_eq!("Desc".parse::<SortOrder>().unwrap(), SortOrder::Desc);
        assert!("DOWN".parse::<SortOrder>().is_err());
    }

    #[test]
    fn test_filter_defaults() {
        let filter = ListFilter::from_params(None, None, None).unwrap();
        assert_eq!(filter, ListFilter::default());
        assert_eq!(filter.sort_by, SortField::Surname);
        assert_eq!(filter.sort_order, SortOrder::Asc);
    }

    #[test]
    fn test_filter_empty_position_is_no_filter() {
        let filter = ListFilter::from_params(Some(String::new()), None, None).unwrap();
        assert!(filter.position.is_none());
        assert!(filter.matches(&Employee::new("A", "B", "Anything")));
    }

    #[test]
    fn test_filter_position_exact_match() {
        let filter =
            ListFilter::from_params(Some("Engineer".into()), Some("name"), Some("DESC")).unwrap();
        assert!(filter.matches(&Employee::new("A", "B", "Engineer")));
        assert!(!filter.matches(&Employee::new("A", "B", "engineer")));
        assert!(!filter.matches(&Employee::new("A", "B", "Senior Engineer")));
        assert_eq!(filter.sort_by, SortField::Name);
        assert_eq!(filter.sort_order, SortOrder::Desc);
    }

    #[test]
    fn test_filter_rejects_bad_sort() {
        assert!(matches!(
            ListFilter::from_params(None, Some("salary"), None),
            Err(RosterError::InvalidSortField(_))
        ));
        assert!(matches!(
            ListFilter::from_params(None, None, Some("sideways")),
            Err(RosterError::InvalidSortOrder(_))
        ));
    }
}
