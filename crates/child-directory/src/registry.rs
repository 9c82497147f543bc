//! Child registry parsing and the built-in record set.
//!
//! The built-in registry is embedded at compile time and validated once on
//! first access.

use std::collections::HashSet;
use std::sync::OnceLock;

use serde::Deserialize;

use crate::child::SupportedChild;
use crate::error::DirectoryError;

/// Current supported registry version.
const SUPPORTED_VERSION: u32 = 1;

const BUILTIN_REGISTRY: &str = include_str!("../data/supported_children.json");

static BUILTIN: OnceLock<ChildRegistry> = OnceLock::new();

/// A validated, ordered set of supported-child records.
///
/// ## Invariants
/// - Record identifiers are unique.
/// - First and last names are non-blank.
/// - Day of birth is within `1..=31` and month within `1..=12`.
///
/// # Example
///
/// ```
/// use child_directory::ChildRegistry;
///
/// let registry = ChildRegistry::from_json(r#"{"version": 1, "children": []}"#)
///     .expect("valid registry");
/// assert!(registry.children().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildRegistry {
    children: Vec<SupportedChild>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawChildRegistry {
    version: u32,
    children: Vec<SupportedChild>,
}

impl ChildRegistry {
    /// Parses a child registry from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError`] if the JSON is malformed, the version is
    /// unsupported, or any record breaks the registry invariants.
    pub fn from_json(json: &str) -> Result<Self, DirectoryError> {
        let raw: RawChildRegistry =
            serde_json::from_str(json).map_err(|e| DirectoryError::ParseError {
                message: e.to_string(),
            })?;

        Self::from_raw(raw)
    }

    /// The registry shipped with the crate.
    ///
    /// # Panics
    ///
    /// Panics if the embedded registry fails validation, which is caught by
    /// the crate's own tests.
    #[must_use]
    pub fn builtin() -> &'static Self {
        BUILTIN.get_or_init(|| {
            Self::from_json(BUILTIN_REGISTRY)
                .unwrap_or_else(|error| panic!("embedded child registry is invalid: {error}"))
        })
    }

    fn from_raw(raw: RawChildRegistry) -> Result<Self, DirectoryError> {
        if raw.version != SUPPORTED_VERSION {
            return Err(DirectoryError::UnsupportedVersion {
                expected: SUPPORTED_VERSION,
                actual: raw.version,
            });
        }

        let mut seen = HashSet::with_capacity(raw.children.len());
        for child in &raw.children {
            if !seen.insert(child.id) {
                return Err(DirectoryError::DuplicateId { id: child.id });
            }
            if child.first_name.trim().is_empty() || child.last_name.trim().is_empty() {
                return Err(DirectoryError::BlankName { id: child.id });
            }
            let dob = child.date_of_birth;
            if !(1..=31).contains(&dob.day) || !(1..=12).contains(&dob.month) {
                return Err(DirectoryError::InvalidDateOfBirth {
                    id: child.id,
                    day: dob.day,
                    month: dob.month,
                });
            }
        }

        Ok(Self {
            children: raw.children,
        })
    }

    /// Records in registry order.
    #[must_use]
    pub fn children(&self) -> &[SupportedChild] {
        &self.children
    }
}

/// Return the built-in supported-child records.
#[must_use]
pub fn supported_children() -> Vec<SupportedChild> {
    ChildRegistry::builtin().children().to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn record(id: u32, first_name: &str, day: u8, month: u8) -> String {
        format!(
            r#"{{
                "id": {id},
                "first_name": "{first_name}",
                "last_name": "Doe",
                "age": 8,
                "date_of_birth": {{ "day": {day}, "month": {month}, "year": 2016 }},
                "gender": "male",
                "school": {{ "school": "Test Primary", "level": "Class 3", "books": true }},
                "head_of_family": "Mother",
                "personal_status": "Vulnerable",
                "future_educational_goals": "Finish school",
                "hygiene_kits": false,
                "medical_support": false,
                "transport_to_clinic": false
            }}"#
        )
    }

    fn registry_json(version: u32, records: &[String]) -> String {
        format!(
            r#"{{"version": {version}, "children": [{}]}}"#,
            records.join(",")
        )
    }

    #[test]
    fn builtin_registry_holds_five_records() {
        let children = supported_children();
        assert_eq!(children.len(), 5);
        let ids: Vec<u32> = children.iter().map(|child| child.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn builtin_accessor_is_stable_across_calls() {
        assert_eq!(supported_children(), supported_children());
    }

    #[test]
    fn rejects_unsupported_version() {
        let json = registry_json(2, &[record(1, "Ann", 1, 1)]);
        let err = ChildRegistry::from_json(&json).expect_err("version 2 must fail");
        assert_eq!(
            err,
            DirectoryError::UnsupportedVersion {
                expected: 1,
                actual: 2
            }
        );
    }

    #[test]
    fn rejects_duplicate_ids() {
        let json = registry_json(1, &[record(7, "Ann", 1, 1), record(7, "Ben", 2, 2)]);
        let err = ChildRegistry::from_json(&json).expect_err("duplicate ids must fail");
        assert_eq!(err, DirectoryError::DuplicateId { id: 7 });
    }

    #[test]
    fn rejects_blank_names() {
        let json = registry_json(1, &[record(3, "  ", 1, 1)]);
        let err = ChildRegistry::from_json(&json).expect_err("blank names must fail");
        assert_eq!(err, DirectoryError::BlankName { id: 3 });
    }

    #[rstest]
    #[case(0, 5)]
    #[case(32, 5)]
    #[case(10, 0)]
    #[case(10, 13)]
    fn rejects_impossible_dates(#[case] day: u8, #[case] month: u8) {
        let json = registry_json(1, &[record(1, "Ann", day, month)]);
        let err = ChildRegistry::from_json(&json).expect_err("bad date must fail");
        assert_eq!(
            err,
            DirectoryError::InvalidDateOfBirth { id: 1, day, month }
        );
    }

    #[test]
    fn rejects_malformed_json() {
        let err = ChildRegistry::from_json("{").expect_err("malformed json must fail");
        assert!(matches!(err, DirectoryError::ParseError { .. }));
    }
}
