//! Supported-child record types.
//!
//! Field names follow the snake_case keys of the seed data.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Gender recorded for a supported child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Female.
    Female,
    /// Male.
    Male,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Female => "female",
            Self::Male => "male",
        })
    }
}

/// Calendar date of birth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateOfBirth {
    /// Day of month, `1..=31`.
    pub day: u8,
    /// Month of year, `1..=12`.
    pub month: u8,
    /// Four digit year.
    pub year: u16,
}

impl fmt::Display for DateOfBirth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// School enrolment details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schooling {
    /// School name.
    pub school: String,
    /// Current class or grade.
    pub level: String,
    /// Whether the programme supplies school books.
    pub books: bool,
}

/// A sponsorship beneficiary record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportedChild {
    /// Stable record identifier.
    pub id: u32,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Age in years at the time the record was captured.
    pub age: u8,
    /// Date of birth.
    pub date_of_birth: DateOfBirth,
    /// Recorded gender.
    pub gender: Gender,
    /// School enrolment.
    pub school: Schooling,
    /// Relationship of the household head to the child.
    pub head_of_family: String,
    /// Family situation, such as "Orphan".
    pub personal_status: String,
    /// Educational goal stated by or for the child.
    pub future_educational_goals: String,
    /// Receives hygiene kits.
    pub hygiene_kits: bool,
    /// Receives medical support.
    pub medical_support: bool,
    /// Receives transport to a clinic.
    pub transport_to_clinic: bool,
}

impl SupportedChild {
    /// Return `"<first> <last>"`.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
