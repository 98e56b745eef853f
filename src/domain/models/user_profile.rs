use serde::{Deserialize, Serialize};

/// The profile record handed over by the host for one analysis.
///
/// Personal fields may be present even on a guest profile; they are only
/// reachable through [`UserProfile::personal_details`], which hides them for
/// guests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    is_guest: bool,
    #[serde(default)]
    age: u32,
    #[serde(default)]
    gender: String,
    #[serde(default)]
    allergies: String,
    #[serde(default)]
    health_concerns: String,
}

/// Borrowed view of the fields used for personalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersonalDetails<'a> {
    pub age: u32,
    pub gender: &'a str,
    pub allergies: &'a str,
    pub health_concerns: &'a str,
}

impl UserProfile {
    pub fn guest() -> Self {
        Self {
            is_guest: true,
            ..Self::default()
        }
    }

    pub fn member(
        age: u32,
        gender: impl Into<String>,
        allergies: impl Into<String>,
        health_concerns: impl Into<String>,
    ) -> Self {
        Self {
            is_guest: false,
            age,
            gender: gender.into(),
            allergies: allergies.into(),
            health_concerns: health_concerns.into(),
        }
    }

    /// Reconstitutes a profile exactly as the host stored it, including
    /// personal fields on a guest record.
    pub fn reconstitute(
        is_guest: bool,
        age: u32,
        gender: String,
        allergies: String,
        health_concerns: String,
    ) -> Self {
        Self {
            is_guest,
            age,
            gender,
            allergies,
            health_concerns,
        }
    }

    pub fn is_guest(&self) -> bool {
        self.is_guest
    }

    /// Returns `None` for guests.
    pub fn personal_details(&self) -> Option<PersonalDetails<'_>> {
        if self.is_guest {
            return None;
        }
        Some(PersonalDetails {
            age: self.age,
            gender: &self.gender,
            allergies: &self.allergies,
            health_concerns: &self.health_concerns,
        })
    }
}
