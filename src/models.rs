use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::motivation::MotivationTier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Gender {
    Male,
    Female,
    Others,
    PreferNotToSay,
}

impl Gender {
    pub const ALL: [Gender; 4] = [
        Gender::Male,
        Gender::Female,
        Gender::Others,
        Gender::PreferNotToSay,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Others => "others",
            Gender::PreferNotToSay => "prefer-not-to-say",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Others => "Others",
            Gender::PreferNotToSay => "Prefer not to say",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = UnknownGender;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let needle = value.trim();
        Gender::ALL
            .into_iter()
            .find(|gender| gender.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| UnknownGender(value.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown gender '{0}'")]
pub struct UnknownGender(pub String);

/// Personal details exactly as typed, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PersonalInfoDraft {
    pub name: String,
    pub gender: String,
}

/// One subject row exactly as typed, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubjectDraft {
    pub name: String,
    pub marks: i64,
    pub credits: i64,
}

impl SubjectDraft {
    pub fn new(name: impl Into<String>, marks: i64, credits: i64) -> Self {
        Self {
            name: name.into(),
            marks,
            credits,
        }
    }

    /// Whether the row looks filled in, for the "k of n completed" counter.
    /// Any typed name counts here, even blanks; the validator is the one that
    /// trims and rejects whitespace-only names.
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && self.marks >= 0 && self.credits > 0
    }
}

impl Default for SubjectDraft {
    fn default() -> Self {
        Self::new("", 0, 1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonalInfo {
    pub name: String,
    pub gender: Gender,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subject {
    pub name: String,
    pub marks: u8,
    pub credits: u8,
}

impl Subject {
    pub(crate) fn new(name: impl Into<String>, marks: u8, credits: u8) -> Self {
        Self {
            name: name.into(),
            marks,
            credits,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grade {
    O,
    APlus,
    A,
    BPlus,
    B,
    C,
    D,
    E,
    F,
}

impl Grade {
    pub fn label(&self) -> &'static str {
        match self {
            Grade::O => "O",
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::E => "E",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl Serialize for Grade {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectResult {
    pub name: String,
    pub marks: u8,
    pub credits: u8,
    pub grade_points: u8,
    pub grade: Grade,
    pub earned_credits: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateResult {
    pub total_credits: u32,
    pub total_earned_credits: u32,
    pub sgpa: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SemesterResult {
    pub subjects: Vec<SubjectResult>,
    #[serde(flatten)]
    pub totals: AggregateResult,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalSummary {
    pub personal_info: PersonalInfo,
    pub subject_count: usize,
    pub total_credits: u32,
    pub total_earned_credits: u32,
    pub sgpa: f64,
    pub motivation: &'static MotivationTier,
}
