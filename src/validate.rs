//! Input bounds checks for the wizard forms.
//!
//! Every field is checked and every failure is reported, so a form can show
//! all of its problems at once. Only validated [`PersonalInfo`] and
//! [`Subject`] records reach the grading code.

use std::fmt;
use std::ops::RangeInclusive;

use thiserror::Error;

use crate::models::{Gender, PersonalInfo, PersonalInfoDraft, Subject, SubjectDraft};

pub const MAX_NAME_CHARS: usize = 100;
pub const MARKS_RANGE: RangeInclusive<i64> = 0..=100;
pub const CREDITS_RANGE: RangeInclusive<i64> = 1..=10;
pub const SUBJECT_COUNT_RANGE: RangeInclusive<usize> = 1..=15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Gender,
    SubjectCount,
    SubjectName(usize),
    SubjectMarks(usize),
    SubjectCredits(usize),
}

impl Field {
    fn label(&self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Gender => "Gender",
            Field::SubjectCount => "Number of subjects",
            Field::SubjectName(_) => "Subject name",
            Field::SubjectMarks(_) => "Marks",
            Field::SubjectCredits(_) => "Credits",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Name => f.write_str("name"),
            Field::Gender => f.write_str("gender"),
            Field::SubjectCount => f.write_str("subjects"),
            Field::SubjectName(index) => write!(f, "subjects[{index}].name"),
            Field::SubjectMarks(index) => write!(f, "subjects[{index}].marks"),
            Field::SubjectCredits(index) => write!(f, "subjects[{index}].credits"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldErrorKind {
    #[error("is required")]
    Required,
    #[error("is too long (at most {max} characters)")]
    TooLong { max: usize },
    #[error("must be at least {min}")]
    BelowMinimum { min: i64 },
    #[error("cannot exceed {max}")]
    AboveMaximum { max: i64 },
    #[error("must be between {min} and {max}")]
    CountOutOfRange { min: usize, max: usize },
    #[error("must be one of {allowed}")]
    InvalidChoice { allowed: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {kind}")]
pub struct FieldError {
    pub field: Field,
    pub kind: FieldErrorKind,
}

impl FieldError {
    pub fn new(field: Field, kind: FieldErrorKind) -> Self {
        Self { field, kind }
    }

    /// Message suitable for showing next to the offending form field.
    pub fn message(&self) -> String {
        format!("{} {}", self.field.label(), self.kind)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} field(s) failed validation", .0.len())]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn for_field(&self, field: Field) -> Option<&FieldError> {
        self.0.iter().find(|error| error.field == field)
    }

    pub fn into_inner(self) -> Vec<FieldError> {
        self.0
    }
}

impl From<FieldError> for ValidationErrors {
    fn from(error: FieldError) -> Self {
        Self(vec![error])
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[derive(Default)]
struct Collector(Vec<FieldError>);

impl Collector {
    fn push(&mut self, field: Field, kind: FieldErrorKind) {
        self.0.push(FieldError::new(field, kind));
    }

    fn finish<T>(self, value: impl FnOnce() -> T) -> Result<T, ValidationErrors> {
        if self.0.is_empty() {
            Ok(value())
        } else {
            Err(ValidationErrors(self.0))
        }
    }
}

fn check_name(errors: &mut Collector, field: Field, name: &str) {
    if name.trim().is_empty() {
        errors.push(field, FieldErrorKind::Required);
    } else if name.trim().chars().count() > MAX_NAME_CHARS {
        errors.push(
            field,
            FieldErrorKind::TooLong {
                max: MAX_NAME_CHARS,
            },
        );
    }
}

fn check_range(errors: &mut Collector, field: Field, value: i64, range: &RangeInclusive<i64>) {
    if value < *range.start() {
        errors.push(
            field,
            FieldErrorKind::BelowMinimum {
                min: *range.start(),
            },
        );
    } else if value > *range.end() {
        errors.push(field, FieldErrorKind::AboveMaximum { max: *range.end() });
    }
}

fn gender_choices() -> String {
    Gender::ALL
        .iter()
        .map(Gender::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn validate_personal_info(draft: &PersonalInfoDraft) -> Result<PersonalInfo, ValidationErrors> {
    let mut errors = Collector::default();
    check_name(&mut errors, Field::Name, &draft.name);

    let gender = if draft.gender.trim().is_empty() {
        errors.push(Field::Gender, FieldErrorKind::Required);
        None
    } else {
        match draft.gender.parse::<Gender>() {
            Ok(gender) => Some(gender),
            Err(_) => {
                errors.push(
                    Field::Gender,
                    FieldErrorKind::InvalidChoice {
                        allowed: gender_choices(),
                    },
                );
                None
            }
        }
    };

    match gender {
        Some(gender) => errors.finish(|| PersonalInfo {
            name: draft.name.trim().to_string(),
            gender,
        }),
        None => Err(ValidationErrors(errors.0)),
    }
}

pub fn check_subject_count(count: usize) -> Result<(), FieldError> {
    if SUBJECT_COUNT_RANGE.contains(&count) {
        Ok(())
    } else {
        Err(FieldError::new(
            Field::SubjectCount,
            FieldErrorKind::CountOutOfRange {
                min: *SUBJECT_COUNT_RANGE.start(),
                max: *SUBJECT_COUNT_RANGE.end(),
            },
        ))
    }
}

/// Validates the whole subject list, reporting each bad field by row index.
pub fn validate_subjects(drafts: &[SubjectDraft]) -> Result<Vec<Subject>, ValidationErrors> {
    let mut errors = Collector::default();
    if let Err(error) = check_subject_count(drafts.len()) {
        errors.0.push(error);
    }

    for (index, draft) in drafts.iter().enumerate() {
        check_name(&mut errors, Field::SubjectName(index), &draft.name);
        check_range(&mut errors, Field::SubjectMarks(index), draft.marks, &MARKS_RANGE);
        check_range(
            &mut errors,
            Field::SubjectCredits(index),
            draft.credits,
            &CREDITS_RANGE,
        );
    }

    if !errors.0.is_empty() {
        return Err(ValidationErrors(errors.0));
    }

    drafts
        .iter()
        .enumerate()
        .map(|(index, draft)| -> Result<Subject, ValidationErrors> {
            let marks = u8::try_from(draft.marks).map_err(|_| {
                FieldError::new(
                    Field::SubjectMarks(index),
                    FieldErrorKind::AboveMaximum {
                        max: *MARKS_RANGE.end(),
                    },
                )
            })?;
            let credits = u8::try_from(draft.credits).map_err(|_| {
                FieldError::new(
                    Field::SubjectCredits(index),
                    FieldErrorKind::AboveMaximum {
                        max: *CREDITS_RANGE.end(),
                    },
                )
            })?;
            Ok(Subject::new(draft.name.trim(), marks, credits))
        })
        .collect()
}

/// Blank rows for the subject form once the number of subjects is chosen.
pub fn blank_subjects(count: usize) -> Result<Vec<SubjectDraft>, FieldError> {
    check_subject_count(count)?;
    Ok(vec![SubjectDraft::default(); count])
}

pub fn completed_count(drafts: &[SubjectDraft]) -> usize {
    drafts.iter().filter(|draft| draft.is_complete()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn personal(name: &str, gender: &str) -> PersonalInfoDraft {
        PersonalInfoDraft {
            name: name.to_string(),
            gender: gender.to_string(),
        }
    }

    #[test]
    fn accepts_valid_personal_info() {
        let info = validate_personal_info(&personal("  Priya Sharma ", "female")).unwrap();
        assert_eq!(info.name, "Priya Sharma");
        assert_eq!(info.gender, Gender::Female);
    }

    #[test]
    fn reports_every_personal_field() {
        let errors = validate_personal_info(&personal("   ", "robot")).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors.for_field(Field::Name).unwrap().kind,
            FieldErrorKind::Required
        );
        assert!(matches!(
            errors.for_field(Field::Gender).unwrap().kind,
            FieldErrorKind::InvalidChoice { .. }
        ));
        assert_eq!(
            errors.for_field(Field::Name).unwrap().message(),
            "Name is required"
        );
    }

    #[test]
    fn rejects_long_names() {
        let long = "x".repeat(MAX_NAME_CHARS + 1);
        let errors = validate_personal_info(&personal(&long, "male")).unwrap_err();
        assert_eq!(
            errors.for_field(Field::Name).unwrap().kind,
            FieldErrorKind::TooLong { max: 100 }
        );
        assert!(validate_personal_info(&personal(&"x".repeat(MAX_NAME_CHARS), "male")).is_ok());
    }

    #[test]
    fn missing_gender_is_required() {
        let errors = validate_personal_info(&personal("Sam", "")).unwrap_err();
        assert_eq!(
            errors.for_field(Field::Gender).unwrap().kind,
            FieldErrorKind::Required
        );
    }

    #[test]
    fn accepts_bounds_inclusive() {
        let drafts = vec![
            SubjectDraft::new("Lab", 0, 1),
            SubjectDraft::new("Project", 100, 10),
        ];
        let subjects = validate_subjects(&drafts).unwrap();
        assert_eq!(subjects.len(), 2);
        assert_eq!(subjects[0].marks, 0);
        assert_eq!(subjects[1].credits, 10);
    }

    #[test]
    fn reports_each_bad_row_field() {
        let drafts = vec![
            SubjectDraft::new("", -1, 0),
            SubjectDraft::new("Chemistry", 101, 11),
        ];
        let errors = validate_subjects(&drafts).unwrap_err();
        assert_eq!(errors.len(), 5);
        assert_eq!(
            errors.for_field(Field::SubjectMarks(0)).unwrap().kind,
            FieldErrorKind::BelowMinimum { min: 0 }
        );
        assert_eq!(
            errors.for_field(Field::SubjectCredits(0)).unwrap().kind,
            FieldErrorKind::BelowMinimum { min: 1 }
        );
        assert_eq!(
            errors.for_field(Field::SubjectMarks(1)).unwrap().message(),
            "Marks cannot exceed 100"
        );
        assert_eq!(
            errors.for_field(Field::SubjectCredits(1)).unwrap().message(),
            "Credits cannot exceed 10"
        );
        assert_eq!(
            errors.for_field(Field::SubjectName(0)).unwrap().to_string(),
            "subjects[0].name: is required"
        );
    }

    #[test]
    fn subject_count_bounds() {
        let errors = validate_subjects(&[]).unwrap_err();
        assert_eq!(
            errors.for_field(Field::SubjectCount).unwrap().kind,
            FieldErrorKind::CountOutOfRange { min: 1, max: 15 }
        );

        let sixteen = vec![SubjectDraft::new("Elective", 50, 2); 16];
        assert!(validate_subjects(&sixteen).is_err());
        let fifteen = vec![SubjectDraft::new("Elective", 50, 2); 15];
        assert_eq!(validate_subjects(&fifteen).unwrap().len(), 15);
    }

    #[test]
    fn blank_rows_follow_count() {
        let rows = blank_subjects(3).unwrap();
        assert_eq!(rows, vec![SubjectDraft::new("", 0, 1); 3]);
        assert_eq!(completed_count(&rows), 0);
        assert!(blank_subjects(0).is_err());
        assert!(blank_subjects(16).is_err());
    }

    #[test]
    fn completed_counter() {
        let rows = vec![
            SubjectDraft::new("Biology", 66, 3),
            SubjectDraft::new("", 40, 2),
            SubjectDraft::new("History", 0, 1),
        ];
        assert_eq!(completed_count(&rows), 2);
    }
}
