//! Semester grade point average calculator.
//!
//! [`validate`] turns raw form input into checked records, [`sgpa::aggregate`]
//! grades them and [`motivation::select`] picks the message for the result.
//! [`wizard::Wizard`] strings these together as a four-stage session.

pub mod grade;
pub mod input;
pub mod interactive;
pub mod models;
pub mod motivation;
pub mod report;
pub mod sgpa;
pub mod validate;
pub mod wizard;

pub use models::{
    AggregateResult, FinalSummary, Gender, Grade, PersonalInfo, PersonalInfoDraft, SemesterResult,
    Subject, SubjectDraft, SubjectResult,
};
pub use motivation::MotivationTier;
pub use validate::{FieldError, ValidationErrors};
pub use wizard::{Stage, Wizard, WizardError};
