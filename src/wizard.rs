//! Stage controller for the four-step SGPA wizard.
//!
//! The wizard owns the session state. Grading and tier selection run as pure
//! side computations of the `submit_subjects` and `view_final` transitions.

use std::fmt;

use thiserror::Error;
use uuid::Uuid;

use crate::models::{
    FinalSummary, PersonalInfo, PersonalInfoDraft, SemesterResult, Subject, SubjectDraft,
};
use crate::motivation;
use crate::sgpa;
use crate::validate::{self, ValidationErrors};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    CollectingPersonalInfo,
    CollectingSubjects,
    ShowingResults,
    ShowingFinal,
}

impl Stage {
    pub const ALL: [Stage; 4] = [
        Stage::CollectingPersonalInfo,
        Stage::CollectingSubjects,
        Stage::ShowingResults,
        Stage::ShowingFinal,
    ];

    /// One-based position, as shown in "Step 2 of 4".
    pub fn number(&self) -> usize {
        match self {
            Stage::CollectingPersonalInfo => 1,
            Stage::CollectingSubjects => 2,
            Stage::ShowingResults => 3,
            Stage::ShowingFinal => 4,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Stage::CollectingPersonalInfo => "Personal Info",
            Stage::CollectingSubjects => "Subjects",
            Stage::ShowingResults => "Results",
            Stage::ShowingFinal => "Final Score",
        }
    }

    pub fn previous(&self) -> Option<Stage> {
        match self {
            Stage::CollectingPersonalInfo => None,
            Stage::CollectingSubjects => Some(Stage::CollectingPersonalInfo),
            Stage::ShowingResults => Some(Stage::CollectingSubjects),
            Stage::ShowingFinal => Some(Stage::ShowingResults),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    pub step: usize,
    pub total: usize,
    pub percent: f64,
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Step {} of {}", self.step, self.total)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    SubmitPersonalInfo,
    SubmitSubjects,
    ViewFinal,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::SubmitPersonalInfo => "submit personal info",
            Action::SubmitSubjects => "submit subjects",
            Action::ViewFinal => "view final results",
        })
    }
}

#[derive(Debug, Error)]
pub enum WizardError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("cannot {action} while at stage '{stage}'")]
    InvalidTransition { action: Action, stage: Stage },
}

#[derive(Debug, Clone)]
pub struct Wizard {
    session_id: Uuid,
    stage: Stage,
    personal_info: Option<PersonalInfo>,
    subjects: Vec<Subject>,
    results: Option<SemesterResult>,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

impl Wizard {
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4(),
            stage: Stage::CollectingPersonalInfo,
            personal_info: None,
            subjects: Vec::new(),
            results: None,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn personal_info(&self) -> Option<&PersonalInfo> {
        self.personal_info.as_ref()
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn results(&self) -> Option<&SemesterResult> {
        self.results.as_ref()
    }

    pub fn progress(&self) -> Progress {
        let total = Stage::ALL.len();
        let step = self.stage.number();
        Progress {
            step,
            total,
            percent: step as f64 / total as f64 * 100.0,
        }
    }

    /// Previously accepted subjects as editable rows, used to prefill the
    /// subject form when the user navigates back to it.
    pub fn subject_drafts(&self) -> Vec<SubjectDraft> {
        self.subjects
            .iter()
            .map(|subject| {
                SubjectDraft::new(
                    subject.name.clone(),
                    i64::from(subject.marks),
                    i64::from(subject.credits),
                )
            })
            .collect()
    }

    fn expect_stage(&self, expected: Stage, action: Action) -> Result<(), WizardError> {
        if self.stage == expected {
            Ok(())
        } else {
            Err(WizardError::InvalidTransition {
                action,
                stage: self.stage,
            })
        }
    }

    pub fn submit_personal_info(
        &mut self,
        draft: &PersonalInfoDraft,
    ) -> Result<&PersonalInfo, WizardError> {
        self.expect_stage(Stage::CollectingPersonalInfo, Action::SubmitPersonalInfo)?;
        let info = validate::validate_personal_info(draft)?;
        tracing::debug!(session = %self.session_id, gender = %info.gender, "personal info accepted");
        self.stage = Stage::CollectingSubjects;
        Ok(&*self.personal_info.insert(info))
    }

    pub fn submit_subjects(
        &mut self,
        drafts: &[SubjectDraft],
    ) -> Result<&SemesterResult, WizardError> {
        self.expect_stage(Stage::CollectingSubjects, Action::SubmitSubjects)?;
        let subjects = match validate::validate_subjects(drafts) {
            Ok(subjects) => subjects,
            Err(errors) => {
                tracing::debug!(
                    session = %self.session_id,
                    errors = errors.len(),
                    "subject list rejected"
                );
                return Err(errors.into());
            }
        };

        let results = sgpa::aggregate(&subjects);
        tracing::info!(
            session = %self.session_id,
            subjects = subjects.len(),
            total_credits = results.totals.total_credits,
            sgpa = results.totals.sgpa,
            "semester graded"
        );
        self.subjects = subjects;
        self.stage = Stage::ShowingResults;
        Ok(&*self.results.insert(results))
    }

    pub fn view_final(&mut self) -> Result<FinalSummary, WizardError> {
        self.expect_stage(Stage::ShowingResults, Action::ViewFinal)?;
        let summary = self.final_summary().ok_or(WizardError::InvalidTransition {
            action: Action::ViewFinal,
            stage: self.stage,
        })?;
        self.stage = Stage::ShowingFinal;
        Ok(summary)
    }

    /// The final-score view of the current session, once results exist.
    pub fn final_summary(&self) -> Option<FinalSummary> {
        let personal_info = self.personal_info.clone()?;
        let results = self.results.as_ref()?;
        Some(FinalSummary {
            personal_info,
            subject_count: results.subjects.len(),
            total_credits: results.totals.total_credits,
            total_earned_credits: results.totals.total_earned_credits,
            sgpa: results.totals.sgpa,
            motivation: motivation::select(results.totals.sgpa),
        })
    }

    /// Moves one stage back, keeping everything entered so far.
    pub fn back(&mut self) -> Stage {
        if let Some(previous) = self.stage.previous() {
            tracing::debug!(session = %self.session_id, from = %self.stage, to = %previous, "stage back");
            self.stage = previous;
        }
        self.stage
    }

    pub fn start_over(&mut self) {
        let previous = self.session_id;
        *self = Self::new();
        tracing::info!(previous = %previous, session = %self.session_id, "wizard restarted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gender;

    fn draft_info() -> PersonalInfoDraft {
        PersonalInfoDraft {
            name: "Arjun Mehta".to_string(),
            gender: "male".to_string(),
        }
    }

    fn draft_subjects() -> Vec<SubjectDraft> {
        vec![
            SubjectDraft::new("Mathematics", 95, 4),
            SubjectDraft::new("Physics", 72, 3),
            SubjectDraft::new("English", 45, 2),
        ]
    }

    #[test]
    fn walks_all_stages() {
        let mut wizard = Wizard::new();
        assert_eq!(wizard.stage(), Stage::CollectingPersonalInfo);
        assert_eq!(wizard.progress().to_string(), "Step 1 of 4");
        assert_eq!(wizard.progress().percent, 25.0);

        let info = wizard.submit_personal_info(&draft_info()).unwrap();
        assert_eq!(info.gender, Gender::Male);
        assert_eq!(wizard.stage(), Stage::CollectingSubjects);

        let results = wizard.submit_subjects(&draft_subjects()).unwrap();
        assert_eq!(results.totals.total_earned_credits, 74);
        assert_eq!(wizard.stage(), Stage::ShowingResults);

        let summary = wizard.view_final().unwrap();
        assert_eq!(summary.subject_count, 3);
        assert_eq!(summary.motivation.title, "Good Work!");
        assert_eq!(wizard.stage(), Stage::ShowingFinal);
        assert_eq!(wizard.progress().percent, 100.0);
    }

    #[test]
    fn rejected_submission_keeps_stage() {
        let mut wizard = Wizard::new();
        let err = wizard
            .submit_personal_info(&PersonalInfoDraft::default())
            .unwrap_err();
        match err {
            WizardError::Validation(errors) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(wizard.stage(), Stage::CollectingPersonalInfo);

        wizard.submit_personal_info(&draft_info()).unwrap();
        assert!(wizard.submit_subjects(&[SubjectDraft::new("Art", 120, 2)]).is_err());
        assert_eq!(wizard.stage(), Stage::CollectingSubjects);
        assert!(wizard.results().is_none());
    }

    #[test]
    fn out_of_order_actions_are_refused() {
        let mut wizard = Wizard::new();
        assert!(matches!(
            wizard.submit_subjects(&draft_subjects()),
            Err(WizardError::InvalidTransition {
                action: Action::SubmitSubjects,
                stage: Stage::CollectingPersonalInfo
            })
        ));
        assert!(wizard.view_final().is_err());
    }

    #[test]
    fn back_keeps_entered_data() {
        let mut wizard = Wizard::new();
        assert_eq!(wizard.back(), Stage::CollectingPersonalInfo);

        wizard.submit_personal_info(&draft_info()).unwrap();
        wizard.submit_subjects(&draft_subjects()).unwrap();
        wizard.view_final().unwrap();

        assert_eq!(wizard.back(), Stage::ShowingResults);
        assert_eq!(wizard.back(), Stage::CollectingSubjects);
        assert_eq!(wizard.subject_drafts(), draft_subjects());

        let results = wizard
            .submit_subjects(&[SubjectDraft::new("Thesis", 100, 10)])
            .unwrap();
        assert_eq!(results.totals.sgpa, 10.0);
        assert_eq!(wizard.view_final().unwrap().motivation.title, "Outstanding!");
    }

    #[test]
    fn start_over_clears_session() {
        let mut wizard = Wizard::new();
        let first_session = wizard.session_id();
        wizard.submit_personal_info(&draft_info()).unwrap();
        wizard.submit_subjects(&draft_subjects()).unwrap();

        wizard.start_over();
        assert_eq!(wizard.stage(), Stage::CollectingPersonalInfo);
        assert!(wizard.personal_info().is_none());
        assert!(wizard.subjects().is_empty());
        assert!(wizard.results().is_none());
        assert_ne!(wizard.session_id(), first_session);
    }

    #[test]
    fn stage_labels() {
        let labels: Vec<&str> = Stage::ALL.iter().map(Stage::label).collect();
        assert_eq!(labels, vec!["Personal Info", "Subjects", "Results", "Final Score"]);
    }
}
