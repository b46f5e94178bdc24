use crate::grade;
use crate::models::{AggregateResult, SemesterResult, Subject, SubjectResult};

pub fn grade_subject(subject: &Subject) -> SubjectResult {
    let (grade_points, grade) = grade::map_marks(subject.marks);
    SubjectResult {
        name: subject.name.clone(),
        marks: subject.marks,
        credits: subject.credits,
        grade_points,
        grade,
        earned_credits: u32::from(grade_points) * u32::from(subject.credits),
    }
}

/// Grades every subject in order and reduces the list to credit totals.
///
/// An empty list (or one carrying no credits) yields an SGPA of zero rather
/// than dividing by zero.
pub fn aggregate(subjects: &[Subject]) -> SemesterResult {
    let results: Vec<SubjectResult> = subjects.iter().map(grade_subject).collect();

    let total_credits: u32 = results.iter().map(|result| u32::from(result.credits)).sum();
    let total_earned_credits: u32 = results.iter().map(|result| result.earned_credits).sum();

    SemesterResult {
        subjects: results,
        totals: AggregateResult {
            total_credits,
            total_earned_credits,
            sgpa: sgpa(total_earned_credits, total_credits),
        },
    }
}

pub fn sgpa(total_earned_credits: u32, total_credits: u32) -> f64 {
    if total_credits == 0 {
        0.0
    } else {
        f64::from(total_earned_credits) / f64::from(total_credits)
    }
}

pub fn format_sgpa(sgpa: f64) -> String {
    format!("{sgpa:.2}")
}
