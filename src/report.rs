use std::fmt::Write;

use chrono::NaiveDate;

use crate::models::{FinalSummary, SemesterResult};
use crate::sgpa::format_sgpa;

pub fn results_table(results: &SemesterResult) -> String {
    let name_width = results
        .subjects
        .iter()
        .map(|subject| subject.name.chars().count())
        .chain(std::iter::once("Subject".len()))
        .max()
        .unwrap_or(0);

    let mut output = String::new();
    let _ = writeln!(
        output,
        "{:<name_width$}  {:>5}  {:>7}  {:>12}  {:>5}",
        "Subject", "Marks", "Credits", "Grade Points", "Grade"
    );
    for subject in &results.subjects {
        let _ = writeln!(
            output,
            "{:<name_width$}  {:>5}  {:>7}  {:>12}  {:>5}",
            subject.name, subject.marks, subject.credits, subject.grade_points, subject.grade
        );
    }
    let _ = writeln!(
        output,
        "{:<name_width$}  {:>5}  {:>7}  {:>12}",
        "TOTAL", "", results.totals.total_credits, results.totals.total_earned_credits
    );
    output
}

pub fn final_block(summary: &FinalSummary) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "Your SGPA: {}", format_sgpa(summary.sgpa));
    let _ = writeln!(output);
    let rows = [
        ("Student", summary.personal_info.name.clone()),
        ("Total subjects", summary.subject_count.to_string()),
        ("Total credits", summary.total_credits.to_string()),
        ("Total earned credits", summary.total_earned_credits.to_string()),
    ];
    for (label, value) in rows {
        let _ = writeln!(output, "{:<22}{value}", format!("{label}:"));
    }
    let _ = writeln!(output);
    let _ = writeln!(
        output,
        "{} {}",
        summary.motivation.emoji, summary.motivation.title
    );
    let _ = writeln!(output, "{}", summary.motivation.message);
    output
}

pub fn build_report(
    generated_on: NaiveDate,
    summary: &FinalSummary,
    results: &SemesterResult,
) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# Semester Grade Report");
    let _ = writeln!(
        output,
        "Generated for {} on {}",
        summary.personal_info.name, generated_on
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Subjects");

    if results.subjects.is_empty() {
        let _ = writeln!(output, "No subjects recorded for this semester.");
    } else {
        let _ = writeln!(output, "| Subject | Marks | Credits | Grade Points | Grade |");
        let _ = writeln!(output, "|---|---|---|---|---|");
        for subject in &results.subjects {
            let _ = writeln!(
                output,
                "| {} | {} | {} | {} | {} |",
                subject.name.replace('|', "\\|"),
                subject.marks,
                subject.credits,
                subject.grade_points,
                subject.grade
            );
        }
        let _ = writeln!(
            output,
            "| **TOTAL** | | {} | {} | |",
            results.totals.total_credits, results.totals.total_earned_credits
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Final Score");
    let _ = writeln!(output, "- SGPA: **{}**", format_sgpa(summary.sgpa));
    let _ = writeln!(output, "- Total subjects: {}", summary.subject_count);
    let _ = writeln!(output, "- Total credits: {}", summary.total_credits);
    let _ = writeln!(output, "- Total earned credits: {}", summary.total_earned_credits);

    let _ = writeln!(output);
    let _ = writeln!(
        output,
        "## {} {}",
        summary.motivation.emoji, summary.motivation.title
    );
    let _ = writeln!(output, "{}", summary.motivation.message);

    output
}

pub fn to_json(summary: &FinalSummary, results: &SemesterResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&serde_json::json!({
        "summary": summary,
        "results": results,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PersonalInfoDraft, SubjectDraft};
    use crate::wizard::Wizard;

    fn graded() -> (FinalSummary, SemesterResult) {
        let mut wizard = Wizard::new();
        wizard
            .submit_personal_info(&PersonalInfoDraft {
                name: "Meera Iyer".to_string(),
                gender: "female".to_string(),
            })
            .unwrap();
        let results = wizard
            .submit_subjects(&[
                SubjectDraft::new("Mathematics", 95, 4),
                SubjectDraft::new("Physics", 72, 3),
                SubjectDraft::new("English", 45, 2),
            ])
            .unwrap()
            .clone();
        (wizard.view_final().unwrap(), results)
    }

    #[test]
    fn table_lists_rows_and_totals() {
        let (_, results) = graded();
        let table = results_table(&results);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[1].starts_with("Mathematics"));
        assert!(lines[1].trim_end().ends_with('O'));
        assert!(lines[2].trim_end().ends_with('A'));
        assert!(lines[4].starts_with("TOTAL"));
        assert!(lines[4].trim_end().ends_with("74"));
    }

    #[test]
    fn final_block_rounds_to_two_places() {
        let (summary, _) = graded();
        let block = final_block(&summary);
        assert!(block.contains("Your SGPA: 8.22"));
        assert!(block.contains("Meera Iyer"));
        assert!(block.contains("Good Work!"));
    }

    #[test]
    fn markdown_report_sections() {
        let (summary, results) = graded();
        let date = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap();
        let report = build_report(date, &summary, &results);
        assert!(report.starts_with("# Semester Grade Report"));
        assert!(report.contains("Generated for Meera Iyer on 2026-05-01"));
        assert!(report.contains("| Physics | 72 | 3 | 8 | A |"));
        assert!(report.contains("| **TOTAL** | | 9 | 74 | |"));
        assert!(report.contains("- SGPA: **8.22**"));
        assert!(report.contains("## 🧠 Good Work!"));
    }

    #[test]
    fn json_carries_camel_case_totals() {
        let (summary, results) = graded();
        let json = to_json(&summary, &results).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["summary"]["totalCredits"], 9);
        assert_eq!(value["summary"]["personalInfo"]["gender"], "female");
        assert_eq!(value["summary"]["motivation"]["title"], "Good Work!");
        assert_eq!(value["results"]["totalEarnedCredits"], 74);
        assert_eq!(value["results"]["subjects"][2]["grade"], "C");
    }
}
