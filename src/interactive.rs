//! Line-oriented front end for the wizard.

use std::io::{BufRead, Write};

use anyhow::Context;

use crate::models::{FinalSummary, Gender, PersonalInfoDraft, SubjectDraft};
use crate::report;
use crate::validate::{self, ValidationErrors, SUBJECT_COUNT_RANGE};
use crate::wizard::{Stage, Wizard, WizardError};

struct Terminal<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    /// `None` once input is exhausted.
    fn ask(&mut self, label: &str) -> anyhow::Result<Option<String>> {
        write!(self.output, "{label}: ")?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("failed to read from input")?;
        if read == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Like [`Terminal::ask`], but an empty answer keeps `default`.
    fn ask_or_keep(
        &mut self,
        label: &str,
        default: Option<&str>,
    ) -> anyhow::Result<Option<String>> {
        let Some(default) = default else {
            return self.ask(label);
        };
        let answer = self.ask(&format!("{label} [{default}]"))?;
        Ok(answer.map(|answer| {
            if answer.is_empty() {
                default.to_string()
            } else {
                answer
            }
        }))
    }

    fn ask_number(&mut self, label: &str, default: Option<i64>) -> anyhow::Result<Option<i64>> {
        let default = default.map(|value| value.to_string());
        loop {
            let Some(answer) = self.ask_or_keep(label, default.as_deref())? else {
                return Ok(None);
            };
            match answer.parse::<i64>() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => writeln!(self.output, "  Please enter a whole number.")?,
            }
        }
    }

    fn show_errors(&mut self, errors: &ValidationErrors) -> anyhow::Result<()> {
        for error in errors {
            writeln!(self.output, "  - {}", error.message())?;
        }
        Ok(())
    }

    fn header(&mut self, wizard: &Wizard) -> anyhow::Result<()> {
        let progress = wizard.progress();
        writeln!(self.output)?;
        writeln!(
            self.output,
            "== {} ({progress}, {:.0}% complete) ==",
            wizard.stage(),
            progress.percent
        )?;
        Ok(())
    }
}

enum Flow {
    Continue,
    Finished,
}

/// Runs one wizard session over `input`/`output` until the user quits or the
/// input ends. Returns the last final score that was shown, if any.
pub fn run<R: BufRead, W: Write>(input: R, output: W) -> anyhow::Result<Option<FinalSummary>> {
    let mut terminal = Terminal { input, output };
    let mut wizard = Wizard::new();
    let mut last_summary = None;
    tracing::info!(session = %wizard.session_id(), "wizard started");

    loop {
        terminal.header(&wizard)?;
        let flow = match wizard.stage() {
            Stage::CollectingPersonalInfo => personal_info_stage(&mut terminal, &mut wizard)?,
            Stage::CollectingSubjects => subjects_stage(&mut terminal, &mut wizard)?,
            Stage::ShowingResults => results_stage(&mut terminal, &mut wizard)?,
            Stage::ShowingFinal => final_stage(&mut terminal, &mut wizard, &mut last_summary)?,
        };
        if let Flow::Finished = flow {
            tracing::info!(session = %wizard.session_id(), "wizard finished");
            return Ok(last_summary);
        }
    }
}

fn personal_info_stage<R: BufRead, W: Write>(
    terminal: &mut Terminal<R, W>,
    wizard: &mut Wizard,
) -> anyhow::Result<Flow> {
    let saved = wizard.personal_info().cloned();
    let saved_name = saved.as_ref().map(|info| info.name.as_str());
    let Some(name) = terminal.ask_or_keep("Full name", saved_name)? else {
        return Ok(Flow::Finished);
    };
    let choices = Gender::ALL
        .iter()
        .map(Gender::as_str)
        .collect::<Vec<_>>()
        .join("/");
    let saved_gender = saved.as_ref().map(|info| info.gender.as_str());
    let Some(gender) = terminal.ask_or_keep(&format!("Gender ({choices})"), saved_gender)? else {
        return Ok(Flow::Finished);
    };

    match wizard.submit_personal_info(&PersonalInfoDraft { name, gender }) {
        Ok(_) => {}
        Err(WizardError::Validation(errors)) => terminal.show_errors(&errors)?,
        Err(other) => return Err(other.into()),
    }
    Ok(Flow::Continue)
}

fn subjects_stage<R: BufRead, W: Write>(
    terminal: &mut Terminal<R, W>,
    wizard: &mut Wizard,
) -> anyhow::Result<Flow> {
    let label = format!(
        "Number of subjects ({}-{}, or 'b' to go back)",
        SUBJECT_COUNT_RANGE.start(),
        SUBJECT_COUNT_RANGE.end()
    );
    let saved = wizard.subject_drafts();
    let saved_count = (!saved.is_empty()).then(|| saved.len().to_string());
    let Some(answer) = terminal.ask_or_keep(&label, saved_count.as_deref())? else {
        return Ok(Flow::Finished);
    };
    if answer.eq_ignore_ascii_case("b") {
        wizard.back();
        return Ok(Flow::Continue);
    }

    let mut drafts = match answer.parse::<usize>().ok().map(validate::blank_subjects) {
        Some(Ok(drafts)) => drafts,
        _ => {
            writeln!(
                terminal.output,
                "  Please enter a valid number of subjects ({}-{}).",
                SUBJECT_COUNT_RANGE.start(),
                SUBJECT_COUNT_RANGE.end()
            )?;
            return Ok(Flow::Continue);
        }
    };

    let total = drafts.len();
    for (index, draft) in drafts.iter_mut().enumerate() {
        // Rows accepted earlier in this session are offered as defaults.
        let previous = saved.get(index);
        writeln!(terminal.output, "Subject {}", index + 1)?;
        let Some(name) =
            terminal.ask_or_keep("  Subject name", previous.map(|row| row.name.as_str()))?
        else {
            return Ok(Flow::Finished);
        };
        let Some(marks) =
            terminal.ask_number("  Marks obtained (0-100)", previous.map(|row| row.marks))?
        else {
            return Ok(Flow::Finished);
        };
        let Some(credits) =
            terminal.ask_number("  Credits (1-10)", previous.map(|row| row.credits))?
        else {
            return Ok(Flow::Finished);
        };
        *draft = SubjectDraft::new(name, marks, credits);
    }
    writeln!(
        terminal.output,
        "{} of {total} completed",
        validate::completed_count(&drafts)
    )?;

    match wizard.submit_subjects(&drafts) {
        Ok(_) => {}
        Err(WizardError::Validation(errors)) => terminal.show_errors(&errors)?,
        Err(other) => return Err(other.into()),
    }
    Ok(Flow::Continue)
}

fn results_stage<R: BufRead, W: Write>(
    terminal: &mut Terminal<R, W>,
    wizard: &mut Wizard,
) -> anyhow::Result<Flow> {
    if let Some(results) = wizard.results() {
        write!(terminal.output, "{}", report::results_table(results))?;
    }

    loop {
        let Some(choice) = terminal.ask("[n]ext, [b]ack, [q]uit")? else {
            return Ok(Flow::Finished);
        };
        match choice.to_ascii_lowercase().as_str() {
            "n" | "next" => {
                wizard.view_final()?;
                return Ok(Flow::Continue);
            }
            "b" | "back" => {
                wizard.back();
                return Ok(Flow::Continue);
            }
            "q" | "quit" => return Ok(Flow::Finished),
            _ => writeln!(terminal.output, "  Please choose n, b or q.")?,
        }
    }
}

fn final_stage<R: BufRead, W: Write>(
    terminal: &mut Terminal<R, W>,
    wizard: &mut Wizard,
    last_summary: &mut Option<FinalSummary>,
) -> anyhow::Result<Flow> {
    if let Some(summary) = wizard.final_summary() {
        write!(terminal.output, "{}", report::final_block(&summary))?;
        *last_summary = Some(summary);
    }

    loop {
        let Some(choice) = terminal.ask("[b]ack, [r]estart, [q]uit")? else {
            return Ok(Flow::Finished);
        };
        match choice.to_ascii_lowercase().as_str() {
            "b" | "back" => {
                wizard.back();
                return Ok(Flow::Continue);
            }
            "r" | "restart" => {
                wizard.start_over();
                return Ok(Flow::Continue);
            }
            "q" | "quit" => return Ok(Flow::Finished),
            _ => writeln!(terminal.output, "  Please choose b, r or q.")?,
        }
    }
}
