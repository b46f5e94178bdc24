use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sgpa_wizard::{
    grade, input, interactive, motivation, report, sgpa, FinalSummary, Gender, PersonalInfoDraft,
    SemesterResult, Wizard, WizardError,
};

#[derive(Parser)]
#[command(name = "sgpa-wizard")]
#[command(about = "Semester grade point average calculator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the grade and grade points for a mark
    Grade {
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
        marks: u8,
    },
    /// List the SGPA message tiers
    Tiers,
    /// Calculate SGPA from a CSV of subjects
    Calculate {
        #[command(flatten)]
        student: StudentArgs,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Generate a markdown report
    Report {
        #[command(flatten)]
        student: StudentArgs,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
    /// Walk through the calculator step by step
    Wizard,
}

#[derive(Args)]
struct StudentArgs {
    #[arg(long)]
    name: String,
    #[arg(long, value_enum)]
    gender: Gender,
    /// CSV with a `name,marks,credits` header
    #[arg(long)]
    csv: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "sgpa_wizard=info".into());
    let log_format = std::env::var("SGPA_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Grade { marks } => {
            let (points, grade) = grade::map_marks(marks);
            println!("{marks} marks -> grade {grade} ({points} grade points)");
        }
        Commands::Tiers => {
            for tier in motivation::TIERS.iter() {
                let bound = if tier.min_sgpa.is_finite() {
                    format!(">= {}", sgpa::format_sgpa(tier.min_sgpa))
                } else {
                    "below".to_string()
                };
                println!("- {bound:<7} {} {}", tier.emoji, tier.title);
            }
        }
        Commands::Calculate { student, format } => {
            let (summary, results) = grade_student(&student)?;
            match format {
                OutputFormat::Text => {
                    print!("{}", report::results_table(&results));
                    println!();
                    print!("{}", report::final_block(&summary));
                }
                OutputFormat::Json => {
                    println!("{}", report::to_json(&summary, &results)?);
                }
            }
        }
        Commands::Report { student, out } => {
            let (summary, results) = grade_student(&student)?;
            let today = chrono::Local::now().date_naive();
            let report = report::build_report(today, &summary, &results);
            std::fs::write(&out, report)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
        Commands::Wizard => {
            let stdin = std::io::stdin();
            interactive::run(stdin.lock(), std::io::stdout())?;
        }
    }

    Ok(())
}

/// Runs the wizard non-interactively: personal info from flags, subjects from CSV.
fn grade_student(student: &StudentArgs) -> anyhow::Result<(FinalSummary, SemesterResult)> {
    let drafts = input::load_subjects(&student.csv)?;
    let mut wizard = Wizard::new();

    wizard.submit_personal_info(&PersonalInfoDraft {
        name: student.name.clone(),
        gender: student.gender.to_string(),
    })?;

    let results = match wizard.submit_subjects(&drafts) {
        Ok(results) => results.clone(),
        Err(WizardError::Validation(errors)) => {
            for error in &errors {
                eprintln!("{}: {}", error.field, error.message());
            }
            bail!("{} in {}", errors, student.csv.display());
        }
        Err(other) => return Err(other.into()),
    };

    let summary = wizard.view_final()?;
    Ok((summary, results))
}
