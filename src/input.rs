use std::io::Read;
use std::path::Path;

use anyhow::Context;
use csv::{ReaderBuilder, Trim};

use crate::models::SubjectDraft;

/// Reads `name,marks,credits` rows. Bounds are not checked here; the rows go
/// through the validator like any other form input.
pub fn read_subjects<R: Read>(reader: R) -> anyhow::Result<Vec<SubjectDraft>> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let mut drafts = Vec::new();

    for (index, result) in reader.deserialize::<SubjectDraft>().enumerate() {
        let row = result.with_context(|| format!("invalid subject row {}", index + 1))?;
        drafts.push(row);
    }

    Ok(drafts)
}

pub fn load_subjects(csv_path: &Path) -> anyhow::Result<Vec<SubjectDraft>> {
    let file = std::fs::File::open(csv_path)
        .with_context(|| format!("failed to open {}", csv_path.display()))?;
    let drafts = read_subjects(file)
        .with_context(|| format!("failed to read subjects from {}", csv_path.display()))?;
    tracing::info!(path = %csv_path.display(), rows = drafts.len(), "subjects imported");
    Ok(drafts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_trimmed_rows_in_order() {
        let data = "name,marks,credits\n Mathematics , 95, 4\nPhysics,72,3\n";
        let drafts = read_subjects(data.as_bytes()).unwrap();
        assert_eq!(
            drafts,
            vec![
                SubjectDraft::new("Mathematics", 95, 4),
                SubjectDraft::new("Physics", 72, 3),
            ]
        );
    }

    #[test]
    fn keeps_out_of_range_values_for_the_validator() {
        let data = "name,marks,credits\nArt,-5,12\n";
        let drafts = read_subjects(data.as_bytes()).unwrap();
        assert_eq!(drafts[0].marks, -5);
        assert_eq!(drafts[0].credits, 12);
    }

    #[test]
    fn non_numeric_marks_are_an_error() {
        let data = "name,marks,credits\nArt,lots,2\n";
        let err = read_subjects(data.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("row 1"));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name,marks,credits").unwrap();
        writeln!(file, "Thesis,100,10").unwrap();
        let drafts = load_subjects(file.path()).unwrap();
        assert_eq!(drafts, vec![SubjectDraft::new("Thesis", 100, 10)]);
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.csv");
        let err = load_subjects(&path).unwrap_err();
        assert!(err.to_string().contains("missing.csv"));
    }
}
