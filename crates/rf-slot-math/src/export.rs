//! Outcome export — JSON document and flat CSV summary

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::ExportError;
use crate::outcome::{Outcome, OutcomeTable};

/// JSON document file name
pub const OUTCOMES_JSON: &str = "outcomes.json";
/// CSV summary file name
pub const SUMMARY_CSV: &str = "outcomes_summary.csv";

/// One row of the CSV summary
#[derive(Debug, Serialize)]
struct SummaryRow<'a> {
    id: &'a str,
    mode: &'static str,
    probability: f64,
    multiplier: u32,
    #[serde(rename = "cascadeBase")]
    cascade_base: u32,
    #[serde(rename = "freeSpinsAward")]
    free_spins_award: u32,
    #[serde(rename = "pickBonus")]
    pick_bonus: bool,
}

impl<'a> From<&'a Outcome> for SummaryRow<'a> {
    fn from(outcome: &'a Outcome) -> Self {
        Self {
            id: &outcome.id,
            mode: outcome.mode.as_str(),
            probability: outcome.probability,
            multiplier: outcome.multiplier,
            cascade_base: outcome.cascade_multiplier_base,
            free_spins_award: outcome.free_spins_award,
            pick_bonus: outcome.triggers.pick_bonus,
        }
    }
}

/// Write `{ "outcomes": [...] }` to `path`
pub fn export_json(table: &OutcomeTable, path: impl AsRef<Path>) -> Result<(), ExportError> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, table)?;
    writer.flush()?;
    Ok(())
}

/// Write the flat summary to `path`
pub fn export_summary_csv(table: &OutcomeTable, path: impl AsRef<Path>) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_path(path)?;
    for outcome in table {
        writer.serialize(SummaryRow::from(outcome))?;
    }
    writer.flush()?;
    Ok(())
}

/// Paths written by an export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub json_path: PathBuf,
    pub csv_path: PathBuf,
    pub outcome_count: usize,
}

/// Writes both artifacts into one directory
#[derive(Debug, Clone)]
pub struct OutcomeExporter {
    out_dir: PathBuf,
}

impl OutcomeExporter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Create the directory and write the JSON document and CSV summary
    pub fn export(&self, table: &OutcomeTable) -> Result<ExportReport, ExportError> {
        fs::create_dir_all(&self.out_dir)?;

        let json_path = self.out_dir.join(OUTCOMES_JSON);
        let csv_path = self.out_dir.join(SUMMARY_CSV);
        export_json(table, &json_path)?;
        export_summary_csv(table, &csv_path)?;

        log::info!(
            "Exported {} outcomes to {} and CSV summary to {}",
            table.len(),
            json_path.display(),
            csv_path.display()
        );

        Ok(ExportReport {
            json_path,
            csv_path,
            outcome_count: table.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bucket::BucketCatalog;
    use crate::config::GeneratorConfig;
    use crate::generator::OutcomeGenerator;

    fn small_table() -> OutcomeTable {
        let mut generator =
            OutcomeGenerator::new(GeneratorConfig::default().with_samples(2)).unwrap();
        generator.generate(&BucketCatalog::base_default(), &BucketCatalog::free_default())
    }

    #[test]
    fn test_export_writes_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("public").join("outcomes");
        let table = small_table();

        let report = OutcomeExporter::new(&out).export(&table).unwrap();
        assert_eq!(report.outcome_count, 22);
        assert_eq!(report.json_path, out.join(OUTCOMES_JSON));
        assert!(report.json_path.exists());
        assert!(report.csv_path.exists());
    }

    #[test]
    fn test_json_round_trips_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(OUTCOMES_JSON);
        let table = small_table();

        export_json(&table, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["outcomes"].as_array().map(|a| a.len()), Some(22));
        assert_eq!(value["outcomes"][0]["id"], "BASE_NOWIN-0");
        assert_eq!(value["outcomes"][0]["payTable"]["A"]["4"], 2);

        let back: OutcomeTable = serde_json::from_str(&text).unwrap();
        assert_eq!(back.len(), table.len());
        for (read, written) in back.iter().zip(table.iter()) {
            assert_eq!(read.id, written.id);
            assert_eq!(read.initial_grid, written.initial_grid);
            assert_eq!(read.pay_table, written.pay_table);
        }
    }

    #[test]
    fn test_csv_summary_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SUMMARY_CSV);
        let table = small_table();

        export_summary_csv(&table, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("id,mode,probability,multiplier,cascadeBase,freeSpinsAward,pickBonus")
        );
        assert_eq!(text.lines().count(), 1 + table.len());

        let pick = text
            .lines()
            .find(|l| l.starts_with("BASE_PICK-0,"))
            .unwrap();
        assert!(pick.starts_with("BASE_PICK-0,BASE,"));
        assert!(pick.ends_with(",1,1,0,true"));

        let retrig = text
            .lines()
            .find(|l| l.starts_with("FREE_RETRIG-1,"))
            .unwrap();
        assert!(retrig.ends_with(",2,2,5,false"));
    }

    #[test]
    fn test_export_into_file_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();

        let result = OutcomeExporter::new(blocker.join("out")).export(&small_table());
        assert!(matches!(result, Err(ExportError::Io(_))));
    }
}
