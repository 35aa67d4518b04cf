use std::path::{Path, PathBuf};

use birthrate_charts::{Dataset, FertilityRecord, SourceId};
use tempfile::TempDir;

/// A file written into its own temporary directory, removed on drop
pub struct Fixture {
    _dir: TempDir,
    path: PathBuf,
}

impl Fixture {
    /// Location of the written file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// A fresh, empty directory for one test's files
#[must_use]
pub fn fixture_dir(name: &str) -> TempDir {
    tempfile::Builder::new()
        .prefix(&format!("birthrate-charts-{name}-"))
        .tempdir()
        .expect("create fixture directory")
}

/// Write `contents` to `file_name` inside a fresh fixture directory
#[must_use]
pub fn write_fixture(name: &str, file_name: &str, contents: &str) -> Fixture {
    let dir = fixture_dir(name);
    let path = dir.path().join(file_name);
    std::fs::write(&path, contents).expect("write fixture file");
    Fixture { _dir: dir, path }
}

/// A small dataset in the source layout, with a padded region label
pub const SAMPLE_CSV: &str = "\
name,region,year,tfr,population
Mexico,Latin America & Caribbean,1987,3.7,80000000
Mexico,Latin America & Caribbean,1988,3.5,82000000
Mexico,Latin America & Caribbean,1989,3.4,84000000
Brazil,Latin America & Caribbean ,1987,3.1,140000000
Brazil,Latin America & Caribbean ,1988,2.9,142000000
Brazil,Latin America & Caribbean ,1989,2.8,144000000
France,Europe & Central Asia,1987,1.8,56000000
France,Europe & Central Asia,1988,1.8,56300000
France,Europe & Central Asia,1989,1.8,56600000
Norway,Europe & Central Asia ,1987,1.75,4200000
Norway,Europe & Central Asia ,1988,1.84,4210000
Norway,Europe & Central Asia ,1989,1.89,4230000
";

/// Records for tests that do not go through the loader
#[must_use]
pub fn sample_records() -> Vec<FertilityRecord> {
    vec![
        FertilityRecord::new("Mexico", "Latin America & Caribbean", 1987, 3.7, 80.0),
        FertilityRecord::new("Mexico", "Latin America & Caribbean", 1988, 3.5, 82.0),
        FertilityRecord::new("Brazil", "Latin America & Caribbean", 1987, 3.1, 140.0),
        FertilityRecord::new("Brazil", "Latin America & Caribbean", 1988, 2.9, 142.0),
        FertilityRecord::new("France", "Europe & Central Asia", 1987, 1.8, 56.0),
        FertilityRecord::new("France", "Europe & Central Asia", 1988, 1.8, 56.3),
    ]
}

/// Dataset built from [`sample_records`]
#[must_use]
pub fn sample_dataset() -> Dataset {
    Dataset::from_records(SourceId::in_memory(), sample_records())
}

/// Compare floats with a tolerance suited to chart coordinates
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
