//! Drives an ETL run: locate files, extract their rows and apply each file's
//! rows to the warehouse as one unit of work.

use crate::config::EtlSettings;
use crate::error::EtlError;
use crate::extract::Dataset;
use crate::locator::{locate_files, FilePattern};
use crate::warehouse::{RowBatch, SqliteWarehouseStore, TableCounts, WarehouseStore};
use anyhow::Result;
use std::path::Path;
use tracing::{error, info, warn};

/// Outcome of loading one dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadStats {
    pub dataset: Dataset,
    pub files_found: usize,
    pub files_processed: usize,
    pub files_failed: usize,
    /// Rows extracted from successfully committed files. Rows ignored by the
    /// store on conflict are still counted here.
    pub rows: TableCounts,
}

impl LoadStats {
    fn new(dataset: Dataset) -> Self {
        LoadStats {
            dataset,
            files_found: 0,
            files_processed: 0,
            files_failed: 0,
            rows: TableCounts::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub songs: LoadStats,
    pub logs: LoadStats,
    /// Row counts of every table once the run has finished.
    pub totals: TableCounts,
}

pub struct Loader<S: WarehouseStore> {
    store: S,
    continue_on_error: bool,
}

impl<S: WarehouseStore> Loader<S> {
    pub fn new(store: S, continue_on_error: bool) -> Self {
        Loader {
            store,
            continue_on_error,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load every file under `root` matching `pattern` as `dataset`.
    ///
    /// Each file is committed on its own. Unless `continue_on_error` is set,
    /// the first failing file aborts the load; files committed before it stay
    /// in the warehouse.
    pub fn process_data(
        &mut self,
        root: &Path,
        dataset: Dataset,
        pattern: &FilePattern,
    ) -> Result<LoadStats, EtlError> {
        let files = locate_files(root, pattern)?;
        let total = files.len();
        let mut stats = LoadStats::new(dataset);
        stats.files_found = total;

        for (i, path) in files.iter().enumerate() {
            match self.load_file(path, dataset) {
                Ok(batch) => {
                    stats.files_processed += 1;
                    stats.rows.add(&batch);
                }
                Err(e) => {
                    error!("Failed to load {} file {:?}: {}", dataset, path, e);
                    stats.files_failed += 1;
                    if !self.continue_on_error {
                        return Err(e);
                    }
                }
            }
            info!("{}/{} files processed.", i + 1, total);
        }

        Ok(stats)
    }

    fn load_file(&mut self, path: &Path, dataset: Dataset) -> Result<RowBatch, EtlError> {
        let batch = dataset.extract(path, &self.store)?;
        if batch.is_empty() {
            return Ok(batch);
        }
        self.store.apply_batch(&batch)?;
        Ok(batch)
    }
}

impl Loader<SqliteWarehouseStore> {
    /// Run the whole pipeline: song data first, so that log events can be
    /// resolved against the songs it loaded, then log data.
    pub fn run(settings: &EtlSettings) -> Result<RunSummary> {
        let store = SqliteWarehouseStore::open(&settings.db_path, &settings.store)?;
        let mut loader = Loader::new(store, settings.continue_on_error);

        info!("Loading song data from {:?}", settings.song_data);
        let songs =
            loader.process_data(&settings.song_data, Dataset::Songs, &settings.file_pattern)?;

        info!("Loading log data from {:?}", settings.log_data);
        let logs = loader.process_data(&settings.log_data, Dataset::Logs, &settings.file_pattern)?;

        let totals = loader.store().get_counts()?;
        let summary = RunSummary {
            songs,
            logs,
            totals,
        };
        log_summary(&summary);
        Ok(summary)
    }
}

fn log_summary(summary: &RunSummary) {
    info!("");
    info!("ETL Summary");
    info!("===========");
    for stats in [&summary.songs, &summary.logs] {
        info!(
            "{}: {}/{} files loaded",
            stats.dataset, stats.files_processed, stats.files_found
        );
        if stats.files_failed > 0 {
            warn!("{}: {} files failed", stats.dataset, stats.files_failed);
        }
    }

    let mut rows = summary.songs.rows;
    rows.merge(&summary.logs.rows);
    info!(
        "Rows applied: {} songs, {} artists, {} time entries, {} users, {} songplays",
        rows.songs, rows.artists, rows.time, rows.users, rows.songplays
    );

    let totals = &summary.totals;
    info!("");
    info!("Warehouse contains:");
    info!("  {} songs", totals.songs);
    info!("  {} artists", totals.artists);
    info!("  {} time entries", totals.time);
    info!("  {} users", totals.users);
    info!("  {} songplays", totals.songplays);
}
