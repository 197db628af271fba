//! Corpus aggregation - parallel per-file extraction merged in discovery order.
//!
//! Each file is extracted independently on a rayon worker. Results are
//! collected back in input order so the output is deterministic regardless of
//! scheduling. A failing file is logged and left out; it never aborts the run.

use crate::config::CallgraphConfig;
use crate::discovery::{discover_source_files, SourceFile};
use crate::errors::SinkError;
use crate::extractors::base::{Declaration, ExtractOptions};
use crate::extractors::ExtractorManager;
use crate::sink::write_records;
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Language every discovered corpus file is parsed as
const CORPUS_LANGUAGE: &str = "go";

/// Cooperative stop signal checked before each file is started
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// A file that was dropped from the run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    pub path: String,
    pub error: String,
}

/// Outcome of one corpus run
#[derive(Debug, Clone, Default)]
pub struct CorpusReport {
    /// All records, file-then-declaration order
    pub records: Vec<Declaration>,
    /// Files that were extracted successfully
    pub files_processed: usize,
    pub failures: Vec<FileFailure>,
    /// True when cancellation left some files unstarted
    pub cancelled: bool,
}

/// Callback invoked on the worker thread once a file has been extracted or failed
pub type FileDoneHook = dyn Fn(&SourceFile) + Send + Sync;

enum FileOutcome {
    Extracted(Vec<Declaration>),
    Failed(FileFailure),
    Skipped,
}

/// Runs the per-file extractor over a corpus
pub struct CorpusAggregator {
    manager: ExtractorManager,
    options: ExtractOptions,
    threads: Option<usize>,
    cancellation: CancellationToken,
    on_file_done: Option<Box<FileDoneHook>>,
}

impl CorpusAggregator {
    pub fn new(options: ExtractOptions) -> Self {
        Self {
            manager: ExtractorManager::new(),
            options,
            threads: None,
            cancellation: CancellationToken::new(),
            on_file_done: None,
        }
    }

    /// Limit the worker pool; `None` keeps rayon's default size
    pub fn with_threads(mut self, threads: Option<usize>) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Observe each finished file (not called for files skipped by cancellation)
    pub fn on_file_done<F>(mut self, hook: F) -> Self
    where
        F: Fn(&SourceFile) + Send + Sync + 'static,
    {
        self.on_file_done = Some(Box::new(hook));
        self
    }

    /// Extract every file and merge the results in input order
    pub fn run(&self, files: &[SourceFile]) -> CorpusReport {
        let outcomes = match self.threads {
            Some(threads) => match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
                Ok(pool) => pool.install(|| self.extract_all(files)),
                Err(e) => {
                    warn!("Failed to build {}-thread pool, using the global pool: {}", threads, e);
                    self.extract_all(files)
                }
            },
            None => self.extract_all(files),
        };

        let mut report = CorpusReport::default();
        for outcome in outcomes {
            match outcome {
                FileOutcome::Extracted(records) => {
                    report.files_processed += 1;
                    report.records.extend(records);
                }
                FileOutcome::Failed(failure) => report.failures.push(failure),
                FileOutcome::Skipped => report.cancelled = true,
            }
        }
        report
    }

    fn extract_all(&self, files: &[SourceFile]) -> Vec<FileOutcome> {
        files
            .par_iter()
            .map(|file| {
                if self.cancellation.is_cancelled() {
                    return FileOutcome::Skipped;
                }

                let outcome = match self.manager.extract_file_as(
                    &file.path,
                    &file.display_path,
                    CORPUS_LANGUAGE,
                    &self.options,
                ) {
                    Ok(records) => FileOutcome::Extracted(records),
                    Err(e) => {
                        warn!("Skipping {}: {}", file.display_path, e);
                        FileOutcome::Failed(FileFailure {
                            path: file.display_path.clone(),
                            error: e.to_string(),
                        })
                    }
                };

                if let Some(hook) = &self.on_file_done {
                    hook(file);
                }
                outcome
            })
            .collect()
    }
}

/// Discover, extract and write one run according to `config`
///
/// Per-file failures are reported in the returned report. Only a sink failure
/// is an error; in that case nothing from this run reaches the sink.
pub fn run(config: &CallgraphConfig, token: CancellationToken) -> Result<CorpusReport, SinkError> {
    let files = discover_source_files(&config.root, &config.suffixes, &config.exclude);
    info!("Extracting {} files under {}", files.len(), config.root.display());

    let total = files.len();
    let finished = Arc::new(AtomicUsize::new(0));
    let progress = Arc::clone(&finished);
    let report = CorpusAggregator::new(config.extract_options())
        .with_threads(config.threads)
        .with_cancellation(token)
        .on_file_done(move |file| {
            let done = progress.fetch_add(1, Ordering::Relaxed) + 1;
            debug!("[{}/{}] {}", done, total, file.display_path);
        })
        .run(&files);

    if report.cancelled {
        warn!(
            "Run cancelled after {} of {} files",
            finished.load(Ordering::Relaxed),
            total
        );
    }

    if let Err(e) = write_records(&config.output, &report.records, config.write_mode) {
        error!("Failed to write {}: {}", config.output.display(), e);
        return Err(e);
    }

    info!(
        "Wrote {} declarations from {} files to {} ({} failed)",
        report.records.len(),
        report.files_processed,
        config.output.display(),
        report.failures.len()
    );
    Ok(report)
}
