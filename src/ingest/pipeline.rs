use std::io::BufRead;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{info, trace, warn};
use rayon::prelude::*;

use super::report::{LineFailure, Phase, PhaseReport};
use crate::error::{IngestError, MapError};
use crate::mapping::{DatePolicy, map_author, map_work};
use crate::models::{Author, Book};
use crate::parsers::{DumpLine, DumpReader, extract_record};
use crate::store::{Entity, Repository};

/// Lines handed to the worker pool at a time.
pub const DEFAULT_BATCH_SIZE: usize = 1024;

/// Tuning and policy knobs shared by both phases.
#[derive(Debug, Clone)]
pub struct IngestOptions {
    pub batch_size: usize,
    /// Worker threads; `None` lets rayon pick from the available parallelism.
    pub jobs: Option<usize>,
    pub date_policy: DatePolicy,
    cancel: Arc<AtomicBool>,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            jobs: None,
            date_policy: DatePolicy::default(),
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl IngestOptions {
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_jobs(mut self, jobs: Option<usize>) -> Self {
        self.jobs = jobs;
        self
    }

    pub fn with_date_policy(mut self, date_policy: DatePolicy) -> Self {
        self.date_policy = date_policy;
        self
    }

    /// Flag that stops a running phase before its next batch when set to `true`.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }

    fn build_pool(&self) -> Result<rayon::ThreadPool, IngestError> {
        Ok(rayon::ThreadPoolBuilder::new().num_threads(self.jobs.unwrap_or(0)).build()?)
    }
}

/// Run the author phase over an already-open dump.
pub fn load_authors<R, A>(
    lines: DumpReader<R>,
    authors: &A,
    options: &IngestOptions,
) -> Result<PhaseReport, IngestError>
where
    R: BufRead,
    A: Repository<Author> + ?Sized,
{
    run_phase(Phase::Authors, lines, authors, options, |text| {
        Ok(map_author(extract_record(text)?)?)
    })
}

/// Run the work phase over an already-open dump, resolving author names against `authors`.
///
/// The author phase must have completed (and flushed) before this is called.
pub fn load_works<R, A, B>(
    lines: DumpReader<R>,
    authors: &A,
    books: &B,
    options: &IngestOptions,
) -> Result<PhaseReport, IngestError>
where
    R: BufRead,
    A: Repository<Author> + ?Sized,
    B: Repository<Book> + ?Sized,
{
    let date_policy = options.date_policy;
    run_phase(Phase::Works, lines, books, options, |text| {
        map_work(extract_record(text)?, authors, date_policy)
    })
}

/// Open an author dump file and run the author phase over it.
pub fn load_author_dump<A>(
    path: &Path,
    authors: &A,
    options: &IngestOptions,
) -> Result<PhaseReport, IngestError>
where
    A: Repository<Author> + ?Sized,
{
    info!("Loading authors from {}", path.display());
    load_authors(DumpReader::open(path)?, authors, options)
}

/// Open a works dump file and run the work phase over it.
pub fn load_work_dump<A, B>(
    path: &Path,
    authors: &A,
    books: &B,
    options: &IngestOptions,
) -> Result<PhaseReport, IngestError>
where
    A: Repository<Author> + ?Sized,
    B: Repository<Book> + ?Sized,
{
    info!("Loading works from {}", path.display());
    load_works(DumpReader::open(path)?, authors, books, options)
}

/// Shared phase driver.
///
/// Lines are mapped in parallel one batch at a time, then saved sequentially in line order, so
/// persistence order and failure attribution match the dump regardless of thread count. The sink
/// is flushed even when the phase fails, so records already saved are not lost.
fn run_phase<R, E, S, F>(
    phase: Phase,
    mut lines: DumpReader<R>,
    sink: &S,
    options: &IngestOptions,
    map: F,
) -> Result<PhaseReport, IngestError>
where
    R: BufRead,
    E: Entity,
    S: Repository<E> + ?Sized,
    F: Fn(&str) -> Result<E, MapError> + Sync,
{
    let mut report = PhaseReport::new(phase);

    if let Err(error) = drive_batches(&mut lines, sink, options, &map, &mut report) {
        if let Err(flush_error) = sink.flush() {
            warn!("Failed to flush {phase} store after error: {flush_error}");
        } else {
            info!("{phase} phase failed after {} records were saved", report.persisted);
        }
        return Err(error);
    }

    report.lines_read = lines.lines_consumed();
    sink.flush().map_err(|source| IngestError::Flush { phase: phase.name(), source })?;
    info!("{report}");

    Ok(report)
}

fn drive_batches<R, E, S, F>(
    lines: &mut DumpReader<R>,
    sink: &S,
    options: &IngestOptions,
    map: &F,
    report: &mut PhaseReport,
) -> Result<(), IngestError>
where
    R: BufRead,
    E: Entity,
    S: Repository<E> + ?Sized,
    F: Fn(&str) -> Result<E, MapError> + Sync,
{
    let phase = report.phase;
    let pool = options.build_pool()?;
    let batch_size = options.batch_size.max(1);

    loop {
        if options.is_cancelled() {
            info!("{phase} phase cancelled after {} lines", lines.lines_consumed());
            report.cancelled = true;
            return Ok(());
        }

        let batch: Vec<DumpLine> =
            lines.by_ref().take(batch_size).collect::<Result<_, IngestError>>()?;
        if batch.is_empty() {
            return Ok(());
        }

        let results: Vec<(usize, Result<E, MapError>)> = pool.install(|| {
            batch.par_iter().map(|line| (line.number, map(&line.text))).collect()
        });

        for (line, result) in results {
            match result {
                Ok(entity) => {
                    sink.save(&entity).map_err(|source| IngestError::Store {
                        id: entity.id().to_string(),
                        source,
                    })?;
                    trace!("Saved {} {}", E::COLLECTION, entity.id());
                    report.persisted += 1;
                }
                Err(MapError::Record(error)) => {
                    warn!("Skipping {phase} dump line {line}: {error}");
                    report.failures.push(LineFailure { line, error });
                }
                Err(MapError::Store { id, source }) => {
                    return Err(IngestError::Store { id, source });
                }
            }
        }
    }
}
