use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::{
    config::ConvertConfig,
    foundation::error::{GridGifError, GridGifResult},
    pipeline::{ConvertSummary, convert_file, output_path_for},
};

/// Outcome for one input file.
#[derive(Debug)]
pub struct FileOutcome {
    /// Source log.
    pub input: PathBuf,
    /// Summary on success, the error that aborted this file otherwise.
    pub result: GridGifResult<ConvertSummary>,
}

/// Per-file outcomes in configured input order.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// One entry per input.
    pub outcomes: Vec<FileOutcome>,
}

impl BatchReport {
    /// Successful conversions.
    pub fn succeeded(&self) -> impl Iterator<Item = &ConvertSummary> {
        self.outcomes.iter().filter_map(|o| o.result.as_ref().ok())
    }

    /// Failed inputs and their errors.
    pub fn failed(&self) -> impl Iterator<Item = (&Path, &GridGifError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.input.as_path(), e)))
    }

    /// Number of failed inputs.
    pub fn failure_count(&self) -> usize {
        self.failed().count()
    }

    /// `true` when every input converted.
    pub fn is_success(&self) -> bool {
        self.failure_count() == 0
    }
}

/// Key under which two output paths count as the same file.
fn output_key(path: &Path) -> PathBuf {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    match (parent.canonicalize(), path.file_name()) {
        (Ok(dir), Some(name)) => dir.join(name),
        _ => path.to_path_buf(),
    }
}

/// Output path for each input. Inputs whose output was already claimed by an earlier input
/// get an error instead.
fn plan_outputs(inputs: &[PathBuf], out_dir: Option<&Path>) -> Vec<GridGifResult<PathBuf>> {
    let mut claimed: HashMap<PathBuf, &Path> = HashMap::new();
    inputs
        .iter()
        .map(|input| {
            let output = output_path_for(input, out_dir);
            match claimed.entry(output_key(&output)) {
                Entry::Occupied(first) => Err(GridGifError::validation(format!(
                    "output path '{}' collides with input '{}'",
                    output.display(),
                    first.get().display()
                ))),
                Entry::Vacant(slot) => {
                    slot.insert(input);
                    Ok(output)
                }
            }
        })
        .collect()
}

/// Convert every input in `cfg`.
///
/// Returns `Err` only for invalid configuration. Per-file failures are logged and recorded
/// in the report, and the remaining files are still attempted. When two inputs map to the
/// same output, the later one fails and the earlier one is converted.
pub fn run_batch(cfg: &ConvertConfig) -> GridGifResult<BatchReport> {
    cfg.validate()?;
    let markers = cfg.marker_set()?;
    let opts = cfg.encode_opts()?;
    let jobs: Vec<(&PathBuf, GridGifResult<PathBuf>)> = cfg
        .inputs
        .iter()
        .zip(plan_outputs(&cfg.inputs, cfg.out_dir.as_deref()))
        .collect();

    let convert_one = |(input, planned): (&PathBuf, GridGifResult<PathBuf>)| -> FileOutcome {
        let result = planned.and_then(|output| convert_file(input, &output, &markers, &opts));
        if let Err(e) = &result {
            tracing::error!(input = %input.display(), error = %e, "conversion failed");
        }
        FileOutcome {
            input: input.clone(),
            result,
        }
    };

    let outcomes = if cfg.parallel && jobs.len() > 1 {
        let pool = build_thread_pool(cfg.threads)?;
        pool.install(|| jobs.into_par_iter().map(convert_one).collect())
    } else {
        jobs.into_iter().map(convert_one).collect()
    };

    let report = BatchReport { outcomes };
    tracing::info!(
        total = report.outcomes.len(),
        failed = report.failure_count(),
        "batch finished"
    );
    Ok(report)
}

fn build_thread_pool(threads: Option<usize>) -> GridGifResult<rayon::ThreadPool> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| GridGifError::validation(format!("failed to build rayon thread pool: {e}")))
}
