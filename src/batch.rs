// src/batch.rs
use std::{
    any::Any,
    collections::HashMap,
    io::Write,
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicUsize, Ordering},
        mpsc, Arc,
    },
    thread,
};

use walkdir::WalkDir;

use crate::{
    config::consts::TRASH_SUFFIX,
    config::options::BatchOptions,
    core::sanitize::sanitize_file_stem,
    error::{Error, Result},
    file::{ensure_directory, resolve_unique_filename, write_text},
    parser::{self, Reconciliation},
    progress::Progress,
    report,
};

pub struct ParsedFile {
    pub reconciliation: Reconciliation,
    /// None when nothing resolved, so nothing was written.
    pub written: Option<PathBuf>,
}

pub struct FileOutcome {
    pub path: PathBuf,
    pub result: Result<ParsedFile>,
}

#[derive(Default)]
pub struct BatchSummary {
    /// Sorted by input path.
    pub outcomes: Vec<FileOutcome>,
}

impl BatchSummary {
    pub fn written(&self) -> Vec<&Path> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok()?.written.as_deref())
            .collect()
    }

    pub fn error_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_err()).count()
    }
}

/// Every file under `dir` whose path ends with the components of `suffix`, sorted.
/// `Trash.lua` picks `Karazhan/Trash.lua` but not `Karazhan/MoroesTrash.lua`.
pub fn find_inputs(dir: &Path, suffix: &str) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in WalkDir::new(dir) {
        let entry = entry?;
        if entry.file_type().is_file() && entry.path().ends_with(suffix) {
            paths.push(entry.into_path());
        }
    }
    paths.sort();
    Ok(paths)
}

/// Parse every matching file and write one NPC list per file that resolved anything.
pub fn run(
    opts: &BatchOptions,
    mut progress: Option<&mut dyn Progress>,
) -> Result<BatchSummary> {
    let paths = find_inputs(&opts.input_dir, &opts.suffix)?;
    ensure_directory(&opts.output_dir)?;

    if paths.is_empty() {
        if let Some(p) = progress.as_deref_mut() {
            p.log("No matching files.");
        }
        return Ok(BatchSummary::default());
    }

    if let Some(p) = progress.as_deref_mut() {
        p.begin(paths.len());
    }

    let parsed = parse_all(
        &paths,
        opts.workers,
        &opts.input_dir,
        parser::parse_file,
        progress.as_deref_mut(),
    );

    // Writes stay on this thread so duplicate naming is deterministic.
    let mut seen = HashMap::new();
    let mut outcomes = Vec::with_capacity(paths.len());
    for (path, result) in paths.into_iter().zip(parsed) {
        let result = result.and_then(|reconciliation| {
            let written = if reconciliation.resolved.is_empty() {
                None
            } else {
                let out = output_path(opts, &path, &reconciliation, &mut seen);
                write_text(&out, &report::render_resolved(&reconciliation, opts.format)?)?;
                tracing::debug!("Wrote {}", out.display());
                Some(out)
            };
            Ok(ParsedFile { reconciliation, written })
        });
        if let Err(e) = &result {
            tracing::warn!("{}: {e}", path.display());
        }
        outcomes.push(FileOutcome { path, result });
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }

    Ok(BatchSummary { outcomes })
}

/// Fan `job` out over `workers` threads; results come back in `paths` order.
/// Items a panicking worker never reported carry its panic message.
fn parse_all<F>(
    paths: &[PathBuf],
    workers: usize,
    root: &Path,
    job: F,
    mut progress: Option<&mut (dyn Progress + '_)>,
) -> Vec<Result<Reconciliation>>
where
    F: Fn(&Path) -> Result<Reconciliation> + Send + Sync + 'static,
{
    let paths_arc = Arc::new(paths.to_vec());
    let job = Arc::new(job);
    let counter = Arc::new(AtomicUsize::new(0));
    let (res_tx, res_rx) = mpsc::channel::<(usize, Result<Reconciliation>)>();

    let workers = workers.min(paths.len()).max(1);
    let mut handles = Vec::with_capacity(workers);

    for _ in 0..workers {
        let paths = Arc::clone(&paths_arc);
        let job = Arc::clone(&job);
        let idx = Arc::clone(&counter);
        let tx = res_tx.clone();

        handles.push(thread::spawn(move || {
            loop {
                let i = idx.fetch_add(1, Ordering::Relaxed);
                if i >= paths.len() {
                    break;
                }
                let _ = tx.send((i, job(&paths[i])));
            }
        }));
    }
    drop(res_tx); // main thread is sole receiver now

    let mut slots: Vec<Option<Result<Reconciliation>>> = paths.iter().map(|_| None).collect();
    for _ in 0..paths.len() {
        match res_rx.recv() {
            Ok((i, result)) => {
                if let Some(p) = progress.as_deref_mut() {
                    let label = display_relative(root, &paths[i]);
                    match &result {
                        Ok(_) => p.item_done(&label),
                        Err(e) => p.item_failed(&label, &e.to_string()),
                    }
                }
                slots[i] = Some(result);
            }
            Err(_) => break, // every sender is gone, some worker died
        }
    }

    let panics: Vec<String> = handles
        .into_iter()
        .filter_map(|h| h.join().err())
        .map(|payload| panic_message(payload.as_ref()))
        .collect();
    for msg in &panics {
        tracing::error!("parse worker panicked: {msg}");
    }
    let reason = panics.join("; ");

    slots
        .into_iter()
        .map(|slot| slot.unwrap_or_else(|| Err(Error::WorkerPanicked(reason.clone()))))
        .collect()
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        s!(*msg)
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        s!("unknown panic")
    }
}

/// `<out>/<grandparent…>/<stem>.<ext>`, where the stem is the module name
/// without its " Trash" suffix, or the name of the file's directory.
fn output_path(
    opts: &BatchOptions,
    input: &Path,
    r: &Reconciliation,
    seen: &mut HashMap<PathBuf, usize>,
) -> PathBuf {
    let relative = input.strip_prefix(&opts.input_dir).unwrap_or(input);
    let parent = relative.parent().unwrap_or(Path::new(""));

    let (target_dir, fallback) = match parent.file_name() {
        Some(dir_name) => (
            opts.output_dir.join(parent.parent().unwrap_or(Path::new(""))),
            dir_name.to_string_lossy().into_owned(),
        ),
        None => (
            opts.output_dir.clone(),
            relative
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| s!("module")),
        ),
    };

    let fallback = sanitize_file_stem(&fallback, "module");
    let stem = match &r.module_name {
        Some(name) => sanitize_file_stem(name.strip_suffix(TRASH_SUFFIX).unwrap_or(name), &fallback),
        None => fallback,
    };

    resolve_unique_filename(&target_dir, &stem, seen, opts.format.ext())
}

fn display_relative(root: &Path, path: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}

/// Errors always; missing-entry blocks only with `show_missing`.
/// Entries are separated by a `==========` rule.
pub fn write_report<W: Write>(out: &mut W, summary: &BatchSummary, show_missing: bool) -> Result<()> {
    let mut dirty = false;

    for outcome in &summary.outcomes {
        match &outcome.result {
            Ok(parsed) => {
                if !show_missing || !parsed.reconciliation.has_missing() {
                    continue;
                }
                if dirty {
                    out.write_all(b"\n==========\n\n")?;
                }
                write!(out, "{}", outcome.path.display())?;
                report::write_missing(out, &parsed.reconciliation)?;
            }
            Err(err) => {
                if dirty {
                    out.write_all(b"\n==========\n\n")?;
                }
                writeln!(out, "Error while working on {}: {err}", outcome.path.display())?;
            }
        }
        dirty = true;
    }

    out.flush()?;
    Ok(())
}
