// src/localize/mod.rs
//! Scrape localized NPC names and emit them as per-locale `L.<name> = "..."` blocks.
//!
//! Requests are sequential. A failed request is reported and skipped; there is
//! no retry and nothing already collected is thrown away.
//!
//! With an output directory, NPCs already translated there are not requested
//! again (unless forced), and results are merged into the existing files.

pub mod emit;
pub mod locales;
pub mod merge;

use std::{
    collections::HashSet,
    fs, io,
    path::{Path, PathBuf},
};

use indexmap::IndexMap as Map;

use crate::{
    config::consts::{NOT_FOUND_MARKER, TRASH_SUFFIX},
    config::options::LocalizeOptions,
    core::{html::heading_text, sanitize::unbracket, PageSource},
    error::{Error, Result},
    file::{ensure_directory, write_atomic, write_text},
    npcs::NpcList,
    progress::Progress,
};

pub use emit::{render_appended, render_block, LocaleBlock, Translation};
pub use locales::{Locale, LOCALES};

pub fn load_input(path: &Path) -> Result<NpcList> {
    let text = fs::read_to_string(path)?;
    NpcList::from_text(&text)
}

/// CLI argument, then the list's own `module_name`, then `"<file stem> Trash"`.
pub fn module_name_for(cli: Option<String>, list: &NpcList, path: &Path) -> String {
    if let Some(name) = cli.or_else(|| list.module_name.clone()) {
        return name;
    }
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    tracing::warn!("module_name is missing, falling back to the file's name");
    format!("{stem}{TRASH_SUFFIX}")
}

/// One page → one translation.
pub fn fetch_translation(source: &dyn PageSource, url: &str) -> Result<Translation> {
    let page = source.get(url)?;
    if page.final_url.contains(NOT_FOUND_MARKER) {
        return Err(Error::NotFound { url: s!(url) });
    }
    let heading = heading_text(&page.body).ok_or_else(|| Error::MissingHeading { url: s!(url) })?;
    let (text, valid) = unbracket(&heading);
    Ok(Translation { text, valid })
}

/// The NPCs one locale still needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Job {
    pub locale: Locale,
    pub npcs: Map<String, u64>,
}

/// Wanted locales, minus NPCs already translated in the output directory.
/// Locales left with nothing to do are dropped.
pub fn plan(list: &NpcList, opts: &LocalizeOptions) -> Vec<Job> {
    LOCALES
        .iter()
        .filter(|l| opts.wants(l.code))
        .filter_map(|locale| {
            let mut npcs = list.npcs.clone();
            if let Some(dir) = opts.out_dir.as_deref().filter(|_| !opts.force_all) {
                let done = already_translated(dir, locale, &opts.module_name);
                npcs.retain(|name, _| !done.contains(name));
            }
            (!npcs.is_empty()).then_some(Job { locale: *locale, npcs })
        })
        .collect()
}

fn already_translated(dir: &Path, locale: &Locale, module: &str) -> HashSet<String> {
    let path = locale_file(dir, locale);
    match fs::read_to_string(&path) {
        Ok(text) => merge::translated_names(&text, &locale.assignment(module)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => HashSet::new(),
        Err(e) => {
            tracing::warn!("{}: {e}, requesting everything", path.display());
            HashSet::new()
        }
    }
}

pub fn locale_file(dir: &Path, locale: &Locale) -> PathBuf {
    dir.join(format!("{}.lua", locale.code))
}

/// `plan` then `fetch`.
pub fn collect(
    list: &NpcList,
    opts: &LocalizeOptions,
    source: &dyn PageSource,
    progress: Option<&mut dyn Progress>,
) -> Vec<LocaleBlock> {
    fetch(&plan(list, opts), &opts.base_url, source, progress)
}

/// Request every job's NPCs, in order. Blocks that end up empty are dropped.
pub fn fetch(
    jobs: &[Job],
    base_url: &str,
    source: &dyn PageSource,
    mut progress: Option<&mut (dyn Progress + '_)>,
) -> Vec<LocaleBlock> {
    if let Some(p) = progress.as_deref_mut() {
        p.begin(jobs.iter().map(|j| j.npcs.len()).sum());
    }

    let mut blocks = Vec::with_capacity(jobs.len());
    for job in jobs {
        let locale = job.locale;
        let mut entries = Map::with_capacity(job.npcs.len());

        for (name, &id) in &job.npcs {
            let url = locale.npc_url(base_url, id);
            let label = format!("[{}] {name}", locale.code);

            match fetch_translation(source, &url) {
                Ok(t) => {
                    entries.insert(name.clone(), t);
                    if let Some(p) = progress.as_deref_mut() {
                        p.item_done(&label);
                    }
                }
                Err(e) => {
                    tracing::warn!("{label} ({id}): {e}");
                    if let Some(p) = progress.as_deref_mut() {
                        let reason = if e.is_no_result() { s!("No result") } else { e.to_string() };
                        p.item_failed(&label, &reason);
                    }
                }
            }
        }

        if entries.is_empty() {
            if let Some(p) = progress.as_deref_mut() {
                p.log(&format!("[{}] nothing collected, skipping", locale.code));
            }
            continue;
        }
        blocks.push(LocaleBlock { locale, entries });
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }

    blocks
}

/// All blocks as one text, separated by blank lines.
pub fn render_all(blocks: &[LocaleBlock], module: &str) -> String {
    let mut out = s!();
    for block in blocks {
        out.push_str(&render_block(block, module));
        out.push('\n');
    }
    out
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileChange {
    Created,
    Updated,
    Unchanged,
}

/// Merge each block into `dir/<code>.lua`, creating the file when missing.
pub fn write_to_dir(dir: &Path, blocks: &[LocaleBlock], module: &str) -> Result<Vec<(PathBuf, FileChange)>> {
    ensure_directory(dir)?;

    let mut results = Vec::with_capacity(blocks.len());
    for block in blocks {
        let path = locale_file(dir, &block.locale);
        let change = match fs::read_to_string(&path) {
            Ok(existing) => match merge::merge(&existing, block, module) {
                Some(merged) => {
                    write_atomic(&path, &merged)?;
                    FileChange::Updated
                }
                None => FileChange::Unchanged,
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                write_text(&path, &render_block(block, module))?;
                FileChange::Created
            }
            Err(e) => return Err(e.into()),
        };
        tracing::debug!("{}: {change:?}", path.display());
        results.push((path, change));
    }
    Ok(results)
}
