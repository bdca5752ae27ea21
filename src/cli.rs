// src/cli.rs
use std::io::{self, Write};
use std::path::PathBuf;

use clap::{builder::FalseyValueParser, Parser};

use crate::{
    batch,
    config::consts::{DEFAULT_BASE_URL, DEFAULT_SUFFIX, WORKERS},
    config::options::{BatchOptions, LocalizeOptions, OutputFormat},
    core::HttpClient,
    error::{Error, Result},
    localize::{self, FileChange},
    parser,
    progress::Progress,
    report,
};

/// Match NPC ids against locale variables in one module file.
#[derive(Debug, Parser)]
#[command(name = "generate_ids", version)]
pub struct GenerateIdsArgs {
    /// Module source, e.g. Trash.lua
    pub module: PathBuf,

    /// How to print the resolved `variable: id` map
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

/// Run the id matcher over every module file in a directory tree.
#[derive(Debug, Parser)]
#[command(name = "generate_ids_dir", version)]
pub struct GenerateIdsDirArgs {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,

    /// Only files whose path ends with these components are parsed
    #[arg(long, default_value = DEFAULT_SUFFIX)]
    pub suffix: String,

    #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
    pub format: OutputFormat,

    /// Also report missing variables/ids per file
    #[arg(long, env = "SHOW_MISSING_IDS_AND_VARS", value_parser = FalseyValueParser::new())]
    pub show_missing: bool,

    #[arg(short = 'j', long, default_value_t = WORKERS)]
    pub workers: usize,
}

/// Fetch localized NPC names and print BigWigs locale blocks.
#[derive(Debug, Parser)]
#[command(name = "localize_npcs", version)]
pub struct LocalizeArgs {
    /// NPC list (TOML, or YAML)
    pub input: PathBuf,

    /// Overrides the list's module_name
    pub module_name: Option<String>,

    /// Merge into <locale>.lua files here instead of printing
    #[arg(short = 'o', long)]
    pub out_dir: Option<PathBuf>,

    /// Also request NPCs the output files already translate
    #[arg(long, env = "FORCE_ALL", value_parser = FalseyValueParser::new())]
    pub force_all: bool,

    /// Only these locales (repeatable), e.g. -l deDE -l frFR
    #[arg(short = 'l', long = "locale")]
    pub locales: Vec<String>,

    #[arg(long, env = "NPC_LOCALE_BASE_URL", default_value = DEFAULT_BASE_URL, hide_default_value = true)]
    pub base_url: String,
}

pub fn generate_ids(args: GenerateIdsArgs) -> Result<()> {
    let result = parser::parse_file(&args.module)?;

    report::write_resolved(&mut io::stdout().lock(), &result, args.format)?;
    report::write_missing(&mut io::stderr().lock(), &result)?;
    Ok(())
}

pub fn generate_ids_dir(args: GenerateIdsDirArgs) -> Result<()> {
    let opts = BatchOptions {
        suffix: args.suffix,
        format: args.format,
        workers: args.workers.max(1),
        ..BatchOptions::new(args.input_dir, args.output_dir)
    };

    let mut progress = LineProgress::stderr();
    let summary = batch::run(&opts, Some(&mut progress))?;

    batch::write_report(&mut io::stderr().lock(), &summary, args.show_missing)?;
    tracing::info!(
        "{} file(s) written, {} error(s)",
        summary.written().len(),
        summary.error_count()
    );
    Ok(())
}

pub fn localize_npcs(args: LocalizeArgs) -> Result<()> {
    for code in &args.locales {
        if localize::locales::find(code).is_none() {
            return Err(Error::InvalidInput(format!("Unknown locale: {code}")));
        }
    }

    let list = localize::load_input(&args.input)?;
    let module_name = localize::module_name_for(args.module_name, &list, &args.input);

    let opts = LocalizeOptions {
        out_dir: args.out_dir,
        only: args.locales,
        base_url: args.base_url,
        force_all: args.force_all,
        ..LocalizeOptions::new(module_name)
    };

    let jobs = localize::plan(&list, &opts);
    if jobs.is_empty() {
        eprintln!("There's nothing to do.");
        return Ok(());
    }

    let client = HttpClient::new()?;
    let mut progress = LineProgress::stderr();
    let blocks = localize::fetch(&jobs, &opts.base_url, &client, Some(&mut progress));

    match &opts.out_dir {
        Some(dir) => {
            for (path, change) in localize::write_to_dir(dir, &blocks, &opts.module_name)? {
                match change {
                    FileChange::Created => eprintln!("Created {}", path.display()),
                    FileChange::Updated => eprintln!("Updated {}", path.display()),
                    FileChange::Unchanged => eprintln!("Unchanged {}", path.display()),
                }
            }
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(localize::render_all(&blocks, &opts.module_name).as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

/// `Progress: n / total` redrawn in place; failures and log lines get lines of their own.
pub struct LineProgress<W: Write> {
    out: W,
    total: usize,
    processed: usize,
    /// Width of the progress text currently on the line.
    drawn: usize,
}

impl LineProgress<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write> LineProgress<W> {
    pub fn new(out: W) -> Self {
        Self { out, total: 0, processed: 0, drawn: 0 }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn redraw(&mut self) {
        let text = format!("Progress: {} / {}", self.processed, self.total);
        let _ = write!(self.out, "\r{text}");
        let _ = self.out.flush();
        self.drawn = text.len();
    }

    /// Blank the progress text so a shorter line can't leave parts of it behind.
    fn clear(&mut self) {
        if self.drawn > 0 {
            let _ = write!(self.out, "\r{:width$}\r", "", width = self.drawn);
            self.drawn = 0;
        }
    }

    fn line(&mut self, msg: &str) {
        self.clear();
        let _ = writeln!(self.out, "{msg}");
    }
}

impl<W: Write> Progress for LineProgress<W> {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.processed = 0;
        self.redraw();
    }
    fn log(&mut self, msg: &str) {
        self.line(msg);
        if self.total > 0 {
            self.redraw();
        }
    }
    fn item_done(&mut self, _label: &str) {
        self.processed += 1;
        self.redraw();
    }
    fn item_failed(&mut self, label: &str, reason: &str) {
        self.processed += 1;
        self.line(&format!("{label}: {reason}"));
        self.redraw();
    }
    fn finish(&mut self) {
        let _ = writeln!(self.out);
        let _ = self.out.flush();
        self.drawn = 0;
    }
}
