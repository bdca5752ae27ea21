// src/localize/merge.rs
//! Fold scraped entries into an existing `<code>.lua` file.
//!
//! A locale file carries one block per module. Ours is found by its `L = ...`
//! assignment, and only its `if L then` ... `end` body is touched; every other
//! line is copied through as is.

use std::{collections::HashSet, sync::LazyLock};

use regex::Regex;

use super::emit::{entry_line, render_appended, render_block, LocaleBlock};
use crate::core::sanitize::escape_lua;

static ASSIGNMENT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*(--)?\s*L\.(\w+)\s*=\s*"((?:[^"\\]|\\.)*)"(.*)$"#).unwrap()
});

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Scan {
    Searching,
    FoundHeader,
    InsideIf,
    Done,
}

impl Scan {
    /// `assignment` is the block's `L = ...` line, without `local`.
    fn step(self, line: &str, assignment: &str) -> Scan {
        let t = line.trim();
        match self {
            Scan::Searching if t.contains(assignment) => Scan::FoundHeader,
            Scan::FoundHeader if t == "if L then" => Scan::InsideIf,
            // another module's block started before ours had a body
            Scan::FoundHeader if is_assignment_header(t) && !t.contains(assignment) => Scan::Searching,
            Scan::InsideIf if t == "end" => Scan::Done,
            other => other,
        }
    }
}

fn is_assignment_header(t: &str) -> bool {
    t.starts_with("L =") || t.starts_with("local L =")
}

struct Assignment<'a> {
    commented: bool,
    name: &'a str,
    /// Still Lua-escaped.
    text: &'a str,
    rest: &'a str,
}

fn assignment_of(line: &str) -> Option<Assignment<'_>> {
    let caps = ASSIGNMENT_REGEX.captures(line)?;
    Some(Assignment {
        commented: caps.get(1).is_some(),
        name: caps.get(2)?.as_str(),
        text: caps.get(3)?.as_str(),
        rest: caps.get(4)?.as_str(),
    })
}

/// Names with a live (uncommented) entry in this module's block.
pub fn translated_names(src: &str, assignment: &str) -> HashSet<String> {
    let mut names = HashSet::new();
    let mut scan = Scan::Searching;

    for line in src.lines() {
        if scan == Scan::InsideIf {
            if let Some(a) = assignment_of(line) {
                if !a.commented {
                    names.insert(s!(a.name));
                }
                continue;
            }
        }
        scan = scan.step(line, assignment);
        if scan == Scan::Done {
            break;
        }
    }
    names
}

/// `src` with `block` folded in, or `None` when the file already says it all.
pub fn merge(src: &str, block: &LocaleBlock, module: &str) -> Option<String> {
    if src.trim().is_empty() {
        return Some(render_block(block, module));
    }

    let assignment = block.locale.assignment(module);
    let eol = if src.contains("\r\n") { "\r\n" } else { "\n" };

    let mut pending = block.entries.clone();
    let mut out = String::with_capacity(src.len() + 64 * pending.len());
    let mut changed = false;
    let mut scan = Scan::Searching;

    for line in src.split_inclusive('\n') {
        let body = line.trim_end_matches(['\r', '\n']);

        if scan == Scan::InsideIf {
            if let Some(a) = assignment_of(body) {
                if let Some(t) = pending.shift_remove(a.name) {
                    let text = escape_lua(&t.text);
                    // a placeholder never replaces what is already there
                    if t.valid && (a.commented || a.text != text) {
                        out.push_str(&format!("\tL.{} = \"{text}\"{}", a.name, a.rest));
                        out.push_str(&line[body.len()..]);
                        changed = true;
                        continue;
                    }
                }
                out.push_str(line);
                continue;
            }
        }

        let next = scan.step(body, &assignment);
        if next == Scan::Done && scan != Scan::Done && !pending.is_empty() {
            for (name, t) in pending.drain(..) {
                out.push_str(&entry_line(&name, &t));
                out.push_str(eol);
            }
            changed = true;
        }
        scan = next;
        out.push_str(line);
    }

    if scan != Scan::Done {
        if !out.ends_with('\n') {
            out.push_str(eol);
        }
        out.push_str(eol);
        let appended = render_appended(block, module);
        if eol == "\n" {
            out.push_str(&appended);
        } else {
            out.push_str(&appended.replace('\n', eol));
        }
        changed = true;
    }

    changed.then_some(out)
}
