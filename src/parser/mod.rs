// src/parser/mod.rs
//! # Module source reconciliation
//!
//! A boss/trash module lists the NPCs that enable it inside
//! `mod:RegisterEnableMob(` … `)`, one `<id>, -- <name>` per line, and names
//! the same NPCs again for translators inside `if L then` … `end` as
//! `L.<variable> = "<name>"`. The two lists are kept in sync by hand.
//!
//! This module walks the file once, line by line, collects both lists and
//! matches them on the display name, producing:
//! - `resolved`: variable → id for names present in both,
//! - `missing_variables`: names that have a variable but no id,
//! - `missing_ids`: names that have an id but no variable.
//!
//! Lines that don't fit the expected shape are skipped, never reported.

mod reconcile;
mod state;

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use crate::error::{Error, Result};

pub use reconcile::{reconcile, IdTable, Reconciliation, Scanner, VariableTable};
pub use state::{id_entry, module_name, variable_entry, IdEntry, ParseState, Scanned, VariableEntry};

pub fn parse_str(text: &str) -> Reconciliation {
    let mut scanner = Scanner::new();
    for line in text.lines() {
        scanner.feed(line);
    }
    scanner.finish()
}

/// Read errors (including invalid UTF-8) abort the parse.
pub fn parse<R: BufRead>(input: R) -> Result<Reconciliation> {
    let mut scanner = Scanner::new();
    for line in input.lines() {
        scanner.feed(&line?);
    }
    Ok(scanner.finish())
}

pub fn parse_file(path: &Path) -> Result<Reconciliation> {
    let file = File::open(path)?;
    if !file.metadata()?.is_file() {
        return Err(Error::NotAFile(path.to_path_buf()));
    }
    let t = std::time::Instant::now();
    let out = parse(BufReader::new(file))?;
    tracing::debug!("Parsed {} in {:?}", path.display(), t.elapsed());
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KARAZHAN: &str = r#"
--------------------------------------------------------------------------------
-- Module Declaration
--

local mod, CL = BigWigs:NewBoss("Return to Karazhan Trash", 1651)
if not mod then return end
mod.displayName = CL.trash
mod:RegisterEnableMob(
	114544, -- Skeletal Usher
	114339, -- Barnes
	114783, -- Reformed Maiden
	114796 -- Wholesome Hostess
)

--------------------------------------------------------------------------------
-- Localization
--

local L = mod:GetLocale()
if L then
	L.skeletalUsher = "Skeletal Usher"
	L.barnes = "Barnes"
	L.maiden = "Reformed Maiden"
	L.charmer = "Charming Host"
end
"#;

    #[test]
    fn parses_a_realistic_module() {
        let r = parse_str(KARAZHAN);

        assert_eq!(r.module_name.as_deref(), Some("Return to Karazhan Trash"));
        let resolved: Vec<_> = r.resolved.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        assert_eq!(
            resolved,
            vec![("skeletalUsher", "114544"), ("barnes", "114339"), ("maiden", "114783")]
        );
        assert_eq!(r.missing_variables, vec![(s!("charmer"), s!("Charming Host"))]);
        assert_eq!(r.missing_ids, vec![(s!("114796"), s!("Wholesome Hostess"))]);
    }

    #[test]
    fn single_entry_round() {
        let text = "mod:RegisterEnableMob(\n123, -- \"Test Mob\"\n)\nif L then\nL.TestMob = \"Test Mob\"\nend\n";
        let r = parse_str(text);
        assert_eq!(r.resolved.get("TestMob").map(String::as_str), Some("123"));
        assert_eq!(r.resolved.len(), 1);
        assert!(r.missing_variables.is_empty());
        assert!(r.missing_ids.is_empty());
    }

    #[test]
    fn trailing_space_in_comment_is_trimmed_away() {
        let text = "mod:RegisterEnableMob(\n9, -- \"Trailing Label \"\n)\nif L then\nL.X = \"Trailing Label\"\nend";
        let r = parse_str(text);
        assert_eq!(r.resolved.get("X").map(String::as_str), Some("9"));
        assert!(!r.has_missing());
    }

    #[test]
    fn padding_inside_variable_quotes_is_kept() {
        // only the comment side is trimmed
        let text = "mod:RegisterEnableMob(\n9, -- Padded\n)\nif L then\nL.X = \"Padded \"\nend";
        let r = parse_str(text);
        assert!(r.resolved.is_empty());
        assert_eq!(r.missing_variables, vec![(s!("X"), s!("Padded "))]);
        assert_eq!(r.missing_ids, vec![(s!("9"), s!("Padded"))]);
    }

    #[test]
    fn duplicate_labels_keep_the_last_entry() {
        let text = "mod:RegisterEnableMob(\n1, -- Imp\n2, -- Imp\n)\nif L then\nL.first = \"Imp\"\nL.second = \"Imp\"\nend";
        let r = parse_str(text);
        assert_eq!(r.resolved.len(), 1);
        assert_eq!(r.resolved.get("second").map(String::as_str), Some("2"));
    }

    #[test]
    fn lines_outside_regions_are_ignored() {
        let text = "1, -- Stray\nL.stray = \"Stray\"\n)\nend\n";
        assert_eq!(parse_str(text), Reconciliation::default());
    }

    #[test]
    fn regions_can_be_reentered() {
        let text = "mod:RegisterEnableMob(\n1, -- A\n)\nmod:RegisterEnableMob(\n2, -- B\n)\nif L then\nL.a = \"A\"\nend\nif L then\nL.b = \"B\"\nend";
        let r = parse_str(text);
        assert_eq!(r.resolved.len(), 2);
        assert!(!r.has_missing());
    }

    #[test]
    fn unterminated_region_swallows_the_rest() {
        // no `)` → the variable marker is never seen
        let text = "mod:RegisterEnableMob(\n1, -- A\nif L then\nL.a = \"A\"\nend";
        let r = parse_str(text);
        assert!(r.resolved.is_empty());
        assert_eq!(r.missing_ids, vec![(s!("1"), s!("A"))]);
    }

    #[test]
    fn crlf_input_matches_lf_input() {
        let crlf = KARAZHAN.replace('\n', "\r\n");
        assert_eq!(parse_str(&crlf), parse_str(KARAZHAN));
        assert_eq!(parse(crlf.as_bytes()).unwrap(), parse_str(KARAZHAN));
    }

    #[test]
    fn reparsing_is_stable() {
        assert_eq!(parse_str(KARAZHAN), parse_str(KARAZHAN));
    }

    #[test]
    fn invalid_utf8_is_an_io_error() {
        let bytes: &[u8] = b"mod:RegisterEnableMob(\n\xff\xfe\n)";
        assert!(matches!(parse(bytes), Err(Error::Io(_))));
    }
}
