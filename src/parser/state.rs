// src/parser/state.rs
use std::sync::LazyLock;

use regex::Regex;

use crate::config::consts::{IDS_END, IDS_START, VARS_END, VARS_START};

static ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([0-9]+),?\s*--\s*(.+)$").unwrap());
static VAR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^\s*L\.(\w+)\s*=\s*"(.+)""#).unwrap());
static MODULE_DECL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*local\s*mod(?:,\s*CL)?\s*=\s*BigWigs:NewBoss\("(.*?)""#).unwrap()
});

/// One `<id>, -- <label>` line from the `RegisterEnableMob` block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdEntry {
    pub label: String,
    pub id: String,
}

/// One `L.<variable> = "<label>"` line from the `if L then` block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariableEntry {
    pub variable: String,
    pub label: String,
}

/// What a single line contributed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Scanned {
    Nothing,
    Id(IdEntry),
    Variable(VariableEntry),
    ModuleName(String),
}

/// Line scanner mode. The two regions never nest; each is re-entered only from `Idle`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ParseState {
    #[default]
    Idle,
    InIdRegion,
    InVariableRegion,
}

impl ParseState {
    /// Pure transition: `line` must already have its terminator removed.
    pub fn step(self, line: &str) -> (ParseState, Scanned) {
        use ParseState::*;

        match self {
            Idle => {
                if line.starts_with(IDS_START) {
                    (InIdRegion, Scanned::Nothing)
                } else if line.starts_with(VARS_START) {
                    (InVariableRegion, Scanned::Nothing)
                } else if let Some(name) = module_name(line) {
                    (Idle, Scanned::ModuleName(name))
                } else {
                    (Idle, Scanned::Nothing)
                }
            }
            InIdRegion => match id_entry(line) {
                Some(entry) => (InIdRegion, Scanned::Id(entry)),
                None if line.starts_with(IDS_END) => (Idle, Scanned::Nothing),
                None => (InIdRegion, Scanned::Nothing),
            },
            InVariableRegion => match variable_entry(line) {
                Some(entry) => (InVariableRegion, Scanned::Variable(entry)),
                // exact match only, indented `end`s belong to nested Lua blocks
                None if line == VARS_END => (Idle, Scanned::Nothing),
                None => (InVariableRegion, Scanned::Nothing),
            },
        }
    }
}

pub fn id_entry(line: &str) -> Option<IdEntry> {
    let caps = ID_REGEX.captures(line)?;
    Some(IdEntry {
        label: clean_id_label(&caps[2]),
        id: s!(&caps[1]),
    })
}

pub fn variable_entry(line: &str) -> Option<VariableEntry> {
    let caps = VAR_REGEX.captures(line)?;
    Some(VariableEntry {
        variable: s!(&caps[1]),
        label: s!(&caps[2]),
    })
}

pub fn module_name(line: &str) -> Option<String> {
    MODULE_DECL_REGEX.captures(line).map(|caps| s!(&caps[1]))
}

/// Comment labels are trimmed, and one pair of wrapping quotes is dropped.
/// Variable labels are taken verbatim, so the two sides can still disagree on padding.
fn clean_id_label(raw: &str) -> String {
    let t = raw.trim();
    let unquoted = t
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(t);
    s!(unquoted.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::ParseState::*;

    #[test]
    fn markers_open_regions_only_from_idle() {
        assert_eq!(Idle.step("mod:RegisterEnableMob(").0, InIdRegion);
        assert_eq!(Idle.step("if L then").0, InVariableRegion);
        // markers are prefix-anchored
        assert_eq!(Idle.step("  if L then").0, Idle);
        // a variable marker inside the id region is just noise
        assert_eq!(InIdRegion.step("if L then"), (InIdRegion, Scanned::Nothing));
    }

    #[test]
    fn id_region_lines() {
        let (state, scanned) = InIdRegion.step("\t123456, -- Frenzied Ghoul  ");
        assert_eq!(state, InIdRegion);
        assert_eq!(
            scanned,
            Scanned::Id(IdEntry { label: s!("Frenzied Ghoul"), id: s!("123456") })
        );

        // trailing entry without a comma
        let (_, scanned) = InIdRegion.step("42 -- Last One");
        assert_eq!(scanned, Scanned::Id(IdEntry { label: s!("Last One"), id: s!("42") }));

        assert_eq!(InIdRegion.step("\t-- just a comment"), (InIdRegion, Scanned::Nothing));
        assert_eq!(InIdRegion.step(")"), (Idle, Scanned::Nothing));
        // closing paren must lead the line
        assert_eq!(InIdRegion.step("  )"), (InIdRegion, Scanned::Nothing));
    }

    #[test]
    fn quoted_comment_labels_are_unwrapped() {
        let e = id_entry(r#"123, -- "Test Mob""#).unwrap();
        assert_eq!(e.label, "Test Mob");
        let e = id_entry(r#"7, -- "Trailing Label ""#).unwrap();
        assert_eq!(e.label, "Trailing Label");
    }

    #[test]
    fn variable_region_lines() {
        let (state, scanned) = InVariableRegion.step(r#"	L.ghoul = " Frenzied Ghoul ""#);
        assert_eq!(state, InVariableRegion);
        assert_eq!(
            scanned,
            Scanned::Variable(VariableEntry { variable: s!("ghoul"), label: s!(" Frenzied Ghoul ") })
        );

        assert_eq!(InVariableRegion.step("end"), (Idle, Scanned::Nothing));
        assert_eq!(InVariableRegion.step(" end"), (InVariableRegion, Scanned::Nothing));
        assert_eq!(InVariableRegion.step("end "), (InVariableRegion, Scanned::Nothing));
    }

    #[test]
    fn module_declaration_is_picked_up_while_idle() {
        let (state, scanned) =
            Idle.step(r#"local mod, CL = BigWigs:NewBoss("Karazhan Trash", 1651)"#);
        assert_eq!(state, Idle);
        assert_eq!(scanned, Scanned::ModuleName(s!("Karazhan Trash")));

        assert_eq!(
            module_name(r#"local mod=BigWigs:NewBoss("Odyn", 1648, 1819)"#).as_deref(),
            Some("Odyn")
        );
    }
}
