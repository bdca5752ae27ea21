// src/parser/reconcile.rs
use indexmap::IndexMap as Map;

use super::state::{ParseState, Scanned};

/// label → id, last write wins
pub type IdTable = Map<String, String>;
/// label → variable name, last write wins
pub type VariableTable = Map<String, String>;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// From `BigWigs:NewBoss("...")`, if the module declares one.
    pub module_name: Option<String>,
    /// variable → id, in variable-table order
    pub resolved: Map<String, String>,
    /// (variable, label) with no matching id
    pub missing_variables: Vec<(String, String)>,
    /// (id, label) with no matching variable
    pub missing_ids: Vec<(String, String)>,
}

impl Reconciliation {
    pub fn has_missing(&self) -> bool {
        !self.missing_variables.is_empty() || !self.missing_ids.is_empty()
    }
}

/// Accumulates both tables over a single pass of lines.
#[derive(Debug, Default)]
pub struct Scanner {
    state: ParseState,
    ids: IdTable,
    vars: VariableTable,
    module_name: Option<String>,
}

impl Scanner {
    pub fn new() -> Self {
        Self {
            ids: Map::with_capacity(16),
            vars: Map::with_capacity(16),
            ..Default::default()
        }
    }

    pub fn state(&self) -> ParseState {
        self.state
    }

    pub fn feed(&mut self, line: &str) {
        let (next, scanned) = self.state.step(line);
        self.state = next;

        match scanned {
            Scanned::Nothing => {}
            Scanned::Id(e) => {
                self.ids.insert(e.label, e.id);
            }
            Scanned::Variable(e) => {
                self.vars.insert(e.label, e.variable);
            }
            Scanned::ModuleName(name) => self.module_name = Some(name),
        }
    }

    pub fn finish(self) -> Reconciliation {
        Reconciliation {
            module_name: self.module_name,
            ..reconcile(self.ids, self.vars)
        }
    }
}

/// Match both tables on label.
pub fn reconcile(mut ids: IdTable, vars: VariableTable) -> Reconciliation {
    let mut resolved = Map::with_capacity(vars.len());
    let mut missing_variables = Vec::new();

    for (label, variable) in vars {
        match ids.shift_remove(&label) {
            Some(id) => {
                resolved.insert(variable, id);
            }
            None => missing_variables.push((variable, label)),
        }
    }

    // whatever is left had no variable pointing at it
    let missing_ids = ids.into_iter().map(|(label, id)| (id, label)).collect();

    Reconciliation {
        module_name: None,
        resolved,
        missing_variables,
        missing_ids,
    }
}
