// src/npcs.rs
use indexmap::IndexMap as Map;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::parser::Reconciliation;

/// The hand-off format between the id generators and the localizer.
///
/// TOML:
/// ```toml
/// module_name = "Return to Karazhan Trash"
///
/// [npcs]
/// skeletalUsher = 114544
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NpcList {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_name: Option<String>,
    pub npcs: Map<String, u64>,
}

impl NpcList {
    pub fn from_reconciliation(r: &Reconciliation) -> Result<Self> {
        let npcs = r
            .resolved
            .iter()
            .map(|(variable, id)| {
                id.parse::<u64>()
                    .map(|id| (variable.clone(), id))
                    .map_err(|_| Error::InvalidId { variable: variable.clone(), id: id.clone() })
            })
            .collect::<Result<Map<_, _>>>()?;

        Ok(Self { module_name: r.module_name.clone(), npcs })
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Accepts, in order: TOML list, YAML list, bare YAML `name: id` mapping.
    pub fn from_text(text: &str) -> Result<Self> {
        if let Ok(list) = toml::from_str::<NpcList>(text) {
            return Ok(list);
        }
        tracing::debug!("Input is not TOML, trying YAML");
        if let Ok(list) = serde_yaml::from_str::<NpcList>(text) {
            return Ok(list);
        }
        let npcs: Map<String, u64> = serde_yaml::from_str(text)?;
        Ok(Self { module_name: None, npcs })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_str;

    const MODULE: &str = "local mod = BigWigs:NewBoss(\"Hall Trash\", 1)\nmod:RegisterEnableMob(\n10, -- Bat\n20, -- Rat\n)\nif L then\nL.bat = \"Bat\"\nL.rat = \"Rat\"\nend";

    #[test]
    fn toml_output_reads_back() {
        let list = NpcList::from_reconciliation(&parse_str(MODULE)).unwrap();
        let text = list.to_toml().unwrap();
        assert!(text.contains("module_name = \"Hall Trash\""));
        assert!(text.contains("[npcs]"));
        assert_eq!(NpcList::from_text(&text).unwrap(), list);
    }

    #[test]
    fn yaml_output_reads_back() {
        let list = NpcList::from_reconciliation(&parse_str(MODULE)).unwrap();
        let text = list.to_yaml().unwrap();
        assert_eq!(NpcList::from_text(&text).unwrap(), list);
    }

    #[test]
    fn bare_mapping_has_no_module_name() {
        let list = NpcList::from_text("bat: 10\nrat: 20\n").unwrap();
        assert_eq!(list.module_name, None);
        assert_eq!(list.npcs.get_index(1), Some((&s!("rat"), &20)));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(NpcList::from_text("- just\n- a list\n").is_err());
    }

    #[test]
    fn oversized_ids_are_reported() {
        let text = "mod:RegisterEnableMob(\n99999999999999999999999, -- Huge\n)\nif L then\nL.huge = \"Huge\"\nend";
        let err = NpcList::from_reconciliation(&parse_str(text)).unwrap_err();
        assert!(matches!(err, Error::InvalidId { .. }));
    }
}
