// src/localize/emit.rs
use indexmap::IndexMap as Map;

use crate::core::sanitize::escape_lua;
use super::locales::Locale;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Translation {
    pub text: String,
    /// False for `[English]` placeholders; those are written commented out.
    pub valid: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocaleBlock {
    pub locale: Locale,
    /// variable → translation, in input order
    pub entries: Map<String, Translation>,
}

/// ```lua
/// local L = BigWigs:NewBossLocale("Module", "deDE")
/// if not L then return end
/// if L then
///     L.name = "Text"
/// end
/// ```
pub fn render_block(block: &LocaleBlock, module: &str) -> String {
    let mut out = s!();
    push_line!(out, "{}", block.locale.header(module));
    if !block.locale.is_default() {
        push_line!(out, "if not L then return end");
    }
    push_body(&mut out, block);
    out
}

/// A later block in a file that already opened `local L`: bare assignment, no guard.
pub fn render_appended(block: &LocaleBlock, module: &str) -> String {
    let mut out = s!();
    push_line!(out, "{}", block.locale.assignment(module));
    push_body(&mut out, block);
    out
}

/// `\tL.name = "Text"`, commented out for placeholders. No line terminator.
pub fn entry_line(name: &str, t: &Translation) -> String {
    let prefix = if t.valid { "\t" } else { "\t-- " };
    format!("{prefix}L.{name} = \"{}\"", escape_lua(&t.text))
}

fn push_body(out: &mut String, block: &LocaleBlock) {
    push_line!(out, "if L then");
    for (name, t) in &block.entries {
        push_line!(out, "{}", entry_line(name, t));
    }
    push_line!(out, "end");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::localize::locales::find;

    #[test]
    fn renders_valid_and_placeholder_entries() {
        let mut entries = Map::new();
        entries.insert(s!("usher"), Translation { text: s!("Skelettierter Platzanweiser"), valid: true });
        entries.insert(s!("barnes"), Translation { text: s!("Barnes"), valid: false });
        let block = LocaleBlock { locale: *find("deDE").unwrap(), entries };

        assert_eq!(
            render_block(&block, "Return to Karazhan Trash"),
            "local L = BigWigs:NewBossLocale(\"Return to Karazhan Trash\", \"deDE\")\n\
             if not L then return end\n\
             if L then\n\
             \tL.usher = \"Skelettierter Platzanweiser\"\n\
             \t-- L.barnes = \"Barnes\"\n\
             end\n"
        );
    }

    #[test]
    fn default_locale_has_no_guard() {
        let block = LocaleBlock { locale: *find("enUS").unwrap(), entries: Map::new() };
        assert_eq!(render_block(&block, "M"), "local L = mod:GetLocale()\nif L then\nend\n");
    }

    #[test]
    fn appended_blocks_skip_local_and_guard() {
        let mut entries = Map::new();
        entries.insert(s!("usher"), Translation { text: s!("Placeur"), valid: true });
        let block = LocaleBlock { locale: *find("frFR").unwrap(), entries };
        assert_eq!(
            render_appended(&block, "Karazhan Trash"),
            "L = BigWigs:NewBossLocale(\"Karazhan Trash\", \"frFR\")\nif L then\n\tL.usher = \"Placeur\"\nend\n"
        );
    }
}
