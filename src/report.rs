// src/report.rs
use std::io::Write;

use crate::config::options::OutputFormat;
use crate::error::Result;
use crate::npcs::NpcList;
use crate::parser::Reconciliation;

/// Render the resolved map. `Plain` is `variable: id` per line, in source order.
pub fn render_resolved(r: &Reconciliation, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Plain => {
            let mut out = s!();
            for (variable, id) in &r.resolved {
                push_line!(out, "{variable}: {id}");
            }
            Ok(out)
        }
        OutputFormat::Toml => NpcList::from_reconciliation(r)?.to_toml(),
        OutputFormat::Yaml => NpcList::from_reconciliation(r)?.to_yaml(),
    }
}

pub fn write_resolved<W: Write>(out: &mut W, r: &Reconciliation, format: OutputFormat) -> Result<()> {
    out.write_all(render_resolved(r, format)?.as_bytes())?;
    out.flush()?;
    Ok(())
}

/// Both "missing" blocks, each only when non-empty and led by a blank line.
pub fn write_missing<W: Write>(out: &mut W, r: &Reconciliation) -> Result<()> {
    if !r.missing_variables.is_empty() {
        out.write_all(b"\nMissing variables:\n")?;
        for (variable, label) in &r.missing_variables {
            writeln!(out, "{variable} (\"{label}\")")?;
        }
    }

    if !r.missing_ids.is_empty() {
        out.write_all(b"\nMissing IDs:\n")?;
        for (id, label) in &r.missing_ids {
            writeln!(out, "{id} (\"{label}\")")?;
        }
    }

    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_str;

    const MODULE: &str = "mod:RegisterEnableMob(\n1, -- One\n2, -- Two\n3, -- Three\n)\nif L then\nL.three = \"Three\"\nL.one = \"One\"\nL.four = \"Four\"\nend";

    #[test]
    fn plain_lines_follow_variable_order() {
        let r = parse_str(MODULE);
        assert_eq!(render_resolved(&r, OutputFormat::Plain).unwrap(), "three: 3\none: 1\n");
    }

    #[test]
    fn missing_blocks() {
        let r = parse_str(MODULE);
        let mut buf = Vec::new();
        write_missing(&mut buf, &r).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "\nMissing variables:\nfour (\"Four\")\n\nMissing IDs:\n2 (\"Two\")\n"
        );
    }

    #[test]
    fn nothing_missing_writes_nothing() {
        let r = parse_str("mod:RegisterEnableMob(\n1, -- One\n)\nif L then\nL.one = \"One\"\nend");
        let mut buf = Vec::new();
        write_missing(&mut buf, &r).unwrap();
        assert!(buf.is_empty());
    }

    #[test]
    fn toml_has_integer_ids() {
        let r = parse_str(MODULE);
        let text = render_resolved(&r, OutputFormat::Toml).unwrap();
        assert!(text.contains("three = 3"));
        assert!(!text.contains("module_name"));
    }
}
