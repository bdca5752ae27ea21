// src/core/sanitize.rs

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Wowhead shows untranslated names as `[English Name]`.
/// Returns the inner text and whether the name is a real translation.
pub fn unbracket(s: &str) -> (String, bool) {
    match s.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
        Some(inner) => (inner.trim().to_string(), false),
        None => (s.to_string(), true),
    }
}

/// Escape for a double-quoted Lua string literal.
pub fn escape_lua(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            _ => out.push(ch),
        }
    }
    out
}

/// Filesystem-safe stem from a module name; `fallback` when nothing survives.
/// Spaces stay; characters Windows rejects in file names are dropped.
pub fn sanitize_file_stem(name: &str, fallback: &str) -> String {
    let kept: String = name
        .chars()
        .map(|ch| if ch.is_control() { ' ' } else { ch })
        .filter(|&ch| !matches!(ch, '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*'))
        .collect();
    // no trailing dots or spaces on Windows either
    let out = normalize_ws(&kept).trim_end_matches(['.', ' ']).to_string();
    if out.is_empty() { fallback.to_string() } else { out }
}
