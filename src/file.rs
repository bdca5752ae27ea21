// src/file.rs

use std::{
    collections::HashMap,
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use crate::error::{Error, Result};

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(Error::InvalidInput(format!(
            "Path exists but is not a directory: {}",
            dir.display()
        )));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

/// Create/truncate `path` (and its parent directories) and write `contents`.
pub fn write_text(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    let mut out = io::BufWriter::new(fs::File::create(path)?);
    out.write_all(contents.as_bytes())?;
    out.flush()?;
    Ok(())
}

/// Replace `path` by renaming a fully written sibling temp file over it.
/// Readers see the old contents or the new ones, never a partial write.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    ensure_directory(dir)?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(contents.as_bytes())?;
    if let Ok(meta) = fs::metadata(path) {
        tmp.as_file().set_permissions(meta.permissions())?;
    }
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Duplicate handling **only within this run**
pub fn resolve_unique_filename(
    dir: &Path,
    stem: &str,                        // already sanitized, no extension
    seen_names: &mut HashMap<PathBuf, usize>,
    ext: &str,
) -> PathBuf {
    let count = seen_names.entry(dir.join(stem)).or_insert(0);

    // First occurrence: "<stem>.ext"
    // Subsequent:       "<stem> (N).ext" with N starting at 2
    let filename = if *count == 0 {
        format!("{stem}.{ext}")
    } else {
        format!("{stem} ({}).{ext}", *count + 1)
    };

    *count += 1;
    dir.join(filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_stems_get_numbered_per_directory() {
        let mut seen = HashMap::new();
        let a = Path::new("out/a");
        let b = Path::new("out/b");
        assert_eq!(resolve_unique_filename(a, "Zone", &mut seen, "yaml"), a.join("Zone.yaml"));
        assert_eq!(resolve_unique_filename(a, "Zone", &mut seen, "yaml"), a.join("Zone (2).yaml"));
        assert_eq!(resolve_unique_filename(b, "Zone", &mut seen, "yaml"), b.join("Zone.yaml"));
        assert_eq!(resolve_unique_filename(a, "Zone", &mut seen, "yaml"), a.join("Zone (3).yaml"));
    }

    #[test]
    fn atomic_write_replaces_and_leaves_no_temp_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deDE.lua");
        fs::write(&path, "old").unwrap();

        write_atomic(&path, "new").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
