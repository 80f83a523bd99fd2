//! Input enumeration: tracked files, exclusions and path display.

use std::error::Error;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::process::Command;

use dir2docx::FileEntry;
use globset::{Glob, GlobSet, GlobSetBuilder};

/// Exclusions applied after the user's.
pub const DEFAULT_EXCLUDES: &[&str] = &["*.ico", "*.docx", "*.pptx", "*.xslx"];

/// List the files git tracks under `input_dir`, relative to it.
pub fn list_tracked_files(input_dir: &Path) -> Result<Vec<String>, Box<dyn Error>> {
    let output = Command::new("git")
        .args(["ls-files", "-z"])
        .current_dir(input_dir)
        .output()
        .map_err(|e| format!("cannot run git in {}: {}", input_dir.display(), e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!("git ls-files failed: {}", stderr.trim()).into());
    }

    let stdout = String::from_utf8(output.stdout)?;
    Ok(stdout
        .split('\0')
        .filter(|f| !f.is_empty())
        .map(str::to_string)
        .collect())
}

/// Glob exclusions over repository paths.
#[derive(Debug)]
pub struct ExcludeFilter {
    set: GlobSet,
}

impl ExcludeFilter {
    /// Compile the user patterns followed by [`DEFAULT_EXCLUDES`].
    pub fn new(patterns: &[String]) -> Result<Self, globset::Error> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns
            .iter()
            .map(String::as_str)
            .chain(DEFAULT_EXCLUDES.iter().copied())
        {
            builder.add(Glob::new(pattern)?);
        }
        Ok(Self {
            set: builder.build()?,
        })
    }

    /// Check whether a path is excluded.
    pub fn is_excluded(&self, path: &str) -> bool {
        self.set.is_match(path)
    }

    /// Keep the paths that are not excluded, in order.
    pub fn apply(&self, files: Vec<String>) -> Vec<String> {
        files.into_iter().filter(|f| !self.is_excluded(f)).collect()
    }
}

/// Parse a `GLOB,LANG` association.
pub fn parse_association(value: &str) -> Result<(String, String), String> {
    match value.rsplit_once(',') {
        Some((glob, lang)) if !glob.is_empty() && !lang.trim().is_empty() => {
            Ok((glob.to_string(), lang.trim().to_string()))
        }
        _ => Err(format!("expected GLOB,LANG but got '{}'", value)),
    }
}

/// Path of `path` relative to `base`, with forward slashes.
///
/// Both paths must be absolute or both relative to the same directory.
pub fn relative_path(path: &Path, base: &Path) -> String {
    let path: Vec<Component> = path.components().collect();
    let base: Vec<Component> = base.components().collect();
    let common = path
        .iter()
        .zip(base.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..base.len() {
        relative.push("..");
    }
    for component in &path[common..] {
        relative.push(component.as_os_str());
    }
    if relative.as_os_str().is_empty() {
        return ".".to_string();
    }
    relative.to_string_lossy().replace('\\', "/")
}

/// Read the files and name them relative to `path_prefix`.
pub fn load_entries(
    input_dir: &Path,
    path_prefix: &Path,
    files: &[String],
) -> Result<Vec<FileEntry>, Box<dyn Error>> {
    let input_dir = input_dir.canonicalize()?;
    let path_prefix = path_prefix.canonicalize()?;

    files
        .iter()
        .map(|file| -> Result<FileEntry, Box<dyn Error>> {
            let full = input_dir.join(file);
            let content =
                fs::read(&full).map_err(|e| format!("cannot read {}: {}", full.display(), e))?;
            Ok(FileEntry::new(relative_path(&full, &path_prefix), content))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_excludes() {
        let filter = ExcludeFilter::new(&[]).unwrap();
        assert!(filter.is_excluded("favicon.ico"));
        assert!(filter.is_excluded("docs/spec.docx"));
        assert!(!filter.is_excluded("src/main.rs"));
    }

    #[test]
    fn test_user_excludes_keep_order() {
        let filter = ExcludeFilter::new(&["*.lock".to_string(), "vendor/*".to_string()]).unwrap();
        let files = vec![
            "Cargo.lock".to_string(),
            "src/lib.rs".to_string(),
            "vendor/a/b.c".to_string(),
            "README.md".to_string(),
        ];
        assert_eq!(filter.apply(files), vec!["src/lib.rs", "README.md"]);
    }

    #[test]
    fn test_invalid_exclude() {
        assert!(ExcludeFilter::new(&["a[".to_string()]).is_err());
    }

    #[test]
    fn test_parse_association() {
        assert_eq!(
            parse_association("*.svg,xml").unwrap(),
            ("*.svg".to_string(), "xml".to_string())
        );
        assert_eq!(
            parse_association("{a,b}.h,C++").unwrap(),
            ("{a,b}.h".to_string(), "C++".to_string())
        );
        assert!(parse_association("*.svg").is_err());
        assert!(parse_association("*.svg,").is_err());
    }

    #[test]
    fn test_relative_path() {
        assert_eq!(
            relative_path(Path::new("/repo/src/main.rs"), Path::new("/repo")),
            "src/main.rs"
        );
        assert_eq!(
            relative_path(Path::new("/repo/src/main.rs"), Path::new("/repo/docs")),
            "../src/main.rs"
        );
        assert_eq!(relative_path(Path::new("/repo"), Path::new("/repo")), ".");
    }

    #[test]
    fn test_load_entries() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/a.rs"), "fn a() {}\n").unwrap();

        let entries = load_entries(
            &dir.path().join("src"),
            dir.path(),
            &["a.rs".to_string()],
        )
        .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].path, "src/a.rs");
        assert_eq!(entries[0].content, b"fn a() {}\n");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = load_entries(dir.path(), dir.path(), &["gone.rs".to_string()]);
        assert!(result.is_err());
    }
}
