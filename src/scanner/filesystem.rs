//! File system walking

use std::path::{Path, PathBuf};

use globset::GlobSet;
use ignore::WalkBuilder;

use crate::error::ScanError;

/// Walk `root` and return every file accepted by `keep`, sorted.
///
/// Paths matched by `exclude` (relative to `root`) are dropped. Entries the
/// walker cannot read are returned as errors next to the files found.
pub fn walk_directory(
    root: &Path,
    exclude: &GlobSet,
    keep: impl Fn(&Path) -> bool,
) -> (Vec<PathBuf>, Vec<ScanError>) {
    let mut files = Vec::new();
    let mut errors = Vec::new();

    let walker = WalkBuilder::new(root)
        .hidden(false)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .ignore(true)
        .parents(true)
        .build();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                errors.push(ScanError::Walk {
                    path: root.display().to_string(),
                    source: e,
                });
                continue;
            }
        };
        let path = entry.path();

        if path.components().any(|c| c.as_os_str() == ".git") {
            continue;
        }
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }

        let relative = path.strip_prefix(root).unwrap_or(path);
        if exclude.is_match(relative) {
            tracing::debug!(path = %relative.display(), "Excluded by pattern");
            continue;
        }
        if keep(path) {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    (files, errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use globset::{Glob, GlobSetBuilder};
    use std::fs;
    use tempfile::tempdir;

    fn is_tex(path: &Path) -> bool {
        path.extension().is_some_and(|e| e == "tex")
    }

    #[test]
    fn test_walk_directory() {
        let dir = tempdir().unwrap();
        let root = dir.path();

        fs::write(root.join("b.tex"), "b").unwrap();
        fs::write(root.join("notes.txt"), "n").unwrap();
        fs::create_dir(root.join("chapters")).unwrap();
        fs::write(root.join("chapters/a.tex"), "a").unwrap();

        let (files, errors) = walk_directory(root, &GlobSet::empty(), is_tex);

        assert!(errors.is_empty());
        assert_eq!(
            files,
            vec![root.join("b.tex"), root.join("chapters/a.tex")]
        );
    }

    #[test]
    fn test_walk_directory_excludes() {
        let dir = tempdir().unwrap();
        let root = dir.path();

        fs::create_dir(root.join("drafts")).unwrap();
        fs::write(root.join("drafts/old.tex"), "x").unwrap();
        fs::write(root.join("main.tex"), "x").unwrap();

        let mut builder = GlobSetBuilder::new();
        builder.add(Glob::new("drafts/**").unwrap());
        let exclude = builder.build().unwrap();

        let (files, _) = walk_directory(root, &exclude, is_tex);
        assert_eq!(files, vec![root.join("main.tex")]);
    }
}
