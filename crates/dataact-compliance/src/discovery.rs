//! Contract discovery: the files of one directory whose names match a
//! wildcard pattern.

use std::path::{Path, PathBuf};

use crate::error::{ComplianceError, ComplianceResult};

/// Whether `name` matches `pattern`, where `*` matches any run of
/// characters (including none) and `?` matches exactly one.
pub fn wildcard_match(pattern: &str, name: &str) -> bool {
    let p: Vec<char> = pattern.chars().collect();
    let n: Vec<char> = name.chars().collect();
    let (mut pi, mut ni) = (0, 0);
    // Position of the last `*` seen and the name index it was tried at.
    let mut backtrack: Option<(usize, usize)> = None;

    while ni < n.len() {
        if pi < p.len() && (p[pi] == '?' || p[pi] == n[ni]) {
            pi += 1;
            ni += 1;
        } else if pi < p.len() && p[pi] == '*' {
            backtrack = Some((pi, ni));
            pi += 1;
        } else if let Some((star, matched)) = backtrack {
            pi = star + 1;
            ni = matched + 1;
            backtrack = Some((star, matched + 1));
        } else {
            return false;
        }
    }
    p[pi..].iter().all(|&c| c == '*')
}

/// Regular files directly inside `dir` whose file name matches `pattern`,
/// sorted by path. Subdirectories are not searched.
pub fn find_contracts(dir: &Path, pattern: &str) -> ComplianceResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(ComplianceError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }
    let entries = std::fs::read_dir(dir).map_err(|e| ComplianceError::Io {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut found = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "failed to read directory entry");
                continue;
            }
        };
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let matches = path
            .file_name()
            .and_then(|f| f.to_str())
            .is_some_and(|name| wildcard_match(pattern, name));
        if matches {
            found.push(path);
        }
    }
    found.sort();
    Ok(found)
}
