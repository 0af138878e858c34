use std::path::{Path, PathBuf};

/// Expand `~`, `$VAR` and `${VAR}` in a user supplied path.
///
/// Paths that fail to expand (unknown variable, non UTF-8) are returned unchanged.
pub fn expand_path(path: &Path) -> PathBuf {
    match path.to_str() {
        Some(s) => shellexpand::full(s)
            .map(|expanded| PathBuf::from(expanded.as_ref()))
            .unwrap_or_else(|_| path.to_path_buf()),
        None => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_path_leaves_plain_paths() {
        assert_eq!(expand_path(Path::new("events.csv")), PathBuf::from("events.csv"));
    }

    #[test]
    fn test_expand_path_keeps_unknown_variable() {
        let path = Path::new("$ORGUNIT_TREE_SURELY_UNSET_VAR/tree.json");
        assert_eq!(expand_path(path), path.to_path_buf());
    }
}
