use std::io;
use std::path::{Component, Path, PathBuf};

use crate::core::config::Config;

/// Errors that can occur during path validation
#[derive(Debug, thiserror::Error)]
pub enum PathSecurityError {
    #[error("Path '{path}' is outside the allowed root directories")]
    OutsideAllowedRoots { path: PathBuf },

    #[error("Symlink '{path}' points outside the allowed root directories")]
    SymlinkOutsideRoots { path: PathBuf },

    #[error("Path '{path}' escapes its parent directory")]
    EscapesParent { path: PathBuf },

    #[error("Cannot canonicalize path '{path}': {error}")]
    CannotCanonicalize { path: PathBuf, error: io::Error },

    #[error("Path does not exist: '{path}'")]
    PathNotFound { path: PathBuf },

    #[error("IO error for path '{path}': {error}")]
    IoError { path: PathBuf, error: io::Error },
}

/// Validates that an existing path is within the configured allowed roots.
///
/// This function performs the following checks:
/// 1. Canonicalizes the input path to resolve `.`, `..`, and symlinks
/// 2. If allowed roots are configured, ensures the canonical path is within
///    one of them
/// 3. Handles symlinks according to the configured policy
///
/// An empty root list means no restrictions are enforced.
///
/// # Returns
///
/// * `Ok(PathBuf)` - The canonicalized, validated path
/// * `Err(PathSecurityError)` - If validation fails
pub fn validate_path(input_path: &str, config: &Config) -> Result<PathBuf, PathSecurityError> {
    let path = Path::new(input_path);

    // No restrictions - just ensure the path exists and canonicalize.
    if config.security.allowed_roots.is_empty() {
        return canonicalize_path(path);
    }

    let roots = canonical_roots(config);
    if roots.is_empty() {
        // Every configured root is missing on disk; nothing can match.
        return Err(PathSecurityError::OutsideAllowedRoots {
            path: path.to_path_buf(),
        });
    }

    if !path.exists() {
        return Err(PathSecurityError::PathNotFound {
            path: path.to_path_buf(),
        });
    }

    // Handle symlinks according to policy
    if path.is_symlink() && !config.security.allow_symlinks {
        let target = path.read_link().map_err(|e| PathSecurityError::IoError {
            path: path.to_path_buf(),
            error: e,
        })?;

        let canonical_target =
            canonicalize_path(&target).map_err(|_| PathSecurityError::SymlinkOutsideRoots {
                path: path.to_path_buf(),
            })?;

        if !is_within_any_root(&canonical_target, &roots) {
            return Err(PathSecurityError::SymlinkOutsideRoots {
                path: path.to_path_buf(),
            });
        }
    }

    let canonical_path =
        path.canonicalize()
            .map_err(|e| PathSecurityError::CannotCanonicalize {
                path: path.to_path_buf(),
                error: e,
            })?;

    if !is_within_any_root(&canonical_path, &roots) {
        return Err(PathSecurityError::OutsideAllowedRoots {
            path: canonical_path,
        });
    }

    Ok(canonical_path)
}

/// Validates a write target that may not exist yet.
///
/// Creation-type operations (new file, new directory, copy destination) need
/// the containment check before anything exists at the target. The nearest
/// existing ancestor is canonicalized and checked against the allowed roots,
/// and the not-yet-existing remainder must not climb back out with `..`.
///
/// Returns the absolute path the caller should create.
pub fn validate_parent_path(
    input_path: &str,
    config: &Config,
) -> Result<PathBuf, PathSecurityError> {
    let path = Path::new(input_path);

    if path.exists() {
        return validate_path(input_path, config);
    }

    let existing = path
        .ancestors()
        .skip(1)
        .find(|a| !a.as_os_str().is_empty() && a.exists());

    let (base, remainder) = match existing {
        Some(base) => {
            let remainder = path
                .strip_prefix(base)
                .map_err(|_| PathSecurityError::PathNotFound {
                    path: path.to_path_buf(),
                })?
                .to_path_buf();
            (base, remainder)
        }
        // Bare relative name with no existing ancestor: resolve against cwd.
        None => (Path::new("."), path.to_path_buf()),
    };

    if remainder
        .components()
        .any(|c| matches!(c, Component::ParentDir))
    {
        return Err(PathSecurityError::EscapesParent {
            path: path.to_path_buf(),
        });
    }

    let canonical_base = base
        .canonicalize()
        .map_err(|e| PathSecurityError::CannotCanonicalize {
            path: base.to_path_buf(),
            error: e,
        })?;

    if !config.security.allowed_roots.is_empty() {
        let roots = canonical_roots(config);
        if !is_within_any_root(&canonical_base, &roots) {
            return Err(PathSecurityError::OutsideAllowedRoots {
                path: canonical_base.join(&remainder),
            });
        }
    }

    Ok(canonical_base.join(remainder))
}

/// Canonical forms of the configured roots, dropping roots missing on disk.
fn canonical_roots(config: &Config) -> Vec<PathBuf> {
    config
        .security
        .allowed_roots
        .iter()
        .filter_map(|root| root.canonicalize().ok())
        .collect()
}

/// Checks if a path is within (or equal to) any of the given roots
fn is_within_any_root(path: &Path, roots: &[PathBuf]) -> bool {
    roots.iter().any(|root| path.starts_with(root))
}

/// Attempts to canonicalize a path, distinguishing missing paths from other
/// failures
fn canonicalize_path(path: &Path) -> Result<PathBuf, PathSecurityError> {
    path.canonicalize().map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            PathSecurityError::PathNotFound {
                path: path.to_path_buf(),
            }
        } else {
            PathSecurityError::CannotCanonicalize {
                path: path.to_path_buf(),
                error: e,
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_config(roots: Vec<PathBuf>, allow_symlinks: bool) -> Config {
        use crate::core::config::SecurityConfig;

        let mut config = Config::default();
        config.security = SecurityConfig {
            allowed_roots: roots,
            allow_symlinks,
        };
        config
    }

    #[test]
    fn test_no_roots_allows_existing_paths() {
        let temp_dir = TempDir::new().unwrap();
        let test_file = temp_dir.path().join("test.txt");
        fs::write(&test_file, "test").unwrap();

        let config = create_test_config(Vec::new(), true);
        let result = validate_path(test_file.to_str().unwrap(), &config);

        assert!(result.is_ok());
    }

    #[test]
    fn test_path_within_root() {
        let temp_dir = TempDir::new().unwrap();
        let test_file = temp_dir.path().join("test.txt");
        fs::write(&test_file, "test").unwrap();

        let config = create_test_config(vec![temp_dir.path().to_path_buf()], true);
        let result = validate_path(test_file.to_str().unwrap(), &config);

        assert!(result.is_ok());
    }

    #[test]
    fn test_path_in_second_root() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        let test_file = second.path().join("test.txt");
        fs::write(&test_file, "test").unwrap();

        let config = create_test_config(
            vec![first.path().to_path_buf(), second.path().to_path_buf()],
            true,
        );
        let result = validate_path(test_file.to_str().unwrap(), &config);

        assert!(result.is_ok());
    }

    #[test]
    fn test_path_outside_roots() {
        let root_dir = TempDir::new().unwrap();
        let outside_dir = TempDir::new().unwrap();
        let outside_file = outside_dir.path().join("outside.txt");
        fs::write(&outside_file, "test").unwrap();

        let config = create_test_config(vec![root_dir.path().to_path_buf()], true);
        let result = validate_path(outside_file.to_str().unwrap(), &config);

        assert!(matches!(
            result,
            Err(PathSecurityError::OutsideAllowedRoots { .. })
        ));
    }

    #[test]
    fn test_path_traversal_blocked() {
        let temp_dir = TempDir::new().unwrap();
        let subdir = temp_dir.path().join("subdir");
        fs::create_dir(&subdir).unwrap();

        let test_file = temp_dir.path().join("test.txt");
        fs::write(&test_file, "test").unwrap();

        // Try to access parent directory file from subdir using ../
        let config = create_test_config(vec![subdir.clone()], true);
        let traversal_path = subdir.join("../test.txt");

        let result = validate_path(traversal_path.to_str().unwrap(), &config);

        // Should fail because the canonical path resolves outside the root
        assert!(matches!(
            result,
            Err(PathSecurityError::OutsideAllowedRoots { .. })
        ));
    }

    #[test]
    fn test_nonexistent_path() {
        let temp_dir = TempDir::new().unwrap();
        let nonexistent = temp_dir.path().join("does_not_exist.txt");

        let config = create_test_config(vec![temp_dir.path().to_path_buf()], true);
        let result = validate_path(nonexistent.to_str().unwrap(), &config);

        assert!(matches!(result, Err(PathSecurityError::PathNotFound { .. })));
    }

    #[test]
    fn test_parent_path_for_new_file() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("sub/new.txt");

        let config = create_test_config(vec![temp_dir.path().to_path_buf()], true);
        let result = validate_parent_path(target.to_str().unwrap(), &config).unwrap();

        assert!(result.ends_with("sub/new.txt"));
    }

    #[test]
    fn test_parent_path_outside_root_blocked() {
        let root_dir = TempDir::new().unwrap();
        let outside_dir = TempDir::new().unwrap();
        let target = outside_dir.path().join("new.txt");

        let config = create_test_config(vec![root_dir.path().to_path_buf()], true);
        let result = validate_parent_path(target.to_str().unwrap(), &config);

        assert!(matches!(
            result,
            Err(PathSecurityError::OutsideAllowedRoots { .. })
        ));
    }

    #[test]
    fn test_parent_path_traversal_in_tail_blocked() {
        let temp_dir = TempDir::new().unwrap();
        let sneaky = temp_dir.path().join("missing/../../escape.txt");

        let config = create_test_config(vec![temp_dir.path().to_path_buf()], true);
        let result = validate_parent_path(sneaky.to_str().unwrap(), &config);

        assert!(result.is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_within_root() {
        use std::os::unix::fs::symlink;

        let temp_dir = TempDir::new().unwrap();
        let target_file = temp_dir.path().join("target.txt");
        let link_file = temp_dir.path().join("link.txt");

        fs::write(&target_file, "test").unwrap();
        symlink(&target_file, &link_file).unwrap();

        let config = create_test_config(vec![temp_dir.path().to_path_buf()], true);
        let result = validate_path(link_file.to_str().unwrap(), &config);

        assert!(result.is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_outside_root_blocked() {
        use std::os::unix::fs::symlink;

        let root_dir = TempDir::new().unwrap();
        let outside_dir = TempDir::new().unwrap();

        let target_file = outside_dir.path().join("target.txt");
        let link_file = root_dir.path().join("link.txt");

        fs::write(&target_file, "test").unwrap();
        symlink(&target_file, &link_file).unwrap();

        let config = create_test_config(vec![root_dir.path().to_path_buf()], true);
        let result = validate_path(link_file.to_str().unwrap(), &config);

        assert!(matches!(
            result,
            Err(PathSecurityError::OutsideAllowedRoots { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_disallowed_by_config() {
        use std::os::unix::fs::symlink;

        let temp_dir = TempDir::new().unwrap();
        let target_file = temp_dir.path().join("target.txt");
        let link_file = temp_dir.path().join("link.txt");

        fs::write(&target_file, "test").unwrap();
        symlink(&target_file, &link_file).unwrap();

        let config = create_test_config(vec![temp_dir.path().to_path_buf()], false);
        let result = validate_path(link_file.to_str().unwrap(), &config);

        // The symlink itself resolves inside the root, which is fine even
        // with symlinks disallowed; pointing outside is what gets rejected.
        assert!(result.is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_outside_blocked_when_disallowed() {
        use std::os::unix::fs::symlink;

        let root_dir = TempDir::new().unwrap();
        let outside_dir = TempDir::new().unwrap();

        let target_file = outside_dir.path().join("target.txt");
        let link_file = root_dir.path().join("link.txt");

        fs::write(&target_file, "test").unwrap();
        symlink(&target_file, &link_file).unwrap();

        let config = create_test_config(vec![root_dir.path().to_path_buf()], false);
        let result = validate_path(link_file.to_str().unwrap(), &config);

        assert!(matches!(
            result,
            Err(PathSecurityError::SymlinkOutsideRoots { .. })
        ));
    }
}
