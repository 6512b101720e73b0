// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use std::path::{Path, PathBuf};

use path_clean::clean;

pub const DEFAULT_CONFIG_NAME: &str = "qf-frame.config.yaml";

/// Prefix for environment overrides. Nested keys use `__`, eg. `QF_FRAME_SERVER__PORT=8080`.
pub const ENV_PREFIX: &str = "QF_FRAME_";

pub type FindInParent = fn(&Path, &str) -> Option<PathBuf>;

/// Walk from `start` towards the filesystem root returning the first `filename` found.
pub fn find_in_parent(start: &Path, filename: &str) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(filename))
        .find(|candidate| candidate.exists())
}

/// Decide which configuration file to read.
///
/// An explicit file always wins (relative paths are taken from `cwd`). Otherwise the nearest
/// `filename` in `cwd` or one of its parents is used, falling back to `default_dir`.
pub fn resolve_config_path(
    find: FindInParent,
    cwd: &Path,
    default_dir: &Path,
    filename: &str,
    explicit: Option<&Path>,
) -> PathBuf {
    match explicit {
        Some(file) if file.is_absolute() => file.to_path_buf(),
        Some(file) => clean(cwd.join(file)),
        None => find(cwd, filename).unwrap_or_else(|| clean(default_dir.join(filename))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn not_found(_: &Path, _: &str) -> Option<PathBuf> {
        None
    }

    fn found(_: &Path, _: &str) -> Option<PathBuf> {
        Some(PathBuf::from("/projects/frames/qf-frame.config.yaml"))
    }

    #[test]
    fn explicit_file_wins() {
        let path = resolve_config_path(
            found,
            Path::new("/projects/frames/api"),
            Path::new("/home/me/.config/qf-frame"),
            DEFAULT_CONFIG_NAME,
            Some(Path::new("/etc/qf-frame/prod.yaml")),
        );
        assert_eq!(path, PathBuf::from("/etc/qf-frame/prod.yaml"));

        let path = resolve_config_path(
            found,
            Path::new("/projects/frames/api"),
            Path::new("/home/me/.config/qf-frame"),
            DEFAULT_CONFIG_NAME,
            Some(Path::new("../staging.yaml")),
        );
        assert_eq!(path, PathBuf::from("/projects/frames/staging.yaml"));
    }

    #[test]
    fn parent_search_then_default() {
        let path = resolve_config_path(
            found,
            Path::new("/projects/frames/api"),
            Path::new("/home/me/.config/qf-frame"),
            DEFAULT_CONFIG_NAME,
            None,
        );
        assert_eq!(path, PathBuf::from("/projects/frames/qf-frame.config.yaml"));

        let path = resolve_config_path(
            not_found,
            Path::new("/projects/frames/api"),
            Path::new("/home/me/.config/qf-frame"),
            DEFAULT_CONFIG_NAME,
            None,
        );
        assert_eq!(
            path,
            PathBuf::from("/home/me/.config/qf-frame/qf-frame.config.yaml")
        );
    }

    #[test]
    fn find_in_parent_walks_up() -> std::io::Result<()> {
        let root = tempfile::tempdir()?;
        let nested = root.path().join("a").join("b");
        fs::create_dir_all(&nested)?;
        fs::write(root.path().join(DEFAULT_CONFIG_NAME), "origin_chain_id: 10\n")?;

        let hit = find_in_parent(&nested, DEFAULT_CONFIG_NAME);
        assert_eq!(hit, Some(root.path().join(DEFAULT_CONFIG_NAME)));
        assert_eq!(find_in_parent(&nested, "missing.yaml"), None);
        Ok(())
    }
}
