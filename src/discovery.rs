use std::env;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::constants::ENV_SUPPORT_DIR;

/// Suffix of the bundled executable in the support directory.
pub(crate) fn support_exe_suffix() -> &'static str {
    #[cfg(target_os = "windows")]
    {
        ".exe"
    }
    #[cfg(target_os = "macos")]
    {
        ".mac"
    }
    #[cfg(all(not(target_os = "windows"), not(target_os = "macos")))]
    {
        ".lin"
    }
}

/// Directory holding the bundled executable, `mecabrc` and the user dictionary.
///
/// `FURIGANA_SUPPORT_DIR` wins; otherwise `support/` next to the running
/// executable.
pub(crate) fn default_support_dir() -> PathBuf {
    if let Some(path) = env::var_os(ENV_SUPPORT_DIR) {
        return PathBuf::from(path);
    }
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|parent| parent.join("support")))
        .unwrap_or_else(|| PathBuf::from("support"))
}

pub(crate) fn bundled_executable(support_dir: &Path, name: &str) -> PathBuf {
    support_dir.join(format!("{name}{}", support_exe_suffix()))
}

/// Finds the MeCab executable on `PATH`, then the bundled copy.
///
/// `MECAB_PATH` is not read here; `MecabConfig::default` already stores it.
pub(crate) fn discover_executable(support_dir: &Path) -> Option<PathBuf> {
    if let Ok(path) = which::which("mecab") {
        debug!(path = %path.display(), "using mecab from PATH");
        return Some(path);
    }
    let bundled = bundled_executable(support_dir, "mecab");
    if bundled.is_file() {
        debug!(path = %bundled.display(), "using bundled mecab");
        return Some(bundled);
    }
    None
}

pub(crate) fn dictionary_candidates() -> &'static [&'static str] {
    &[
        "/usr/lib/mecab/dic/mecab-ipadic-neologd",
        "/usr/local/lib/mecab/dic/mecab-ipadic-neologd",
        "/opt/homebrew/lib/mecab/dic/mecab-ipadic-neologd",
        "/usr/lib/mecab/dic/ipadic",
        "/usr/local/lib/mecab/dic/ipadic",
        "/opt/homebrew/lib/mecab/dic/ipadic",
        "/usr/lib/x86_64-linux-gnu/mecab/dic/mecab-ipadic-neologd",
        "/var/lib/mecab/dic/ipadic-utf8",
    ]
}

/// Picks the system dictionary: an installed neologd/ipadic, then the
/// support directory. `MECAB_DIC_DIR` is handled by `MecabConfig::default`.
pub(crate) fn discover_dictionary_dir(support_dir: &Path) -> PathBuf {
    dictionary_candidates()
        .iter()
        .map(PathBuf::from)
        .find(|path| path.is_dir())
        .unwrap_or_else(|| support_dir.to_path_buf())
}

/// Marks the bundled executable as runnable. A no-op for files not in the
/// support directory and on Windows.
#[cfg(unix)]
pub(crate) fn ensure_executable(path: &Path, support_dir: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    if !path.starts_with(support_dir) || !path.is_file() {
        return Ok(());
    }
    let mut permissions = std::fs::metadata(path)?.permissions();
    if permissions.mode() & 0o111 == 0 {
        permissions.set_mode(0o755);
        std::fs::set_permissions(path, permissions)?;
    }
    Ok(())
}

#[cfg(not(unix))]
pub(crate) fn ensure_executable(_path: &Path, _support_dir: &Path) -> std::io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod discovery_tests {
    use super::{
        bundled_executable, default_support_dir, discover_dictionary_dir, discover_executable,
        support_exe_suffix,
    };
    use crate::test_support::{make_temp_dir, remove_tree, with_env_vars};
    use std::fs;
    use std::path::PathBuf;

    #[test]
    fn support_suffix_matches_platform() {
        #[cfg(target_os = "windows")]
        assert_eq!(support_exe_suffix(), ".exe");
        #[cfg(target_os = "macos")]
        assert_eq!(support_exe_suffix(), ".mac");
        #[cfg(all(not(target_os = "windows"), not(target_os = "macos")))]
        assert_eq!(support_exe_suffix(), ".lin");
    }

    #[test]
    fn support_dir_prefers_env_var() {
        with_env_vars(&[("FURIGANA_SUPPORT_DIR", Some("/tmp/furigana-support"))], || {
            assert_eq!(default_support_dir(), PathBuf::from("/tmp/furigana-support"));
        });
    }

    #[test]
    fn executable_search_ignores_mecab_path() {
        let empty = make_temp_dir("discover-ignore-env");
        with_env_vars(
            &[
                ("MECAB_PATH", Some("/opt/mecab/bin/mecab")),
                ("PATH", Some(empty.to_str().expect("utf-8 temp path"))),
            ],
            || {
                assert_eq!(discover_executable(&empty), None);
            },
        );
        remove_tree(&empty);
    }

    #[cfg(unix)]
    #[test]
    fn executable_found_on_path() {
        use std::os::unix::fs::PermissionsExt;

        let bin = make_temp_dir("discover-path");
        let mecab = bin.join("mecab");
        fs::write(&mecab, b"#!/bin/sh\n").expect("failed to create fake mecab");
        fs::set_permissions(&mecab, fs::Permissions::from_mode(0o755))
            .expect("failed to mark fake mecab executable");

        with_env_vars(
            &[
                ("MECAB_PATH", None),
                ("PATH", Some(bin.to_str().expect("utf-8 temp path"))),
            ],
            || {
                let path = discover_executable(&PathBuf::from("/nonexistent"));
                assert_eq!(path, Some(mecab.clone()));
            },
        );

        remove_tree(&bin);
    }

    #[test]
    fn executable_falls_back_to_bundled_copy() {
        let support = make_temp_dir("discover-bundled");
        let empty = make_temp_dir("discover-empty-path");
        let bundled = bundled_executable(&support, "mecab");
        fs::write(&bundled, b"").expect("failed to create bundled mecab");

        with_env_vars(
            &[
                ("MECAB_PATH", None),
                ("PATH", Some(empty.to_str().expect("utf-8 temp path"))),
            ],
            || {
                assert_eq!(discover_executable(&support), Some(bundled.clone()));
            },
        );

        remove_tree(&support);
        remove_tree(&empty);
    }

    #[test]
    fn executable_missing_everywhere() {
        let support = make_temp_dir("discover-none");
        with_env_vars(
            &[
                ("MECAB_PATH", None),
                ("PATH", Some(support.to_str().expect("utf-8 temp path"))),
            ],
            || {
                assert_eq!(discover_executable(&support), None);
            },
        );
        remove_tree(&support);
    }

    #[test]
    fn dictionary_search_ignores_mecab_dic_dir() {
        with_env_vars(&[("MECAB_DIC_DIR", Some("/tmp/ipadic-from-env"))], || {
            let path = discover_dictionary_dir(&PathBuf::from("/nonexistent"));
            assert_ne!(path, PathBuf::from("/tmp/ipadic-from-env"));
        });
    }

    #[test]
    fn dictionary_dir_is_a_candidate_or_support_dir() {
        let support = make_temp_dir("discover-dic");
        with_env_vars(&[("MECAB_DIC_DIR", None)], || {
            let path = discover_dictionary_dir(&support);
            assert!(path == support || path.is_dir());
        });
        remove_tree(&support);
    }

    #[cfg(unix)]
    #[test]
    fn bundled_executable_is_made_runnable() {
        use super::ensure_executable;
        use std::os::unix::fs::PermissionsExt;

        let support = make_temp_dir("discover-chmod");
        let bundled = bundled_executable(&support, "mecab");
        fs::write(&bundled, b"").expect("failed to create bundled mecab");
        fs::set_permissions(&bundled, fs::Permissions::from_mode(0o644))
            .expect("failed to reset permissions");

        ensure_executable(&bundled, &support).expect("chmod should succeed");
        let mode = fs::metadata(&bundled)
            .expect("bundled file exists")
            .permissions()
            .mode();
        assert_eq!(mode & 0o111, 0o111);

        remove_tree(&support);
    }
}
