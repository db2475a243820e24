use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{DEFAULT_TIMEOUT_SECS, ENV_MECAB_DIC_DIR, ENV_MECAB_PATH};
use crate::discovery::default_support_dir;
use crate::error::{FuriganaError, Result};

/// Controls which tokens [`crate::Mecab::reading`] leaves without furigana.
#[derive(Debug, Clone)]
pub struct ReadingOptions {
    /// Skip single kanji numerals and full-width digits.
    pub skip_numbers: bool,
    /// Words that are never annotated.
    pub skip_expressions: Vec<String>,
}

impl Default for ReadingOptions {
    fn default() -> Self {
        Self {
            skip_numbers: true,
            skip_expressions: Vec::new(),
        }
    }
}

impl ReadingOptions {
    /// Enables or disables number skipping.
    pub fn with_skip_numbers(mut self, skip_numbers: bool) -> Self {
        self.skip_numbers = skip_numbers;
        self
    }

    /// Adds a word that must never be annotated.
    pub fn add_skip_expression(mut self, expression: impl Into<String>) -> Self {
        self.skip_expressions.push(expression.into());
        self
    }
}

/// Settings for [`crate::Mecab`].
///
/// `Default` reads `MECAB_PATH`, `MECAB_DIC_DIR` and `FURIGANA_SUPPORT_DIR`.
/// Unset paths are discovered when the controller is built.
#[derive(Debug, Clone)]
pub struct MecabConfig {
    /// Explicit executable path.
    pub executable: Option<PathBuf>,
    /// Directory with `mecabrc`, `user_dic.dic` and the bundled executable.
    pub support_dir: PathBuf,
    /// Explicit system dictionary directory.
    pub dictionary_dir: Option<PathBuf>,
    /// Explicit rc file. Defaults to `mecabrc` in the support directory.
    pub rc_file: Option<PathBuf>,
    /// Explicit user dictionary. Defaults to `user_dic.dic` in the support
    /// directory when that file exists.
    pub user_dictionary: Option<PathBuf>,
    /// Arguments appended after the generated ones.
    pub extra_args: Vec<String>,
    /// Time limit for one request.
    pub timeout: Duration,
    /// Number of cached sentences, `0` for no limit.
    pub cache_capacity: usize,
    /// Token skipping for [`crate::Mecab::reading`].
    pub reading: ReadingOptions,
}

impl Default for MecabConfig {
    fn default() -> Self {
        Self {
            executable: env::var_os(ENV_MECAB_PATH).map(PathBuf::from),
            support_dir: default_support_dir(),
            dictionary_dir: env::var_os(ENV_MECAB_DIC_DIR).map(PathBuf::from),
            rc_file: None,
            user_dictionary: None,
            extra_args: Vec::new(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            cache_capacity: 0,
            reading: ReadingOptions::default(),
        }
    }
}

impl MecabConfig {
    /// Uses an explicit executable.
    pub fn with_executable(mut self, executable: impl AsRef<Path>) -> Self {
        self.executable = Some(executable.as_ref().to_path_buf());
        self
    }

    /// Uses another support directory.
    pub fn with_support_dir(mut self, support_dir: impl AsRef<Path>) -> Self {
        self.support_dir = support_dir.as_ref().to_path_buf();
        self
    }

    /// Uses an explicit dictionary directory.
    pub fn with_dictionary_dir(mut self, dictionary_dir: impl AsRef<Path>) -> Self {
        self.dictionary_dir = Some(dictionary_dir.as_ref().to_path_buf());
        self
    }

    /// Uses an explicit rc file.
    pub fn with_rc_file(mut self, rc_file: impl AsRef<Path>) -> Self {
        self.rc_file = Some(rc_file.as_ref().to_path_buf());
        self
    }

    /// Uses an explicit user dictionary.
    pub fn with_user_dictionary(mut self, user_dictionary: impl AsRef<Path>) -> Self {
        self.user_dictionary = Some(user_dictionary.as_ref().to_path_buf());
        self
    }

    /// Appends one extra command-line argument.
    pub fn add_arg(mut self, arg: impl Into<String>) -> Self {
        self.extra_args.push(arg.into());
        self
    }

    /// Sets the per-request time limit.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the cache capacity (`0` = unbounded).
    pub fn with_cache_capacity(mut self, cache_capacity: usize) -> Self {
        self.cache_capacity = cache_capacity;
        self
    }

    /// Replaces the reading options.
    pub fn with_reading_options(mut self, reading: ReadingOptions) -> Self {
        self.reading = reading;
        self
    }

    pub(crate) fn validated_timeout(&self) -> Result<Duration> {
        if self.timeout.is_zero() {
            return Err(FuriganaError::InvalidArgument(
                "MecabConfig.timeout must be greater than zero".to_string(),
            ));
        }
        Ok(self.timeout)
    }
}
