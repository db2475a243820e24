//! One-shot MeCab invocations.
//!
//! Every request starts a fresh process, writes one line of text and reads
//! the whole response. Nothing is kept alive between requests.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStderr, ChildStdout, Command, Stdio};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::OnceLock;
use std::thread;
use std::time::{Duration, Instant};

use regex::{Captures, Regex};
use tracing::{debug, trace, warn};

use crate::config::MecabConfig;
use crate::constants::{
    COMPONENT_SEPARATOR, FOOTER, FORMAT_HEADWORD, FORMAT_INFLECTION, FORMAT_KATAKANA_READING,
    FORMAT_PART_OF_SPEECH, FORMAT_WORD, INPUT_BUFFER_SIZE, NODE_SEPARATOR, RC_FILE_NAME,
    USER_DIC_FILE_NAME,
};
use crate::discovery::{discover_dictionary_dir, discover_executable, ensure_executable};
use crate::error::{FuriganaError, Result};
use crate::parser::decode_output;

const POLL_INTERVAL: Duration = Duration::from_millis(5);
/// How long pipe readers may keep running once the child has exited.
const DRAIN_GRACE: Duration = Duration::from_millis(200);
const LIBRARY_PATH_VARS: [&str; 2] = ["LD_LIBRARY_PATH", "DYLD_LIBRARY_PATH"];

#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// Something that turns one line of text into raw MeCab node output.
///
/// [`MecabProcess`] is the real implementation. Other implementations can
/// replay recorded output.
pub trait Analyzer {
    /// Analyzes `text` and returns the decoded response.
    fn run(&self, text: &str) -> Result<String>;
}

impl<A: Analyzer + ?Sized> Analyzer for &A {
    fn run(&self, text: &str) -> Result<String> {
        (**self).run(text)
    }
}

impl<A: Analyzer + ?Sized> Analyzer for Box<A> {
    fn run(&self, text: &str) -> Result<String> {
        (**self).run(text)
    }
}

fn html_tag() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<([^<>]*)>").expect("html tag pattern is valid"))
}

/// Prepares text for MeCab: line breaks become spaces and HTML tags are
/// removed, except tags starting with `b` or `/b` (`<br>`, `<b>`, `</b>`).
pub fn escape_text(text: &str) -> String {
    let flat = text.replace('\n', " ");
    html_tag()
        .replace_all(&flat, |caps: &Captures<'_>| {
            let inner = &caps[1];
            if inner.starts_with('b') || inner.starts_with("/b") {
                caps[0].to_string()
            } else {
                String::new()
            }
        })
        .into_owned()
}

/// Node format producing `word<C>headword<C>reading<C>pos<C>inflection<N>`.
pub fn node_format() -> String {
    [
        FORMAT_WORD,
        FORMAT_HEADWORD,
        FORMAT_KATAKANA_READING,
        FORMAT_PART_OF_SPEECH,
        FORMAT_INFLECTION,
    ]
    .join(COMPONENT_SEPARATOR)
        + NODE_SEPARATOR
}

pub(crate) fn build_args(
    dictionary_dir: &Path,
    rc_file: Option<&Path>,
    user_dictionary: Option<&Path>,
    extra_args: &[String],
) -> Vec<String> {
    let mut args = vec![
        format!("--node-format={}", node_format()),
        format!("--unk-format={FORMAT_WORD}{NODE_SEPARATOR}"),
        format!("--eos-format={FOOTER}"),
        format!("--dicdir={}", dictionary_dir.display()),
    ];
    if let Some(rc_file) = rc_file {
        args.push(format!("--rcfile={}", rc_file.display()));
    }
    if let Some(user_dictionary) = user_dictionary {
        args.push(format!("--userdic={}", user_dictionary.display()));
    }
    args.push(format!("--input-buffer-size={INPUT_BUFFER_SIZE}"));
    args.extend(extra_args.iter().cloned());
    args
}

/// MeCab wants an rc file even if it is empty. Returns `None` when the
/// default one can't be created.
fn prepare_rc_file(config: &MecabConfig) -> Option<PathBuf> {
    if let Some(rc_file) = &config.rc_file {
        return Some(rc_file.clone());
    }
    let rc_file = config.support_dir.join(RC_FILE_NAME);
    if rc_file.is_file() {
        return Some(rc_file);
    }
    let created = fs::create_dir_all(&config.support_dir)
        .and_then(|_| fs::File::create(&rc_file).map(|_| ()));
    match created {
        Ok(()) => {
            debug!(path = %rc_file.display(), "created empty mecabrc");
            Some(rc_file)
        }
        Err(err) => {
            warn!(path = %rc_file.display(), error = %err, "could not create mecabrc");
            None
        }
    }
}

/// Runs the MeCab executable once per request.
#[derive(Debug, Clone)]
pub struct MecabProcess {
    executable: PathBuf,
    args: Vec<String>,
    support_dir: PathBuf,
    timeout: Duration,
}

impl MecabProcess {
    /// Resolves the executable, dictionary and rc file from `config`.
    ///
    /// Paths left unset in the config are discovered; see
    /// [`MecabConfig`] for the search order.
    pub fn from_config(config: &MecabConfig) -> Result<Self> {
        let timeout = config.validated_timeout()?;
        let executable = config
            .executable
            .clone()
            .or_else(|| discover_executable(&config.support_dir))
            .ok_or_else(|| {
                FuriganaError::ExecutableNotFound(format!(
                    "set MECAB_PATH, install mecab on PATH or place it in {}",
                    config.support_dir.display()
                ))
            })?;
        ensure_executable(&executable, &config.support_dir)?;

        let dictionary_dir = config
            .dictionary_dir
            .clone()
            .unwrap_or_else(|| discover_dictionary_dir(&config.support_dir));
        let rc_file = prepare_rc_file(config);
        let user_dictionary = config.user_dictionary.clone().or_else(|| {
            let bundled = config.support_dir.join(USER_DIC_FILE_NAME);
            bundled.is_file().then_some(bundled)
        });

        let args = build_args(
            &dictionary_dir,
            rc_file.as_deref(),
            user_dictionary.as_deref(),
            &config.extra_args,
        );
        debug!(executable = %executable.display(), ?args, "mecab command");

        Ok(Self {
            executable,
            args,
            support_dir: config.support_dir.clone(),
            timeout,
        })
    }

    /// Executable that is started for each request.
    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// Command-line arguments passed to the executable.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Time limit for one request.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.executable);
        command
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        for key in LIBRARY_PATH_VARS {
            command.env(key, &self.support_dir);
        }
        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;
            command.creation_flags(CREATE_NO_WINDOW);
        }
        command
    }

    fn spawn(&self) -> Result<Child> {
        self.command().spawn().map_err(|err| {
            FuriganaError::Spawn(format!("{}: {err}", self.executable.display()))
        })
    }
}

/// Which pipe a reader thread drained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stream {
    Stdout,
    Stderr,
}

type PipeOutput = (Stream, io::Result<Vec<u8>>);

/// Reads `pipe` to the end on its own thread and reports over `sender`.
///
/// The thread is never joined. If something else keeps the pipe open, the
/// thread outlives the request and its late send goes nowhere.
fn spawn_reader<R: Read + Send + 'static>(
    mut pipe: R,
    stream: Stream,
    sender: Sender<PipeOutput>,
) {
    thread::spawn(move || {
        let mut buffer = Vec::new();
        let result = pipe.read_to_end(&mut buffer).map(|_| buffer);
        let _ = sender.send((stream, result));
    });
}

struct Exchange {
    child: Child,
    output: Receiver<PipeOutput>,
    readers: usize,
}

impl Exchange {
    fn start(mut child: Child, request: Vec<u8>) -> Self {
        if let Some(mut stdin) = child.stdin.take() {
            thread::spawn(move || {
                if let Err(err) = stdin.write_all(&request).and_then(|_| stdin.flush()) {
                    trace!(error = %err, "mecab closed stdin early");
                }
            });
        }

        let (sender, output) = mpsc::channel();
        let mut readers = 0;
        if let Some(stdout) = child.stdout.take() {
            spawn_reader::<ChildStdout>(stdout, Stream::Stdout, sender.clone());
            readers += 1;
        }
        if let Some(stderr) = child.stderr.take() {
            spawn_reader::<ChildStderr>(stderr, Stream::Stderr, sender);
            readers += 1;
        }
        Self {
            child,
            output,
            readers,
        }
    }

    /// Kills and reaps the child. Failures only mean it is already gone.
    fn kill(&mut self) {
        if let Err(err) = self.child.kill() {
            debug!(error = %err, "failed to kill mecab");
        }
        if let Err(err) = self.child.wait() {
            debug!(error = %err, "failed to reap mecab");
        }
    }

    /// Waits for the child to exit. Returns `false` if it was killed at the
    /// deadline.
    fn wait_until(&mut self, deadline: Instant) -> Result<bool> {
        loop {
            match self.child.try_wait() {
                Ok(Some(status)) => {
                    trace!(%status, "mecab exited");
                    return Ok(true);
                }
                Ok(None) => {}
                Err(err) => {
                    self.kill();
                    return Err(err.into());
                }
            }
            if Instant::now() >= deadline {
                self.kill();
                return Ok(false);
            }
            thread::sleep(POLL_INTERVAL);
        }
    }

    /// Collects what the readers got before `deadline`. Standard error
    /// follows standard output, the way MeCab prints it to a terminal.
    /// Readers still blocked at the deadline are abandoned.
    fn collect(self, deadline: Instant) -> Result<Vec<u8>> {
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        for _ in 0..self.readers {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.output.recv_timeout(remaining) {
                Ok((Stream::Stdout, result)) => stdout = result?,
                Ok((Stream::Stderr, result)) => stderr = result?,
                Err(_) => {
                    debug!("mecab pipes still open, abandoning readers");
                    break;
                }
            }
        }
        stdout.extend(stderr);
        Ok(stdout)
    }
}

impl Analyzer for MecabProcess {
    fn run(&self, text: &str) -> Result<String> {
        let mut request = escape_text(text).into_bytes();
        request.push(b'\n');
        trace!(bytes = request.len(), "sending request to mecab");

        let deadline = Instant::now() + self.timeout;
        let mut exchange = Exchange::start(self.spawn()?, request);
        if !exchange.wait_until(deadline)? {
            if let Ok(partial) = exchange.collect(Instant::now() + DRAIN_GRACE) {
                trace!(bytes = partial.len(), "discarded output of killed mecab");
            }
            warn!(timeout = ?self.timeout, "mecab timed out and was killed");
            return Err(FuriganaError::Timeout(self.timeout));
        }
        let output = exchange.collect(deadline + DRAIN_GRACE)?;
        Ok(decode_output(&output))
    }
}
