//! External-process backends
//!
//! Tokenizers that only exist as standalone programs are driven as a
//! long-lived co-process. The protocol is line based:
//!
//! * the sentence is written as one line (embedded line breaks become
//!   spaces) and stdin is flushed;
//! * the program answers with one reply in the family's [`OutputShape`]
//!   and must flush its stdout per reply:
//!   * `tokens`: one line of whitespace-separated tokens;
//!   * `conll`: `position\ttoken` lines, blank lines between sentences,
//!     then a line holding only `#END`;
//!   * `json`: one line holding a JSON array of tokens, `[kind, token, ..]`
//!     tuples or objects with a `text` field.
//!
//! The helper programs under `glossa-core/helpers/` wrap the tokenizer
//! libraries that have no Rust counterpart and speak this protocol.
//!
//! The program's stderr is inherited, so start-up chatter ends up in our
//! log stream and never in the reply channel. When a call fails the
//! process is discarded and a fresh one is started on the next call.

use std::io::{BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::sync::Mutex;

use super::shape::read_reply;
use super::{finish_tokens, Backend};
use crate::error::{BackendError, BackendResult};
use crate::routing::OutputShape;

struct CoProcess {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
}

impl CoProcess {
    fn spawn(command: &[String]) -> BackendResult<Self> {
        let (program, args) = command
            .split_first()
            .ok_or_else(|| BackendError::Protocol("empty command".to_string()))?;

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()?;

        let stdin = child.stdin.take().ok_or(BackendError::Closed)?;
        let stdout = child.stdout.take().ok_or(BackendError::Closed)?;
        log::debug!("Started tokenizer process {} (pid {})", program, child.id());

        Ok(Self {
            child,
            stdin,
            stdout: BufReader::new(stdout),
        })
    }

    fn exchange(&mut self, sentence: &str, shape: OutputShape) -> BackendResult<Vec<String>> {
        let line = sentence.replace(['\r', '\n'], " ");
        self.stdin.write_all(line.as_bytes())?;
        self.stdin.write_all(b"\n")?;
        self.stdin.flush()?;
        read_reply(shape, &mut self.stdout)
    }
}

impl Drop for CoProcess {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Backend served by an external program
pub struct PipeBackend {
    command: Vec<String>,
    shape: OutputShape,
    process: Mutex<Option<CoProcess>>,
}

impl PipeBackend {
    /// Start the program; fails when it cannot be executed
    pub fn spawn(command: Vec<String>, shape: OutputShape) -> BackendResult<Self> {
        let process = CoProcess::spawn(&command)?;
        Ok(Self {
            command,
            shape,
            process: Mutex::new(Some(process)),
        })
    }

    /// Command line this backend runs
    pub fn command(&self) -> &[String] {
        &self.command
    }
}

impl std::fmt::Debug for PipeBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipeBackend")
            .field("command", &self.command)
            .field("shape", &self.shape)
            .finish()
    }
}

impl Backend for PipeBackend {
    fn tokenize(&self, sentence: &str) -> BackendResult<Vec<String>> {
        let mut guard = self
            .process
            .lock()
            .map_err(|_| BackendError::Protocol("tokenizer process lock poisoned".to_string()))?;

        if guard.is_none() {
            log::info!("Restarting tokenizer process {}", self.command.join(" "));
            *guard = Some(CoProcess::spawn(&self.command)?);
        }

        let result = match guard.as_mut() {
            Some(process) => process.exchange(sentence, self.shape),
            None => Err(BackendError::Closed),
        };
        match result {
            Ok(tokens) => Ok(finish_tokens(tokens)),
            Err(e) => {
                // the reply stream may be out of step now
                *guard = None;
                Err(e)
            }
        }
    }
}
