use super::ExportArtifact;
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{info, warn};

/// Outbound hook for encoded exports (files, clipboard, terminal).
pub trait ExportSink {
    fn deliver(&mut self, artifact: &ExportArtifact) -> Result<Delivery, DeliveryError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Saved { path: PathBuf },
    Copied { program: String },
    Written,
    Fallback {
        reason: String,
        delivered: Box<Delivery>,
    },
}

impl Delivery {
    /// Short notification for the user.
    pub fn notice(&self) -> String {
        match self {
            Delivery::Saved { path } => format!("Saved {}", path.display()),
            Delivery::Copied { .. } => "Copied to clipboard.".to_string(),
            Delivery::Written => "Written to output.".to_string(),
            Delivery::Fallback { reason, delivered } => {
                format!("{} (clipboard unavailable: {reason})", delivered.notice())
            }
        }
    }

    pub fn used_fallback(&self) -> bool {
        matches!(self, Delivery::Fallback { .. })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("unable to write {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unable to write export: {0}")]
    Io(#[from] std::io::Error),
    #[error("clipboard command `{program}` failed: {detail}")]
    Clipboard { program: String, detail: String },
}

/// Saves artifacts under a directory using their canonical file names.
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ExportSink for FileSink {
    fn deliver(&mut self, artifact: &ExportArtifact) -> Result<Delivery, DeliveryError> {
        let path = self.dir.join(artifact.file_name);
        std::fs::create_dir_all(&self.dir).map_err(|source| DeliveryError::File {
            path: self.dir.clone(),
            source,
        })?;
        std::fs::write(&path, artifact.contents.as_bytes()).map_err(|source| {
            DeliveryError::File {
                path: path.clone(),
                source,
            }
        })?;

        info!(path = %path.display(), "export saved");
        Ok(Delivery::Saved { path })
    }
}

/// Writes artifact contents verbatim to any writer (stdout in the CLI).
#[derive(Debug)]
pub struct WriterSink<W> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ExportSink for WriterSink<W> {
    fn deliver(&mut self, artifact: &ExportArtifact) -> Result<Delivery, DeliveryError> {
        self.writer.write_all(artifact.contents.as_bytes())?;
        self.writer.flush()?;
        Ok(Delivery::Written)
    }
}

/// External program that accepts clipboard text on stdin (`pbcopy`, `wl-copy`, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ClipboardCommand {
    /// Splits on whitespace; `None` for a blank command line.
    pub fn parse(raw: &str) -> Option<Self> {
        let mut parts = raw.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
        })
    }

    fn copy(&self, text: &str) -> Result<(), DeliveryError> {
        let failure = |detail: String| DeliveryError::Clipboard {
            program: self.program.clone(),
            detail,
        };

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|err| failure(err.to_string()))?;

        // stdin is closed at the end of the match so the program sees EOF.
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(text.as_bytes()),
            None => Ok(()),
        };

        // Reap the child even when the write failed.
        let status = child.wait().map_err(|err| failure(err.to_string()))?;
        written.map_err(|err| failure(err.to_string()))?;
        if status.success() {
            Ok(())
        } else {
            Err(failure(format!("exited with {status}")))
        }
    }
}

impl fmt::Display for ClipboardCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Copies through the clipboard command, falling back to a secondary sink on any failure.
#[derive(Debug)]
pub struct ClipboardSink<F> {
    command: Option<ClipboardCommand>,
    fallback: F,
}

impl<F: ExportSink> ClipboardSink<F> {
    pub fn new(command: Option<ClipboardCommand>, fallback: F) -> Self {
        Self { command, fallback }
    }

    pub fn fallback(&self) -> &F {
        &self.fallback
    }

    pub fn into_fallback(self) -> F {
        self.fallback
    }
}

impl<F: ExportSink> ExportSink for ClipboardSink<F> {
    fn deliver(&mut self, artifact: &ExportArtifact) -> Result<Delivery, DeliveryError> {
        let reason = match &self.command {
            Some(command) => match command.copy(&artifact.contents) {
                Ok(()) => {
                    info!(program = %command.program, "export copied to clipboard");
                    return Ok(Delivery::Copied {
                        program: command.program.clone(),
                    });
                }
                Err(err) => {
                    warn!(error = %err, "clipboard copy failed, using fallback");
                    err.to_string()
                }
            },
            None => "no clipboard command configured".to_string(),
        };

        let delivered = self.fallback.deliver(artifact)?;
        Ok(Delivery::Fallback {
            reason,
            delivered: Box::new(delivered),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::rca::export::ExportFormat;

    fn artifact() -> ExportArtifact {
        ExportArtifact {
            format: ExportFormat::Markdown,
            file_name: ExportFormat::Markdown.file_name(),
            contents: "# Title\n".to_string(),
        }
    }

    #[test]
    fn parses_command_lines() {
        let command = ClipboardCommand::parse("xclip -selection clipboard").expect("parses");
        assert_eq!(command.program, "xclip");
        assert_eq!(command.args, vec!["-selection", "clipboard"]);
        assert_eq!(command.to_string(), "xclip -selection clipboard");
        assert_eq!(ClipboardCommand::parse("   "), None);
    }

    #[test]
    fn missing_command_falls_back_to_writer() {
        let mut sink = ClipboardSink::new(None, WriterSink::new(Vec::new()));
        let delivery = sink.deliver(&artifact()).expect("fallback delivers");

        assert!(delivery.used_fallback());
        assert_eq!(sink.into_fallback().into_inner(), b"# Title\n".to_vec());
    }

    #[test]
    fn failing_command_falls_back_to_writer() {
        let command =
            ClipboardCommand::parse("definitely-not-a-clipboard-program-rca").expect("parses");
        let mut sink = ClipboardSink::new(Some(command), WriterSink::new(Vec::new()));
        let delivery = sink.deliver(&artifact()).expect("fallback delivers");

        match &delivery {
            Delivery::Fallback { reason, delivered } => {
                assert!(reason.contains("definitely-not-a-clipboard-program-rca"));
                assert_eq!(**delivered, Delivery::Written);
            }
            other => panic!("expected fallback, got {other:?}"),
        }
        assert!(delivery.notice().starts_with("Written to output."));
    }

    #[cfg(unix)]
    #[test]
    fn program_that_ignores_stdin_is_reaped_and_falls_back() {
        let command = ClipboardCommand::parse("true").expect("parses");
        let payload = "| row |\n".repeat(64 * 1024);

        let error = command.copy(&payload).expect_err("closed pipe is a failure");
        assert!(matches!(error, DeliveryError::Clipboard { ref program, .. } if program == "true"));

        let large = ExportArtifact {
            contents: payload.clone(),
            ..artifact()
        };
        let mut sink = ClipboardSink::new(Some(command), WriterSink::new(Vec::new()));
        let delivery = sink.deliver(&large).expect("fallback delivers");
        assert!(delivery.used_fallback());
        assert_eq!(sink.into_fallback().into_inner(), payload.into_bytes());
    }

    #[test]
    fn file_sink_writes_canonical_name() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut sink = FileSink::new(dir.path().join("exports"));
        let delivery = sink.deliver(&artifact()).expect("saves");

        let path = dir.path().join("exports").join("root-cause-evaluation.md");
        assert_eq!(delivery, Delivery::Saved { path: path.clone() });
        assert_eq!(std::fs::read_to_string(path).expect("readable"), "# Title\n");
    }
}
