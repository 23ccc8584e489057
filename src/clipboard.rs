//! Clipboard capability
//!
//! Plain-text clipboard writes behind a trait seam so the session can be
//! tested without touching a real clipboard. The system implementation
//! shells out to whichever clipboard tool is present.

use crate::error::{Error, Result};
use std::io::Write;
use std::process::{Command, Stdio};

/// Trait for clipboard backends
pub trait Clipboard {
    /// Write plain text to the clipboard
    fn write_text(&self, text: &str) -> Result<()>;
}

/// Candidate tools, tried in order
const CLIPBOARD_TOOLS: &[(&str, &[&str])] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
    ("pbcopy", &[]),
];

/// System clipboard backed by external tools
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        for (tool, args) in CLIPBOARD_TOOLS {
            let spawned = Command::new(tool)
                .args(*args)
                .stdin(Stdio::piped())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn();

            let Ok(mut child) = spawned else {
                continue;
            };

            if let Some(stdin) = child.stdin.as_mut() {
                stdin.write_all(text.as_bytes()).map_err(|e| {
                    Error::Clipboard(format!("Failed to write to {}: {}", tool, e))
                })?;
            }

            let status = child
                .wait()
                .map_err(|e| Error::Clipboard(format!("{} did not exit cleanly: {}", tool, e)))?;

            if status.success() {
                return Ok(());
            }
        }

        Err(Error::Clipboard(
            "No clipboard tool available (tried wl-copy, xclip, xsel, pbcopy)".to_string(),
        ))
    }
}
