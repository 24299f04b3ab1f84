// ============================================================
// Layer 4 — Corpus Source
// ============================================================
// Reads the raw corpus file (sentences.txt) line by line.
//
// Lines end at '\n', '\r\n' or a lone '\r', so files written
// on Windows or classic Mac OS read the same. Each line is decoded with
// the configured TextEncoding before anything else sees it.
//
// A missing or unreadable file is fatal: there is no partial
// corpus to fall back to.
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §12 (I/O and File Handling)

use anyhow::{Context, Result};
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::PathBuf,
};

use crate::data::encoding::TextEncoding;
use crate::domain::traits::CorpusSource;

/// A corpus stored as one text file.
pub struct TextFileSource {
    path:     PathBuf,
    encoding: TextEncoding,
}

impl TextFileSource {
    pub fn new(path: impl Into<PathBuf>, encoding: TextEncoding) -> Self {
        Self { path: path.into(), encoding }
    }
}

impl CorpusSource for TextFileSource {
    fn read_lines(&self) -> Result<Vec<String>> {
        let file = File::open(&self.path)
            .with_context(|| format!("Cannot open corpus file '{}'", self.path.display()))?;
        let mut reader = BufReader::new(file);

        let mut lines = Vec::new();
        let mut buf   = Vec::new();
        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .with_context(|| format!("Cannot read corpus file '{}'", self.path.display()))?;
            if read == 0 {
                break;
            }

            if buf.last() == Some(&b'\n') {
                buf.pop();
            }

            // '\r' also ends a line; "\r\n" counts once
            let mut segments: Vec<&[u8]> = buf.split(|&b| b == b'\r').collect();
            if buf.last() == Some(&b'\r') {
                segments.pop();
            }

            for segment in segments {
                let line = self.encoding.decode_line(segment, lines.len() + 1)?;
                lines.push(line);
            }
        }

        tracing::debug!("Read {} lines from '{}'", lines.len(), self.path.display());
        Ok(lines)
    }

    fn describe(&self) -> String {
        format!("{} ({})", self.path.display(), self.encoding)
    }
}
