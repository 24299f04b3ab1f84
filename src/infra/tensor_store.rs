// ============================================================
// Layer 6 — Tensor Store
// ============================================================
// Persists the full encoded corpus to {data_dir}/data.npy in
// NumPy's .npy interchange format, so the same file can be
// opened with numpy.load() for inspection.
//
// .npy layout (version 1.0):
//
//   \x93NUMPY            6-byte magic
//   0x01 0x00            major / minor version
//   u16 little-endian    header length
//   header               Python dict literal, space padded,
//                        ends with '\n', preamble + header is a
//                        multiple of 64 bytes
//   data                 raw little-endian elements
//
// Header written here:
//   {'descr': '<i8', 'fortran_order': False, 'shape': (N,), }
//
// Reading also accepts version 2.0 / 3.0 headers (u32 length).
// Only one-dimensional little-endian int64 arrays are accepted;
// anything else is reported as a corrupt artifact.
//
// Reference: NumPy NEP 1 (.npy format)
//            chalot28 tokenizer/persistence.rs (binary headers)

use anyhow::{Context, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::domain::error::CorpusError;
use crate::domain::traits::ArtifactStore;
use crate::infra::write_atomic;

const MAGIC: &[u8] = b"\x93NUMPY";
const DESCR: &str = "<i8";
const ALIGNMENT: usize = 64;
const ELEMENT_SIZE: usize = std::mem::size_of::<i64>();

lazy_static! {
    static ref DESCR_RE: Regex = Regex::new(r"'descr'\s*:\s*'([^']*)'").expect("valid regex");
    static ref FORTRAN_RE: Regex =
        Regex::new(r"'fortran_order'\s*:\s*(True|False)").expect("valid regex");
    static ref SHAPE_RE: Regex = Regex::new(r"'shape'\s*:\s*\(([^)]*)\)").expect("valid regex");
}

pub struct TensorStore {
    path: PathBuf,
}

impl TensorStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn corrupt(&self, reason: impl Into<String>) -> CorpusError {
        CorpusError::corrupt(&self.path, reason)
    }
}

impl ArtifactStore<Vec<i64>> for TensorStore {
    fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn save(&self, data: &Vec<i64>) -> Result<()> {
        let bytes = encode_npy(data);
        write_atomic(&self.path, &bytes)
            .with_context(|| format!("Cannot write tensor to '{}'", self.path.display()))?;

        tracing::debug!("Saved {} ids to '{}'", data.len(), self.path.display());
        Ok(())
    }

    fn load(&self) -> Result<Vec<i64>> {
        let bytes = fs::read(&self.path)
            .with_context(|| format!("Cannot read tensor from '{}'", self.path.display()))?;
        let data = decode_npy(&bytes).map_err(|reason| self.corrupt(reason))?;

        tracing::debug!("Loaded {} ids from '{}'", data.len(), self.path.display());
        Ok(data)
    }
}

/// Serialise a 1-D int64 array as a version 1.0 .npy file.
pub fn encode_npy(data: &[i64]) -> Vec<u8> {
    let dict = format!(
        "{{'descr': '{DESCR}', 'fortran_order': False, 'shape': ({},), }}",
        data.len()
    );

    // magic + version + u16 length + dict + '\n'
    let unpadded = MAGIC.len() + 2 + 2 + dict.len() + 1;
    let padding  = (ALIGNMENT - unpadded % ALIGNMENT) % ALIGNMENT;
    let header_len = dict.len() + padding + 1;

    let mut out = Vec::with_capacity(unpadded + padding + data.len() * ELEMENT_SIZE);
    out.extend_from_slice(MAGIC);
    out.extend_from_slice(&[1, 0]);
    out.extend_from_slice(&(header_len as u16).to_le_bytes());
    out.extend_from_slice(dict.as_bytes());
    out.extend(std::iter::repeat(b' ').take(padding));
    out.push(b'\n');
    for value in data {
        out.extend_from_slice(&value.to_le_bytes());
    }
    out
}

/// Parse a .npy file holding a 1-D little-endian int64 array.
/// The error is a human-readable reason.
pub fn decode_npy(bytes: &[u8]) -> std::result::Result<Vec<i64>, String> {
    if bytes.len() < MAGIC.len() + 4 || &bytes[..MAGIC.len()] != MAGIC {
        return Err("missing .npy magic".to_string());
    }

    let major = bytes[6];
    let (header_len, header_start) = match major {
        1 => (u16::from_le_bytes([bytes[8], bytes[9]]) as usize, 10),
        2 | 3 => {
            if bytes.len() < 12 {
                return Err("truncated header length".to_string());
            }
            let len = u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]);
            (len as usize, 12)
        }
        v => return Err(format!("unsupported .npy version {v}")),
    };

    let data_start = header_start + header_len;
    if bytes.len() < data_start {
        return Err("truncated header".to_string());
    }
    let header = std::str::from_utf8(&bytes[header_start..data_start])
        .map_err(|_| "header is not text".to_string())?;

    let descr = DESCR_RE
        .captures(header)
        .map(|c| c[1].to_string())
        .ok_or("header has no 'descr'")?;
    if descr != DESCR {
        return Err(format!("element type {descr:?}, expected {DESCR:?}"));
    }
    if !FORTRAN_RE.is_match(header) {
        return Err("header has no 'fortran_order'".to_string());
    }

    let shape = SHAPE_RE
        .captures(header)
        .map(|c| c[1].to_string())
        .ok_or("header has no 'shape'")?;
    let dims: Vec<&str> = shape.split(',').map(str::trim).filter(|d| !d.is_empty()).collect();
    let len = match dims.as_slice() {
        [n] => n.parse::<usize>().map_err(|_| format!("bad dimension {n:?}"))?,
        _ => return Err(format!("expected a 1-D array, got shape ({shape})")),
    };

    let expected = len
        .checked_mul(ELEMENT_SIZE)
        .ok_or_else(|| format!("shape ({len},) is too large"))?;
    let payload = &bytes[data_start..];
    if payload.len() != expected {
        return Err(format!(
            "{} data bytes for {len} int64 elements",
            payload.len()
        ));
    }

    Ok(payload
        .chunks_exact(ELEMENT_SIZE)
        .map(|chunk| {
            let mut buf = [0u8; ELEMENT_SIZE];
            buf.copy_from_slice(chunk);
            i64::from_le_bytes(buf)
        })
        .collect())
}
