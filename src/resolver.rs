//! Locate a nested box by following a chain of fourcc codes.

use crate::boxes::{BoxHeader, FourCC};
use crate::parser::{scan, scan_children, ParseError, Result, ScanConfig};
use std::fmt;
use std::ops::{Deref, Range};
use std::str::FromStr;
use tracing::debug;

/// `stsd` carries version/flags and an entry count before its sample entries.
pub const STSD_PREAMBLE_LEN: u64 = 8;

pub const TFDT_PATH: [FourCC; 3] = [FourCC::MOOF, FourCC::TRAF, FourCC::TFDT];

pub const AVC1_PATH: [FourCC; 7] = [
    FourCC::MOOV,
    FourCC::TRAK,
    FourCC::MDIA,
    FourCC::MINF,
    FourCC::STBL,
    FourCC::STSD,
    FourCC::AVC1,
];

/// Containment chain from the buffer root down to a target box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoxPath(pub Vec<FourCC>);

impl Deref for BoxPath {
    type Target = [FourCC];
    fn deref(&self) -> &[FourCC] {
        &self.0
    }
}

impl From<&[FourCC]> for BoxPath {
    fn from(p: &[FourCC]) -> Self {
        BoxPath(p.to_vec())
    }
}

/// Accepts `moov.trak.mdia` or `moov/trak/mdia`.
impl FromStr for BoxPath {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self> {
        let codes = s
            .split(['.', '/'])
            .map(|part| {
                FourCC::from_str(part).ok_or_else(|| ParseError::InvalidPath(s.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(BoxPath(codes))
    }
}

impl fmt::Display for BoxPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cc) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", cc)?;
        }
        Ok(())
    }
}

/// Range holding the child boxes of `b`.
///
/// This is the payload, except for `stsd` whose children start after its
/// fixed preamble. An `stsd` too short for the preamble yields an empty range.
pub fn child_range(b: &BoxHeader) -> Range<u64> {
    let payload = b.payload_range();
    if b.typ == FourCC::STSD {
        let start = (payload.start + STSD_PREAMBLE_LEN).min(payload.end);
        start..payload.end
    } else {
        payload
    }
}

/// Follow `path` from `root`, returning the first match at each level.
///
/// An open-ended (size 0) box is only accepted when `root` spans the whole
/// buffer; a narrower `root` (say, a container payload) is scanned with
/// nested rules. Scanner errors met before a match are returned as-is.
pub fn resolve(
    buf: &[u8],
    root: Range<u64>,
    path: &[FourCC],
    cfg: &ScanConfig,
) -> Result<BoxHeader> {
    let (last, parents) = path
        .split_last()
        .ok_or_else(|| ParseError::InvalidPath(String::new()))?;

    let mut open_ended = root == (0..buf.len() as u64);
    let mut range = root;
    for want in parents {
        let found = find_in(buf, range, *want, open_ended, cfg)?;
        range = child_range(&found);
        open_ended = false;
        debug!(fourcc = %want, offset = found.start, size = found.size, "descend");
    }
    let target = find_in(buf, range, *last, open_ended, cfg)?;
    debug!(fourcc = %last, offset = target.start, size = target.size, "resolved");
    Ok(target)
}

/// [`resolve`] over the whole buffer.
pub fn resolve_root(buf: &[u8], path: &[FourCC], cfg: &ScanConfig) -> Result<BoxHeader> {
    resolve(buf, 0..buf.len() as u64, path, cfg)
}

fn find_in(
    buf: &[u8],
    range: Range<u64>,
    want: FourCC,
    open_ended: bool,
    cfg: &ScanConfig,
) -> Result<BoxHeader> {
    let it = if open_ended { scan(buf, range, cfg) } else { scan_children(buf, range, cfg) };
    for item in it {
        let h = item?;
        if h.typ == want {
            return Ok(h);
        }
    }
    debug!(fourcc = %want, "not found");
    Err(ParseError::BoxNotFound(want))
}
