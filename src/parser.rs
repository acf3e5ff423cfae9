use crate::boxes::{BoxHeader, FourCC, EXTENDED_HEADER_LEN, HEADER_LEN};
use crate::util::ByteView;
use std::ops::Range;
use tracing::trace;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("box at {offset} with size {size} runs past end of range {end}")]
    Truncated { offset: u64, size: u64, end: u64 },
    #[error("invalid box size {size} at {offset}")]
    InvalidSize { offset: u64, size: u64 },
    #[error("box not found: {0}")]
    BoxNotFound(FourCC),
    #[error("unsupported box version {0}")]
    UnsupportedVersion(u8),
    #[error("field of {width} bytes at {offset} is outside buffer of {len} bytes")]
    OutOfRange { offset: u64, width: u64, len: u64 },
    #[error("decode time {time} does not fit a version {version} tfdt")]
    TimeOverflow { version: u8, time: u64 },
    #[error("invalid box path: {0}")]
    InvalidPath(String),
}

pub type Result<T> = std::result::Result<T, ParseError>;

/// Knobs for header decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanConfig {
    /// Honour `size == 1` followed by a 64-bit `largesize`. When off, such
    /// boxes are rejected as [`ParseError::InvalidSize`].
    pub extended_size: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self { extended_size: true }
    }
}

/// Decode and validate the header of the box starting at `offset`.
///
/// `range_end` bounds the box; `open_ended` allows a declared size of 0,
/// which stretches the box to `range_end`.
pub fn read_box_header(
    view: &ByteView<'_>,
    offset: u64,
    range_end: u64,
    open_ended: bool,
    cfg: &ScanConfig,
) -> Result<BoxHeader> {
    if range_end.saturating_sub(offset) < HEADER_LEN {
        return Err(ParseError::Truncated { offset, size: HEADER_LEN, end: range_end });
    }
    let size32 = view.read_u32(offset)?;
    let typ = view.read_fourcc(offset + 4)?;

    let (declared_size, size, header_size) = match size32 {
        0 if open_ended => (0, range_end - offset, HEADER_LEN),
        0 => return Err(ParseError::InvalidSize { offset, size: 0 }),
        1 if cfg.extended_size => {
            if range_end - offset < EXTENDED_HEADER_LEN {
                return Err(ParseError::Truncated {
                    offset,
                    size: EXTENDED_HEADER_LEN,
                    end: range_end,
                });
            }
            let large = view.read_u64(offset + 8)?;
            if large < EXTENDED_HEADER_LEN {
                return Err(ParseError::InvalidSize { offset, size: large });
            }
            (large, large, EXTENDED_HEADER_LEN)
        }
        n => {
            let n = n as u64;
            if n < HEADER_LEN {
                return Err(ParseError::InvalidSize { offset, size: n });
            }
            (n, n, HEADER_LEN)
        }
    };

    match offset.checked_add(size) {
        Some(end) if end <= range_end => {}
        _ => return Err(ParseError::Truncated { offset, size, end: range_end }),
    }

    Ok(BoxHeader { typ, size, declared_size, start: offset, header_size })
}

/// Walks the sibling boxes of one byte range.
///
/// Yields each header in order and stops at the end of the range, after an
/// open-ended (size 0) box, or after the first error.
pub struct BoxScanner<'a> {
    view: ByteView<'a>,
    pos: u64,
    end: u64,
    open_ended: bool,
    cfg: ScanConfig,
    pending: Option<ParseError>,
    done: bool,
}

impl<'a> BoxScanner<'a> {
    pub fn new(
        view: ByteView<'a>,
        range: Range<u64>,
        open_ended: bool,
        cfg: ScanConfig,
    ) -> Self {
        let pending = (range.start > range.end || range.end > view.len()).then(|| {
            ParseError::OutOfRange {
                offset: range.start,
                width: range.end.saturating_sub(range.start),
                len: view.len(),
            }
        });
        Self {
            view,
            pos: range.start,
            end: range.end,
            open_ended,
            cfg,
            pending,
            done: false,
        }
    }

    /// Offset the next header would be read from.
    pub fn position(&self) -> u64 {
        self.pos
    }
}

impl Iterator for BoxScanner<'_> {
    type Item = Result<BoxHeader>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(e) = self.pending.take() {
            self.done = true;
            return Some(Err(e));
        }
        if self.done || self.pos >= self.end {
            return None;
        }
        match read_box_header(&self.view, self.pos, self.end, self.open_ended, &self.cfg) {
            Ok(h) => {
                trace!(fourcc = %h.typ, offset = h.start, size = h.size, "box");
                self.pos = h.end();
                self.done = h.extends_to_end();
                Some(Ok(h))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl std::iter::FusedIterator for BoxScanner<'_> {}

/// Scan a root-level range; a size-0 box extends to `range.end`.
pub fn scan<'a>(buf: &'a [u8], range: Range<u64>, cfg: &ScanConfig) -> BoxScanner<'a> {
    BoxScanner::new(ByteView::new(buf), range, true, *cfg)
}

/// Scan the payload of a container; a size-0 box here is invalid.
pub fn scan_children<'a>(
    buf: &'a [u8],
    range: Range<u64>,
    cfg: &ScanConfig,
) -> BoxScanner<'a> {
    BoxScanner::new(ByteView::new(buf), range, false, *cfg)
}
