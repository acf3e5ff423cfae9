use serde::{Serialize, Serializer};
use std::fmt;
use std::ops::Range;

#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct FourCC(pub [u8; 4]);

impl FourCC {
    pub const FTYP: FourCC = FourCC(*b"ftyp");
    pub const MOOV: FourCC = FourCC(*b"moov");
    pub const MOOF: FourCC = FourCC(*b"moof");
    pub const MDAT: FourCC = FourCC(*b"mdat");
    pub const TRAK: FourCC = FourCC(*b"trak");
    pub const MDIA: FourCC = FourCC(*b"mdia");
    pub const MINF: FourCC = FourCC(*b"minf");
    pub const STBL: FourCC = FourCC(*b"stbl");
    pub const STSD: FourCC = FourCC(*b"stsd");
    pub const AVC1: FourCC = FourCC(*b"avc1");
    pub const TRAF: FourCC = FourCC(*b"traf");
    pub const TFDT: FourCC = FourCC(*b"tfdt");

    pub fn from_str(s: &str) -> Option<Self> {
        let b = s.as_bytes();
        if b.len() == 4 {
            Some(FourCC([b[0], b[1], b[2], b[3]]))
        } else {
            None
        }
    }

    /// Printable ASCII as-is, anything else as `.`.
    pub fn as_str_lossy(&self) -> String {
        self.0
            .iter()
            .map(|&c| if c.is_ascii_graphic() || c == b' ' { c as char } else { '.' })
            .collect()
    }
}

impl fmt::Debug for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str_lossy())
    }
}

impl fmt::Display for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str_lossy())
    }
}

impl Serialize for FourCC {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.as_str_lossy())
    }
}

/// Plain 8-byte header: 32-bit size + fourcc.
pub const HEADER_LEN: u64 = 8;
/// Header with the 64-bit `largesize` field that follows a declared size of 1.
pub const EXTENDED_HEADER_LEN: u64 = 16;

/// One box located inside a buffer.
///
/// All offsets are absolute positions in the scanned buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoxHeader {
    pub typ: FourCC,
    pub size: u64,          // effective total size including header
    pub declared_size: u64, // raw size field (or largesize), 0 = to end of range
    pub start: u64,         // offset of the header's first byte
    pub header_size: u64,   // 8 or 16
}

impl BoxHeader {
    pub fn end(&self) -> u64 {
        self.start + self.size
    }

    pub fn payload_start(&self) -> u64 {
        self.start + self.header_size
    }

    pub fn payload_range(&self) -> Range<u64> {
        self.payload_start()..self.end()
    }

    pub fn payload_len(&self) -> u64 {
        self.size - self.header_size
    }

    pub fn extends_to_end(&self) -> bool {
        self.declared_size == 0
    }

    pub fn is_extended(&self) -> bool {
        self.header_size == EXTENDED_HEADER_LEN
    }
}
