use crate::boxes::FourCC;
use crate::parser::{ParseError, Result};
use byteorder::{BigEndian, ByteOrder};

/// Bounds-checked big-endian field reader over a borrowed buffer.
///
/// Every read names an absolute offset and fails with
/// [`ParseError::OutOfRange`] instead of touching bytes past `len()`.
#[derive(Clone, Copy)]
pub struct ByteView<'a> {
    data: &'a [u8],
}

impl<'a> ByteView<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Restrict the view to the first `valid_len` bytes (clamped to the slice).
    pub fn with_valid_len(data: &'a [u8], valid_len: u64) -> Self {
        let n = usize::try_from(valid_len).map_or(data.len(), |n| n.min(data.len()));
        Self { data: &data[..n] }
    }

    pub fn len(&self) -> u64 {
        self.data.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn bytes(&self, offset: u64, width: u64) -> Result<&'a [u8]> {
        let r = field_range(offset, width, self.len())?;
        let data = self.data;
        Ok(&data[r])
    }

    pub fn read_u8(&self, offset: u64) -> Result<u8> {
        Ok(self.bytes(offset, 1)?[0])
    }

    pub fn read_u16(&self, offset: u64) -> Result<u16> {
        Ok(BigEndian::read_u16(self.bytes(offset, 2)?))
    }

    pub fn read_u32(&self, offset: u64) -> Result<u32> {
        Ok(BigEndian::read_u32(self.bytes(offset, 4)?))
    }

    pub fn read_u64(&self, offset: u64) -> Result<u64> {
        Ok(BigEndian::read_u64(self.bytes(offset, 8)?))
    }

    pub fn read_fourcc(&self, offset: u64) -> Result<FourCC> {
        let b = self.bytes(offset, 4)?;
        Ok(FourCC([b[0], b[1], b[2], b[3]]))
    }
}

/// Write side of [`ByteView`]; same bounds contract.
pub struct ByteViewMut<'a> {
    data: &'a mut [u8],
}

impl<'a> ByteViewMut<'a> {
    pub fn new(data: &'a mut [u8]) -> Self {
        Self { data }
    }

    pub fn len(&self) -> u64 {
        self.data.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn write_u32(&mut self, offset: u64, v: u32) -> Result<()> {
        let r = field_range(offset, 4, self.len())?;
        BigEndian::write_u32(&mut self.data[r], v);
        Ok(())
    }

    pub fn write_u64(&mut self, offset: u64, v: u64) -> Result<()> {
        let r = field_range(offset, 8, self.len())?;
        BigEndian::write_u64(&mut self.data[r], v);
        Ok(())
    }
}

fn field_range(offset: u64, width: u64, len: u64) -> Result<std::ops::Range<usize>> {
    let out = || ParseError::OutOfRange { offset, width, len };
    let end = offset.checked_add(width).ok_or_else(out)?;
    if end > len {
        return Err(out());
    }
    // end <= len, and len came from a slice, so both fit in usize
    Ok(offset as usize..end as usize)
}

/// Offset, hex and ASCII columns, 16 bytes per line.
pub fn hex_dump(bytes: &[u8], start_offset: u64) -> String {
    bytes
        .chunks(16)
        .zip((start_offset..).step_by(16))
        .map(|(line, at)| {
            let hex: Vec<String> = line.iter().map(|b| format!("{:02x}", b)).collect();
            let ascii: String = line
                .iter()
                .map(|&b| if b.is_ascii_graphic() || b == b' ' { b as char } else { '.' })
                .collect();
            format!("{:08x}  {:<47}  |{}|\n", at, hex.join(" "), ascii)
        })
        .collect()
}
