use crate::accessors::{tfdt_field, Tfdt};
use crate::parser::{ParseError, Result, ScanConfig};
use crate::resolver::{resolve_root, TFDT_PATH};
use crate::util::{ByteView, ByteViewMut};
use tracing::debug;

/// Overwrite `baseMediaDecodeTime` of the first `moof.traf.tfdt` in place.
///
/// The field keeps its width (4 bytes for version 0, 8 for version 1); box
/// sizes and the buffer length never change. Everything is validated before
/// the first byte is written, so on error `buf` is untouched.
pub fn set_tfdt_time(buf: &mut [u8], new_time: u64) -> Result<Tfdt> {
    set_tfdt_time_with(buf, new_time, &ScanConfig::default())
}

pub fn set_tfdt_time_with(buf: &mut [u8], new_time: u64, cfg: &ScanConfig) -> Result<Tfdt> {
    let h = resolve_root(buf, &TFDT_PATH, cfg)?;
    let field = tfdt_field(&ByteView::new(buf), &h)?;

    let mut w = ByteViewMut::new(buf);
    match field.version {
        0 => {
            let t = u32::try_from(new_time)
                .map_err(|_| ParseError::TimeOverflow { version: 0, time: new_time })?;
            w.write_u32(field.offset, t)?;
        }
        _ => w.write_u64(field.offset, new_time)?,
    }
    debug!(offset = field.offset, version = field.version, time = new_time, "tfdt rewritten");

    Ok(Tfdt { size: h.size, version: field.version, base_media_decode_time: new_time })
}
