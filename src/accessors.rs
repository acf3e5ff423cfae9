//! Typed readers for the handful of boxes a segment pipeline cares about.

use crate::boxes::{BoxHeader, FourCC};
use crate::parser::{ParseError, Result, ScanConfig};
use crate::resolver::{resolve_root, AVC1_PATH, TFDT_PATH};
use crate::util::ByteView;
use serde::Serialize;

// Field offsets are relative to the payload, so a 16-byte (largesize)
// header shifts them along with it.

/// FullBox version byte.
const TFDT_VERSION_OFFSET: u64 = 0;
/// `baseMediaDecodeTime`, after version (1) and flags (3).
const TFDT_TIME_OFFSET: u64 = 4;

/// Visual sample entry: 6 reserved + data_reference_index + 16 pre_defined/reserved.
const AVC1_HEIGHT_OFFSET: u64 = 20;
const AVC1_WIDTH_OFFSET: u64 = 22;

/// Track fragment decode time box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tfdt {
    pub size: u64,
    pub version: u8,
    /// Version 0 values are zero-extended from 32 bits.
    pub base_media_decode_time: u64,
}

/// Dimensions from an `avc1` visual sample entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Avc1 {
    pub size: u64,
    pub width: u16,
    pub height: u16,
}

/// Where the decode time lives inside a resolved `tfdt`.
pub(crate) struct TfdtField {
    pub offset: u64,
    pub version: u8,
}

impl TfdtField {
    pub fn width(&self) -> u64 {
        if self.version == 0 { 4 } else { 8 }
    }
}

pub(crate) fn tfdt_field(view: &ByteView<'_>, h: &BoxHeader) -> Result<TfdtField> {
    let payload = h.payload_start();
    ensure_inside(h, payload + TFDT_VERSION_OFFSET, 4)?;
    let version = view.read_u8(payload + TFDT_VERSION_OFFSET)?;
    if version > 1 {
        return Err(ParseError::UnsupportedVersion(version));
    }
    let field = TfdtField { offset: payload + TFDT_TIME_OFFSET, version };
    ensure_inside(h, field.offset, field.width())?;
    Ok(field)
}

// A field that runs past its own box is a size problem even if the buffer
// still has bytes there.
fn ensure_inside(h: &BoxHeader, offset: u64, width: u64) -> Result<()> {
    if offset + width > h.end() {
        return Err(ParseError::InvalidSize { offset: h.start, size: h.size });
    }
    Ok(())
}

fn top_level(buf: &[u8], typ: FourCC, cfg: &ScanConfig) -> Result<BoxHeader> {
    resolve_root(buf, &[typ], cfg)
}

pub fn get_ftyp(buf: &[u8]) -> Result<BoxHeader> {
    get_ftyp_with(buf, &ScanConfig::default())
}

pub fn get_ftyp_with(buf: &[u8], cfg: &ScanConfig) -> Result<BoxHeader> {
    top_level(buf, FourCC::FTYP, cfg)
}

pub fn get_moov(buf: &[u8]) -> Result<BoxHeader> {
    get_moov_with(buf, &ScanConfig::default())
}

pub fn get_moov_with(buf: &[u8], cfg: &ScanConfig) -> Result<BoxHeader> {
    top_level(buf, FourCC::MOOV, cfg)
}

pub fn get_moof(buf: &[u8]) -> Result<BoxHeader> {
    get_moof_with(buf, &ScanConfig::default())
}

pub fn get_moof_with(buf: &[u8], cfg: &ScanConfig) -> Result<BoxHeader> {
    top_level(buf, FourCC::MOOF, cfg)
}

pub fn get_mdat(buf: &[u8]) -> Result<BoxHeader> {
    get_mdat_with(buf, &ScanConfig::default())
}

pub fn get_mdat_with(buf: &[u8], cfg: &ScanConfig) -> Result<BoxHeader> {
    top_level(buf, FourCC::MDAT, cfg)
}

/// Decode time of the first track fragment (`moof.traf.tfdt`).
pub fn get_tfdt(buf: &[u8]) -> Result<Tfdt> {
    get_tfdt_with(buf, &ScanConfig::default())
}

pub fn get_tfdt_with(buf: &[u8], cfg: &ScanConfig) -> Result<Tfdt> {
    let h = resolve_root(buf, &TFDT_PATH, cfg)?;
    let view = ByteView::new(buf);
    let field = tfdt_field(&view, &h)?;
    let base_media_decode_time = match field.version {
        0 => view.read_u32(field.offset)? as u64,
        _ => view.read_u64(field.offset)?,
    };
    Ok(Tfdt { size: h.size, version: field.version, base_media_decode_time })
}

/// Coded width/height of the first `avc1` sample entry in the first track.
pub fn get_avc1(buf: &[u8]) -> Result<Avc1> {
    get_avc1_with(buf, &ScanConfig::default())
}

pub fn get_avc1_with(buf: &[u8], cfg: &ScanConfig) -> Result<Avc1> {
    let h = resolve_root(buf, &AVC1_PATH, cfg)?;
    let payload = h.payload_start();
    ensure_inside(&h, payload + AVC1_HEIGHT_OFFSET, 4)?;
    let view = ByteView::new(buf);
    Ok(Avc1 {
        size: h.size,
        width: view.read_u16(payload + AVC1_WIDTH_OFFSET)?,
        height: view.read_u16(payload + AVC1_HEIGHT_OFFSET)?,
    })
}
