//! One-shot summary of a segment, as printed by `segprobe`.

use crate::accessors::{
    Avc1, Tfdt, get_avc1_with, get_ftyp_with, get_mdat_with, get_moof_with, get_moov_with,
    get_tfdt_with,
};
use crate::boxes::BoxHeader;
use crate::parser::{ParseError, Result, ScanConfig};
use serde::Serialize;

#[derive(Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Lookup<T> {
    Found(T),
    Error { error: String },
}

/// Absent boxes are normal (init vs media segments) and map to `None`;
/// any other failure is kept as a message.
pub fn lookup<T>(r: Result<T>) -> Option<Lookup<T>> {
    match r {
        Ok(v) => Some(Lookup::Found(v)),
        Err(ParseError::BoxNotFound(_)) => None,
        Err(e) => Some(Lookup::Error { error: e.to_string() }),
    }
}

#[derive(Debug, Serialize)]
pub struct Summary {
    pub bytes: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ftyp: Option<Lookup<BoxHeader>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moov: Option<Lookup<BoxHeader>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moof: Option<Lookup<BoxHeader>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mdat: Option<Lookup<BoxHeader>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tfdt: Option<Lookup<Tfdt>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avc1: Option<Lookup<Avc1>>,
}

pub fn summarize(buf: &[u8], cfg: &ScanConfig) -> Summary {
    Summary {
        bytes: buf.len(),
        ftyp: lookup(get_ftyp_with(buf, cfg)),
        moov: lookup(get_moov_with(buf, cfg)),
        moof: lookup(get_moof_with(buf, cfg)),
        mdat: lookup(get_mdat_with(buf, cfg)),
        tfdt: lookup(get_tfdt_with(buf, cfg)),
        avc1: lookup(get_avc1_with(buf, cfg)),
    }
}
