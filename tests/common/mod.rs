//! Byte-level builders for synthetic segments.
#![allow(dead_code)]

pub fn bx(typ: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut v = Vec::with_capacity(8 + payload.len());
    v.extend_from_slice(&(8 + payload.len() as u32).to_be_bytes());
    v.extend_from_slice(typ);
    v.extend_from_slice(payload);
    v
}

/// Container built from already-encoded children.
pub fn container(typ: &[u8; 4], children: &[Vec<u8>]) -> Vec<u8> {
    bx(typ, &children.concat())
}

/// Box using the 64-bit `largesize` header.
pub fn large_bx(typ: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut v = Vec::new();
    v.extend_from_slice(&1u32.to_be_bytes());
    v.extend_from_slice(typ);
    v.extend_from_slice(&(16 + payload.len() as u64).to_be_bytes());
    v.extend_from_slice(payload);
    v
}

fn full_payload(version: u8, flags: u32, body: &[u8]) -> Vec<u8> {
    let mut p = vec![version];
    p.extend_from_slice(&flags.to_be_bytes()[1..]);
    p.extend_from_slice(body);
    p
}

pub fn full(typ: &[u8; 4], version: u8, flags: u32, body: &[u8]) -> Vec<u8> {
    bx(typ, &full_payload(version, flags, body))
}

/// FullBox behind a 16-byte `largesize` header.
pub fn large_full(typ: &[u8; 4], version: u8, flags: u32, body: &[u8]) -> Vec<u8> {
    large_bx(typ, &full_payload(version, flags, body))
}

pub fn ftyp() -> Vec<u8> {
    let mut p = Vec::new();
    p.extend_from_slice(b"iso6");
    p.extend_from_slice(&0u32.to_be_bytes());
    p.extend_from_slice(b"iso6");
    p.extend_from_slice(b"dash");
    bx(b"ftyp", &p)
}

pub fn tfdt_v0(t: u32) -> Vec<u8> {
    full(b"tfdt", 0, 0, &t.to_be_bytes())
}

pub fn tfdt_v1(t: u64) -> Vec<u8> {
    full(b"tfdt", 1, 0, &t.to_be_bytes())
}

/// `moof(mfhd, traf(tfhd, tfdt, trun)) + mdat`
pub fn media_segment(tfdt: Vec<u8>) -> Vec<u8> {
    let traf = container(
        b"traf",
        &[
            full(b"tfhd", 0, 0x02_0000, &1u32.to_be_bytes()),
            tfdt,
            full(b"trun", 0, 0, &0u32.to_be_bytes()),
        ],
    );
    let moof = container(b"moof", &[full(b"mfhd", 0, 0, &7u32.to_be_bytes()), traf]);
    [moof, bx(b"mdat", &[0xab; 32])].concat()
}

/// Visual sample entry payload: height at +20, width at +22.
fn avc1_payload(width: u16, height: u16) -> Vec<u8> {
    let mut p = vec![0u8; 78];
    p[6..8].copy_from_slice(&1u16.to_be_bytes()); // data_reference_index
    p[20..22].copy_from_slice(&height.to_be_bytes());
    p[22..24].copy_from_slice(&width.to_be_bytes());
    p[70..72].copy_from_slice(&24u16.to_be_bytes());
    p
}

pub fn avc1(width: u16, height: u16) -> Vec<u8> {
    bx(b"avc1", &avc1_payload(width, height))
}

pub fn large_avc1(width: u16, height: u16) -> Vec<u8> {
    large_bx(b"avc1", &avc1_payload(width, height))
}

pub fn stsd(entries: &[Vec<u8>]) -> Vec<u8> {
    let mut body = (entries.len() as u32).to_be_bytes().to_vec();
    body.extend_from_slice(&entries.concat());
    full(b"stsd", 0, 0, &body)
}

/// `ftyp + moov(mvhd, trak(tkhd, mdia(mdhd, hdlr, minf(vmhd, stbl(stsd, stts)))))`
pub fn init_segment(sample_entry: Vec<u8>) -> Vec<u8> {
    let stts = full(b"stts", 0, 0, &0u32.to_be_bytes());
    let stbl = container(b"stbl", &[stsd(&[sample_entry]), stts]);
    let minf = container(b"minf", &[full(b"vmhd", 0, 1, &[0u8; 8]), stbl]);
    let mdia = container(
        b"mdia",
        &[full(b"mdhd", 0, 0, &[0u8; 20]), full(b"hdlr", 0, 0, b"\0\0\0\0vide"), minf],
    );
    let trak = container(b"trak", &[full(b"tkhd", 0, 3, &[0u8; 80]), mdia]);
    let moov = container(b"moov", &[full(b"mvhd", 0, 0, &[0u8; 96]), trak]);
    [ftyp(), moov].concat()
}
