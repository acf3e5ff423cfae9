use crate::boxes::FourCC;

/// Typed view over the boxes met on the way to `tfdt` and `avc1`.
///
/// Anything not in this list becomes `KnownBox::Unknown(fourcc)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnownBox {
    // File-level / top-level
    Ftyp,
    Styp,
    Moov,
    Moof,
    Mdat,
    Free,
    Skip,
    Sidx,

    // moov / trak chain
    Mvhd,
    Trak,
    Tkhd,
    Mdia,
    Mdhd,
    Hdlr,
    Minf,
    Vmhd,
    Smhd,
    Dinf,
    Stbl,
    Stsd,
    Mvex,
    Trex,

    // sample entries
    Avc1,
    Avc3,
    Hvc1,
    Mp4a,

    // fragments
    Mfhd,
    Traf,
    Tfhd,
    Tfdt,
    Trun,

    // Anything else
    Unknown(FourCC),
}

impl From<FourCC> for KnownBox {
    fn from(cc: FourCC) -> Self {
        match &cc.0 {
            b"ftyp" => KnownBox::Ftyp,
            b"styp" => KnownBox::Styp,
            b"moov" => KnownBox::Moov,
            b"moof" => KnownBox::Moof,
            b"mdat" => KnownBox::Mdat,
            b"free" => KnownBox::Free,
            b"skip" => KnownBox::Skip,
            b"sidx" => KnownBox::Sidx,

            b"mvhd" => KnownBox::Mvhd,
            b"trak" => KnownBox::Trak,
            b"tkhd" => KnownBox::Tkhd,
            b"mdia" => KnownBox::Mdia,
            b"mdhd" => KnownBox::Mdhd,
            b"hdlr" => KnownBox::Hdlr,
            b"minf" => KnownBox::Minf,
            b"vmhd" => KnownBox::Vmhd,
            b"smhd" => KnownBox::Smhd,
            b"dinf" => KnownBox::Dinf,
            b"stbl" => KnownBox::Stbl,
            b"stsd" => KnownBox::Stsd,
            b"mvex" => KnownBox::Mvex,
            b"trex" => KnownBox::Trex,

            b"avc1" => KnownBox::Avc1,
            b"avc3" => KnownBox::Avc3,
            b"hvc1" => KnownBox::Hvc1,
            b"mp4a" => KnownBox::Mp4a,

            b"mfhd" => KnownBox::Mfhd,
            b"traf" => KnownBox::Traf,
            b"tfhd" => KnownBox::Tfhd,
            b"tfdt" => KnownBox::Tfdt,
            b"trun" => KnownBox::Trun,

            _ => KnownBox::Unknown(cc),
        }
    }
}

impl KnownBox {
    /// Does this box *contain* child boxes?
    ///
    /// `stsd` counts: its sample entries follow a fixed preamble.
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            KnownBox::Moov
                | KnownBox::Trak
                | KnownBox::Mdia
                | KnownBox::Minf
                | KnownBox::Dinf
                | KnownBox::Stbl
                | KnownBox::Stsd
                | KnownBox::Mvex
                | KnownBox::Moof
                | KnownBox::Traf
        )
    }

    pub fn full_name(&self) -> &'static str {
        match self {
            KnownBox::Ftyp => "File Type Box",
            KnownBox::Styp => "Segment Type Box",
            KnownBox::Moov => "Movie Box",
            KnownBox::Moof => "Movie Fragment Box",
            KnownBox::Mdat => "Media Data Box",
            KnownBox::Free => "Free Space Box",
            KnownBox::Skip => "Skip Box",
            KnownBox::Sidx => "Segment Index Box",
            KnownBox::Mvhd => "Movie Header Box",
            KnownBox::Trak => "Track Box",
            KnownBox::Tkhd => "Track Header Box",
            KnownBox::Mdia => "Media Box",
            KnownBox::Mdhd => "Media Header Box",
            KnownBox::Hdlr => "Handler Reference Box",
            KnownBox::Minf => "Media Information Box",
            KnownBox::Vmhd => "Video Media Header Box",
            KnownBox::Smhd => "Sound Media Header Box",
            KnownBox::Dinf => "Data Information Box",
            KnownBox::Stbl => "Sample Table Box",
            KnownBox::Stsd => "Sample Description Box",
            KnownBox::Mvex => "Movie Extends Box",
            KnownBox::Trex => "Track Extends Box",
            KnownBox::Avc1 => "AVC Sample Entry",
            KnownBox::Avc3 => "AVC Sample Entry (in-band parameter sets)",
            KnownBox::Hvc1 => "HEVC Sample Entry",
            KnownBox::Mp4a => "MPEG-4 Audio Sample Entry",
            KnownBox::Mfhd => "Movie Fragment Header Box",
            KnownBox::Traf => "Track Fragment Box",
            KnownBox::Tfhd => "Track Fragment Header Box",
            KnownBox::Tfdt => "Track Fragment Decode Time Box",
            KnownBox::Trun => "Track Fragment Run Box",
            KnownBox::Unknown(_) => "Unknown Box",
        }
    }
}
