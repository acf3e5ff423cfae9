pub mod accessors;
pub mod boxes;
pub mod known_boxes;
pub mod mutator;
pub mod parser;
pub mod report;
pub mod resolver;
pub mod tree;
pub mod util;

pub use accessors::{
    Avc1, Tfdt, get_avc1, get_avc1_with, get_ftyp, get_ftyp_with, get_mdat, get_mdat_with,
    get_moof, get_moof_with, get_moov, get_moov_with, get_tfdt, get_tfdt_with,
};
pub use boxes::{BoxHeader, FourCC};
pub use mutator::{set_tfdt_time, set_tfdt_time_with};
pub use parser::{
    BoxScanner, ParseError, Result, ScanConfig, read_box_header, scan, scan_children,
};
pub use resolver::{AVC1_PATH, BoxPath, TFDT_PATH, resolve, resolve_root};
pub use tree::{BoxNode, walk};
