use crate::boxes::BoxHeader;
use crate::known_boxes::KnownBox;
use crate::parser::{scan, scan_children, Result, ScanConfig};
use crate::resolver::child_range;
use serde::Serialize;
use std::ops::Range;

/// A box plus, for known containers, its children.
#[derive(Debug, Serialize)]
pub struct BoxNode {
    #[serde(flatten)]
    pub header: BoxHeader,
    pub full_name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<BoxNode>>,
}

/// Enumerate the whole buffer, descending into known containers up to
/// `max_depth` levels below the root (0 lists only top-level boxes).
pub fn walk(buf: &[u8], cfg: &ScanConfig, max_depth: usize) -> Result<Vec<BoxNode>> {
    walk_range(buf, 0..buf.len() as u64, cfg, 0, max_depth)
}

fn walk_range(
    buf: &[u8],
    range: Range<u64>,
    cfg: &ScanConfig,
    depth: usize,
    max_depth: usize,
) -> Result<Vec<BoxNode>> {
    let it = if depth == 0 { scan(buf, range, cfg) } else { scan_children(buf, range, cfg) };
    let mut nodes = Vec::new();
    for item in it {
        let header = item?;
        let kb = KnownBox::from(header.typ);
        let children = if kb.is_container() && depth < max_depth {
            Some(walk_range(buf, child_range(&header), cfg, depth + 1, max_depth)?)
        } else {
            None
        };
        nodes.push(BoxNode { header, full_name: kb.full_name(), children });
    }
    Ok(nodes)
}
