mod common;

use common::*;
use segbox::{FourCC, ScanConfig, walk};
use serde_json::Value;

#[test]
fn walks_init_segment_down_to_sample_entry() {
    let data = init_segment(avc1(640, 480));
    let nodes = walk(&data, &ScanConfig::default(), 16).expect("walk failed");

    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[0].header.typ, FourCC::FTYP);
    assert!(nodes[0].children.is_none());

    let mut n = &nodes[1];
    for want in &segbox::AVC1_PATH[1..] {
        let want = *want;
        let kids = n.children.as_ref().expect("container without children");
        n = kids.iter().find(|c| c.header.typ == want).expect("missing child");
    }
    assert_eq!(n.full_name, "AVC Sample Entry");
    assert_eq!(n.header.size, 86);
}

#[test]
fn max_depth_limits_descent() {
    let data = media_segment(tfdt_v0(1));
    let nodes = walk(&data, &ScanConfig::default(), 0).unwrap();
    assert_eq!(nodes.len(), 2);
    assert!(nodes.iter().all(|n| n.children.is_none()));

    let nodes = walk(&data, &ScanConfig::default(), 1).unwrap();
    let traf = &nodes[0].children.as_ref().unwrap()[1];
    assert_eq!(traf.header.typ, FourCC::TRAF);
    assert!(traf.children.is_none());
}

#[test]
fn serializes_to_json() -> anyhow::Result<()> {
    let data = media_segment(tfdt_v1(42));
    let nodes = walk(&data, &ScanConfig::default(), 8)?;
    let v: Value = serde_json::from_str(&serde_json::to_string(&nodes)?)?;

    let moof = &v[0];
    assert_eq!(moof["typ"], "moof");
    assert_eq!(moof["start"], 0);
    assert_eq!(moof["header_size"], 8);
    assert_eq!(moof["full_name"], "Movie Fragment Box");
    assert_eq!(moof["children"][1]["children"][1]["typ"], "tfdt");
    assert!(v[1].get("children").is_none());

    let tfdt = serde_json::to_value(segbox::get_tfdt(&data)?)?;
    assert_eq!(tfdt["version"], 1);
    assert_eq!(tfdt["base_media_decode_time"], 42);
    Ok(())
}
