use mp4peek::boxes::FourCC;
use mp4peek::error::Error;
use mp4peek::parser::{parse_tree, read_box_header};
use std::io::Cursor;

fn boxed(tag: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut v = Vec::new();
    v.extend_from_slice(&(payload.len() as u32 + 8).to_be_bytes());
    v.extend_from_slice(tag);
    v.extend_from_slice(payload);
    v
}

fn make_minimal_file() -> Vec<u8> {
    // [ftyp box]
    // size: 24 (0x18), type: "ftyp", payload: 16 bytes
    let mut payload = Vec::new();
    payload.extend_from_slice(b"isom"); // major brand
    payload.extend_from_slice(&512u32.to_be_bytes()); // minor version
    payload.extend_from_slice(b"isom"); // one compatible brand
    payload.extend_from_slice(b"iso2");
    boxed(b"ftyp", &payload)
}

#[test]
fn read_single_ftyp_header() {
    let data = make_minimal_file();
    let mut cur = Cursor::new(data);

    let hdr = read_box_header(&mut cur).expect("read_box_header failed");

    assert_eq!(hdr.start, 0);
    assert_eq!(hdr.size, 24);
    assert_eq!(hdr.typ, FourCC(*b"ftyp"));
    assert_eq!(hdr.header_size, 8);
    assert_eq!(hdr.content_start(), 8);
}

#[test]
fn leaf_box_keeps_no_children() {
    let data = make_minimal_file();
    let len = data.len() as u64;
    let mut cur = Cursor::new(data);

    let tree = parse_tree(&mut cur, len).expect("parse_tree failed");
    assert_eq!(tree.boxes.len(), 1);
    assert!(tree.boxes[0].children.is_empty());
    assert_eq!(tree.boxes[0].payload_len, 16);
}

#[test]
fn container_with_one_leaf_child() {
    // 16-byte moov holding one 8-byte free box (header only, no payload)
    let data = boxed(b"moov", &boxed(b"free", &[]));
    assert_eq!(data.len(), 16);
    let mut cur = Cursor::new(data);

    let tree = parse_tree(&mut cur, 16).expect("parse_tree failed");
    assert_eq!(tree.boxes.len(), 1);

    let root = &tree.boxes[0];
    assert_eq!(root.hdr.typ, FourCC(*b"moov"));
    assert_eq!(root.hdr.size, 16);
    assert_eq!(root.children.len(), 1);

    let child = &root.children[0];
    assert_eq!(child.hdr.typ, FourCC(*b"free"));
    assert_eq!(child.hdr.size, 8);
    assert!(child.children.is_empty());
}

#[test]
fn extended_size_escape() {
    // size32 == 1, 64-bit size follows the tag
    let mut v = Vec::new();
    v.extend_from_slice(&1u32.to_be_bytes());
    v.extend_from_slice(b"mdat");
    v.extend_from_slice(&24u64.to_be_bytes());
    v.extend_from_slice(&[0u8; 8]);
    let mut cur = Cursor::new(v);

    let hdr = read_box_header(&mut cur).expect("read_box_header failed");
    assert_eq!(hdr.size, 24);
    assert_eq!(hdr.header_size, 16);
}

#[test]
fn size_zero_extends_to_parent_end() {
    let mut v = make_minimal_file();
    let mdat_start = v.len() as u64;
    v.extend_from_slice(&0u32.to_be_bytes());
    v.extend_from_slice(b"mdat");
    v.extend_from_slice(&[0xAA; 32]);
    let len = v.len() as u64;
    let mut cur = Cursor::new(v);

    let tree = parse_tree(&mut cur, len).expect("parse_tree failed");
    assert_eq!(tree.boxes.len(), 2);
    let mdat = &tree.boxes[1];
    assert_eq!(mdat.hdr.start, mdat_start);
    assert_eq!(mdat.end(), len);
}

#[test]
fn unknown_type_is_a_leaf() {
    // looks like it could hold children, but the tag is unrecognized
    let data = boxed(b"zzzz", &boxed(b"free", &[]));
    let len = data.len() as u64;
    let mut cur = Cursor::new(data);

    let tree = parse_tree(&mut cur, len).expect("parse_tree failed");
    assert!(tree.boxes[0].children.is_empty());
    assert_eq!(tree.boxes[0].payload_len, 8);
}

#[test]
fn size_smaller_than_header_is_malformed() {
    let mut v = Vec::new();
    v.extend_from_slice(&4u32.to_be_bytes());
    v.extend_from_slice(b"free");
    let mut cur = Cursor::new(v);

    let err = parse_tree(&mut cur, 8).unwrap_err();
    assert!(matches!(err, Error::MalformedBox { .. }));
}

#[test]
fn child_past_parent_end_is_malformed() {
    // moov declares 16 bytes but its child claims 64
    let mut child = Vec::new();
    child.extend_from_slice(&64u32.to_be_bytes());
    child.extend_from_slice(b"free");
    let data = boxed(b"moov", &child);
    let mut cur = Cursor::new(data);

    let err = parse_tree(&mut cur, 16).unwrap_err();
    assert!(matches!(err, Error::MalformedBox { .. }));
}

#[test]
fn truncated_header_is_malformed() {
    let data = vec![0u8, 0, 0, 24, b'f']; // cut mid-tag
    let mut cur = Cursor::new(data);

    let err = parse_tree(&mut cur, 5).unwrap_err();
    assert!(matches!(err, Error::MalformedBox { .. }));
}

#[test]
fn runaway_nesting_is_malformed() {
    // container-in-container headers all the way down would otherwise
    // recurse once per level
    let mut v = boxed(b"free", &[]);
    for _ in 0..100 {
        v = boxed(b"moov", &v);
    }
    let len = v.len() as u64;
    let mut cur = Cursor::new(v);

    let err = parse_tree(&mut cur, len).unwrap_err();
    assert!(matches!(err, Error::MalformedBox { .. }));
}

#[test]
fn deep_but_sane_nesting_parses() {
    let mut v = boxed(b"free", &[]);
    for _ in 0..20 {
        v = boxed(b"moov", &v);
    }
    let len = v.len() as u64;
    let mut cur = Cursor::new(v);

    let tree = parse_tree(&mut cur, len).expect("parse_tree failed");
    let mut node = &tree.boxes[0];
    for _ in 0..19 {
        assert_eq!(node.children.len(), 1);
        node = &node.children[0];
    }
    assert_eq!(node.children[0].hdr.typ, FourCC(*b"free"));
}

#[test]
fn full_box_version_and_flags_captured() {
    // mvhd version 0, flags 0x000001, minimal v0 payload (96 bytes)
    let mut payload = vec![0u8, 0, 0, 1];
    payload.extend_from_slice(&[0u8; 96]);
    let data = boxed(b"moov", &boxed(b"mvhd", &payload));
    let len = data.len() as u64;
    let mut cur = Cursor::new(data);

    let tree = parse_tree(&mut cur, len).expect("parse_tree failed");
    let mvhd = &tree.boxes[0].children[0];
    let full = mvhd.full.expect("mvhd should carry version/flags");
    assert_eq!(full.version, 0);
    assert_eq!(full.flags, 1);
    // payload geometry excludes the version/flags word
    assert_eq!(mvhd.payload_offset, mvhd.hdr.content_start() + 4);
    assert_eq!(mvhd.payload_len, 96);
}
