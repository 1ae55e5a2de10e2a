use serde::{Serialize, Serializer};
use std::fmt;

#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct FourCC(pub [u8; 4]);

impl FourCC {
    pub const fn new(tag: &[u8; 4]) -> Self {
        FourCC(*tag)
    }
    pub fn from_str(s: &str) -> Option<Self> {
        let b = s.as_bytes();
        if b.len() == 4 {
            Some(FourCC([b[0], b[1], b[2], b[3]]))
        } else { None }
    }
    pub fn as_str_lossy(&self) -> String {
        self.0.iter().map(|&c| if (32..=126).contains(&c) { c as char } else { '.' })
            .collect()
    }
}
impl fmt::Debug for FourCC { fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.as_str_lossy()) } }
impl fmt::Display for FourCC { fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.as_str_lossy()) } }
impl Serialize for FourCC {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.as_str_lossy())
    }
}

#[derive(Debug, Clone)]
pub struct BoxHeader {
    pub size: u64,          // total size including header, or 0=to parent end
    pub typ: FourCC,        // 4CC or b"uuid"
    pub uuid: Option<[u8;16]>,
    pub header_size: u64,   // 8, 16, or 24
    pub start: u64,         // file offset of header start
}

impl BoxHeader {
    /// File offset of the first byte after the header.
    pub fn content_start(&self) -> u64 {
        self.start + self.header_size
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FullBoxHeader {
    pub version: u8,
    pub flags: u32,
}

/// One parsed box. Geometry only: payload bytes stay in the caller's
/// source and are fetched on demand.
#[derive(Debug)]
pub struct BoxNode {
    pub hdr: BoxHeader,
    /// Version and flags, captured when the type is a known FullBox.
    pub full: Option<FullBoxHeader>,
    /// Byte range after the header (and after version/flags when present).
    pub payload_offset: u64,
    pub payload_len: u64,
    /// Child boxes in file order; empty for leaves.
    pub children: Vec<BoxNode>,
}

impl BoxNode {
    /// File offset one past the box's last byte.
    pub fn end(&self) -> u64 {
        self.payload_offset + self.payload_len
    }
}

/// The ordered top-level boxes of one file. Built once by
/// [`crate::parser::parse_tree`] and immutable afterwards.
#[derive(Debug)]
pub struct BoxTree {
    /// Total length of the byte source the tree was parsed from.
    pub source_len: u64,
    pub boxes: Vec<BoxNode>,
}
