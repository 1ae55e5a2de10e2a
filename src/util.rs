use crate::boxes::BoxNode;
use byteorder::{BigEndian, ByteOrder};
use std::io::{Read, Seek, SeekFrom};

/// Read a big-endian unsigned integer of `width` bytes (1..=4) from `buf`
/// at `*pos`, advancing the cursor on success.
///
/// Returns `None` when fewer than `width` bytes remain or the width is out
/// of range; the cursor is left untouched in that case. Callers decide what
/// the underflow means at their layer.
pub fn read_be_uint(buf: &[u8], pos: &mut usize, width: usize) -> Option<u32> {
    if width == 0 || width > 4 {
        return None;
    }
    let end = pos.checked_add(width)?;
    if end > buf.len() {
        return None;
    }
    let v = BigEndian::read_uint(&buf[*pos..end], width) as u32;
    *pos = end;
    Some(v)
}

/// Fetch `len` bytes starting at `offset` from a seekable source.
pub fn read_slice<R: Read + Seek>(r: &mut R, offset: u64, len: u64) -> std::io::Result<Vec<u8>> {
    r.seek(SeekFrom::Start(offset))?;
    let mut v = vec![0u8; len as usize];
    r.read_exact(&mut v)?;
    Ok(v)
}

/// Fetch a node's payload bytes (the region after its header and any
/// version/flags) from the source the tree was parsed from.
pub fn payload_bytes<R: Read + Seek>(r: &mut R, node: &BoxNode) -> std::io::Result<Vec<u8>> {
    read_slice(r, node.payload_offset, node.payload_len)
}

/// Classic 16-bytes-per-row hex dump with an ASCII gutter. Offsets are
/// absolute, so rows line up with the file positions the box tree reports.
pub fn hex_dump(bytes: &[u8], start_offset: u64) -> String {
    let mut out = String::new();
    for (i, chunk) in bytes.chunks(16).enumerate() {
        let offs = start_offset + (i as u64) * 16;
        let hexs: String = chunk.iter().map(|b| format!("{:02x} ", b)).collect();
        let ascii: String = chunk.iter().map(|b| {
            let c = *b;
            if (32..=126).contains(&c) { c as char } else { '.' }
        }).collect();
        out.push_str(&format!("{:08x}  {:<48}  |{}|\n", offs, hexs, ascii));
    }
    out
}
