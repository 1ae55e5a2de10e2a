use crate::boxes::{BoxHeader, BoxNode, BoxTree, FourCC, FullBoxHeader};
use crate::error::{Error, Result};
use crate::known_boxes::{ChildLayout, KnownBox};
use byteorder::{BigEndian, ReadBytesExt};
use std::io::{Read, Seek, SeekFrom};

pub fn read_box_header<R: Read + Seek>(r: &mut R) -> Result<BoxHeader> {
    let start = r.stream_position()?;
    let size32 = r.read_u32::<BigEndian>().map_err(|e| header_cut(start, e))?;
    let mut typ = [0u8; 4];
    r.read_exact(&mut typ).map_err(|e| header_cut(start, e))?;
    let mut size = size32 as u64;

    if size32 == 1 {
        size = r.read_u64::<BigEndian>().map_err(|e| header_cut(start, e))?;
    }

    let mut uuid = None;
    if &typ == b"uuid" {
        let mut u = [0u8; 16];
        r.read_exact(&mut u).map_err(|e| header_cut(start, e))?;
        uuid = Some(u);
    }

    let header_size = match (size32 == 1, &typ == b"uuid") {
        (true, true)  => 8 + 8 + 16,
        (true, false) => 8 + 8,
        (false, true) => 8 + 16,
        (false, false)=> 8,
    } as u64;

    if size != 0 && size < header_size {
        return Err(Error::malformed(
            start,
            format!(
                "`{}` declares size {} smaller than its {}-byte header",
                FourCC(typ),
                size,
                header_size
            ),
        ));
    }

    Ok(BoxHeader { size, typ: FourCC(typ), uuid, header_size, start })
}

// EOF inside a header counts as structural damage, not io.
fn header_cut(start: u64, e: std::io::Error) -> Error {
    if e.kind() == std::io::ErrorKind::UnexpectedEof {
        Error::malformed(start, "file ends inside a box header")
    } else {
        Error::Io(e)
    }
}

/// Parse the whole source into a [`BoxTree`]. `source_len` bounds the
/// top-level boxes and resolves `size == 0` ("extends to end").
///
/// Any structural inconsistency aborts the build; a malformed file never
/// yields a partial tree.
pub fn parse_tree<R: Read + Seek>(r: &mut R, source_len: u64) -> Result<BoxTree> {
    r.seek(SeekFrom::Start(0))?;
    let boxes = parse_children(r, source_len)?;
    Ok(BoxTree { source_len, boxes })
}

/// Deepest container nesting the parser follows. Real files stay within a
/// dozen levels; deeper nesting is crafted input.
const MAX_DEPTH: usize = 64;

/// Parse sibling boxes from the current position up to `parent_end`.
pub fn parse_children<R: Read + Seek>(r: &mut R, parent_end: u64) -> Result<Vec<BoxNode>> {
    parse_children_at(r, parent_end, 0)
}

fn parse_children_at<R: Read + Seek>(
    r: &mut R,
    parent_end: u64,
    depth: usize,
) -> Result<Vec<BoxNode>> {
    let mut pos = r.stream_position()?;
    if depth > MAX_DEPTH {
        return Err(Error::malformed(
            pos,
            format!("box nesting exceeds {MAX_DEPTH} levels"),
        ));
    }
    let mut kids = Vec::new();
    while pos < parent_end {
        if parent_end - pos < 8 {
            return Err(Error::malformed(
                pos,
                format!("{} trailing bytes cannot hold a box header", parent_end - pos),
            ));
        }
        let node = parse_node(r, parent_end, depth)?;
        pos = node.end();
        kids.push(node);
    }
    Ok(kids)
}

fn parse_node<R: Read + Seek>(r: &mut R, parent_end: u64, depth: usize) -> Result<BoxNode> {
    let h = read_box_header(r)?;
    let box_end = if h.size == 0 { parent_end } else { h.start + h.size };
    if box_end > parent_end {
        return Err(Error::malformed(
            h.start,
            format!(
                "`{}` ends at {:#x}, past its parent's end {:#x}",
                h.typ, box_end, parent_end
            ),
        ));
    }
    if h.content_start() > box_end {
        return Err(Error::malformed(
            h.start,
            format!("`{}` header overruns its parent", h.typ),
        ));
    }

    let kb = KnownBox::from(h.typ);
    let content = h.content_start();

    let mut full = None;
    let mut payload_offset = content;
    let mut children = Vec::new();

    match kb.child_layout() {
        Some(layout) => {
            r.seek(SeekFrom::Start(content))?;
            let child_start = match layout {
                ChildLayout::Plain => content,
                ChildLayout::AfterFullHeader => {
                    full = Some(read_full_header(r, &h, box_end)?);
                    payload_offset = content + 4;
                    payload_offset
                }
                ChildLayout::CountedEntries => {
                    full = Some(read_full_header(r, &h, box_end)?);
                    payload_offset = content + 4;
                    // the 4-byte entry count precedes the entries
                    payload_offset + 4
                }
                ChildLayout::VisualSampleEntry => content + 78,
                ChildLayout::AudioSampleEntry => content + audio_entry_prefix(r, &h, box_end)?,
            };
            // A sample entry too small for its fixed fields keeps no children.
            if child_start < box_end {
                r.seek(SeekFrom::Start(child_start))?;
                children = parse_children_at(r, box_end, depth + 1)?;
            }
        }
        None => {
            if kb.is_full_box() {
                r.seek(SeekFrom::Start(content))?;
                full = Some(read_full_header(r, &h, box_end)?);
                payload_offset = content + 4;
            }
        }
    }

    r.seek(SeekFrom::Start(box_end))?;
    let payload_len = box_end.saturating_sub(payload_offset);
    Ok(BoxNode { hdr: h, full, payload_offset, payload_len, children })
}

fn read_full_header<R: Read + Seek>(r: &mut R, h: &BoxHeader, box_end: u64) -> Result<FullBoxHeader> {
    if box_end.saturating_sub(h.content_start()) < 4 {
        return Err(Error::malformed(
            h.start,
            format!("`{}` has no room for version and flags", h.typ),
        ));
    }
    let version = r.read_u8()?;
    let mut f = [0u8; 3];
    r.read_exact(&mut f)?;
    let flags = ((f[0] as u32) << 16) | ((f[1] as u32) << 8) | (f[2] as u32);
    Ok(FullBoxHeader { version, flags })
}

// Audio sample entries carry a QT-style version word at offset 8 of their
// fixed fields; it decides how many fixed bytes precede any child boxes.
fn audio_entry_prefix<R: Read + Seek>(r: &mut R, h: &BoxHeader, box_end: u64) -> Result<u64> {
    let content = h.content_start();
    let interior = box_end - content;
    if interior < 10 {
        return Ok(interior);
    }
    r.seek(SeekFrom::Start(content + 8))?;
    let version = r.read_u16::<BigEndian>()?;
    Ok(match version {
        0 => 28,
        1 => 44,
        2 => 64,
        // unknown layout: consume the interior, expose no children
        _ => interior,
    })
}
