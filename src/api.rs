//! File-level conveniences for the binaries and quick scripts. Thin
//! wrappers over the typed modules; errors surface as `anyhow` here.

use crate::boxes::BoxTree;
use crate::parser::parse_tree;
use crate::track::{Track, read_tracks};
use crate::util::{hex_dump, read_slice};
use serde::Serialize;
use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

/// Open a file and parse its box tree.
///
/// The returned `File` is the byte source the tree's geometry refers to;
/// keep it around for payload reads.
///
/// ```no_run
/// use mp4peek::open_tree;
///
/// let (mut f, tree) = open_tree("video.mp4")?;
/// for b in &tree.boxes {
///     println!("{} {} bytes", b.hdr.typ, b.hdr.size);
/// }
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn open_tree<P: AsRef<Path>>(path: P) -> anyhow::Result<(File, BoxTree)> {
    let mut f = File::open(path)?;
    let len = f.metadata()?.len();
    let tree = parse_tree(&mut f, len)?;
    Ok((f, tree))
}

/// Open a file, parse its box tree, and read out its tracks.
pub fn open_tracks<P: AsRef<Path>>(path: P) -> anyhow::Result<(File, BoxTree, Vec<Track>)> {
    let (mut f, tree) = open_tree(path)?;
    let tracks = read_tracks(&mut f, &tree)?;
    Ok((f, tree, tracks))
}

/// Result of a hex dump operation containing the formatted output.
#[derive(Serialize)]
pub struct HexDump {
    /// Starting offset of the dumped data.
    pub offset: u64,
    /// Actual number of bytes that were read and dumped.
    pub length: u64,
    /// Formatted rows with addresses and an ASCII column.
    pub hex: String,
}

/// Hex-dump a range of bytes from a source of `size` total bytes.
///
/// Never reads past EOF; if `offset + max_len` goes beyond the end, the
/// returned length is smaller than `max_len`. Useful for a hex viewer
/// over box payload geometry:
///
/// ```no_run
/// use mp4peek::hex_range;
/// use std::fs::File;
///
/// fn main() -> anyhow::Result<()> {
///     let mut f = File::open("video.mp4")?;
///     let len = f.metadata()?.len();
///     let dump = hex_range(&mut f, len, 0, 256)?;
///     println!("{}", dump.hex);
///     Ok(())
/// }
/// ```
pub fn hex_range<R: Read + Seek>(
    r: &mut R,
    size: u64,
    offset: u64,
    max_len: u64,
) -> anyhow::Result<HexDump> {
    use std::cmp::min;

    // How many bytes are actually available from this offset to EOF.
    let available = size.saturating_sub(offset);
    let to_read = min(available, max_len);

    if to_read == 0 {
        return Ok(HexDump { offset, length: 0, hex: String::new() });
    }

    let data = read_slice(r, offset, to_read)?;
    let hex_str = hex_dump(&data, offset);

    Ok(HexDump {
        offset,
        length: to_read, // actual bytes read, not max_len
        hex: hex_str,
    })
}
