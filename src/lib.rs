pub mod api;
pub mod boxes;
pub mod error;
pub mod known_boxes;
pub mod nal;
pub mod parser;
pub mod path;
pub mod samples;
pub mod track;
pub mod util;

pub use api::{HexDump, hex_range, open_tracks, open_tree};
pub use boxes::{BoxHeader, BoxNode, BoxTree, FourCC, FullBoxHeader};
pub use error::{Error, Result};
pub use known_boxes::{ChildLayout, KnownBox};
pub use nal::{NalLengthSize, NalUnit, NalUnitIter, NalUnitType, split_sample};
pub use parser::{parse_children, parse_tree, read_box_header};
pub use path::{BoxPath, Segment, TagPattern};
pub use samples::{Sample, read_sample_table};
pub use track::{EncryptionInfo, Protection, SampleDescription, Track, read_tracks};
