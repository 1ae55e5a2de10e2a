//! Length-prefixed NAL unit decomposition of AVC/HEVC samples.
//!
//! Samples in MP4 carry no start codes; each NAL unit is preceded by a
//! big-endian length field whose width the sample entry's configuration
//! record declares. Splitting walks those prefixes and must consume the
//! sample exactly.

use crate::error::{Error, Result};
use crate::util::read_be_uint;
use std::fmt;

/// Width of the length prefix before each NAL unit, 1 to 4 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NalLengthSize(u8);

impl NalLengthSize {
    pub fn new(n: u8) -> Option<NalLengthSize> {
        if (1..=4).contains(&n) { Some(NalLengthSize(n)) } else { None }
    }

    /// From the `lengthSizeMinusOne` byte of an AVC or HEVC configuration
    /// record: the two low bits plus one, so the result is always in range.
    pub fn from_config_byte(b: u8) -> NalLengthSize {
        NalLengthSize((b & 0x03) + 1)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for NalLengthSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A borrowed view of one NAL unit inside a sample buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NalUnit<'a> {
    /// Offset of the unit's first payload byte within the sample.
    pub offset: usize,
    pub data: &'a [u8],
}

impl NalUnit<'_> {
    /// The 5-bit H.264 type field of the header byte. An empty unit has no
    /// header byte to classify.
    pub fn nal_type(&self) -> Option<NalUnitType> {
        self.data.first().map(|b| NalUnitType::from_header_byte(*b))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NalUnitType {
    NonIdrSlice,
    PartitionA,
    PartitionB,
    PartitionC,
    IdrSlice,
    Sei,
    Sps,
    Pps,
    AccessUnitDelimiter,
    EndOfSequence,
    EndOfStream,
    FillerData,
    Unknown(u8),
}

impl NalUnitType {
    pub fn from_header_byte(b: u8) -> NalUnitType {
        match b & 0x1f {
            1 => NalUnitType::NonIdrSlice,
            2 => NalUnitType::PartitionA,
            3 => NalUnitType::PartitionB,
            4 => NalUnitType::PartitionC,
            5 => NalUnitType::IdrSlice,
            6 => NalUnitType::Sei,
            7 => NalUnitType::Sps,
            8 => NalUnitType::Pps,
            9 => NalUnitType::AccessUnitDelimiter,
            10 => NalUnitType::EndOfSequence,
            11 => NalUnitType::EndOfStream,
            12 => NalUnitType::FillerData,
            t => NalUnitType::Unknown(t),
        }
    }
}

impl fmt::Display for NalUnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NalUnitType::NonIdrSlice => write!(f, "non-IDR slice"),
            NalUnitType::PartitionA => write!(f, "partition A"),
            NalUnitType::PartitionB => write!(f, "partition B"),
            NalUnitType::PartitionC => write!(f, "partition C"),
            NalUnitType::IdrSlice => write!(f, "IDR slice"),
            NalUnitType::Sei => write!(f, "SEI"),
            NalUnitType::Sps => write!(f, "SPS"),
            NalUnitType::Pps => write!(f, "PPS"),
            NalUnitType::AccessUnitDelimiter => write!(f, "access unit delimiter"),
            NalUnitType::EndOfSequence => write!(f, "end of sequence"),
            NalUnitType::EndOfStream => write!(f, "end of stream"),
            NalUnitType::FillerData => write!(f, "filler data"),
            NalUnitType::Unknown(t) => write!(f, "type {}", t),
        }
    }
}

/// Split a sample's bytes into NAL units.
///
/// The iterator is lazy and borrows `data`; calling again restarts from
/// the beginning. A cut length prefix, or a payload running past the
/// sample end, yields one [`Error::TruncatedNalUnit`], after which the
/// iterator is fused. No partial unit is ever handed out.
pub fn split_sample(data: &[u8], length_size: NalLengthSize) -> NalUnitIter<'_> {
    NalUnitIter { data, pos: 0, width: length_size, done: false }
}

#[derive(Debug, Clone)]
pub struct NalUnitIter<'a> {
    data: &'a [u8],
    pos: usize,
    width: NalLengthSize,
    done: bool,
}

impl<'a> Iterator for NalUnitIter<'a> {
    type Item = Result<NalUnit<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.pos >= self.data.len() {
            self.done = true;
            return None;
        }
        let prefix_at = self.pos;
        let mut pos = self.pos;
        let len = match read_be_uint(self.data, &mut pos, self.width.get() as usize) {
            Some(v) => v as usize,
            None => {
                self.done = true;
                return Some(Err(Error::TruncatedNalUnit {
                    offset: prefix_at,
                    needed: self.width.get() as usize,
                    remaining: self.data.len() - prefix_at,
                }));
            }
        };
        if self.data.len() - pos < len {
            self.done = true;
            return Some(Err(Error::TruncatedNalUnit {
                offset: pos,
                needed: len,
                remaining: self.data.len() - pos,
            }));
        }
        let unit = NalUnit { offset: pos, data: &self.data[pos..pos + len] };
        self.pos = pos + len;
        Some(Ok(unit))
    }
}

impl std::iter::FusedIterator for NalUnitIter<'_> {}
