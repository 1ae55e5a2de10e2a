//! Track enumeration: per-`trak` header fields, sample description,
//! protection classification, and the assembled sample list.

use crate::boxes::{BoxNode, BoxTree, FourCC};
use crate::error::Result;
use crate::nal::NalLengthSize;
use crate::samples::{Sample, read_sample_table};
use crate::util::payload_bytes;
use byteorder::{BigEndian, ByteOrder};
use std::io::{Read, Seek};

/// Protection scheme tags treated as encryption. Anything else in `schm`
/// leaves the track plain.
pub const RECOGNIZED_SCHEMES: [FourCC; 4] = [
    FourCC::new(b"cenc"),
    FourCC::new(b"cbc1"),
    FourCC::new(b"cens"),
    FourCC::new(b"cbcs"),
];

/// Whether a track's samples are stored in the clear or under a recognized
/// protection scheme. Decided once when the track is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Protection {
    Plain,
    Encrypted(EncryptionInfo),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptionInfo {
    /// Scheme tag from `schm`.
    pub scheme: FourCC,
    pub scheme_version: u32,
    /// Sample entry format before encryption, from `frma`.
    pub original_format: Option<FourCC>,
    /// Default key ID from `tenc`.
    pub default_kid: Option<[u8; 16]>,
    /// Default per-sample IV size in bytes, from `tenc`.
    pub default_iv_size: Option<u8>,
}

impl EncryptionInfo {
    pub fn default_kid_hex(&self) -> Option<String> {
        self.default_kid.map(hex::encode)
    }
}

/// What the first `stsd` sample entry says about sample contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleDescription {
    pub entry_count: u32,
    /// Format tag of the first sample entry (`avc1`, `mp4a`, `encv`, ...).
    pub format: Option<FourCC>,
    /// Length-prefix width from the entry's `avcC`/`hvcC` record. `None`
    /// means the samples have no NAL structure to split.
    pub nal_length_size: Option<NalLengthSize>,
}

#[derive(Debug, Clone)]
pub struct Track {
    /// Track ID from `tkhd`; `None` when the box is missing or short.
    pub id: Option<u32>,
    /// Handler type from `hdlr` (`vide`, `soun`, ...).
    pub handler: Option<FourCC>,
    /// Media timescale from `mdhd`, ticks per second.
    pub timescale: Option<u32>,
    /// Media duration from `mdhd`, in timescale units.
    pub duration: Option<u64>,
    /// Presentation size from `tkhd` (integer part of its 16.16 fields).
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub protection: Protection,
    pub description: SampleDescription,
    /// Sample rows in decode order; empty when the sample table is
    /// incomplete.
    pub samples: Vec<Sample>,
}

impl Track {
    pub fn is_encrypted(&self) -> bool {
        matches!(self.protection, Protection::Encrypted(_))
    }

    pub fn duration_seconds(&self) -> Option<f64> {
        match (self.timescale, self.duration) {
            (Some(ts), Some(d)) if ts > 0 => Some(d as f64 / ts as f64),
            _ => None,
        }
    }
}

/// Read every `trak` under `moov`, in file order. A track with an
/// incomplete sample table keeps an empty sample list; its header fields
/// and classification are still filled in.
pub fn read_tracks<R: Read + Seek>(r: &mut R, tree: &BoxTree) -> Result<Vec<Track>> {
    let mut tracks = Vec::new();
    let Some(moov) = tree.resolve("moov") else {
        return Ok(tracks);
    };
    for trak in moov.children.iter().filter(|c| c.hdr.typ == FourCC(*b"trak")) {
        tracks.push(read_track(r, trak, tree.source_len)?);
    }
    Ok(tracks)
}

fn read_track<R: Read + Seek>(r: &mut R, trak: &BoxNode, source_len: u64) -> Result<Track> {
    let mut id = None;
    let mut width = None;
    let mut height = None;
    if let Some(tkhd) = trak.resolve("tkhd") {
        let p = payload_bytes(r, tkhd)?;
        let v = tkhd.full.map(|f| f.version).unwrap_or(0);
        // version 1 widens the creation/modification times by 4 bytes each
        let (id_at, wh_at) = if v == 1 { (16, 84) } else { (8, 72) };
        id = be_u32(&p, id_at);
        width = be_u32(&p, wh_at).map(|w| w >> 16).filter(|w| *w != 0);
        height = be_u32(&p, wh_at + 4).map(|h| h >> 16).filter(|h| *h != 0);
    }

    let mut timescale = None;
    let mut duration = None;
    if let Some(mdhd) = trak.resolve("mdia/mdhd") {
        let p = payload_bytes(r, mdhd)?;
        let v = mdhd.full.map(|f| f.version).unwrap_or(0);
        if v == 1 {
            timescale = be_u32(&p, 16);
            duration = be_u64(&p, 20);
        } else {
            timescale = be_u32(&p, 8);
            duration = be_u32(&p, 12).map(u64::from);
        }
    }

    let handler = match trak.resolve("mdia/hdlr") {
        Some(hdlr) => fourcc_at(&payload_bytes(r, hdlr)?, 4),
        None => None,
    };

    let description = read_sample_description(r, trak)?;
    let protection = classify(r, trak)?;
    let samples = match trak.resolve("mdia/minf/stbl") {
        Some(stbl) => read_sample_table(r, stbl, source_len)?,
        None => Vec::new(),
    };

    Ok(Track {
        id,
        handler,
        timescale,
        duration,
        width,
        height,
        protection,
        description,
        samples,
    })
}

fn read_sample_description<R: Read + Seek>(r: &mut R, trak: &BoxNode) -> Result<SampleDescription> {
    let Some(stsd) = trak.resolve("mdia/minf/stbl/stsd") else {
        return Ok(SampleDescription { entry_count: 0, format: None, nal_length_size: None });
    };

    // stsd payload starts with the 4-byte entry count, then the entries
    let p = payload_bytes(r, stsd)?;
    let entry_count = be_u32(&p, 0).unwrap_or(stsd.children.len() as u32);
    let format = stsd.children.first().map(|e| e.hdr.typ);

    // The configuration record sits under the first entry whatever its
    // format, so encrypted (`encv`) entries are covered too.
    let nal_length_size = if let Some(avcc) = stsd.resolve(".[0]/avcC") {
        payload_bytes(r, avcc)?.get(4).map(|b| NalLengthSize::from_config_byte(*b))
    } else if let Some(hvcc) = stsd.resolve(".[0]/hvcC") {
        payload_bytes(r, hvcc)?.get(21).map(|b| NalLengthSize::from_config_byte(*b))
    } else {
        None
    };

    Ok(SampleDescription { entry_count, format, nal_length_size })
}

/// Probe the first encrypted sample entry for its scheme box. A missing
/// `sinf`/`schm`, or a scheme outside the recognized set, means plain.
/// `frma` and `tenc` details are collected best effort; their absence
/// never fails classification.
fn classify<R: Read + Seek>(r: &mut R, trak: &BoxNode) -> Result<Protection> {
    let Some(sinf) = trak.resolve("mdia/minf/stbl/stsd/enc./sinf") else {
        return Ok(Protection::Plain);
    };
    let Some(schm) = sinf.resolve("schm") else {
        return Ok(Protection::Plain);
    };
    let p = payload_bytes(r, schm)?;
    let Some(scheme) = fourcc_at(&p, 0) else {
        return Ok(Protection::Plain);
    };
    if !RECOGNIZED_SCHEMES.contains(&scheme) {
        return Ok(Protection::Plain);
    }
    let scheme_version = be_u32(&p, 4).unwrap_or(0);

    let original_format = match sinf.resolve("frma") {
        Some(frma) => fourcc_at(&payload_bytes(r, frma)?, 0),
        None => None,
    };

    let mut default_kid = None;
    let mut default_iv_size = None;
    if let Some(tenc) = sinf.resolve("schi/tenc") {
        let t = payload_bytes(r, tenc)?;
        // reserved/pattern (2), isProtected (1), per-sample IV size (1), KID (16)
        default_iv_size = t.get(3).copied();
        default_kid = t.get(4..20).and_then(|k| <[u8; 16]>::try_from(k).ok());
    }

    Ok(Protection::Encrypted(EncryptionInfo {
        scheme,
        scheme_version,
        original_format,
        default_kid,
        default_iv_size,
    }))
}

// ---------- fixed-offset field reads ----------

fn be_u32(p: &[u8], at: usize) -> Option<u32> {
    p.get(at..at + 4).map(BigEndian::read_u32)
}

fn be_u64(p: &[u8], at: usize) -> Option<u64> {
    p.get(at..at + 8).map(BigEndian::read_u64)
}

fn fourcc_at(p: &[u8], at: usize) -> Option<FourCC> {
    p.get(at..at + 4).and_then(|b| <[u8; 4]>::try_from(b).ok()).map(FourCC)
}
