//! Sample-table readers (`stsz`, `stsc`, `stco`/`co64`, `stts`, `ctts`,
//! `stss`) and the chunk walk that turns them into per-sample rows.
//!
//! Chunk offsets are absolute file positions; samples sit back to back
//! inside a chunk, so a sample's offset is its chunk's offset plus the
//! sizes of the samples before it in that chunk.

use crate::boxes::BoxNode;
use crate::error::{Error, Result};
use crate::util::{payload_bytes, read_be_uint};
use byteorder::{BigEndian, ByteOrder};
use serde::Serialize;
use std::io::{Read, Seek};

/// One sample's geometry and timing. Bytes are never stored here;
/// `offset`/`size` locate them in the caller's source.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Sample {
    /// Absolute file offset of the sample's first byte.
    pub offset: u64,
    pub size: u32,
    /// Decode timestamp in track timescale units (cumulative stts deltas).
    pub dts: u64,
    /// Decode duration in track timescale units.
    pub duration: u32,
    /// Composition offset from ctts; 0 when the track has none.
    pub composition_offset: i32,
    /// Sync sample (keyframe). Without an stss table every sample is sync.
    pub is_sync: bool,
}

impl Sample {
    /// Presentation timestamp: decode time plus composition offset.
    pub fn pts(&self) -> i64 {
        self.dts as i64 + self.composition_offset as i64
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SampleSizes {
    /// stsz with a nonzero constant size for every sample.
    Constant { size: u32, count: u32 },
    PerSample(Vec<u32>),
}

impl SampleSizes {
    pub fn count(&self) -> u32 {
        match self {
            SampleSizes::Constant { count, .. } => *count,
            SampleSizes::PerSample(v) => v.len() as u32,
        }
    }
    pub fn get(&self, index: usize) -> u32 {
        match self {
            SampleSizes::Constant { size, .. } => *size,
            SampleSizes::PerSample(v) => v.get(index).copied().unwrap_or(0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkRun {
    /// 1-based index of the first chunk this run applies to. A run covers
    /// every chunk up to the next run's first chunk.
    pub first_chunk: u32,
    pub samples_per_chunk: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingRun {
    pub count: u32,
    pub delta: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetRun {
    pub count: u32,
    pub offset: i32,
}

// ---------- table payload readers ----------
//
// All of these take the payload after version/flags and return None on
// underflow; the caller turns that into a malformed-box error with the
// box's position attached.

pub fn read_sample_sizes(p: &[u8]) -> Option<SampleSizes> {
    let mut pos = 0;
    let size = read_be_uint(p, &mut pos, 4)?;
    let count = read_be_uint(p, &mut pos, 4)?;
    if size != 0 {
        return Some(SampleSizes::Constant { size, count });
    }
    table_fits(p, pos, count, 4)?;
    let mut v = Vec::with_capacity(count as usize);
    for _ in 0..count {
        v.push(read_be_uint(p, &mut pos, 4)?);
    }
    Some(SampleSizes::PerSample(v))
}

pub fn read_time_to_sample(p: &[u8]) -> Option<Vec<TimingRun>> {
    let mut pos = 0;
    let count = read_be_uint(p, &mut pos, 4)?;
    table_fits(p, pos, count, 8)?;
    let mut v = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let c = read_be_uint(p, &mut pos, 4)?;
        let delta = read_be_uint(p, &mut pos, 4)?;
        v.push(TimingRun { count: c, delta });
    }
    Some(v)
}

pub fn read_composition_offsets(p: &[u8], version: u8) -> Option<Vec<OffsetRun>> {
    let mut pos = 0;
    let count = read_be_uint(p, &mut pos, 4)?;
    table_fits(p, pos, count, 8)?;
    let mut v = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let c = read_be_uint(p, &mut pos, 4)?;
        let raw = read_be_uint(p, &mut pos, 4)?;
        // version 1 offsets are signed; version 0 values clamp into i32
        let offset = if version >= 1 {
            raw as i32
        } else {
            raw.min(i32::MAX as u32) as i32
        };
        v.push(OffsetRun { count: c, offset });
    }
    Some(v)
}

pub fn read_sample_to_chunk(p: &[u8]) -> Option<Vec<ChunkRun>> {
    let mut pos = 0;
    let count = read_be_uint(p, &mut pos, 4)?;
    table_fits(p, pos, count, 12)?;
    let mut v = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let first_chunk = read_be_uint(p, &mut pos, 4)?;
        let samples_per_chunk = read_be_uint(p, &mut pos, 4)?;
        let _sample_description_index = read_be_uint(p, &mut pos, 4)?;
        v.push(ChunkRun { first_chunk, samples_per_chunk });
    }
    Some(v)
}

/// `stco` (`wide` = false) or `co64` (`wide` = true) offsets.
pub fn read_chunk_offsets(p: &[u8], wide: bool) -> Option<Vec<u64>> {
    let mut pos = 0;
    let count = read_be_uint(p, &mut pos, 4)?;
    table_fits(p, pos, count, if wide { 8 } else { 4 })?;
    let mut v = Vec::with_capacity(count as usize);
    for _ in 0..count {
        if wide {
            v.push(BigEndian::read_u64(&p[pos..pos + 8]));
            pos += 8;
        } else {
            v.push(read_be_uint(p, &mut pos, 4)? as u64);
        }
    }
    Some(v)
}

/// 1-based sync sample numbers, increasing.
pub fn read_sync_samples(p: &[u8]) -> Option<Vec<u32>> {
    let mut pos = 0;
    let count = read_be_uint(p, &mut pos, 4)?;
    table_fits(p, pos, count, 4)?;
    let mut v = Vec::with_capacity(count as usize);
    for _ in 0..count {
        v.push(read_be_uint(p, &mut pos, 4)?);
    }
    Some(v)
}

// Declared entry counts must fit the remaining payload before anything is
// allocated for them.
fn table_fits(p: &[u8], pos: usize, count: u32, entry_size: usize) -> Option<()> {
    let need = (count as usize).checked_mul(entry_size)?;
    if p.len().saturating_sub(pos) >= need { Some(()) } else { None }
}

// ---------- assembly ----------

/// Walk the chunk runs and assemble per-sample rows. Sample numbering
/// follows chunk order, which is file order. Tables that disagree stop the
/// walk at whichever limit is reached first.
pub fn build_samples(
    sizes: &SampleSizes,
    chunk_runs: &[ChunkRun],
    chunk_offsets: &[u64],
    timing: &[TimingRun],
    composition: &[OffsetRun],
    sync: Option<&[u32]>,
) -> Vec<Sample> {
    let total = sizes.count() as usize;
    let durations = expand_runs(timing.iter().map(|r| (r.count, r.delta)), total);
    let comp_offsets = expand_runs(composition.iter().map(|r| (r.count, r.offset)), total);

    let mut out = Vec::with_capacity(total);
    let mut dts = 0u64;
    let mut sample = 0usize;

    'runs: for (i, run) in chunk_runs.iter().enumerate() {
        let first = (run.first_chunk.max(1) - 1) as usize;
        let last = match chunk_runs.get(i + 1) {
            Some(next) => ((next.first_chunk.max(1) - 1) as usize).min(chunk_offsets.len()),
            None => chunk_offsets.len(),
        };
        for chunk in first..last {
            let mut offset = chunk_offsets[chunk];
            for _ in 0..run.samples_per_chunk {
                if sample >= total {
                    break 'runs;
                }
                let size = sizes.get(sample);
                let duration = durations.get(sample).copied().unwrap_or(0);
                out.push(Sample {
                    offset,
                    size,
                    dts,
                    duration,
                    composition_offset: comp_offsets.get(sample).copied().unwrap_or(0),
                    is_sync: is_sync(sync, sample as u32 + 1),
                });
                offset += size as u64;
                dts += duration as u64;
                sample += 1;
            }
        }
    }
    out
}

fn expand_runs<T: Copy>(runs: impl Iterator<Item = (u32, T)>, cap: usize) -> Vec<T> {
    let mut v = Vec::with_capacity(cap);
    for (count, value) in runs {
        for _ in 0..count {
            if v.len() == cap {
                return v;
            }
            v.push(value);
        }
    }
    v
}

// stss numbers are 1-based and increasing, so a binary search suffices.
fn is_sync(sync: Option<&[u32]>, sample_number: u32) -> bool {
    match sync {
        Some(list) => list.binary_search(&sample_number).is_ok(),
        None => true,
    }
}

/// Assemble the sample rows for one `stbl` subtree. `source_len` bounds
/// what the tables may claim.
///
/// A missing required table (`stsz`, `stsc`, and one of `stco`/`co64`)
/// yields an empty list rather than an error; a present-but-short table is
/// a malformed box.
pub fn read_sample_table<R: Read + Seek>(
    r: &mut R,
    stbl: &BoxNode,
    source_len: u64,
) -> Result<Vec<Sample>> {
    let Some(stsz) = stbl.resolve("stsz") else {
        return Ok(Vec::new());
    };
    let sizes = read_sample_sizes(&payload_bytes(r, stsz)?).ok_or_else(|| table_error(stsz))?;

    // A per-sample count is bounded by the table bytes behind it; a
    // constant-size count has none, so bound it against the file before
    // anything is allocated for it.
    if let SampleSizes::Constant { size, count } = sizes
        && (count as u64).saturating_mul(size as u64) > source_len
    {
        return Err(Error::malformed(
            stsz.hdr.start,
            format!(
                "`stsz` declares {count} samples of {size} bytes in a {source_len}-byte source"
            ),
        ));
    }

    let Some(stsc) = stbl.resolve("stsc") else {
        return Ok(Vec::new());
    };
    let chunk_runs =
        read_sample_to_chunk(&payload_bytes(r, stsc)?).ok_or_else(|| table_error(stsc))?;

    let chunk_offsets = if let Some(stco) = stbl.resolve("stco") {
        read_chunk_offsets(&payload_bytes(r, stco)?, false).ok_or_else(|| table_error(stco))?
    } else if let Some(co64) = stbl.resolve("co64") {
        read_chunk_offsets(&payload_bytes(r, co64)?, true).ok_or_else(|| table_error(co64))?
    } else {
        return Ok(Vec::new());
    };

    let timing = match stbl.resolve("stts") {
        Some(stts) => {
            read_time_to_sample(&payload_bytes(r, stts)?).ok_or_else(|| table_error(stts))?
        }
        None => Vec::new(),
    };

    let composition = match stbl.resolve("ctts") {
        Some(ctts) => {
            let version = ctts.full.map(|f| f.version).unwrap_or(0);
            read_composition_offsets(&payload_bytes(r, ctts)?, version)
                .ok_or_else(|| table_error(ctts))?
        }
        None => Vec::new(),
    };

    let sync = match stbl.resolve("stss") {
        Some(stss) => {
            Some(read_sync_samples(&payload_bytes(r, stss)?).ok_or_else(|| table_error(stss))?)
        }
        None => None,
    };

    Ok(build_samples(
        &sizes,
        &chunk_runs,
        &chunk_offsets,
        &timing,
        &composition,
        sync.as_deref(),
    ))
}

fn table_error(node: &BoxNode) -> Error {
    Error::malformed(
        node.hdr.start,
        format!("`{}` table is shorter than its entry count", node.hdr.typ),
    )
}
