use clap::{ArgAction, Parser};
use mp4peek::{
    open_tracks, split_sample,
    util::{hex_dump, read_slice},
};

#[derive(Parser, Debug)]
#[command(version, about = "Split an MP4 sample into its NAL units")]
struct Args {
    /// MP4/ISOBMFF file path
    path: String,

    /// Track ID (default: first track with NAL-structured samples)
    #[arg(long)]
    track_id: Option<u32>,

    /// Zero-based sample index within the track
    #[arg(long, default_value_t = 0)]
    sample: usize,

    /// Limit number of NAL units printed
    #[arg(long)]
    limit: Option<usize>,

    /// Hex-dump each unit's payload
    #[arg(long, action = ArgAction::SetTrue)]
    hex: bool,

    /// Byte count per unit for --hex (0 means the whole unit)
    #[arg(long, default_value_t = 64)]
    bytes: usize,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let (mut f, _tree, tracks) = open_tracks(&args.path)?;

    let track = match args.track_id {
        Some(id) => tracks
            .iter()
            .find(|t| t.id == Some(id))
            .ok_or_else(|| anyhow::anyhow!("no track with ID {id}"))?,
        None => tracks
            .iter()
            .find(|t| t.description.nal_length_size.is_some())
            .ok_or_else(|| anyhow::anyhow!("no track with NAL-structured samples"))?,
    };
    let track_id = fmt_id(track.id);

    let Some(length_size) = track.description.nal_length_size else {
        anyhow::bail!(
            "track {} has no AVC/HEVC configuration; samples are opaque",
            track_id
        );
    };

    let sample = track.samples.get(args.sample).ok_or_else(|| {
        anyhow::anyhow!(
            "track {} has {} samples, no index {}",
            track_id,
            track.samples.len(),
            args.sample
        )
    })?;

    let data = read_slice(&mut f, sample.offset, sample.size as u64)?;
    println!(
        "track {} sample {}: {} bytes at {:#x}, {}-byte length prefixes",
        track_id, args.sample, sample.size, sample.offset, length_size
    );

    let take = args.limit.unwrap_or(usize::MAX);
    for (i, unit) in split_sample(&data, length_size).take(take).enumerate() {
        let unit = unit?;
        let label = match unit.nal_type() {
            Some(t) => t.to_string(),
            None => "empty".to_string(),
        };
        println!("  [{i}] {} bytes  {}", unit.data.len(), label);
        if args.hex {
            let n = if args.bytes == 0 || args.bytes > unit.data.len() {
                unit.data.len()
            } else {
                args.bytes
            };
            print!(
                "{}",
                hex_dump(&unit.data[..n], sample.offset + unit.offset as u64)
            );
        }
    }
    Ok(())
}

fn fmt_id(id: Option<u32>) -> String {
    match id {
        Some(i) => i.to_string(),
        None => "?".to_string(),
    }
}
