use clap::{ArgAction, Parser};
use mp4peek::{Protection, Sample, Track, open_tracks};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(version, about = "List MP4 tracks with protection and sample info")]
struct Args {
    /// MP4/ISOBMFF file path
    path: String,

    /// Only show the track with this track ID
    #[arg(long)]
    track_id: Option<u32>,

    /// Print per-sample rows (offset, size, timing, sync)
    #[arg(long, action = ArgAction::SetTrue)]
    samples: bool,

    /// Limit number of samples printed per track
    #[arg(long)]
    limit: Option<usize>,

    /// Output as JSON instead of human-readable text
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct TrackReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    track_type: Option<String>, // "video" / "audio" / "other"

    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<String>, // e.g. "avc1", "encv", "mp4a"

    #[serde(skip_serializing_if = "Option::is_none")]
    width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    height: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    duration_seconds: Option<f64>,

    encrypted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    scheme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    original_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    default_kid: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    nal_length_size: Option<u8>,

    sample_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    samples: Option<Vec<Sample>>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let (_f, _tree, tracks) = open_tracks(&args.path)?;

    let reports: Vec<TrackReport> = tracks
        .iter()
        .filter(|t| args.track_id.is_none_or(|id| t.id == Some(id)))
        .map(|t| build_report(t, &args))
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        print_human(&reports, &args);
    }
    Ok(())
}

fn build_report(t: &Track, args: &Args) -> TrackReport {
    let (scheme, original_format, default_kid) = match &t.protection {
        Protection::Plain => (None, None, None),
        Protection::Encrypted(e) => (
            Some(e.scheme.to_string()),
            e.original_format.map(|f| f.to_string()),
            e.default_kid_hex(),
        ),
    };

    let samples = if args.samples {
        let take = args.limit.unwrap_or(t.samples.len());
        Some(t.samples.iter().take(take).copied().collect())
    } else {
        None
    };

    TrackReport {
        id: t.id,
        track_type: t.handler.map(|h| track_type(&h.to_string()).to_string()),
        format: t.description.format.map(|f| f.to_string()),
        width: t.width,
        height: t.height,
        duration_seconds: t.duration_seconds(),
        encrypted: t.is_encrypted(),
        scheme,
        original_format,
        default_kid,
        nal_length_size: t.description.nal_length_size.map(|n| n.get()),
        sample_count: t.samples.len(),
        samples,
    }
}

fn track_type(handler: &str) -> &'static str {
    match handler {
        "vide" => "video",
        "soun" => "audio",
        "subt" | "text" | "sbtl" => "subtitle",
        _ => "other",
    }
}

fn print_human(reports: &[TrackReport], args: &Args) {
    if reports.is_empty() {
        println!("Tracks: (none)");
        return;
    }
    for r in reports {
        match r.id {
            Some(id) => println!("Track {}:", id),
            None => println!("Track (no tkhd):"),
        }
        if let Some(tt) = &r.track_type {
            println!("    type: {}", tt);
        }
        if let Some(fmt) = &r.format {
            println!("    format: {}", fmt);
        }
        if let (Some(w), Some(h)) = (r.width, r.height) {
            println!("    size: {}x{}", w, h);
        }
        if let Some(sec) = r.duration_seconds {
            println!("    duration: {:.3} s", sec);
        }
        if r.encrypted {
            println!(
                "    protection: {} (was {})",
                r.scheme.as_deref().unwrap_or("?"),
                r.original_format.as_deref().unwrap_or("?")
            );
            if let Some(kid) = &r.default_kid {
                println!("    default KID: {}", kid);
            }
        } else {
            println!("    protection: none");
        }
        if let Some(n) = r.nal_length_size {
            println!("    NAL length field: {} bytes", n);
        }
        println!("    samples: {}", r.sample_count);

        if args.samples
            && let Some(samples) = &r.samples
        {
            for (i, s) in samples.iter().enumerate() {
                println!(
                    "      [{i}] offset={:#x} size={} dts={} pts={}{}",
                    s.offset,
                    s.size,
                    s.dts,
                    s.pts(),
                    if s.is_sync { " sync" } else { "" }
                );
            }
            if samples.len() < r.sample_count {
                println!("      ... {} more", r.sample_count - samples.len());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_type_maps_handlers() {
        assert_eq!(track_type("vide"), "video");
        assert_eq!(track_type("soun"), "audio");
        assert_eq!(track_type("text"), "subtitle");
        assert_eq!(track_type("hint"), "other");
    }
}
