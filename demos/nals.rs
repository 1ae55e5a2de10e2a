use std::env;

// Find the first track with NAL-structured samples and split its first
// sample into NAL units.
fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <file>", args[0]);
        std::process::exit(1);
    }

    let (mut f, _tree, tracks) = mp4peek::open_tracks(&args[1])?;

    let Some(track) = tracks
        .iter()
        .find(|t| t.description.nal_length_size.is_some())
    else {
        println!("No track with an AVC/HEVC configuration.");
        return Ok(());
    };
    let length_size = track.description.nal_length_size.unwrap();

    let Some(sample) = track.samples.first() else {
        println!("The track has no samples.");
        return Ok(());
    };

    let data = mp4peek::util::read_slice(&mut f, sample.offset, sample.size as u64)?;
    for unit in mp4peek::split_sample(&data, length_size) {
        let unit = unit?;
        match unit.nal_type() {
            Some(t) => println!("{} bytes: {}", unit.data.len(), t),
            None => println!("0 bytes: empty unit"),
        }
    }

    Ok(())
}
