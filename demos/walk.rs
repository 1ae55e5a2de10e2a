use std::env;

// Parse an MP4 file and walk its box tree, printing each box with its
// offset and size.
fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <file>", args[0]);
        std::process::exit(1);
    }

    let (_f, tree) = mp4peek::open_tree(&args[1])?;
    println!("Top-level boxes: {}", tree.boxes.len());

    for b in &tree.boxes {
        walk(b, 0);
    }

    // Example: resolve a box path to the first track's sample table
    match tree.resolve("moov/trak[0]/mdia/minf/stbl") {
        Some(stbl) => println!("First track's stbl holds {} boxes", stbl.children.len()),
        None => println!("No sample table found."),
    }

    Ok(())
}

fn walk(b: &mp4peek::BoxNode, depth: usize) {
    println!(
        "{}{} at {:#x}, {} bytes",
        "  ".repeat(depth),
        b.hdr.typ,
        b.hdr.start,
        b.hdr.size
    );
    for c in &b.children {
        walk(c, depth + 1);
    }
}
