use clap::{ArgAction, Parser};
use mp4peek::{
    boxes::{BoxHeader, BoxNode, BoxTree},
    known_boxes::KnownBox,
    open_tree,
    util::{hex_dump, read_slice},
};
use serde::Serialize;
use std::fs::File;

#[derive(Parser, Debug)]
#[command(version, about = "MP4/ISOBMFF box tree explorer")]
struct Args {
    /// MP4/ISOBMFF file path
    path: String,

    /// Only print the subtree at a box path (e.g. moov/trak[1]/mdia/minf/stbl)
    #[arg(long = "filter")]
    filter: Option<String>,

    /// Hex-dump the payload of the box at this path instead of listing
    #[arg(long = "raw")]
    raw: Option<String>,

    /// Byte count for --raw (0 means the entire payload)
    #[arg(long, default_value_t = 0)]
    bytes: u64,

    /// Limit recursion depth (for text/tree output)
    #[arg(long, default_value_t = 64)]
    max_depth: usize,

    /// Show full box names next to the 4CC
    #[arg(long, action = ArgAction::SetTrue)]
    names: bool,

    /// Emit JSON instead of a human-readable tree
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let (mut f, tree) = open_tree(&args.path)?;

    if let Some(expr) = &args.raw {
        let node = resolve_target(&tree, expr)?;
        dump_raw(&mut f, node, args.bytes)?;
        return Ok(());
    }

    // Target roots: a filtered subtree or the whole top level. A filter
    // that matches nothing is an error, same as --raw.
    let targets: Vec<&BoxNode> = match &args.filter {
        Some(expr) => vec![resolve_target(&tree, expr)?],
        None => tree.boxes.iter().collect(),
    };

    if args.json {
        let json_boxes: Vec<JsonBox> = targets.iter().map(|b| JsonBox::build(b)).collect();
        println!("{}", serde_json::to_string_pretty(&json_boxes)?);
        return Ok(());
    }

    for b in targets {
        print_box(b, 0, &args);
    }
    Ok(())
}

fn resolve_target<'a>(tree: &'a BoxTree, expr: &str) -> anyhow::Result<&'a BoxNode> {
    tree.resolve(expr)
        .ok_or_else(|| anyhow::anyhow!("no box matches `{expr}`"))
}

// ---------- Human-readable tree ----------

fn print_box(b: &BoxNode, depth: usize, args: &Args) {
    let indent = "  ".repeat(depth);
    let mut line = format!(
        "{indent}{:>8} {:>10} {}",
        format!("{:#x}", b.hdr.start),
        b.hdr.size,
        display_type(&b.hdr)
    );
    if let Some(full) = b.full {
        line.push_str(&format!(" (ver={}, flags={:#08x})", full.version, full.flags));
    } else if !b.children.is_empty() {
        line.push_str(" (container)");
    }
    if args.names {
        line.push_str(&format!("  {}", KnownBox::from(b.hdr.typ).full_name()));
    }
    println!("{line}");

    if depth + 1 <= args.max_depth {
        for c in &b.children {
            print_box(c, depth + 1, args);
        }
    }
}

fn display_type(h: &BoxHeader) -> String {
    match h.uuid {
        Some(u) => format!("uuid:{}", hex::encode(u)),
        None => h.typ.to_string(),
    }
}

// ---------- Raw dump ----------

fn dump_raw(f: &mut File, node: &BoxNode, limit: u64) -> anyhow::Result<()> {
    let to_read = if limit == 0 || limit > node.payload_len {
        node.payload_len
    } else {
        limit
    };
    let data = read_slice(f, node.payload_offset, to_read)?;
    println!(
        "== {} payload: offset={:#x}, len={} ==",
        display_type(&node.hdr),
        node.payload_offset,
        to_read
    );
    print!("{}", hex_dump(&data, node.payload_offset));
    Ok(())
}

// ---------- JSON representation ----------

#[derive(Serialize)]
struct JsonBox {
    offset: u64,
    size: u64,
    typ: String,
    name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    flags: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    children: Option<Vec<JsonBox>>,
}

impl JsonBox {
    fn build(b: &BoxNode) -> JsonBox {
        let children = if b.children.is_empty() {
            None
        } else {
            Some(b.children.iter().map(JsonBox::build).collect())
        };
        JsonBox {
            offset: b.hdr.start,
            size: b.hdr.size,
            typ: b.hdr.typ.to_string(),
            name: KnownBox::from(b.hdr.typ).full_name(),
            uuid: b.hdr.uuid.map(hex::encode),
            version: b.full.map(|f| f.version),
            flags: b.full.map(|f| f.flags),
            children,
        }
    }
}
