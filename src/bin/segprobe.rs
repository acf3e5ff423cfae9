use anyhow::Context;
use clap::{ArgAction, Parser};
use segbox::{
    BoxNode, BoxPath, ScanConfig,
    mutator::set_tfdt_time_with,
    report::{Lookup, Summary, summarize},
    resolver::resolve_root,
    tree::walk,
    util::hex_dump,
};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about = "Inspect (and retime) fMP4 / ISOBMFF segments")]
struct Args {
    /// Segment or init file path
    #[arg(default_value = "segment.mp4")]
    path: PathBuf,

    /// Emit JSON instead of human-readable text
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,

    /// Print the box tree instead of the summary
    #[arg(long, action = ArgAction::SetTrue)]
    tree: bool,

    /// Limit container recursion for --tree
    #[arg(long, default_value_t = 16)]
    max_depth: usize,

    /// Hex-dump the box at a dotted path (e.g. moof.traf.tfdt)
    #[arg(long)]
    dump: Option<String>,

    /// Rewrite the tfdt base media decode time
    #[arg(long = "set-tfdt")]
    set_tfdt: Option<u64>,

    /// Where to write the rewritten segment (defaults to the input path)
    #[arg(long, requires = "set_tfdt")]
    out: Option<PathBuf>,

    /// Reject 64-bit extended box sizes
    #[arg(long, action = ArgAction::SetTrue)]
    no_extended_size: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("segbox=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let cfg = ScanConfig { extended_size: !args.no_extended_size };
    let mut data = fs::read(&args.path)
        .with_context(|| format!("reading {}", args.path.display()))?;
    tracing::info!(path = %args.path.display(), bytes = data.len(), "read segment");

    if let Some(t) = args.set_tfdt {
        let updated = set_tfdt_time_with(&mut data, t, &cfg)?;
        let out = args.out.as_ref().unwrap_or(&args.path);
        fs::write(out, &data).with_context(|| format!("writing {}", out.display()))?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&updated)?);
        } else {
            println!(
                "tfdt v{} base_media_decode_time={} -> {}",
                updated.version,
                updated.base_media_decode_time,
                out.display()
            );
        }
        return Ok(());
    }

    if let Some(p) = &args.dump {
        let path: BoxPath = p.parse()?;
        let h = resolve_root(&data, &path, &cfg)?;
        let bytes = &data[h.start as usize..h.end() as usize];
        print!("{}", hex_dump(bytes, h.start));
        return Ok(());
    }

    if args.tree {
        let nodes = walk(&data, &cfg, args.max_depth)?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&nodes)?);
        } else {
            for n in &nodes {
                print_node(n, 0);
            }
        }
        return Ok(());
    }

    let summary = summarize(&data, &cfg);
    if args.json {
        let mut v = serde_json::to_value(&summary)?;
        v["file"] = args.path.display().to_string().into();
        println!("{}", serde_json::to_string_pretty(&v)?);
    } else {
        println!("File: {} ({} bytes)", args.path.display(), summary.bytes);
        print_human(&summary);
    }
    Ok(())
}

fn print_node(n: &BoxNode, depth: usize) {
    println!(
        "{:indent$}{} @{} size={} ({})",
        "",
        n.header.typ,
        n.header.start,
        n.header.size,
        n.full_name,
        indent = depth * 2
    );
    for c in n.children.iter().flatten() {
        print_node(c, depth + 1);
    }
}

fn print_human(s: &Summary) {
    let tops = [("ftyp", &s.ftyp), ("moov", &s.moov), ("moof", &s.moof), ("mdat", &s.mdat)];
    for (name, b) in tops {
        match b {
            Some(Lookup::Found(h)) => println!("  {}: offset={} size={}", name, h.start, h.size),
            Some(Lookup::Error { error }) => println!("  {}: error: {}", name, error),
            None => {}
        }
    }
    match &s.tfdt {
        Some(Lookup::Found(t)) => println!(
            "  tfdt: size={} version={} base_media_decode_time={}",
            t.size, t.version, t.base_media_decode_time
        ),
        Some(Lookup::Error { error }) => println!("  tfdt: error: {}", error),
        None => {}
    }
    match &s.avc1 {
        Some(Lookup::Found(a)) => println!("  avc1: size={} {}x{}", a.size, a.width, a.height),
        Some(Lookup::Error { error }) => println!("  avc1: error: {}", error),
        None => {}
    }
}
