//! mecmr3-tool — dump and scrub TOSHIBA MEC MR3 containers
//!
//! # Usage
//!
//! ```text
//! mecmr3-tool dump <in>           Parse and print every item to stdout
//! mecmr3-tool scrub <in> <out>    Write a PHI-redacted, byte-length-identical copy
//! ```

mod charset;
mod style;

use std::env;
use std::fs;
use std::path::Path;
use std::process;

use style::{BOLD, DIM, GREEN, RED, RESET};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "dump" => cmd_dump(&args[2..]),
        "scrub" => cmd_scrub(&args[2..]),
        "-h" | "--help" | "help" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("{RED}Unknown command: {other}{RESET}");
            print_usage();
            process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("{RED}error:{RESET} {e}");
        process::exit(1);
    }
}

fn cmd_dump(args: &[String]) -> mecmr3::Result<()> {
    let Some(path) = args.first() else {
        eprintln!("usage: mecmr3-tool dump <in>");
        process::exit(1);
    };
    let bytes = fs::read(path)?;
    let mut out = String::new();
    mecmr3::parse_and_print(&bytes, &charset::Decoder, &mut out)?;
    print!("{out}");
    Ok(())
}

fn cmd_scrub(args: &[String]) -> mecmr3::Result<()> {
    let (Some(in_path), Some(out_path)) = (args.first(), args.get(1)) else {
        eprintln!("usage: mecmr3-tool scrub <in> <out>");
        process::exit(1);
    };
    if paths_match(in_path, out_path) {
        eprintln!("{RED}error:{RESET} refusing to scrub {in_path} onto itself");
        process::exit(1);
    }
    let input = fs::read(in_path)?;
    let output = mecmr3::scrub(&input)?;
    fs::write(out_path, output)?;
    Ok(())
}

/// Compares canonicalized paths where possible, falling back to a raw
/// string comparison for a path that doesn't exist yet.
fn paths_match(a: &str, b: &str) -> bool {
    match (Path::new(a).canonicalize(), Path::new(b).canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

fn print_usage() {
    eprintln!(
        r#"
{BOLD}mecmr3-tool{RESET} — TOSHIBA MEC MR3 container workbench

{DIM}Decode and PHI-scrub the vendor's acquisition metadata container{RESET}

{BOLD}USAGE:{RESET}
    mecmr3-tool <COMMAND> [ARGS]

{BOLD}COMMANDS:{RESET}
    {GREEN}dump{RESET}  <in>          Parse and print every item to stdout
    {GREEN}scrub{RESET} <in> <out>    Write a PHI-redacted copy of identical length

{BOLD}EXAMPLES:{RESET}
    mecmr3-tool dump study.mec
    mecmr3-tool scrub study.mec study.scrubbed.mec
"#
    );
}
