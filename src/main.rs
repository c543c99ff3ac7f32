// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Galatea CLI entrypoint.
//!
//! Compiles a saved snapshot to Mermaid `graph TD` text, printing it to
//! stdout or writing it to a file with `--out`.

use std::error::Error;
use std::fs;
use std::path::PathBuf;

use galatea::format::mermaid;
use galatea::store;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} <snapshot.json> [--out <file.mmd>]\n\nReads a saved diagram snapshot and emits its Mermaid graph.\nWithout --out the text is printed to stdout."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    snapshot: Option<String>,
    out: Option<String>,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--out" => {
                if options.out.is_some() {
                    return Err(());
                }
                let path = args.next().ok_or(())?;
                options.out = Some(path);
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.snapshot.is_some() {
                    return Err(());
                }
                options.snapshot = Some(arg);
            }
        }
    }

    if options.snapshot.is_none() {
        return Err(());
    }

    Ok(options)
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "galatea".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        let snapshot_path = PathBuf::from(options.snapshot.ok_or("missing snapshot path")?);
        let model = store::load_snapshot(&snapshot_path)?;
        let text = mermaid::compile_diagram(&model);

        match options.out {
            Some(out) => fs::write(out, text + "\n")?,
            None => println!("{text}"),
        }

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("galatea: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_options, CliOptions};

    #[test]
    fn parse_options_requires_a_snapshot_path() {
        assert_eq!(parse_options(std::iter::empty()), Err(()));
    }

    #[test]
    fn parse_options_accepts_snapshot_and_out() {
        let options = parse_options(
            ["diagram.json", "--out", "diagram.mmd"]
                .into_iter()
                .map(str::to_owned),
        )
        .expect("parse options");
        assert_eq!(
            options,
            CliOptions {
                snapshot: Some("diagram.json".to_owned()),
                out: Some("diagram.mmd".to_owned()),
            }
        );
    }

    #[test]
    fn parse_options_rejects_unknown_flags_and_duplicates() {
        assert_eq!(
            parse_options(["--verbose", "a.json"].into_iter().map(str::to_owned)),
            Err(())
        );
        assert_eq!(
            parse_options(["a.json", "b.json"].into_iter().map(str::to_owned)),
            Err(())
        );
        assert_eq!(
            parse_options(
                ["a.json", "--out", "x", "--out", "y"]
                    .into_iter()
                    .map(str::to_owned)
            ),
            Err(())
        );
        assert_eq!(
            parse_options(["a.json", "--out"].into_iter().map(str::to_owned)),
            Err(())
        );
    }
}
