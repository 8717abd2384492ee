// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

// CLI entrypoint for the forgevm disk-image packer.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Parser;

use forgevm::diskimage::DiskImage;

#[derive(Parser, Debug)]
#[command(
    name = "forgevm-mkdisk",
    version = forgevm::assembler::VERSION,
    about = "Pack binary files into a forgevm disk image"
)]
struct Cli {
    #[arg(value_name = "IMAGE", help = "Output disk image file")]
    image: PathBuf,
    #[arg(value_name = "FILES", help = "Binary files to pack")]
    files: Vec<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    if let Err(msg) = run(&cli) {
        eprintln!("{msg}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let mut image = DiskImage::new();

    for path in &cli.files {
        if !path.is_file() {
            eprintln!("File not found: {}", path.display());
            continue;
        }
        let contents =
            fs::read(path).map_err(|err| format!("Error reading {}: {err}", path.display()))?;
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .ok_or_else(|| format!("Invalid file name: {}", path.display()))?;
        image
            .add_file(&name, &contents)
            .map_err(|err| err.to_string())?;
    }

    let out = File::create(&cli.image)
        .map_err(|err| format!("Error creating {}: {err}", cli.image.display()))?;
    image
        .write(BufWriter::new(out))
        .map_err(|err| format!("Error writing {}: {err}", cli.image.display()))?;

    println!(
        "Created {} with {} files.",
        cli.image.display(),
        image.num_entries()
    );
    Ok(())
}
