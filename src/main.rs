//! FAT12 file extractor
//!
//! Usage: fat12-extract <disk.img> <filename>
//!
//! Resolves the file in the image's root directory, reconstructs it
//! from its cluster chain and writes it to stdout: printable ASCII
//! bytes verbatim, everything else as `<xx>`. Each error kind maps to
//! a distinct exit status.

use std::env;
use std::fs::File;
use std::process::ExitCode;

use fat12_reader::{Fat12, FatError};

fn error_exit_code(err: FatError) -> u8 {
    match err {
        FatError::ImageRead => 2,
        FatError::Allocation => 3,
        FatError::InvalidBootSector => 4,
        FatError::FileNotFound => 5,
        FatError::TruncatedChain { .. } => 6,
    }
}

fn render(content: &[u8]) {
    for &byte in content {
        if (0x20..=0x7E).contains(&byte) {
            print!("{}", byte as char);
        } else {
            print!("<{:02x}>", byte);
        }
    }
    println!();
}

fn main() -> ExitCode {
    let mut args = env::args().skip(1);
    let (image_path, file_name) = match (args.next(), args.next()) {
        (Some(image), Some(name)) => (image, name),
        _ => {
            eprintln!("Usage: fat12-extract <disk.img> <filename>");
            return ExitCode::from(1);
        }
    };

    let image = match File::open(&image_path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("Failed to open disk image {}: {}", image_path, err);
            return ExitCode::from(2);
        }
    };

    let mut fs = match Fat12::open(image) {
        Ok(fs) => fs,
        Err(err) => {
            eprintln!("Failed to read boot sector: {}", err);
            return ExitCode::from(error_exit_code(err));
        }
    };

    match fs.extract(&file_name) {
        Ok(content) => {
            render(&content);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Could not read {}: {}", file_name, err);
            ExitCode::from(error_exit_code(err))
        }
    }
}
