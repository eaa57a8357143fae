//! Build script for fibtracks.
//!
//! Copies `.env.example` from the crate root into the local data directory
//! (`<data_local_dir>/fibtracks/.env.example`) so a configuration template sits
//! next to the `.env` that `config::load_env` reads at runtime. A missing
//! template only produces a cargo warning.

use std::{env, fs, path::PathBuf};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=.env.example");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let template = manifest_dir.join(".env.example");

    if !template.is_file() {
        println!(
            "cargo:warning=.env.example not found at {}",
            template.display()
        );
        return Ok(());
    }

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("fibtracks");

    // Read-only home directories (CI sandboxes) should not fail the build
    if let Err(e) = fs::create_dir_all(&out_dir)
        .and_then(|_| fs::copy(&template, out_dir.join(".env.example")).map(|_| ()))
    {
        println!(
            "cargo:warning=could not install .env.example into {}: {}",
            out_dir.display(),
            e
        );
    }

    Ok(())
}
