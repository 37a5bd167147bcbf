use anyhow::*;
use fs_extra::copy_items;
use fs_extra::dir::CopyOptions;
use std::env;
use std::path::PathBuf;

// Mirrors assets/ (the water texture) into OUT_DIR so packaged builds can
// ship it next to the binary.
fn main() -> Result<()> {
    println!("cargo:rerun-if-changed=assets");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let assets_src = manifest_dir.join("assets");
    if !assets_src.exists() {
        println!("cargo:warning=no assets/ directory, the sample will fail to load its texture");
        return Ok(());
    }

    let out_dir = env::var("OUT_DIR")?;
    let mut copy_options = CopyOptions::new();
    copy_options.overwrite = true;
    copy_items(&[assets_src], out_dir, &copy_options)?;

    Ok(())
}
