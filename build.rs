//! Build script: prepares the embedded debug-panel dist directory for the `gui` feature.

use std::path::Path;

fn main() -> std::io::Result<()> {
    // Only needed when the gui feature is enabled.
    if std::env::var("CARGO_FEATURE_GUI").is_err() {
        return Ok(());
    }

    // Ensure the scrollscene-ui dist directory exists so rust-embed
    // compiles before `cargo xtask build-ui` has been run. A placeholder
    // index.html is written when the real build output is absent.
    let dist = Path::new("crates/scrollscene-ui/dist");
    std::fs::create_dir_all(dist)?;

    let index = dist.join("index.html");
    if !index.exists() {
        std::fs::write(
            &index,
            "<!DOCTYPE html><html><body style=\"color:#eee;background:#1a1a1a\">\
             panel not built: run <code>cargo xtask build-ui</code></body></html>",
        )?;
    }

    // Re-run when the dist contents change (after trunk build).
    println!("cargo:rerun-if-changed=crates/scrollscene-ui/dist");
    Ok(())
}
