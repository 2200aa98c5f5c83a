// Shared build script helper: prepares each crate's README.md for embedding
// as rustdoc. Include from a crate build.rs with:
//   include!("../build_common.rs");
//
// Required imports in the including file:
//   use std::env;
//   use std::fs;
//   use std::path::Path;

/// Process a crate's README.md so its links resolve under rustdoc.
///
/// Strips the `src/` prefix and `.rs` extension from relative links so they
/// point at modules instead of source files, then writes the result to
/// `$OUT_DIR/README_GENERATED.md` for `#![doc = include_str!(...)]`.
fn process_readme_for_rustdoc(crate_dir: &str) {
    println!("cargo:rerun-if-changed=README.md");

    let readme_path = Path::new(crate_dir).join("README.md");
    let Ok(content) = fs::read_to_string(&readme_path) else {
        return; // No README, nothing to process
    };

    let rustdoc_content = content.replace("](src/", "](").replace(".rs)", ")");

    let out_dir = env::var("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("README_GENERATED.md");
    fs::write(dest_path, rustdoc_content).unwrap();
}
