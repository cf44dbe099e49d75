use std::fs;
use std::path::Path;

fn main() {
    // The embedded directory must exist even before the frontend bundle has
    // been built, so the include_dir! macro always has something to embed.
    let out_dir = Path::new("static/dist");
    let dist_dir = Path::new("../frontend/dist");

    let _ = fs::remove_dir_all(out_dir);
    fs::create_dir_all(out_dir).unwrap();

    if dist_dir.exists() {
        fs_extra::dir::copy(
            dist_dir,
            "static",
            &fs_extra::dir::CopyOptions::new().overwrite(true),
        )
        .unwrap();
    }
    println!("cargo:rerun-if-changed=../frontend/dist");
}
