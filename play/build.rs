use std::{env, error::Error, fs, path::PathBuf};

fn main() -> Result<(), Box<dyn Error>> {
    let build_date = chrono::Local::now().format("%Y-%m-%d");
    let profile = env::var("PROFILE")?;
    let data = format!(
        "pub const BUILD_DATE: &str = \"{}\";\npub const PROFILE: &str = \"{}\";\n",
        build_date, profile,
    );

    let out_dir = PathBuf::from(env::var("OUT_DIR")?);
    fs::write(out_dir.join("built.rs"), data)?;
    Ok(())
}
