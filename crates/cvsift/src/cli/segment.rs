use std::path::Path;

use anyhow::Result;

use super::read_lines;
use cvsift_core::{Segmenter, Settings};

pub fn run(file: &Path, settings: &Settings) -> Result<()> {
    let lines = read_lines(file, settings)?;
    let segments = Segmenter::new(&settings.headers).segment(&lines.join(" "));

    println!("{}", serde_json::to_string_pretty(&segments)?);
    Ok(())
}
