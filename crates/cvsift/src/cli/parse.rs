use std::path::Path;

use anyhow::Result;

use super::{build_parser, read_lines, Endpoints};
use cvsift_core::Settings;

pub fn run(file: &Path, settings: &Settings, endpoints: &Endpoints, pretty: bool) -> Result<()> {
    let lines = read_lines(file, settings)?;
    let parser = build_parser(settings, endpoints)?;

    let response = parser.parse_lines(&lines);
    if !response.metadata.is_success() {
        tracing::warn!("Parsing of {} did not complete", file.display());
    }

    let json = if pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    println!("{json}");

    Ok(())
}
