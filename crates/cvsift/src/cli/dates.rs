use std::path::Path;

use anyhow::Result;
use chrono::Local;

use super::read_lines;
use cvsift_core::{DateExtractor, SegmentName, Segmenter, Settings};

pub fn run(file: &Path, settings: &Settings, segment: Option<SegmentName>) -> Result<()> {
    let lines = read_lines(file, settings)?;
    let full_text = lines.join(" ");
    let dates = DateExtractor::new(&settings.parser.present_keywords, Local::now().date_naive());

    let scope = match segment {
        Some(name) => Segmenter::new(&settings.headers)
            .segment(&full_text)
            .get(name)
            .to_string(),
        None => full_text,
    };

    for pair in dates.pairs_for_segment(&lines, &scope) {
        println!(
            "{}\t{} - {}\t{} months\t{}",
            pair.line(),
            pair.start_date,
            pair.end_date,
            pair.month_delta(),
            lines[pair.line()]
        );
    }

    Ok(())
}
