use std::ops::RangeInclusive;

/// Line indices within `radius` of `anchor`, clamped to `[0, len - 1]`.
/// The anchor itself is included; callers skip it where needed.
#[must_use]
pub fn window_bounds(anchor: usize, radius: usize, len: usize) -> RangeInclusive<usize> {
    let last = len.saturating_sub(1);
    anchor.saturating_sub(radius).min(last)..=anchor.saturating_add(radius).min(last)
}

/// Top classifier label and score of each candidate line around one date pair.
///
/// Lines keep first-insertion order; scoring the same text twice overwrites
/// its label and score without moving it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WindowScores {
    entries: Vec<(String, String, f64)>,
}

impl WindowScores {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, line: impl Into<String>, label: impl Into<String>, score: f64) {
        let line = line.into();
        let label = label.into();
        match self.entries.iter_mut().find(|(text, _, _)| *text == line) {
            Some(entry) => {
                entry.1 = label;
                entry.2 = score;
            }
            None => self.entries.push((line, label, score)),
        }
    }

    /// Highest scoring line whose label is one of `labels`; the earliest line
    /// wins a tie. Empty when no line carries such a label.
    #[must_use]
    pub fn best_for(&self, labels: &[String]) -> String {
        let mut best: Option<(&str, f64)> = None;
        for (line, label, score) in &self.entries {
            if !labels.contains(label) {
                continue;
            }
            if best.map_or(true, |(_, best_score)| *score > best_score) {
                best = Some((line, *score));
            }
        }
        best.map(|(line, _)| line.to_string()).unwrap_or_default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
