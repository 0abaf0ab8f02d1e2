use crate::response::SkillsData;

/// Known skills mentioned anywhere in `text`, in list order. Matching is a
/// case-insensitive substring test; skills not longer than `min_len` are
/// ignored.
#[must_use]
pub fn parse_skills(text: &str, known: &[String], min_len: usize) -> SkillsData {
    let haystack = text.to_lowercase();
    let mut skills: Vec<String> = Vec::new();

    for skill in known {
        if skill.chars().count() <= min_len {
            continue;
        }
        if haystack.contains(&skill.to_lowercase()) && !skills.contains(skill) {
            skills.push(skill.clone());
        }
    }

    SkillsData { skills }
}
