//! Collision-free identifier allocation for generated code.

use rustc_hash::FxHashSet;

/// Allocates variable names within one compilation unit.
///
/// Names derive from the kind's short name stripped of non-alphanumeric
/// characters and lowercased; a numeric suffix is appended only when the
/// base name is already taken, so the common case reads cleanly.
#[derive(Debug, Default)]
pub(crate) struct NameAllocator {
    used: FxHashSet<String>,
}

impl NameAllocator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn allocate(&mut self, short_name: &str) -> String {
        let mut base: String = short_name
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        if base.is_empty() || base.starts_with(|c: char| c.is_ascii_digit()) {
            base.insert_str(0, "node");
        }

        if self.used.insert(base.clone()) {
            return base;
        }
        let mut index = 0usize;
        loop {
            let candidate = format!("{base}{index}");
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
            index += 1;
        }
    }
}

/// Derive the generated type name from a graph's display name.
pub(crate) fn type_name_for(graph_name: &str) -> String {
    let cleaned: String = graph_name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();
    if cleaned.is_empty() || cleaned.starts_with(|c: char| c.is_ascii_digit()) {
        format!("Flow{cleaned}")
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_stripped_and_lowercased() {
        let mut names = NameAllocator::new();
        assert_eq!(names.allocate("IfNode"), "ifnode");
        assert_eq!(names.allocate("SwitchNode<demo::Weather>"), "switchnodedemoweather");
    }

    #[test]
    fn collisions_get_numeric_suffixes() {
        let mut names = NameAllocator::new();
        assert_eq!(names.allocate("IfNode"), "ifnode");
        assert_eq!(names.allocate("IfNode"), "ifnode0");
        assert_eq!(names.allocate("IfNode"), "ifnode1");
    }

    #[test]
    fn degenerate_names_stay_valid_identifiers() {
        let mut names = NameAllocator::new();
        assert_eq!(names.allocate("!!!"), "node");
        assert_eq!(names.allocate("3D"), "node3d");
    }

    #[test]
    fn type_names_drop_spaces_and_punctuation() {
        assert_eq!(type_name_for("Quest Intro"), "QuestIntro");
        assert_eq!(type_name_for("2nd act"), "Flow2ndact");
        assert_eq!(type_name_for("---"), "Flow");
    }
}
