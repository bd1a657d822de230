use std::collections::BTreeSet;

/// Tags offered to users even before they've recorded anything.
pub const DEFAULT_TAGS: [&str; 6] = [
    "Sleep",
    "Self-Care",
    "Unproductive",
    "Transit",
    "Class (Blocked)",
    "Productive",
];

/// Default tags merged with the ones already in use, deduplicated and sorted.
pub fn resolve_tags<I, S>(observed_tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    DEFAULT_TAGS
        .iter()
        .map(|tag| tag.to_string())
        .chain(observed_tags.into_iter().map(Into::into))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{resolve_tags, DEFAULT_TAGS};

    #[test]
    fn test_defaults_only() {
        assert_eq!(
            resolve_tags(Vec::<String>::new()),
            vec![
                "Class (Blocked)",
                "Productive",
                "Self-Care",
                "Sleep",
                "Transit",
                "Unproductive"
            ]
        );
    }

    #[test]
    fn test_observed_tags_are_merged() {
        let tags = resolve_tags(["Gym", "Productive", "Gym", "chores"]);

        assert_eq!(tags.len(), DEFAULT_TAGS.len() + 2);
        assert_eq!(tags.first().map(String::as_str), Some("Class (Blocked)"));
        assert_eq!(tags.last().map(String::as_str), Some("chores"));
        assert!(tags.contains(&"Gym".to_string()));
        assert!(tags.windows(2).all(|w| w[0] < w[1]));
    }
}
