//! Display text derived from API identifiers.
//!
//! Listing records carry machine names (`research-advance`, experiment
//! number `7`, curator names). Teasers need them as human-readable labels:
//! - `research-advance` → "Research advance" (dashes become spaces, first letter upper-cased)
//! - experiment `7` → "Experiment: 007" (zero-padded to three digits)
//! - curator "Jane Doe" + et al → "Curated by Jane Doe et al."

/// Humanize a content type discriminator.
///
/// - `"research-article"` → `"Research article"`
/// - `"tools-resources"` → `"Tools resources"`
/// - `"insight"` → `"Insight"`
/// - `""` → `""`
pub fn humanize_type(discriminator: &str) -> String {
    let spaced = discriminator.replace('-', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Left-pad `value` with zeros to at least `width` characters.
///
/// Longer values are returned unchanged.
pub fn zero_pad(value: &str, width: usize) -> String {
    format!("{value:0>width$}")
}

/// Footer label for a labs experiment.
pub fn experiment_label(number: &str) -> String {
    format!("Experiment: {}", zero_pad(number, 3))
}

/// Byline for a curated collection.
pub fn curated_by(curator: &str, et_al: bool) -> String {
    let mut byline = format!("Curated by {curator}");
    if et_al {
        byline.push_str(" et al");
    }
    byline.push('.');
    byline
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn humanize_multi_word_type() {
        assert_eq!(humanize_type("research-article"), "Research article");
        assert_eq!(humanize_type("replication-study"), "Replication study");
    }

    #[test]
    fn humanize_single_word_type() {
        assert_eq!(humanize_type("insight"), "Insight");
    }

    #[test]
    fn humanize_empty() {
        assert_eq!(humanize_type(""), "");
    }

    #[test]
    fn pad_single_digit() {
        assert_eq!(zero_pad("7", 3), "007");
    }

    #[test]
    fn pad_exact_width() {
        assert_eq!(zero_pad("123", 3), "123");
    }

    #[test]
    fn pad_leaves_longer_values() {
        assert_eq!(zero_pad("1234", 3), "1234");
    }

    #[test]
    fn experiment_label_pads_number() {
        assert_eq!(experiment_label("7"), "Experiment: 007");
        assert_eq!(experiment_label("42"), "Experiment: 042");
    }

    #[test]
    fn curated_by_single_curator() {
        assert_eq!(curated_by("Prabhat Jha", false), "Curated by Prabhat Jha.");
    }

    #[test]
    fn curated_by_et_al() {
        assert_eq!(curated_by("Prabhat Jha", true), "Curated by Prabhat Jha et al.");
    }
}
