//! Canonical tag-string representation of a bookmark's tag set.
//!
//! Domain services consume tag sets as a single comma-delimited string. The
//! API accepts tag names as a JSON list and converts with [`build_tag_string`];
//! services turn the string back into names with [`parse_tag_string`].

/// Joins tag names into the canonical comma-delimited tag string.
pub fn build_tag_string(tag_names: &[String]) -> String {
    tag_names.join(",")
}

/// Splits a tag string into cleaned, unique tag names.
///
/// Names are separated by commas or whitespace. Surrounding whitespace is
/// trimmed, empty segments are dropped, and duplicates are removed
/// case-insensitively, keeping the first occurrence's casing and order.
pub fn parse_tag_string(tag_string: &str) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    let mut names: Vec<String> = Vec::new();

    for raw in tag_string.split(|c: char| c == ',' || c.is_whitespace()) {
        let name = raw.trim();
        if name.is_empty() {
            continue;
        }

        let lowered = name.to_lowercase();
        if seen.contains(&lowered) {
            continue;
        }

        seen.push(lowered);
        names.push(name.to_string());
    }

    names
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_build_joins_with_commas() {
        assert_eq!(
            build_tag_string(&strings(&["rust", "web", "tools"])),
            "rust,web,tools"
        );
    }

    #[test]
    fn test_build_empty_list() {
        assert_eq!(build_tag_string(&[]), "");
    }

    #[test]
    fn test_parse_comma_separated() {
        assert_eq!(
            parse_tag_string("rust,web,tools"),
            strings(&["rust", "web", "tools"])
        );
    }

    #[test]
    fn test_parse_whitespace_separated() {
        assert_eq!(parse_tag_string("rust web"), strings(&["rust", "web"]));
    }

    #[test]
    fn test_parse_trims_and_drops_empty_segments() {
        assert_eq!(
            parse_tag_string(" rust , ,web,, "),
            strings(&["rust", "web"])
        );
    }

    #[test]
    fn test_parse_empty_string() {
        assert!(parse_tag_string("").is_empty());
    }

    #[test]
    fn test_parse_dedupes_case_insensitively_keeping_first() {
        assert_eq!(
            parse_tag_string("Rust,rust,RUST,web"),
            strings(&["Rust", "web"])
        );
    }

    #[test]
    fn test_roundtrip_preserves_names() {
        let names = strings(&["rust", "web-dev", "self.hosted"]);
        assert_eq!(parse_tag_string(&build_tag_string(&names)), names);
    }
}
