//! Tag-based group matching.

use tracing::debug;

use super::types::{Group, SearchTags};

/// True when every search tag is present on the group with the same value.
///
/// Extra tags on the group are allowed, so an empty search set matches
/// every group.
pub fn matches(group: &Group, search: &SearchTags) -> bool {
    for (key, wanted) in search.iter() {
        match group.tag_value(key) {
            Some(actual) if actual == wanted => {}
            _ => return false,
        }
    }
    true
}

/// Filter groups by search tags, preserving the provider's listing order.
pub fn match_groups<'a>(groups: &'a [Group], search: &SearchTags) -> Vec<&'a Group> {
    let matched: Vec<&Group> = groups.iter().filter(|g| matches(g, search)).collect();

    debug!(
        "{} of {} groups match {}",
        matched.len(),
        groups.len(),
        search
    );

    matched
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(name: &str, tags: &[(&str, &str)]) -> Group {
        Group {
            name: name.to_string(),
            tags: tags
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            ..Default::default()
        }
    }

    fn search(pairs: &[&str]) -> SearchTags {
        SearchTags::from_pairs(pairs).unwrap()
    }

    #[test]
    fn test_superset_tags_match() {
        let g = group("web", &[("env", "prod"), ("tier", "web")]);
        assert!(matches(&g, &search(&["env=prod"])));
        assert!(matches(&g, &search(&["env=prod", "tier=web"])));
    }

    #[test]
    fn test_mismatched_value_excluded() {
        let g = group("stg", &[("env", "staging")]);
        assert!(!matches(&g, &search(&["env=prod"])));
    }

    #[test]
    fn test_missing_key_excluded() {
        let g = group("web", &[("env", "prod")]);
        assert!(!matches(&g, &search(&["env=prod", "team=payments"])));
    }

    #[test]
    fn test_value_is_not_prefix_matched() {
        let g = group("web", &[("env", "production")]);
        assert!(!matches(&g, &search(&["env=prod"])));
    }

    #[test]
    fn test_empty_search_matches_everything() {
        let groups = vec![
            group("a", &[("env", "prod")]),
            group("b", &[]),
            group("c", &[("team", "core")]),
        ];
        let matched = match_groups(&groups, &SearchTags::new());
        assert_eq!(matched.len(), 3);
    }

    #[test]
    fn test_untagged_group_excluded_by_nonempty_search() {
        let g = group("bare", &[]);
        assert!(!matches(&g, &search(&["env=prod"])));
    }

    #[test]
    fn test_match_groups_preserves_order_and_is_idempotent() {
        let groups = vec![
            group("z-web", &[("env", "prod")]),
            group("a-stg", &[("env", "staging")]),
            group("m-api", &[("env", "prod"), ("tier", "api")]),
        ];
        let tags = search(&["env=prod"]);

        let first: Vec<&str> = match_groups(&groups, &tags)
            .iter()
            .map(|g| g.name.as_str())
            .collect();
        let second: Vec<&str> = match_groups(&groups, &tags)
            .iter()
            .map(|g| g.name.as_str())
            .collect();

        assert_eq!(first, vec!["z-web", "m-api"]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_no_groups() {
        assert!(match_groups(&[], &search(&["env=prod"])).is_empty());
    }
}
