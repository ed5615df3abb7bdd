//! Route name derivation

use crate::types::{Linkable, RouteName};

/// Suffix appended to the lowercased type name
pub const PERMALINK_SUFFIX: &str = "_permalink";

/// Conventional route name for a type: `Article` -> `article_permalink`
pub fn default_route_name(type_name: &str) -> RouteName {
    RouteName::new(format!("{}{}", type_name.to_lowercase(), PERMALINK_SUFFIX))
}

/// Pick the route name to query for `object`.
///
/// A non-empty override is returned unchanged; an empty one counts as absent.
pub fn resolve_name<O: Linkable + ?Sized>(object: &O, route_override: Option<&str>) -> RouteName {
    match route_override {
        Some(name) if !name.is_empty() => RouteName::new(name),
        _ => default_route_name(object.type_name()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Record;
    use proptest::prelude::*;

    #[test]
    fn test_default_naming() {
        let article = Record::new("Article");
        assert_eq!(resolve_name(&article, None).as_str(), "article_permalink");
    }

    #[test]
    fn test_mixed_case_type_is_lowercased() {
        let post = Record::new("BlogPost");
        assert_eq!(resolve_name(&post, None).as_str(), "blogpost_permalink");
    }

    #[test]
    fn test_override_is_returned_unchanged() {
        let article = Record::new("Article");
        assert_eq!(
            resolve_name(&article, Some("Archive_Entry")).as_str(),
            "Archive_Entry"
        );
    }

    #[test]
    fn test_empty_override_falls_back_to_type() {
        let article = Record::new("Article");
        assert_eq!(resolve_name(&article, Some("")).as_str(), "article_permalink");
    }

    proptest! {
        #[test]
        fn prop_override_always_wins(type_name in "[A-Za-z]{1,12}", route in "[a-z_]{1,24}") {
            let object = Record::new(type_name);
            let name = resolve_name(&object, Some(route.as_str()));
            prop_assert_eq!(name.as_str(), route.as_str());
        }

        #[test]
        fn prop_default_name_has_suffix(type_name in "[A-Za-z]{1,12}") {
            let object = Record::new(type_name.clone());
            let name = resolve_name(&object, None);
            prop_assert!(name.as_str().ends_with(PERMALINK_SUFFIX));
            prop_assert_eq!(
                name.as_str().trim_end_matches(PERMALINK_SUFFIX),
                type_name.to_lowercase()
            );
        }
    }
}
