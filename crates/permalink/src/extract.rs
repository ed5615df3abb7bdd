//! Parameter extraction from linkable objects

use crate::errors::MissingAttribute;
use crate::types::{Linkable, ParameterValueMap};

/// Read every parameter of a candidate off `object`.
///
/// Stops at the first absent attribute; no defaults are substituted.
pub fn extract<O, S>(object: &O, parameter_names: &[S]) -> Result<ParameterValueMap, MissingAttribute>
where
    O: Linkable + ?Sized,
    S: AsRef<str>,
{
    let mut values = ParameterValueMap::new();
    for name in parameter_names {
        let name = name.as_ref();
        let value = object.attribute(name).ok_or_else(|| MissingAttribute {
            name: name.to_string(),
        })?;
        values.insert(name.to_string(), value);
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Record;
    use std::cell::RefCell;

    /// Records which attributes were read, to check fail-fast ordering
    struct Tracked {
        reads: RefCell<Vec<String>>,
    }

    impl Linkable for Tracked {
        fn type_name(&self) -> &str {
            "Tracked"
        }

        fn attribute(&self, name: &str) -> Option<String> {
            self.reads.borrow_mut().push(name.to_string());
            (name != "missing").then(|| name.to_uppercase())
        }
    }

    #[test]
    fn test_extract_all_parameters() {
        let article = Record::new("Article").with("id", 1).with("slug", "example-article");
        let values = extract(&article, &["id", "slug"]).unwrap();

        assert_eq!(values.len(), 2);
        assert_eq!(values["id"], "1");
        assert_eq!(values["slug"], "example-article");
    }

    #[test]
    fn test_missing_attribute_is_reported() {
        let article = Record::new("Article").with("id", 1);
        let err = extract(&article, &["id", "category"]).unwrap_err();
        assert_eq!(err.name, "category");
    }

    #[test]
    fn test_stops_at_first_missing_attribute() {
        let tracked = Tracked {
            reads: RefCell::new(Vec::new()),
        };
        let err = extract(&tracked, &["a", "missing", "b"]).unwrap_err();

        assert_eq!(err.name, "missing");
        assert_eq!(*tracked.reads.borrow(), vec!["a", "missing"]);
    }

    #[test]
    fn test_no_parameters_yields_empty_map() {
        let article = Record::new("Article");
        let values = extract(&article, &[] as &[String]).unwrap();
        assert!(values.is_empty());
    }
}
