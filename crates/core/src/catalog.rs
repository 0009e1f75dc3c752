//! Catalog search filters for the document store.

use common::TagInput;
use serde_json::{json, Map, Value};

use crate::text::{dedupe_tags, escape_regex, normalize_tag_list};

/// Build a product filter from a search box query and tag selections.
///
/// The query becomes a case-insensitive literal name pattern; tag selections
/// become `$in` membership clauses. Blank inputs add no clause, so all-blank
/// input yields `{}` (match everything).
pub fn build_search_filter(
    query: Option<&str>,
    occasion: Option<&TagInput>,
    recipient: Option<&TagInput>,
) -> Value {
    let mut filter = Map::new();

    if let Some(q) = query.map(str::trim).filter(|q| !q.is_empty()) {
        filter.insert(
            "name".into(),
            json!({ "$regex": escape_regex(q), "$options": "i" }),
        );
    }

    for (field, input) in [("occasionTags", occasion), ("recipientTags", recipient)] {
        let tags = dedupe_tags(&normalize_tag_list(input));
        if !tags.is_empty() {
            filter.insert(field.into(), json!({ "$in": tags }));
        }
    }

    Value::Object(filter)
}
