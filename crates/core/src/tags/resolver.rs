//! Merge administrator-supplied tags with tags inferred from the product name.

use common::{TagInput, TagSet};

use super::classifier::auto_tag_from_name;
use crate::text::{dedupe_tags, normalize_tag_list};

/// Final tags for a product being created or updated.
///
/// Each axis is decided on its own: a non-empty explicit list is used as
/// given (deduplicated), an empty or absent one falls back to
/// [`auto_tag_from_name`].
pub fn resolve_product_tags(
    explicit_occasion: Option<&TagInput>,
    explicit_recipient: Option<&TagInput>,
    name: &str,
) -> TagSet {
    let occasion = normalize_tag_list(explicit_occasion);
    let recipient = normalize_tag_list(explicit_recipient);

    if !occasion.is_empty() && !recipient.is_empty() {
        return TagSet {
            occasion_tags: dedupe_tags(&occasion),
            recipient_tags: dedupe_tags(&recipient),
        };
    }

    let auto = auto_tag_from_name(name);
    TagSet {
        occasion_tags: if occasion.is_empty() {
            auto.occasion_tags
        } else {
            dedupe_tags(&occasion)
        },
        recipient_tags: if recipient.is_empty() {
            auto.recipient_tags
        } else {
            dedupe_tags(&recipient)
        },
    }
}
