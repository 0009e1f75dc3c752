//! Keyword classifier: free-text tag matching and auto-tagging by product name.
//!
//! The tables in [`super::rules`] are compiled once into Aho-Corasick automata.
//! Both entry points lowercase their input first and never fail.

use std::sync::LazyLock;

use aho_corasick::AhoCorasick;
use common::{TagMatch, TagSet};

use super::rules::{
    AutoTagRule, MatchRule, Trigger, AUTO_TAG_RULES, FLOWER_TOPIC_KEYWORDS, OCCASION_MATCH_RULES,
    RECIPIENT_MATCH_RULES,
};
use super::vocabulary::{Occasion, Recipient};

/// Compiled substring matcher for one keyword list.
struct KeywordSet(AhoCorasick);

impl KeywordSet {
    fn new(keywords: &[&str]) -> Self {
        Self(AhoCorasick::new(keywords).expect("keyword tables are valid patterns"))
    }

    fn found_in(&self, text: &str) -> bool {
        self.0.is_match(text)
    }
}

enum CompiledTrigger {
    Any(KeywordSet),
    AllOf(Vec<KeywordSet>),
}

impl CompiledTrigger {
    fn new(trigger: &Trigger) -> Self {
        match trigger {
            Trigger::Any(words) => CompiledTrigger::Any(KeywordSet::new(words)),
            Trigger::AllOf(groups) => {
                CompiledTrigger::AllOf(groups.iter().map(|g| KeywordSet::new(g)).collect())
            }
        }
    }

    fn fires(&self, text: &str) -> bool {
        match self {
            CompiledTrigger::Any(set) => set.found_in(text),
            CompiledTrigger::AllOf(groups) => groups.iter().all(|g| g.found_in(text)),
        }
    }
}

struct CompiledAutoRule {
    rule: &'static AutoTagRule,
    triggers: Vec<CompiledTrigger>,
}

impl CompiledAutoRule {
    fn fires(&self, text: &str) -> bool {
        self.triggers.iter().any(|t| t.fires(text))
    }
}

static OCCASION_MATCHERS: LazyLock<Vec<(Occasion, KeywordSet)>> =
    LazyLock::new(|| compile_match_rules(OCCASION_MATCH_RULES));
static RECIPIENT_MATCHERS: LazyLock<Vec<(Recipient, KeywordSet)>> =
    LazyLock::new(|| compile_match_rules(RECIPIENT_MATCH_RULES));
static AUTO_TAG_MATCHERS: LazyLock<Vec<CompiledAutoRule>> = LazyLock::new(|| {
    AUTO_TAG_RULES
        .iter()
        .map(|rule| CompiledAutoRule {
            rule,
            triggers: rule.triggers.iter().map(CompiledTrigger::new).collect(),
        })
        .collect()
});
static FLOWER_TOPIC: LazyLock<KeywordSet> =
    LazyLock::new(|| KeywordSet::new(FLOWER_TOPIC_KEYWORDS));

fn compile_match_rules<T: Copy>(rules: &[MatchRule<T>]) -> Vec<(T, KeywordSet)> {
    rules
        .iter()
        .map(|r| (r.tag, KeywordSet::new(r.keywords)))
        .collect()
}

fn hits<T: Copy + PartialEq>(matchers: &[(T, KeywordSet)], text: &str) -> Vec<T> {
    let mut out = Vec::new();
    for (tag, set) in matchers {
        if set.found_in(text) && !out.contains(tag) {
            out.push(*tag);
        }
    }
    out
}

fn push_unique<T: Copy + PartialEq>(out: &mut Vec<T>, tags: &[T]) {
    for tag in tags {
        if !out.contains(tag) {
            out.push(*tag);
        }
    }
}

/// Tags mentioned by a chat message or search query.
///
/// Each tag is tested on its own, so a text can hit several tags per axis.
pub fn match_free_text(text: &str) -> TagMatch {
    let text = text.to_lowercase();
    TagMatch {
        occasion: hits(OCCASION_MATCHERS.as_slice(), &text)
            .into_iter()
            .map(|t| t.as_str().to_owned())
            .collect(),
        recipient: hits(RECIPIENT_MATCHERS.as_slice(), &text)
            .into_iter()
            .map(|t| t.as_str().to_owned())
            .collect(),
    }
}

/// Infer occasion and recipient tags from a product's display name.
///
/// Every firing rule contributes its tags. An empty occasion set becomes
/// `no_reason`, and `universal` is always present among recipients.
pub fn auto_tag_from_name(name: &str) -> TagSet {
    let text = name.to_lowercase();
    let mut occasion = Vec::new();
    let mut recipient = Vec::new();

    for compiled in AUTO_TAG_MATCHERS.iter().filter(|c| c.fires(&text)) {
        push_unique(&mut occasion, compiled.rule.occasion);
        push_unique(&mut recipient, compiled.rule.recipient);
    }

    if occasion.is_empty() {
        occasion.push(Occasion::NoReason);
    }
    push_unique(&mut recipient, &[Recipient::Universal]);

    TagSet {
        occasion_tags: occasion.iter().map(|t| t.as_str().to_owned()).collect(),
        recipient_tags: recipient.iter().map(|t| t.as_str().to_owned()).collect(),
    }
}

/// Names of the auto-tag rules that fire for `name`, in table order.
pub fn fired_rules(name: &str) -> Vec<&'static str> {
    let text = name.to_lowercase();
    AUTO_TAG_MATCHERS
        .iter()
        .filter(|c| c.fires(&text))
        .map(|c| c.rule.name)
        .collect()
}

/// Whether a chat message talks about flowers, bouquets or gifts.
pub fn is_flower_topic(text: &str) -> bool {
    FLOWER_TOPIC.found_in(&text.to_lowercase())
}
