//! Declarative keyword tables behind the tag classifier.
//!
//! Every keyword is lowercase and matched as a substring of lowercased text.
//! Rules only ever add tags, so their order affects output order and nothing
//! else. Keywords cover Kazakh, Russian and English spellings.

use super::vocabulary::{Occasion, Recipient};

/// One tag and the keywords that select it in a free-text query.
#[derive(Debug)]
pub struct MatchRule<T: 'static> {
    pub tag: T,
    pub keywords: &'static [&'static str],
}

/// Condition under which an [`AutoTagRule`] fires.
#[derive(Debug)]
pub enum Trigger {
    /// Any one keyword is present.
    Any(&'static [&'static str]),
    /// Every group has at least one keyword present.
    AllOf(&'static [&'static [&'static str]]),
}

/// Tags inferred from a product name when any trigger fires.
#[derive(Debug)]
pub struct AutoTagRule {
    pub name: &'static str,
    pub triggers: &'static [Trigger],
    pub occasion: &'static [Occasion],
    pub recipient: &'static [Recipient],
}

pub const OCCASION_MATCH_RULES: &[MatchRule<Occasion>] = &[
    MatchRule {
        tag: Occasion::Birthday,
        keywords: &["birthday", "туған", "день рождения", "мереке", "шар"],
    },
    MatchRule {
        tag: Occasion::Wedding,
        keywords: &["wedding", "үйлен", "неке", "свад"],
    },
    MatchRule {
        tag: Occasion::Love,
        keywords: &["love", "махаббат", "роман"],
    },
    MatchRule {
        tag: Occasion::Congrats,
        keywords: &["құттық", "congrat", "құттықтау"],
    },
];

pub const RECIPIENT_MATCH_RULES: &[MatchRule<Recipient>] = &[
    MatchRule {
        tag: Recipient::Mom,
        keywords: &["мама", "ана", "mom"],
    },
    MatchRule {
        tag: Recipient::Girl,
        keywords: &["қыз", "girl", "қалыңдық"],
    },
    MatchRule {
        tag: Recipient::Friend,
        keywords: &["дос", "friend"],
    },
    MatchRule {
        tag: Recipient::Colleague,
        keywords: &["әріптес", "colleague"],
    },
];

pub const AUTO_TAG_RULES: &[AutoTagRule] = &[
    AutoTagRule {
        name: "celebration",
        triggers: &[Trigger::Any(&["туған", "birthday", "мереке", "шар"])],
        occasion: &[Occasion::Birthday, Occasion::Congrats],
        recipient: &[],
    },
    AutoTagRule {
        name: "romantic-flowers",
        triggers: &[Trigger::Any(&[
            "махаббат",
            "роман",
            "раушан",
            "пион",
            "қызғалдақ",
            "rose",
            "peony",
            "tulip",
        ])],
        occasion: &[Occasion::Love],
        recipient: &[Recipient::Girl],
    },
    AutoTagRule {
        name: "wedding",
        triggers: &[
            Trigger::Any(&["үйлен", "неке", "свад", "wedding"]),
            Trigger::AllOf(&[&["ақ", "white"], &["раушан", "пион", "rose", "peony"]]),
        ],
        occasion: &[Occasion::Wedding],
        recipient: &[],
    },
    AutoTagRule {
        name: "congratulation",
        triggers: &[Trigger::Any(&["құттық", "congrat", "сыйлық", "ақша", "шар"])],
        occasion: &[Occasion::Congrats],
        recipient: &[],
    },
    AutoTagRule {
        name: "money-bouquet",
        triggers: &[Trigger::Any(&["ақша"])],
        occasion: &[],
        recipient: &[Recipient::Colleague],
    },
    AutoTagRule {
        name: "sweets-and-fruit",
        triggers: &[Trigger::Any(&["тәтті", "жеміс"])],
        occasion: &[],
        recipient: &[Recipient::Friend],
    },
    AutoTagRule {
        name: "classic-flowers",
        triggers: &[Trigger::Any(&[
            "лилия",
            "гортензия",
            "хризантема",
            "lily",
            "hydrangea",
            "chrysanthemum",
        ])],
        occasion: &[],
        recipient: &[Recipient::Mom],
    },
    AutoTagRule {
        name: "teddy-bear",
        triggers: &[Trigger::Any(&["аю"])],
        occasion: &[],
        recipient: &[Recipient::Girl],
    },
];

/// Vocabulary that marks a chat message as being about flowers or gifts.
pub const FLOWER_TOPIC_KEYWORDS: &[&str] = &[
    "гүл",
    "гуль",
    "цвет",
    "букет",
    "раушан",
    "роз",
    "роза",
    "тюльпан",
    "қызғалдақ",
    "пион",
    "лилия",
    "гортенз",
    "хризантем",
    "орхид",
    "кактус",
    "шар",
    "bouquet",
    "flower",
    "rose",
    "tulip",
    "peony",
    "lily",
    "hydrangea",
    "chrysanthem",
    "succulent",
    "gift",
    "сыйлық",
];
