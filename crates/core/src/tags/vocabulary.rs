//! Fixed occasion and recipient tag identifiers.

use std::fmt;

/// Why a bouquet is bought.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Occasion {
    Birthday,
    Wedding,
    Love,
    Congrats,
    NoReason,
}

impl Occasion {
    /// Every occasion, in display order.
    pub const ALL: [Occasion; 5] = [
        Occasion::Birthday,
        Occasion::Wedding,
        Occasion::Love,
        Occasion::Congrats,
        Occasion::NoReason,
    ];

    /// Stored identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            Occasion::Birthday => "birthday",
            Occasion::Wedding => "wedding",
            Occasion::Love => "love",
            Occasion::Congrats => "congrats",
            Occasion::NoReason => "no_reason",
        }
    }
}

/// Who a bouquet is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Recipient {
    Mom,
    Girl,
    Friend,
    Colleague,
    Universal,
}

impl Recipient {
    /// Every recipient, in display order.
    pub const ALL: [Recipient; 5] = [
        Recipient::Mom,
        Recipient::Girl,
        Recipient::Friend,
        Recipient::Colleague,
        Recipient::Universal,
    ];

    /// Stored identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            Recipient::Mom => "mom",
            Recipient::Girl => "girl",
            Recipient::Friend => "friend",
            Recipient::Colleague => "colleague",
            Recipient::Universal => "universal",
        }
    }
}

impl fmt::Display for Occasion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Recipient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
