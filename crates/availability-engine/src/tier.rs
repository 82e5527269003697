//! Availability tiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How likely a player (or team) is to turn up.
///
/// The discriminants are the tier's rank; `Ord` follows them, so
/// `No < Maybe < Yes` and `max()` picks the most available tier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum Tier {
    #[default]
    No = 1,
    Maybe = 2,
    Yes = 3,
}

impl Tier {
    /// All tiers, lowest rank first.
    pub const ALL: [Tier; 3] = [Tier::No, Tier::Maybe, Tier::Yes];

    /// Numeric rank (1 = No, 3 = Yes).
    pub fn rank(self) -> u8 {
        self as u8
    }

    /// Parse the exact token used in input files (`Yes`, `Maybe`, `No`).
    pub fn from_token(token: &str) -> Option<Tier> {
        match token {
            "Yes" => Some(Tier::Yes),
            "Maybe" => Some(Tier::Maybe),
            "No" => Some(Tier::No),
            _ => None,
        }
    }

    /// True for `Maybe` and `Yes`.
    pub fn is_available(self) -> bool {
        self > Tier::No
    }

    pub(crate) fn index(self) -> usize {
        usize::from(self.rank() - 1)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            Tier::No => "No",
            Tier::Maybe => "Maybe",
            Tier::Yes => "Yes",
        };
        f.write_str(token)
    }
}
