//! Maps contract revert messages and wallet errors to user-facing categories.

use std::fmt;

/// Why a craft transaction failed, as far as the message tells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CraftRevert {
    /// An input was short when a step ran.
    InsufficientInputBalance,
    /// A step named an item without a recipe.
    RecipeDoesNotExist,
    /// A step had a zero multiplier.
    ZeroTimes,
    /// A transfer or bridge exceeded the holder's balance.
    InsufficientBalance,
    /// The user declined to sign.
    UserRejected,
    /// The RPC or wallet connection failed.
    Network,
    /// Anything else.
    Unknown,
}

impl CraftRevert {
    /// Classifies a raw error message.
    ///
    /// Patterns are checked most specific first: "insufficient input
    /// balance" also contains "insufficient balance".
    #[must_use]
    pub fn classify(message: &str) -> Self {
        if message.contains("insufficient input balance") {
            Self::InsufficientInputBalance
        } else if message.contains("recipe does not exist") {
            Self::RecipeDoesNotExist
        } else if message.contains("times must be > 0") {
            Self::ZeroTimes
        } else if message.contains("insufficient balance") {
            Self::InsufficientBalance
        } else if message.contains("User rejected") || message.contains("user rejected") {
            Self::UserRejected
        } else if message.contains("network") {
            Self::Network
        } else {
            Self::Unknown
        }
    }

    /// Message to show the user.
    #[must_use]
    pub const fn user_message(self) -> &'static str {
        match self {
            Self::InsufficientInputBalance => "Not enough materials to craft this item!",
            Self::RecipeDoesNotExist => "Invalid recipe pattern",
            Self::ZeroTimes => "Invalid craft amount",
            Self::InsufficientBalance => "Insufficient balance",
            Self::UserRejected => "Transaction cancelled",
            Self::Network => "Network error - please try again",
            Self::Unknown => "Transaction failed - please try again",
        }
    }

    /// Returns true if resubmitting the same transaction may succeed.
    #[must_use]
    pub const fn is_retryable(self) -> bool {
        matches!(self, Self::UserRejected | Self::Network)
    }
}

impl fmt::Display for CraftRevert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.user_message())
    }
}
