//! Category — the fixed set of topical digest channels.

use serde::{Deserialize, Serialize};

use crate::Error;

/// The topical channel a digest or subscription belongs to.
///
/// The set is closed: prompt templates, scheduled generation, and
/// subscription uniqueness are all keyed by it.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
  StockMarket,
  AiUpdates,
  Geopolitics,
  Startups,
}

impl Category {
  /// Every category, in the order scheduled generation visits them.
  pub const ALL: [Category; 4] = [
    Category::StockMarket,
    Category::AiUpdates,
    Category::Geopolitics,
    Category::Startups,
  ];

  /// The discriminant string used on the wire and in the database.
  /// Must match the `rename_all = "kebab-case"` serde tags above.
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::StockMarket => "stock-market",
      Self::AiUpdates => "ai-updates",
      Self::Geopolitics => "geopolitics",
      Self::Startups => "startups",
    }
  }
}

impl std::fmt::Display for Category {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

impl std::str::FromStr for Category {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "stock-market" => Ok(Self::StockMarket),
      "ai-updates" => Ok(Self::AiUpdates),
      "geopolitics" => Ok(Self::Geopolitics),
      "startups" => Ok(Self::Startups),
      other => Err(Error::UnknownCategory(other.to_owned())),
    }
  }
}
