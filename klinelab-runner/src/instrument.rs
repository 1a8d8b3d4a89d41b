//! Security code normalization for mainland A-share and Hong Kong listings.
//!
//! Accepts what a user would type (`600519`, `0700.HK`, `00700hk`, `sz000001`)
//! and produces the exchange-prefixed or `hk`-suffixed code data sources expect.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Listing market of a normalized code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Market {
    /// Shanghai, Shenzhen, or Beijing A-shares.
    #[serde(rename = "A")]
    A,
    /// Hong Kong.
    #[serde(rename = "HK")]
    Hk,
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Market::A => f.write_str("A"),
            Market::Hk => f.write_str("HK"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedCode {
    pub code: String,
    pub market: Market,
}

/// Normalize a user-entered security code.
///
/// - `.hk` anywhere or a trailing `hk` → strip it, re-append `hk`, market HK
/// - 5–6 digits starting with `6` → `sh` prefix; `0`/`3` → `sz`; `4`/`8` → `bj`
/// - any other 5-digit code → `hk` suffix, market HK
/// - anything else is returned trimmed and lowercased, market A
pub fn normalize_code(code: &str) -> NormalizedCode {
    let clean = code.trim().to_lowercase();

    if clean.contains(".hk") || clean.ends_with("hk") {
        let bare = clean.replace(".hk", "").replace("hk", "");
        return NormalizedCode {
            code: format!("{bare}hk"),
            market: Market::Hk,
        };
    }

    let is_numeric = (5..=6).contains(&clean.len()) && clean.bytes().all(|b| b.is_ascii_digit());
    if is_numeric {
        let prefix = match clean.as_bytes()[0] {
            b'6' => Some("sh"),
            b'0' | b'3' => Some("sz"),
            b'4' | b'8' => Some("bj"),
            _ => None,
        };
        if let Some(prefix) = prefix {
            return NormalizedCode {
                code: format!("{prefix}{clean}"),
                market: Market::A,
            };
        }
        if clean.len() == 5 {
            return NormalizedCode {
                code: format!("{clean}hk"),
                market: Market::Hk,
            };
        }
    }

    NormalizedCode {
        code: clean,
        market: Market::A,
    }
}
