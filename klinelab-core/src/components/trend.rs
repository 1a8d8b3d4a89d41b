//! Moving-average alignment classifier.
//!
//! Reads the short, medium, and long averages of a bar and reports whether
//! they are stacked bullishly, bearishly, or crossed over each other.

use crate::domain::IndicatorSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Alignment of ma5 / ma10 / ma20.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaTrend {
    /// ma5 > ma10 > ma20.
    Long,
    /// ma5 < ma10 < ma20.
    Short,
    /// Mixed ordering, ties, or any average unset.
    Tangled,
}

impl MaTrend {
    pub fn classify(values: &IndicatorSet) -> Self {
        let (Some(ma5), Some(ma10), Some(ma20)) = (values.ma5, values.ma10, values.ma20) else {
            return MaTrend::Tangled;
        };
        if ma5 > ma10 && ma10 > ma20 {
            MaTrend::Long
        } else if ma5 < ma10 && ma10 < ma20 {
            MaTrend::Short
        } else {
            MaTrend::Tangled
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MaTrend::Long => "long",
            MaTrend::Short => "short",
            MaTrend::Tangled => "tangled",
        }
    }
}

impl fmt::Display for MaTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
