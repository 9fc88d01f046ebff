/// Errors that can occur when creating validated score types.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum TypeError {
    /// A CSAT score was outside the single-digit range
    #[error("CSAT score must be a single digit (0-9), got {0}")]
    CsatOutOfRange(u8),
    /// A similarity was NaN or outside `[0, 1]`
    #[error("similarity must be within [0, 1], got {0}")]
    SimilarityOutOfRange(f64),
}

/// A customer satisfaction score as extracted from an analysis report.
///
/// Scores are nominally on a 1-5 scale, but extraction takes a single digit from free text,
/// so any value in `0..=9` is representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CsatScore(u8);

impl CsatScore {
    /// Highest score on the nominal scale.
    pub const SCALE_MAX: u8 = 5;

    /// Creates a new `CsatScore`.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::CsatOutOfRange` if `value` is greater than 9.
    pub fn new(value: u8) -> Result<Self, TypeError> {
        if value > 9 {
            return Err(TypeError::CsatOutOfRange(value));
        }
        Ok(Self(value))
    }

    /// Builds a score from a single ASCII decimal digit.
    pub fn from_digit(c: char) -> Option<Self> {
        c.to_digit(10).map(|d| Self(d as u8))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Display bucket for this score.
    pub fn band(self) -> CsatBand {
        CsatBand::from_score(self.0)
    }
}

impl std::fmt::Display for CsatScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl serde::Serialize for CsatScore {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(self.0)
    }
}

impl<'de> serde::Deserialize<'de> for CsatScore {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = u8::deserialize(deserializer)?;
        CsatScore::new(value).map_err(serde::de::Error::custom)
    }
}

/// Low/medium/high bucketing used for CSAT badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CsatBand {
    Low,
    Medium,
    High,
}

impl CsatBand {
    /// Buckets a raw score: `>= 4` is high, `>= 3` is medium, anything else is low.
    pub fn from_score(score: u8) -> Self {
        if score >= 4 {
            CsatBand::High
        } else if score >= 3 {
            CsatBand::Medium
        } else {
            CsatBand::Low
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            CsatBand::Low => "csat-low",
            CsatBand::Medium => "csat-medium",
            CsatBand::High => "csat-high",
        }
    }
}

/// Cosine similarity between a query and a search hit, within `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Similarity(f64);

impl Similarity {
    /// Creates a new `Similarity`, rejecting NaN and out-of-range values.
    pub fn new(value: f64) -> Result<Self, TypeError> {
        if value.is_nan() || !(0.0..=1.0).contains(&value) {
            return Err(TypeError::SimilarityOutOfRange(value));
        }
        Ok(Self(value))
    }

    /// Saturates `value` into `[0, 1]`. NaN maps to zero.
    pub fn clamped(value: f64) -> Self {
        if value.is_nan() {
            return Self(0.0);
        }
        Self(value.clamp(0.0, 1.0))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Similarity expressed as a percentage in `[0, 100]`.
    pub fn percent(self) -> f64 {
        self.0 * 100.0
    }
}

impl serde::Serialize for Similarity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_f64(self.0)
    }
}

impl<'de> serde::Deserialize<'de> for Similarity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = f64::deserialize(deserializer)?;
        Similarity::new(value).map_err(serde::de::Error::custom)
    }
}
