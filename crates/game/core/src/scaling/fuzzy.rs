//! Two-tier fuzzy conditions.

/// Requirement expressed as a minimum and an optional ideal value.
///
/// Below `minimum` the requirement fails outright. With no `ideal`, meeting
/// the minimum is full credit; otherwise credit rises linearly to 1 at
/// `ideal`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tier<T> {
    pub minimum: T,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ideal: Option<T>,
}

impl<T> Tier<T> {
    pub const fn single(minimum: T) -> Self {
        Self {
            minimum,
            ideal: None,
        }
    }

    pub const fn two(minimum: T, ideal: T) -> Self {
        Self {
            minimum,
            ideal: Some(ideal),
        }
    }
}

impl<T: Copy + Into<f64>> Tier<T> {
    /// Fuzzy credit for an observed value.
    pub fn score(&self, observed: f64) -> ConditionStatus {
        fuzzy_score(observed, self.minimum.into(), self.ideal.map(Into::into))
    }
}

/// Result of evaluating one or more conditions.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConditionStatus {
    /// A hard minimum was not reached, or the combined credit is 0.
    Unmet,
    /// Every minimum was reached; the score in `(0, 1]` is the partial
    /// credit toward the ideal tier.
    Met(f64),
}

impl ConditionStatus {
    /// Full credit, the identity for [`ConditionStatus::and`].
    pub const FULL: Self = Self::Met(1.0);

    pub const fn is_met(&self) -> bool {
        matches!(self, Self::Met(_))
    }

    /// Score in `[0, 1]`; an unmet condition scores 0.
    pub const fn score(&self) -> f64 {
        match self {
            Self::Unmet => 0.0,
            Self::Met(score) => *score,
        }
    }

    /// Combines two results by multiplying their scores.
    ///
    /// A product of 0 fails the combination outright.
    pub fn and(self, other: Self) -> Self {
        match (self, other) {
            (Self::Met(a), Self::Met(b)) => Self::credit(a * b),
            _ => Self::Unmet,
        }
    }

    /// Wraps a raw credit; anything not above 0 is unmet.
    pub fn credit(score: f64) -> Self {
        if score > 0.0 {
            Self::Met(score.min(1.0))
        } else {
            Self::Unmet
        }
    }

    /// Like [`ConditionStatus::and`], but `next` is only evaluated while the
    /// running result is still met.
    pub fn and_then(self, next: impl FnOnce() -> Self) -> Self {
        match self {
            Self::Unmet => Self::Unmet,
            met => met.and(next()),
        }
    }
}

/// Two-tier fuzzy credit for `observed` against `minimum` and `ideal`.
///
/// - `observed < minimum` → [`ConditionStatus::Unmet`]
/// - no ideal (or an ideal not above the minimum) → full credit once met
/// - otherwise `clamp((observed - minimum) / (ideal - minimum), 0, 1)`, where
///   a credit of 0 (observed exactly at the minimum) is also unmet
pub fn fuzzy_score(observed: f64, minimum: f64, ideal: Option<f64>) -> ConditionStatus {
    if observed < minimum {
        return ConditionStatus::Unmet;
    }
    match ideal {
        Some(ideal) if ideal > minimum => {
            ConditionStatus::credit((observed - minimum) / (ideal - minimum))
        }
        _ => ConditionStatus::FULL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn below_minimum_is_unmet() {
        assert_eq!(fuzzy_score(4.0, 5.0, Some(10.0)), ConditionStatus::Unmet);
        assert_eq!(fuzzy_score(4.0, 5.0, None), ConditionStatus::Unmet);
    }

    #[test]
    fn single_tier_is_binary() {
        assert_eq!(fuzzy_score(5.0, 5.0, None), ConditionStatus::FULL);
        assert_eq!(fuzzy_score(500.0, 5.0, None), ConditionStatus::FULL);
    }

    #[test]
    fn two_tiers_interpolate_linearly() {
        assert_eq!(fuzzy_score(7.5, 5.0, Some(10.0)), ConditionStatus::Met(0.5));
        assert_eq!(fuzzy_score(10.0, 5.0, Some(10.0)), ConditionStatus::FULL);
        assert_eq!(fuzzy_score(99.0, 5.0, Some(10.0)), ConditionStatus::FULL);
    }

    #[test]
    fn exact_minimum_of_two_tiers_earns_no_credit() {
        assert_eq!(fuzzy_score(5.0, 5.0, Some(10.0)), ConditionStatus::Unmet);
        assert_eq!(
            ConditionStatus::Met(0.5).and(ConditionStatus::Met(0.0)),
            ConditionStatus::Unmet
        );
    }

    #[test]
    fn inverted_ideal_behaves_as_single_tier() {
        assert_eq!(fuzzy_score(6.0, 5.0, Some(2.0)), ConditionStatus::FULL);
    }

    #[test]
    fn combination_multiplies_scores() {
        let combined = ConditionStatus::Met(0.5).and(ConditionStatus::Met(0.5));
        assert_eq!(combined, ConditionStatus::Met(0.25));
        assert_eq!(
            ConditionStatus::FULL.and(ConditionStatus::Unmet),
            ConditionStatus::Unmet
        );
    }

    #[test]
    fn and_then_short_circuits_after_a_failure() {
        let mut evaluated = false;
        let status = ConditionStatus::Unmet.and_then(|| {
            evaluated = true;
            ConditionStatus::FULL
        });
        assert_eq!(status, ConditionStatus::Unmet);
        assert!(!evaluated);
    }

    #[test]
    fn tier_score_uses_both_values() {
        let tier = Tier::two(1u32, 10u32);
        assert_eq!(tier.score(1.0), ConditionStatus::Unmet);
        assert_eq!(tier.score(2.0), ConditionStatus::Met(1.0 / 9.0));
        assert_eq!(tier.score(10.0), ConditionStatus::FULL);
        assert_eq!(tier.score(0.0), ConditionStatus::Unmet);
    }
}
