//! Geometric skill interpolation.

/// Geometric interpolation from `base` to `target` by progress `p ∈ [0, 1]`.
///
/// `p = 0` returns `base` and `p = 1` returns `target` exactly. Progress
/// outside the unit interval is clamped. When either end is not strictly
/// positive the ratio is undefined, so the blend falls back to linear.
pub fn geometric(base: f64, target: f64, progress: f64) -> f64 {
    let p = normalize(progress);
    if p <= 0.0 {
        return base;
    }
    if p >= 1.0 {
        return target;
    }
    if base <= 0.0 || target <= 0.0 {
        return lerp(base, target, p);
    }
    base * (target / base).powf(p)
}

/// Linear interpolation from `start` to `end` by `t ∈ [0, 1]`.
pub fn lerp(start: f64, end: f64, t: f64) -> f64 {
    let t = normalize(t);
    start + (end - start) * t
}

fn normalize(progress: f64) -> f64 {
    if progress.is_nan() {
        return 0.0;
    }
    progress.clamp(0.0, 1.0)
}

/// A value configured at two skill tiers: untrained (`base`) and mastered.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillScaled<T> {
    pub base: T,
    pub mastered: T,
}

impl<T: Copy> SkillScaled<T> {
    pub const fn new(base: T, mastered: T) -> Self {
        Self { base, mastered }
    }

    /// Same value at both tiers.
    pub const fn flat(value: T) -> Self {
        Self {
            base: value,
            mastered: value,
        }
    }
}

impl SkillScaled<f64> {
    /// Geometric blend at the given progress.
    pub fn at(&self, progress: f64) -> f64 {
        geometric(self.base, self.mastered, progress)
    }
}

impl SkillScaled<u64> {
    /// Geometric blend at the given progress, rounded to the nearest integer.
    pub fn at(&self, progress: f64) -> u64 {
        geometric(self.base as f64, self.mastered as f64, progress)
            .round()
            .max(0.0) as u64
    }
}

/// Skill level window `[min, max]` that maps a level to progress in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillWindow {
    pub min: u32,
    pub max: u32,
}

impl SkillWindow {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Whether a level reaches the bottom of the window.
    pub const fn is_met(&self, level: u32) -> bool {
        level >= self.min
    }

    /// Level clamped into the window and normalized to `[0, 1]`.
    ///
    /// A degenerate window (`max <= min`) is a step: 0 below `min`, 1 from it.
    pub fn progress(&self, level: u32) -> f64 {
        if self.max <= self.min {
            return if level >= self.min { 1.0 } else { 0.0 };
        }
        let clamped = level.clamp(self.min, self.max);
        f64::from(clamped - self.min) / f64::from(self.max - self.min)
    }
}
