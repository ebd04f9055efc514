//! Level-indexed scaling curves.
//!
//! A curve is a sorted list of `(level, value)` keys evaluated with linear
//! interpolation and clamped at both ends. Monotonicity is a convention of the
//! data, not something we check.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveKey {
    pub level: f32,
    pub value: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<CurveKey>", into = "Vec<CurveKey>")]
pub struct LevelCurve {
    keys: Vec<CurveKey>,
}

impl LevelCurve {
    pub fn new(mut keys: Vec<CurveKey>) -> Self {
        keys.sort_by(|a, b| a.level.total_cmp(&b.level));
        Self { keys }
    }

    pub fn constant(value: f32) -> Self {
        Self::new(vec![CurveKey { level: 1.0, value }])
    }

    /// Straight line from `(from_level, from_value)` to `(to_level, to_value)`.
    pub fn linear(from_level: f32, from_value: f32, to_level: f32, to_value: f32) -> Self {
        Self::new(vec![
            CurveKey { level: from_level, value: from_value },
            CurveKey { level: to_level, value: to_value },
        ])
    }

    #[inline]
    pub fn keys(&self) -> &[CurveKey] {
        &self.keys
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Value at an integer level. An empty curve evaluates to `1.0` (identity
    /// multiplier); loaders reject empty curves before they get here.
    pub fn evaluate(&self, level: u32) -> f32 {
        let x = level as f32;
        let (Some(first), Some(last)) = (self.keys.first(), self.keys.last()) else {
            return 1.0;
        };
        if x <= first.level {
            return first.value;
        }

        for pair in self.keys.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if x == b.level {
                return b.value;
            }
            if x < b.level {
                let t = (x - a.level) / (b.level - a.level);
                return a.value + (b.value - a.value) * t;
            }
        }

        last.value
    }
}

impl From<Vec<CurveKey>> for LevelCurve {
    fn from(keys: Vec<CurveKey>) -> Self {
        Self::new(keys)
    }
}

impl From<LevelCurve> for Vec<CurveKey> {
    fn from(curve: LevelCurve) -> Self {
        curve.keys
    }
}
