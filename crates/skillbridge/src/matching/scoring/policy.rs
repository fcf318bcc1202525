use serde::{Deserialize, Serialize};

use super::super::domain::Importance;

pub const DEFAULT_REQUIRED_WEIGHT: f64 = 2.0;
pub const DEFAULT_PREFERRED_WEIGHT: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("weights must be finite and non-negative (required {required}, preferred {preferred})")]
pub struct InvalidWeightPolicy {
    pub required: f64,
    pub preferred: f64,
}

/// Weights applied to required and preferred competencies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightPolicy {
    required: f64,
    preferred: f64,
}

impl WeightPolicy {
    pub fn new(required: f64, preferred: f64) -> Result<Self, InvalidWeightPolicy> {
        let valid = |weight: f64| weight.is_finite() && weight >= 0.0;
        if valid(required) && valid(preferred) {
            Ok(Self {
                required,
                preferred,
            })
        } else {
            Err(InvalidWeightPolicy {
                required,
                preferred,
            })
        }
    }

    pub fn required(&self) -> f64 {
        self.required
    }

    pub fn preferred(&self) -> f64 {
        self.preferred
    }

    /// Entries without an importance count as required.
    pub fn weight_for(&self, importance: Option<Importance>) -> f64 {
        match importance {
            Some(Importance::Preferred) => self.preferred,
            Some(Importance::Required) | None => self.required,
        }
    }
}

impl Default for WeightPolicy {
    fn default() -> Self {
        Self {
            required: DEFAULT_REQUIRED_WEIGHT,
            preferred: DEFAULT_PREFERRED_WEIGHT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weights_are_two_to_one() {
        let policy = WeightPolicy::default();
        assert_eq!(policy.weight_for(Some(Importance::Required)), 2.0);
        assert_eq!(policy.weight_for(Some(Importance::Preferred)), 1.0);
        assert_eq!(policy.weight_for(None), 2.0);
    }

    #[test]
    fn rejects_negative_and_non_finite_weights() {
        assert!(WeightPolicy::new(-1.0, 1.0).is_err());
        assert!(WeightPolicy::new(2.0, f64::NAN).is_err());
        assert!(WeightPolicy::new(f64::INFINITY, 1.0).is_err());
        assert!(WeightPolicy::new(0.0, 0.0).is_ok());
    }
}
