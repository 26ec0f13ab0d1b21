//! Learning-to-Rank fusion: a linear model over the Feature Vector with
//! trained weights and bias, squashed through a logistic function.

use ircore_core::features::FeatureVector;

#[derive(Debug, Clone)]
pub struct LtrModel {
    pub weights: [f64; 19],
    pub bias: f64,
}

impl Default for LtrModel {
    /// Weights biased toward `derived.overall_relevance` and the basic
    /// match factors until a caller trains against real feedback.
    fn default() -> Self {
        let mut weights = [0.02; 19];
        weights[0] = 0.15; // basic_match.title
        weights[1] = 0.20; // basic_match.content
        Self { weights, bias: -0.5 }
    }
}

impl LtrModel {
    pub fn score(&self, features: &FeatureVector) -> f64 {
        let raw = features.as_array();
        let linear: f64 = raw.iter().zip(self.weights.iter()).map(|(x, w)| x * w).sum::<f64>() + self.bias;
        logistic(linear)
    }
}

fn logistic(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Score each `(id, feature vector)` pair and return sorted descending.
pub fn fuse(candidates: &[(String, FeatureVector)], model: &LtrModel) -> Vec<(String, f64)> {
    let mut scored: Vec<(String, f64)> = candidates.iter().map(|(id, fv)| (id.clone(), model.score(fv))).collect();
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scored
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logistic_squash_stays_in_unit_interval() {
        for x in [-100.0, -1.0, 0.0, 1.0, 100.0] {
            let y = logistic(x);
            assert!((0.0..=1.0).contains(&y));
        }
    }

    #[test]
    fn higher_feature_values_score_higher_with_positive_weights() {
        let model = LtrModel { weights: [1.0; 19], bias: 0.0 };
        let low = FeatureVector::default();
        let mut high = FeatureVector::default();
        high.basic_match.content = 1.0;
        high.basic_match.title = 1.0;
        assert!(model.score(&high) > model.score(&low));
    }
}
