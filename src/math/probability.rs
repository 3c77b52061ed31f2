//! Entropy and normalization of unnormalized weight distributions

/// Shannon entropy of a distribution given by unnormalized weights
///
/// Computes `ln(Σw) - Σ(w·ln w) / Σw`, which equals `-Σ p·ln p` for
/// `p = w / Σw` without normalizing first. Non-positive weights contribute
/// nothing and an empty or all-zero distribution has entropy 0.
pub fn weighted_entropy(weights: &[f64]) -> f64 {
    let mut total = 0.0;
    let mut weighted_logs = 0.0;
    for &weight in weights {
        if weight > 0.0 {
            total += weight;
            weighted_logs += weight * weight.ln();
        }
    }

    if total <= 0.0 {
        return 0.0;
    }

    total.ln() - weighted_logs / total
}

/// Probability of each entry under unnormalized weights
///
/// Returns an empty vector when the weights sum to zero.
pub fn normalize(weights: &[f64]) -> Vec<f64> {
    let total: f64 = weights.iter().filter(|&&w| w > 0.0).sum();
    if total <= 0.0 {
        return Vec::new();
    }
    weights
        .iter()
        .map(|&w| if w > 0.0 { w / total } else { 0.0 })
        .collect()
}
