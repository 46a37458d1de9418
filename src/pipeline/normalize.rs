//! Dimension enforcement and L2 normalization

use tracing::warn;

/// Fit a raw embedding vector to `target_dim` and scale it to unit L2 norm.
///
/// Policy, in order:
///
/// 1. `target_dim <= 0` disables enforcement entirely: the raw vector is
///    returned untouched, unscaled.
/// 2. A vector at least `target_dim` long is truncated to its first
///    `target_dim` elements. Pure prefix selection, no pooling.
/// 3. A shorter vector is right-padded with zeros. This loses information
///    relative to a model that natively produces `target_dim` values, which
///    is why it logs at warn level, but it is deliberate policy and does not
///    fail the request.
/// 4. The result is divided by its L2 norm. An all-zero vector is left
///    unscaled rather than divided by zero.
///
/// Total over any finite input; never fails.
pub fn normalize(raw: Vec<f64>, target_dim: i64) -> Vec<f64> {
    if target_dim <= 0 {
        return raw;
    }
    let target = target_dim as usize;

    let mut vector = raw;
    if vector.len() >= target {
        vector.truncate(target);
    } else {
        warn!(
            actual = vector.len(),
            target, "embedding vector shorter than target dimension, padding with zeros"
        );
        vector.resize(target, 0.0);
    }

    let norm = vector.iter().map(|v| v * v).sum::<f64>().sqrt();
    if norm > 0.0 {
        for v in &mut vector {
            *v /= norm;
        }
    }

    vector
}
