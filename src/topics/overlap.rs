// Cosine similarity between dense TF-IDF vectors.
//
//   cos(a, b) = (a · b) / (|a| * |b|)
//
// A zero-length vector (a document with no usable terms) is similar to
// nothing, so it scores 0.0 instead of dividing by zero.

/// Cosine similarity between two vectors in the same term space.
///
/// Vectors of different lengths are compared over their common prefix.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;

    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom < f64::EPSILON {
        0.0
    } else {
        (dot / denom).clamp(0.0, 1.0)
    }
}
