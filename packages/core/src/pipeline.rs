use serde::{Deserialize, Serialize};

/// Class labels in model output order.
pub const LABELS: [&str; 3] = ["negative", "neutral", "positive"];

/// A single classification outcome.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Prediction {
    pub label: String,
    /// Probability of the winning class after temperature scaling, in [0, 1].
    pub confidence: f32,
}

/// Numerically stable softmax over one row of logits.
pub fn softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|&logit| (logit - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.into_iter().map(|exp| exp / sum).collect()
}

/// Temperature-scale the logits, softmax, and pick the winning class.
///
/// Dividing by a temperature above 1.0 flattens the distribution without
/// moving the argmax, so the returned label is unchanged while the
/// confidence drops toward uniform. An argmax index outside [`LABELS`]
/// degrades to the index's decimal string rather than failing.
pub fn calibrate(logits: &[f32], temperature: f32) -> Prediction {
    let scaled: Vec<f32> = logits.iter().map(|&logit| logit / temperature).collect();
    let probs = softmax(&scaled);

    let mut pred_id = 0usize;
    let mut confidence = f32::NEG_INFINITY;
    for (idx, &prob) in probs.iter().enumerate() {
        if prob > confidence {
            confidence = prob;
            pred_id = idx;
        }
    }

    let label = LABELS
        .get(pred_id)
        .map(|label| label.to_string())
        .unwrap_or_else(|| pred_id.to_string());

    Prediction { label, confidence }
}
