use reply_classifier::Classifier;
use std::sync::Arc;

pub type AppState = Arc<State>;

/// Shared per-process state: the classifier handle built during startup and
/// the active softening temperature. Read-only after construction.
pub struct State {
    pub classifier: Arc<dyn Classifier>,
    pub temperature: f32,
}

impl State {
    pub fn new(classifier: Arc<dyn Classifier>, temperature: f32) -> Self {
        Self {
            classifier,
            temperature,
        }
    }
}
