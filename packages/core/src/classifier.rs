use crate::pipeline::{self, Prediction};
use anyhow::anyhow;
use async_trait::async_trait;
use ndarray::Array2;
use ort::{inputs, session::Session, value::Value};
use std::path::{Path, PathBuf};
use tokenizers::{Tokenizer, TruncationParams};
use tokio::sync::Mutex;

/// Sequences are truncated to this many tokens before the forward pass.
pub const MAX_SEQUENCE_LENGTH: usize = 128;

/// Seam between the HTTP surface and the model backend.
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(&self, text: &str) -> anyhow::Result<Prediction>;
}

/// Startup-time model construction failure. Fatal: the process must not
/// begin serving when any of these occur.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("artifact directory {} contains no ONNX model", .0.display())]
    MissingModel(PathBuf),
    #[error("failed to load tokenizer: {0}")]
    Tokenizer(String),
    #[error("failed to build inference session: {0}")]
    Session(#[from] ort::Error),
}

/// The process-wide tokenizer + model pair.
///
/// Built once during startup and shared read-only by every request handler.
/// The session sits behind a lock because `ort` runs need exclusive access;
/// the weights themselves are never mutated.
pub struct OnnxClassifier {
    tokenizer: Tokenizer,
    session: Mutex<Session>,
    has_token_type_ids: bool,
    temperature: f32,
}

impl OnnxClassifier {
    /// Load the tokenizer and ONNX graph from an artifact directory.
    ///
    /// The directory holds `tokenizer.json` plus the graph as `model.onnx`
    /// (or `onnx/model.onnx` for optimum-style exports). The exported graph
    /// is inference-only, so no further eval-mode switch is needed.
    pub fn load(artifact_dir: &Path, temperature: f32) -> Result<Self, LoadError> {
        let tokenizer_path = artifact_dir.join("tokenizer.json");
        let mut tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|err| LoadError::Tokenizer(err.to_string()))?;
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: MAX_SEQUENCE_LENGTH,
                ..Default::default()
            }))
            .map_err(|err| LoadError::Tokenizer(err.to_string()))?;

        let model_path = locate_model(artifact_dir)?;
        let bytes = std::fs::read(&model_path).map_err(|source| LoadError::Io {
            path: model_path.clone(),
            source,
        })?;
        let session = Session::builder()?.commit_from_memory(&bytes)?;

        // BERT graphs take token_type_ids, DistilBERT and RoBERTa don't.
        let has_token_type_ids = session.inputs.iter().any(|i| i.name == "token_type_ids");

        tracing::info!(
            "Loaded classifier from {} ({} classes expected)",
            artifact_dir.display(),
            pipeline::LABELS.len()
        );

        Ok(Self {
            tokenizer,
            session: Mutex::new(session),
            has_token_type_ids,
            temperature,
        })
    }
}

fn locate_model(artifact_dir: &Path) -> Result<PathBuf, LoadError> {
    for candidate in ["model.onnx", "onnx/model.onnx"] {
        let path = artifact_dir.join(candidate);
        if path.is_file() {
            return Ok(path);
        }
    }
    Err(LoadError::MissingModel(artifact_dir.to_path_buf()))
}

#[async_trait]
impl Classifier for OnnxClassifier {
    async fn classify(&self, text: &str) -> anyhow::Result<Prediction> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|err| anyhow!("Tokenization failed: {}", err))?;

        let input_ids: Vec<i64> = encoding.get_ids().iter().map(|&id| id as i64).collect();
        let attention_mask: Vec<i64> = encoding
            .get_attention_mask()
            .iter()
            .map(|&mask| mask as i64)
            .collect();
        let seq_len = input_ids.len();

        let input_ids = Value::from_array(Array2::from_shape_vec((1, seq_len), input_ids)?)?;
        let attention_mask =
            Value::from_array(Array2::from_shape_vec((1, seq_len), attention_mask)?)?;

        let mut session = self.session.lock().await;
        let outputs = if self.has_token_type_ids {
            let token_type_ids =
                Value::from_array(Array2::from_shape_vec((1, seq_len), vec![0i64; seq_len])?)?;
            session.run(inputs![
                "input_ids" => input_ids,
                "attention_mask" => attention_mask,
                "token_type_ids" => token_type_ids
            ])?
        } else {
            session.run(inputs![
                "input_ids" => input_ids,
                "attention_mask" => attention_mask
            ])?
        };

        let logits_key = outputs
            .keys()
            .find(|key| key.contains("logits") || key.contains("output"))
            .or_else(|| outputs.keys().next())
            .ok_or_else(|| anyhow!("Model produced no outputs"))?;
        let logits = outputs[logits_key].try_extract_array::<f32>()?;

        // Batch size is fixed at one, so the view flattens to a single row.
        let scores: Vec<f32> = logits.iter().copied().collect();

        Ok(pipeline::calibrate(&scores, self.temperature))
    }
}
