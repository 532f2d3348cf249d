//! Candle-backed sequence-classification model.
//!
//! Uses `candle_transformers::models::modernbert` for the forward pass.
//! The checkpoint is read from a local directory when one exists at the
//! configured path, otherwise fetched from the Hugging Face hub.

use super::{ClassifierError, Sentiment, SentimentModel};
use candle_core::{D, DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::modernbert::{Config, ModernBertForSequenceClassification};
use hf_hub::{Repo, RepoType, api::sync::Api};
use std::path::{Path, PathBuf};
use tokenizers::{Tokenizer, TruncationParams};
use tracing::info;

pub struct BertClassifier {
    model: ModernBertForSequenceClassification,
    tokenizer: Tokenizer,
    device: Device,
}

impl BertClassifier {
    /// Load the model and tokenizer. Comments are truncated to `max_length`
    /// tokens before the forward pass.
    pub fn load(model_path: &str, max_length: usize) -> Result<Self, ClassifierError> {
        let device = Device::Cpu;
        let (config_path, tokenizer_path, weights_path) = locate_checkpoint(model_path)?;

        let config: Config = serde_json::from_str(&std::fs::read_to_string(&config_path)?)?;

        let mut tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| ClassifierError::Tokenization(e.to_string()))?;
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length,
                ..Default::default()
            }))
            .map_err(|e| ClassifierError::Tokenization(e.to_string()))?;

        let vb =
            unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, &device)? };
        let model = ModernBertForSequenceClassification::load(vb, &config)?;

        info!(model_path, max_length, "Classification model loaded");

        Ok(Self {
            model,
            tokenizer,
            device,
        })
    }
}

impl SentimentModel for BertClassifier {
    fn classify(&self, text: &str) -> Result<Sentiment, ClassifierError> {
        let tokens = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| ClassifierError::Tokenization(e.to_string()))?;

        let input_ids = Tensor::new(tokens.get_ids(), &self.device)?.unsqueeze(0)?;
        let attention_mask =
            Tensor::new(tokens.get_attention_mask(), &self.device)?.unsqueeze(0)?;

        let logits = self.model.forward(&input_ids, &attention_mask)?;
        let pred_id = logits.argmax(D::Minus1)?.squeeze(0)?.to_scalar::<u32>()?;

        Sentiment::from_class_index(pred_id).ok_or(ClassifierError::UnknownClass(pred_id))
    }
}

/// Resolve config.json, tokenizer.json and model.safetensors, preferring a
/// local checkpoint directory over the hub.
fn locate_checkpoint(model_path: &str) -> Result<(PathBuf, PathBuf, PathBuf), ClassifierError> {
    let dir = Path::new(model_path);
    if dir.is_dir() {
        let config = require_file(dir.join("config.json"))?;
        let tokenizer = require_file(dir.join("tokenizer.json"))?;
        let weights = require_file(dir.join("model.safetensors"))?;
        return Ok((config, tokenizer, weights));
    }

    info!(repo_id = model_path, "No local checkpoint, fetching from hub");
    let api = Api::new()?;
    let repo = api.repo(Repo::new(model_path.to_string(), RepoType::Model));
    Ok((
        repo.get("config.json")?,
        repo.get("tokenizer.json")?,
        repo.get("model.safetensors")?,
    ))
}

fn require_file(path: PathBuf) -> Result<PathBuf, ClassifierError> {
    if path.is_file() {
        Ok(path)
    } else {
        Err(ClassifierError::ModelNotFound(path.display().to_string()))
    }
}
