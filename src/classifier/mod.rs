pub mod bert;

pub use bert::BertClassifier;

use thiserror::Error;

/// The fixed label vocabulary of the fine-tuned checkpoint. The class order
/// matches the head's output indices, so argmax maps directly to a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
    Invalid,
}

impl Sentiment {
    /// Map a predicted class index to its sentiment, `None` if out of range.
    pub fn from_class_index(index: u32) -> Option<Self> {
        match index {
            0 => Some(Sentiment::Positive),
            1 => Some(Sentiment::Negative),
            2 => Some(Sentiment::Neutral),
            3 => Some(Sentiment::Invalid),
            _ => None,
        }
    }

    /// Label string as stored and returned to callers.
    pub fn label(self) -> &'static str {
        match self {
            Sentiment::Positive => "Positivo",
            Sentiment::Negative => "Negativo",
            Sentiment::Neutral => "Neutro",
            Sentiment::Invalid => "Invalido",
        }
    }

    /// Numeric rating derived from the label.
    pub fn rating(self) -> u8 {
        match self {
            Sentiment::Positive => 5,
            Sentiment::Negative => 1,
            Sentiment::Neutral => 3,
            Sentiment::Invalid => 0,
        }
    }
}

/// Errors from model loading and inference
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("Model file not found: {0}")]
    ModelNotFound(String),

    #[error("Tokenization failed: {0}")]
    Tokenization(String),

    #[error("Predicted class {0} is outside the label vocabulary")]
    UnknownClass(u32),

    #[error("Download failed: {0}")]
    Download(#[from] hf_hub::api::sync::ApiError),

    #[error(transparent)]
    Candle(#[from] candle_core::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// A loaded sentiment model. Object-safe so handlers can be driven by a
/// stub in tests.
pub trait SentimentModel: Send + Sync {
    fn classify(&self, text: &str) -> Result<Sentiment, ClassifierError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_index_covers_vocabulary() {
        assert_eq!(Sentiment::from_class_index(0), Some(Sentiment::Positive));
        assert_eq!(Sentiment::from_class_index(1), Some(Sentiment::Negative));
        assert_eq!(Sentiment::from_class_index(2), Some(Sentiment::Neutral));
        assert_eq!(Sentiment::from_class_index(3), Some(Sentiment::Invalid));
        assert_eq!(Sentiment::from_class_index(4), None);
    }

    #[test]
    fn labels_and_ratings_pair_up() {
        assert_eq!(Sentiment::Positive.label(), "Positivo");
        assert_eq!(Sentiment::Positive.rating(), 5);
        assert_eq!(Sentiment::Negative.label(), "Negativo");
        assert_eq!(Sentiment::Negative.rating(), 1);
        assert_eq!(Sentiment::Neutral.label(), "Neutro");
        assert_eq!(Sentiment::Neutral.rating(), 3);
        assert_eq!(Sentiment::Invalid.label(), "Invalido");
        assert_eq!(Sentiment::Invalid.rating(), 0);
    }
}
