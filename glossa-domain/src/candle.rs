//! Candle-based sequence classifier
//!
//! Loads a Hugging Face sequence-classification checkpoint stored as
//! safetensors, either from the hub cache or from a local directory.
//! XLM-RoBERTa and BERT checkpoints are supported.

use std::path::{Path, PathBuf};

use candle_core::{DType, Device, Module, Tensor};
use candle_nn::{Linear, VarBuilder};
use candle_transformers::models::bert::{BertModel, Config as BertConfig};
use candle_transformers::models::xlm_roberta::{
    Config as XLMRobertaConfig, XLMRobertaForSequenceClassification,
};
use serde_json::Value;
use tokenizers::{Encoding, PaddingParams, PaddingStrategy, Tokenizer, TruncationParams};

use crate::config::ClassifierConfig;
use crate::error::{DomainError, Result};
use crate::model::{ClassifierModel, Id2Label};

/// Paths of the three files a checkpoint consists of
#[derive(Debug, Clone)]
pub struct ModelFiles {
    pub config: PathBuf,
    pub tokenizer: PathBuf,
    pub weights: PathBuf,
}

impl ModelFiles {
    /// Fetch from the Hugging Face hub, reusing the local cache
    pub fn download(model_id: &str) -> Result<Self> {
        log::info!("Fetching model {model_id}");
        let load_error = |file: &str, e: hf_hub::api::sync::ApiError| {
            DomainError::ModelLoad(format!("{model_id}/{file}: {e}"))
        };
        let api = hf_hub::api::sync::Api::new()
            .map_err(|e| DomainError::ModelLoad(format!("hub client: {e}")))?;
        let repo = api.model(model_id.to_string());

        Ok(Self {
            config: repo.get("config.json").map_err(|e| load_error("config.json", e))?,
            tokenizer: repo
                .get("tokenizer.json")
                .map_err(|e| load_error("tokenizer.json", e))?,
            weights: repo
                .get("model.safetensors")
                .map_err(|e| load_error("model.safetensors", e))?,
        })
    }

    /// Files in a local directory
    pub fn in_dir(dir: &Path) -> Result<Self> {
        let files = Self {
            config: dir.join("config.json"),
            tokenizer: dir.join("tokenizer.json"),
            weights: dir.join("model.safetensors"),
        };
        for path in [&files.config, &files.tokenizer, &files.weights] {
            if !path.is_file() {
                return Err(DomainError::ModelLoad(format!(
                    "missing model file {}",
                    path.display()
                )));
            }
        }
        Ok(files)
    }
}

/// Pick the compute device
pub fn select_device(force_cpu: bool) -> Device {
    if force_cpu {
        log::info!("Using CPU for inference");
        return Device::Cpu;
    }
    #[cfg(feature = "cuda")]
    {
        if let Ok(device) = Device::new_cuda(0) {
            log::info!("Using CUDA GPU for inference");
            return device;
        }
    }
    #[cfg(feature = "metal")]
    {
        if let Ok(device) = Device::new_metal(0) {
            log::info!("Using Metal GPU for inference");
            return device;
        }
    }
    log::info!("Using CPU for inference");
    Device::Cpu
}

enum Head {
    XlmRoberta(XLMRobertaForSequenceClassification),
    Bert {
        encoder: BertModel,
        pooler: Linear,
        classifier: Linear,
    },
}

/// Sequence classifier running on candle
pub struct CandleClassifier {
    head: Head,
    tokenizer: Tokenizer,
    device: Device,
    id2label: Id2Label,
}

impl CandleClassifier {
    /// Load the model described by a configuration
    pub fn from_config(config: &ClassifierConfig) -> Result<Self> {
        let files = match &config.model_dir {
            Some(dir) => ModelFiles::in_dir(dir)?,
            None => ModelFiles::download(&config.model_id)?,
        };
        Self::load(&files, config.max_length, select_device(config.force_cpu))
    }

    /// Load from checkpoint files onto a device
    pub fn load(files: &ModelFiles, max_length: usize, device: Device) -> Result<Self> {
        let config_str = std::fs::read_to_string(&files.config)?;
        let config: Value = serde_json::from_str(&config_str)?;
        let id2label = Id2Label::from_model_config(&config)?;
        let num_labels = id2label.len();

        let mut tokenizer = Tokenizer::from_file(&files.tokenizer)
            .map_err(|e| DomainError::Tokenizer(e.to_string()))?;
        tokenizer.with_padding(Some(PaddingParams {
            strategy: PaddingStrategy::BatchLongest,
            ..Default::default()
        }));
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length,
                ..Default::default()
            }))
            .map_err(|e| DomainError::Tokenizer(e.to_string()))?;
        log::info!("Tokenizer loaded");

        let dtype = if device.is_cuda() {
            DType::F16
        } else {
            DType::F32
        };
        // SAFETY: the weights file is memory-mapped and must not change
        // while the model is alive.
        let vb = unsafe { VarBuilder::from_mmaped_safetensors(&[&files.weights], dtype, &device)? };

        let model_type = config
            .get("model_type")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let head = match model_type {
            "xlm-roberta" | "roberta" => {
                let cfg: XLMRobertaConfig = serde_json::from_str(&config_str)?;
                Head::XlmRoberta(XLMRobertaForSequenceClassification::new(
                    num_labels, &cfg, vb,
                )?)
            }
            "bert" => {
                let cfg: BertConfig = serde_json::from_str(&config_str)?;
                let hidden = cfg.hidden_size;
                Head::Bert {
                    encoder: BertModel::load(vb.pp("bert"), &cfg)?,
                    pooler: candle_nn::linear(hidden, hidden, vb.pp("bert.pooler.dense"))?,
                    classifier: candle_nn::linear(hidden, num_labels, vb.pp("classifier"))?,
                }
            }
            other => {
                return Err(DomainError::ModelLoad(format!(
                    "unsupported model type '{other}'"
                )))
            }
        };
        log::info!("Model loaded ({model_type}, {num_labels} labels, {device:?})");

        Ok(Self {
            head,
            tokenizer,
            device,
            id2label,
        })
    }

    fn forward(&self, texts: &[&str]) -> Result<Tensor> {
        let encodings = self
            .tokenizer
            .encode_batch(texts.to_vec(), true)
            .map_err(|e| DomainError::Tokenizer(e.to_string()))?;

        let batch_size = encodings.len();
        let seq_len = encodings
            .iter()
            .map(|e| e.get_ids().len())
            .max()
            .unwrap_or(0);
        let flatten = |field: fn(&Encoding) -> &[u32]| -> Vec<u32> {
            encodings.iter().flat_map(|e| field(e).to_vec()).collect()
        };

        let input_ids = Tensor::from_vec(
            flatten(Encoding::get_ids),
            (batch_size, seq_len),
            &self.device,
        )?;
        let attention_mask = Tensor::from_vec(
            flatten(Encoding::get_attention_mask),
            (batch_size, seq_len),
            &self.device,
        )?;
        let token_type_ids = input_ids.zeros_like()?;

        let logits = match &self.head {
            Head::XlmRoberta(model) => {
                model.forward(&input_ids, &attention_mask, &token_type_ids)?
            }
            Head::Bert {
                encoder,
                pooler,
                classifier,
            } => {
                let hidden = encoder.forward(&input_ids, &token_type_ids, Some(&attention_mask))?;
                // [CLS] state through the pooler
                let cls = hidden.narrow(1, 0, 1)?.squeeze(1)?;
                let pooled = pooler.forward(&cls)?.tanh()?;
                classifier.forward(&pooled)?
            }
        };
        Ok(logits.to_dtype(DType::F32)?)
    }
}

impl ClassifierModel for CandleClassifier {
    fn logits(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self.forward(texts)?.to_vec2::<f32>()?)
    }

    fn id2label(&self) -> &Id2Label {
        &self.id2label
    }
}
