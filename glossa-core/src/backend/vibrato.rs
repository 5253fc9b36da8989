//! MeCab-compatible tokenization through vibrato
//!
//! Dictionaries are compiled vibrato system dictionaries, optionally
//! zstd-compressed (`*.zst`), as distributed for IPADIC/UniDic and
//! mecab-ko-dic. Relative paths resolve against `$GLOSSA_DATA_DIR`.

use std::path::PathBuf;

use super::Backend;
use crate::error::BackendResult;

/// Resolve a dictionary path from the routing table
pub(crate) fn resolve_resource(path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_relative() {
        if let Some(dir) = std::env::var_os("GLOSSA_DATA_DIR") {
            return PathBuf::from(dir).join(path);
        }
    }
    path
}

#[cfg(feature = "mecab")]
mod imp {
    use std::fs::File;
    use std::io::Read;
    use std::path::Path;

    use vibrato::{Dictionary, Tokenizer};

    use super::super::{finish_tokens, Backend};
    use crate::error::{BackendError, BackendResult};

    /// Surface forms from a vibrato lattice
    pub struct VibratoBackend {
        tokenizer: Tokenizer,
    }

    impl VibratoBackend {
        pub fn open(path: &Path) -> BackendResult<Self> {
            let resource_error = |reason: String| BackendError::Resource {
                path: path.display().to_string(),
                reason,
            };

            log::info!("Loading dictionary from {}", path.display());
            let file = File::open(path).map_err(|e| resource_error(e.to_string()))?;
            let is_zstd = path.extension().is_some_and(|ext| ext == "zst");
            let dict = if is_zstd {
                let mut decoder =
                    zstd::Decoder::new(file).map_err(|e| resource_error(e.to_string()))?;
                let mut data = Vec::new();
                decoder
                    .read_to_end(&mut data)
                    .map_err(|e| resource_error(e.to_string()))?;
                Dictionary::read(&data[..])
            } else {
                Dictionary::read(std::io::BufReader::new(file))
            }
            .map_err(|e| resource_error(e.to_string()))?;

            Ok(Self {
                tokenizer: Tokenizer::new(dict),
            })
        }
    }

    impl Backend for VibratoBackend {
        fn tokenize(&self, sentence: &str) -> BackendResult<Vec<String>> {
            let mut worker = self.tokenizer.new_worker();
            worker.reset_sentence(sentence);
            worker.tokenize();
            Ok(finish_tokens(
                (0..worker.num_tokens()).map(|i| worker.token(i).surface().to_string()),
            ))
        }
    }
}

/// Load the dictionary and build the backend
pub(crate) fn load(dictionary: &str) -> BackendResult<Box<dyn Backend>> {
    let path = resolve_resource(dictionary);
    #[cfg(feature = "mecab")]
    {
        Ok(Box::new(imp::VibratoBackend::open(&path)?))
    }
    #[cfg(not(feature = "mecab"))]
    {
        let _ = path;
        Err(crate::error::BackendError::Unavailable("vibrato".to_string()))
    }
}
