//! Chinese word segmentation through jieba

use super::Backend;
use crate::error::BackendResult;

#[cfg(feature = "jieba")]
mod imp {
    use jieba_rs::Jieba;

    use super::super::{finish_tokens, Backend};
    use crate::error::BackendResult;

    pub struct JiebaBackend {
        jieba: Jieba,
    }

    impl JiebaBackend {
        pub fn new() -> Self {
            Self {
                jieba: Jieba::new(),
            }
        }
    }

    impl Backend for JiebaBackend {
        fn tokenize(&self, sentence: &str) -> BackendResult<Vec<String>> {
            // jieba hands back the spaces between words as tokens
            Ok(finish_tokens(self.jieba.cut(sentence, true)))
        }
    }
}

/// Build the backend with the bundled dictionary
pub(crate) fn load() -> BackendResult<Box<dyn Backend>> {
    #[cfg(feature = "jieba")]
    {
        Ok(Box::new(imp::JiebaBackend::new()))
    }
    #[cfg(not(feature = "jieba"))]
    {
        Err(crate::error::BackendError::Unavailable("jieba".to_string()))
    }
}
