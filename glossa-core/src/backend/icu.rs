//! Word segmentation for scripts written without spaces (Thai, Lao,
//! Burmese) through the ICU4X segmenter

use super::Backend;
use crate::error::BackendResult;

#[cfg(feature = "icu")]
mod imp {
    use icu_segmenter::WordSegmenter;

    use super::super::{finish_tokens, Backend};
    use crate::error::BackendResult;

    pub struct IcuBackend;

    impl Backend for IcuBackend {
        fn tokenize(&self, sentence: &str) -> BackendResult<Vec<String>> {
            // compiled data: construction is cheap and keeps the backend Sync
            let segmenter = WordSegmenter::new_auto();
            let breaks: Vec<usize> = segmenter.segment_str(sentence).collect();
            Ok(finish_tokens(
                breaks.windows(2).map(|pair| &sentence[pair[0]..pair[1]]),
            ))
        }
    }
}

/// Build the backend
pub(crate) fn load() -> BackendResult<Box<dyn Backend>> {
    #[cfg(feature = "icu")]
    {
        Ok(Box::new(imp::IcuBackend))
    }
    #[cfg(not(feature = "icu"))]
    {
        Err(crate::error::BackendError::Unavailable("icu_segmenter".to_string()))
    }
}
