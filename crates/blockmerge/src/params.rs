use thiserror::Error;

pub const MAX_RUN_LEN: usize = 64;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamsError {
    #[error("invalid run length {len} (must be between 1 and {MAX_RUN_LEN})")]
    RunLength { len: usize },

    #[error("invalid tagged block threshold {count} (must be at least 2)")]
    TaggedBlocks { count: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortParams {
    pub run_len: usize,
    pub lazy_merge_len: usize,
    pub min_tagged_blocks: usize,
}

pub const DEFAULT_PARAMS: SortParams = SortParams {
    run_len: 16,
    lazy_merge_len: 8,
    min_tagged_blocks: 8,
};

impl Default for SortParams {
    fn default() -> Self {
        DEFAULT_PARAMS
    }
}

impl SortParams {
    pub fn validate(&self) -> Result<(), ParamsError> {
        if !(1..=MAX_RUN_LEN).contains(&self.run_len) {
            return Err(ParamsError::RunLength { len: self.run_len });
        }
        if self.min_tagged_blocks < 2 {
            return Err(ParamsError::TaggedBlocks {
                count: self.min_tagged_blocks,
            });
        }
        Ok(())
    }
}
