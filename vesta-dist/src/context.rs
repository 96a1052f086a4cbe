//! Per-block execution context.

/// Ambient block information the engine reads but never writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockContext {
    /// Height of the block being executed.
    pub height: u64,
}

impl BlockContext {
    /// Create a context for the given height.
    pub fn new(height: u64) -> Self {
        BlockContext { height }
    }

    /// Context for unit tests, pinned at height zero.
    pub fn test_context() -> Self {
        BlockContext { height: 0 }
    }
}
