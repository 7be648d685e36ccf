//! Genesis block creation.
//!
//! The genesis block uses fixed values: index 0, no transactions, the zero
//! previous-hash sentinel, nonce 0, timestamp at the epoch. Its hash is
//! computed like any other block's but is exempt from the difficulty
//! predicate — there is no competing producer at index 0, and fixed inputs
//! keep the genesis hash identical across runs.

use votechain_types::{Block, BlockHash, Timestamp};

/// Create the genesis block.
pub fn genesis_block() -> Block {
    let mut block = Block::candidate(0, Timestamp::EPOCH, Vec::new(), BlockHash::ZERO);
    block.seal();
    block
}
