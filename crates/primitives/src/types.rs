//! Type aliases shared by the staking crates.

use bitcoin::Txid;

/// Height of a block on the Bitcoin chain.
pub type BitcoinBlockHeight = u64;

/// The number of a protocol-parameter version.
pub type ParamsVersionNumber = u32;

/// A delegation is identified by the hash of its staking transaction.
pub type DelegationId = Txid;

/// A relative duration measured in Bitcoin blocks.
pub type BlockCount = u32;

/// Average number of minutes between two Bitcoin blocks.
pub const AVG_BLOCK_TIME_MINUTES: u64 = 10;

/// Estimates the wall-clock duration of `blocks` in minutes.
///
/// This is only an estimate for display purposes and must never be used to decide whether a
/// timelock has elapsed.
pub const fn blocks_to_minutes(blocks: BlockCount) -> u64 {
    blocks as u64 * AVG_BLOCK_TIME_MINUTES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_week_of_blocks() {
        assert_eq!(blocks_to_minutes(1008), 7 * 24 * 60);
        assert_eq!(blocks_to_minutes(0), 0);
    }
}
