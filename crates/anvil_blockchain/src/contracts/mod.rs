//! # Contract Definitions
//!
//! ABI of the crafting item contract (an ERC-1155 with recipes).

// The sol! macro generates code that we can't document, so allow missing_docs
#![allow(missing_docs)]

use alloy_sol_types::sol;

sol! {
    /// The crafting item contract. Every item is a token id; crafting burns
    /// inputs and mints outputs in one transaction.
    #[derive(Debug)]
    interface ICraftingItems {
        /// Emitted once per craft, for the final output only.
        event ItemsCrafted(address indexed crafter, uint256 indexed tokenId, uint256 amount);

        /// Emitted when items leave the chain.
        event ItemsBridged(address indexed user, uint256[] tokenIds, uint256[] amounts);

        /// Invokes one recipe `times` times.
        function craft(uint256 tokenId, uint256 times) external;

        /// Invokes each recipe in order, all-or-nothing.
        function aggrCraft(uint256[] tokenIds, uint256[] amounts) external;

        /// Batched ERC-1155 balance read.
        function balanceOfBatch(address[] accounts, uint256[] ids) external view returns (uint256[]);

        /// Whether `account` holds the direct inputs for `times` invocations.
        function canCraft(address account, uint256 tokenId, uint256 times) external view returns (bool);

        /// Whether a recipe produces `tokenId`.
        function recipeExists(uint256 tokenId) external view returns (bool);

        /// Burns items for transfer off-chain.
        function bridge(uint256[] tokenIds, uint256[] amounts) external;
    }
}

#[cfg(test)]
mod tests {
    use super::ICraftingItems;
    use alloy_sol_types::{SolCall, SolEvent};

    #[test]
    fn test_function_signatures() {
        assert_eq!(ICraftingItems::craftCall::SIGNATURE, "craft(uint256,uint256)");
        assert_eq!(
            ICraftingItems::aggrCraftCall::SIGNATURE,
            "aggrCraft(uint256[],uint256[])"
        );
        assert_eq!(
            ICraftingItems::balanceOfBatchCall::SIGNATURE,
            "balanceOfBatch(address[],uint256[])"
        );
        assert_eq!(ICraftingItems::bridgeCall::SIGNATURE, "bridge(uint256[],uint256[])");
    }

    #[test]
    fn test_balance_of_batch_is_erc1155_selector() {
        assert_eq!(ICraftingItems::balanceOfBatchCall::SELECTOR, [0x4e, 0x12, 0x73, 0xf4]);
    }

    #[test]
    fn test_event_signatures() {
        assert_eq!(
            ICraftingItems::ItemsCrafted::SIGNATURE,
            "ItemsCrafted(address,uint256,uint256)"
        );
        assert_eq!(
            ICraftingItems::ItemsBridged::SIGNATURE,
            "ItemsBridged(address,uint256[],uint256[])"
        );
    }
}
