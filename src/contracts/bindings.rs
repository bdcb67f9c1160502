//! Call bindings for the deployed contracts.
//!
//! Only the functions this repository calls are declared; the contracts
//! themselves are compiled elsewhere.

use alloy::sol;

sol! {
    /// Mintium (MNTM) token.
    #[sol(rpc)]
    interface IMintium {
        function setNFTMarketplace(address marketplace) external;
        function setLiquidityPool(address pool) external;
        function totalSupply() external view returns (uint256);
        function balanceOf(address account) external view returns (uint256);
        function transfer(address to, uint256 amount) external returns (bool);
    }

    /// Solythis (LYTH) token.
    #[sol(rpc)]
    interface ISolythis {
        function setGovernanceContract(address governance) external;
        function setTreasury(address treasury) external;
        function totalSupply() external view returns (uint256);
        function balanceOf(address account) external view returns (uint256);
        function transfer(address to, uint256 amount) external returns (bool);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::sol_types::SolCall;

    #[test]
    fn test_selectors() {
        // keccak256("totalSupply()")[..4]
        assert_eq!(IMintium::totalSupplyCall::SELECTOR, [0x18, 0x16, 0x0d, 0xdd]);
        // keccak256("transfer(address,uint256)")[..4]
        assert_eq!(ISolythis::transferCall::SELECTOR, [0xa9, 0x05, 0x9c, 0xbb]);
        assert_eq!(
            IMintium::setNFTMarketplaceCall::SIGNATURE,
            "setNFTMarketplace(address)"
        );
        assert_eq!(
            ISolythis::setGovernanceContractCall::SIGNATURE,
            "setGovernanceContract(address)"
        );
    }
}
