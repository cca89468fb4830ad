//! Solidity interfaces of the stake token and the staking contract.
//!
//! Uses alloy-sol-types' `sol!` macro to generate Call/Return structs,
//! selectors and event decoders. The staking binding is the multi-position
//! schema: every user owns a list of stakes addressed by their index
//! (`stakeId`).

alloy_sol_types::sol! {
    /// ERC-20 stake token with an open test faucet.
    #[sol(all_derives)]
    interface IStakeToken {
        function name() external view returns (string memory);
        function symbol() external view returns (string memory);
        function decimals() external view returns (uint8);
        function totalSupply() external view returns (uint256);
        function balanceOf(address account) external view returns (uint256);
        function allowance(address owner, address spender) external view returns (uint256);

        function approve(address spender, uint256 amount) external returns (bool);
        function increaseAllowance(address spender, uint256 addedValue) external returns (bool);
        function mintToSelf(uint256 amount) external;
        function mint(address to, uint256 amount) external;

        event Transfer(address indexed from, address indexed to, uint256 value);
        event Approval(address indexed owner, address indexed spender, uint256 value);
    }
}

alloy_sol_types::sol! {
    #![sol(all_derives)]

    /// Lock-up staking contract with linear rewards and a penalised early exit.
    #[sol(all_derives)]
    interface IStakingContract {
        struct StakeInfo {
            uint256 amount;
            uint256 timestamp;
            uint256 unlockTime;
            uint256 rewardDebt;
            bool active;
        }

        // View functions
        function calculateRewards(address user, uint256 stakeId) external view returns (uint256);
        function getUserStakes(address user) external view returns (StakeInfo[] memory);
        function getUserStakeCount(address user) external view returns (uint256);
        function getUserStake(address user, uint256 stakeId) external view returns (StakeInfo memory);
        function getPendingRewards(address user) external view returns (uint256);
        function getUserTotalStaked(address user) external view returns (uint256);
        function getTotalStaked() external view returns (uint256);
        function getRewardRate() external view returns (uint256);
        function getAPR() external view returns (uint256);
        function getLockPeriod() external pure returns (uint256);
        function getContractBalance() external view returns (uint256);
        function getStakingToken() external view returns (address);
        function getContractTokenBalance() external view returns (uint256);

        // State-changing functions
        function stake(uint256 amount) external;
        function normalWithdraw(uint256 stakeId) external;
        function withdraw(uint256 stakeId) external;
        function claimRewards() external;
        function emergencyWithdraw(uint256 stakeId) external;

        // Events
        event Staked(address indexed user, uint256 amount, uint256 stakeId, uint256 unlockTime);
        event Withdrawn(address indexed user, uint256 amount, uint256 stakeId);
        event NormalWithdrawn(address indexed user, uint256 amount, uint256 rewards, uint256 stakeId);
        event RewardsClaimed(address indexed user, uint256 amount);
        event EmergencyWithdraw(address indexed user, uint256 amount, uint256 penalty);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, U256};
    use alloy_sol_types::SolCall;

    #[test]
    fn selectors_match_the_deployed_abi() {
        // keccak256("balanceOf(address)")[..4]
        assert_eq!(IStakeToken::balanceOfCall::SELECTOR, [0x70, 0xa0, 0x82, 0x31]);
        // keccak256("approve(address,uint256)")[..4]
        assert_eq!(IStakeToken::approveCall::SELECTOR, [0x09, 0x5e, 0xa7, 0xb3]);
        // keccak256("stake(uint256)")[..4]
        assert_eq!(IStakingContract::stakeCall::SELECTOR, [0xa6, 0x94, 0xfc, 0x3a]);
    }

    #[test]
    fn stake_call_encodes_amount_after_selector() {
        let call = IStakingContract::stakeCall {
            amount: U256::from(5u64),
        };
        let data = call.abi_encode();
        assert_eq!(data.len(), 4 + 32);
        assert_eq!(data[35], 5);

        let decoded = IStakingContract::stakeCall::abi_decode(&data, true).unwrap();
        assert_eq!(decoded.amount, U256::from(5u64));
    }

    #[test]
    fn user_stakes_return_decodes_struct_array() {
        let stakes = vec![IStakingContract::StakeInfo {
            amount: U256::from(10u64),
            timestamp: U256::from(1_000u64),
            unlockTime: U256::from(2_000u64),
            rewardDebt: U256::ZERO,
            active: true,
        }];
        let encoded = IStakingContract::getUserStakesCall::abi_encode_returns(&(stakes.clone(),));
        let decoded =
            IStakingContract::getUserStakesCall::abi_decode_returns(&encoded, true).unwrap();
        assert_eq!(decoded._0, stakes);

        let owner = address!("00000000000000000000000000000000000000aa");
        let call = IStakingContract::getUserStakesCall { user: owner };
        assert_eq!(&call.abi_encode()[16..36], owner.as_slice());
    }
}
