// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use alloy::sol;

sol! {
    /// Permit2 token permission. Zero-filled for native-token votes.
    #[derive(Debug, PartialEq, Eq)]
    struct TokenPermissions {
        address token;
        uint256 amount;
    }

    #[derive(Debug, PartialEq, Eq)]
    struct PermitTransferFrom {
        TokenPermissions permitted;
        uint256 nonce;
        uint256 deadline;
    }

    #[derive(Debug, PartialEq, Eq)]
    struct Permit2Data {
        PermitTransferFrom permit;
        bytes signature;
    }

    /// Parameters the origin-chain relay forwards into the bridge deposit.
    #[derive(Debug, PartialEq, Eq)]
    struct DepositParams {
        address recipient;
        address inputToken;
        address outputToken;
        uint256 inputAmount;
        uint256 outputAmount;
        uint256 destinationChainId;
        address exclusiveRelayer;
        uint32 quoteTimestamp;
        uint32 fillDeadline;
        uint32 exclusivityDeadline;
    }

    #[sol(rpc)]
    interface IDonationRelay {
        function callDepositV3(DepositParams calldata params, bytes calldata message) external payable;
    }

    #[sol(rpc)]
    interface IMessageReceiver {
        function getMessageHash(bytes calldata message) external view returns (bytes32);
    }
}
