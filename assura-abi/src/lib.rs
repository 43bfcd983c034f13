//! Solidity binding of the deployed insurance contract.

use alloy_primitives::{Address, Bytes};
use alloy_sol_types::{sol, SolConstructor};

sol! {
    contract Insurance {
        constructor(address _insured, string _contractDetails);

        function approveClaim() external;
        function executePayment() external payable;

        function claimApproved() external view returns (bool);
        function contractDetails() external view returns (string);
        function insured() external view returns (address);
        function insurer() external view returns (address);
    }
}

pub use Insurance::InsuranceCalls;

/// Creation calldata: bytecode followed by the encoded constructor arguments.
pub fn deploy_data(bytecode: &[u8], insured: Address, details: &str) -> Bytes {
    let args = Insurance::constructorCall {
        _insured: insured,
        _contractDetails: details.to_string(),
    }
    .abi_encode();
    [bytecode, args.as_slice()].concat().into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::keccak256;
    use alloy_sol_types::{SolCall, SolInterface};

    #[test]
    fn test_selectors_follow_signatures() {
        assert_eq!(
            Insurance::approveClaimCall::SELECTOR,
            keccak256("approveClaim()")[..4]
        );
        assert_eq!(
            Insurance::executePaymentCall::SELECTOR,
            keccak256("executePayment()")[..4]
        );
        assert_eq!(Insurance::claimApprovedCall::SIGNATURE, "claimApproved()");
    }

    #[test]
    fn test_calls_without_arguments_are_bare_selectors() {
        let data = Insurance::approveClaimCall {}.abi_encode();
        assert_eq!(data, Insurance::approveClaimCall::SELECTOR.to_vec());
    }

    #[test]
    fn test_calldata_dispatches_to_call_variant() {
        let data = Insurance::executePaymentCall {}.abi_encode();
        assert!(matches!(
            InsuranceCalls::abi_decode(&data, true).unwrap(),
            InsuranceCalls::executePayment(_)
        ));
        assert!(InsuranceCalls::abi_decode(&[1, 2, 3, 4], true).is_err());
    }

    #[test]
    fn test_string_return_decodes() {
        let encoded =
            Insurance::contractDetailsCall::abi_encode_returns(&("Term life".to_string(),));
        let out = Insurance::contractDetailsCall::abi_decode_returns(&encoded, true).unwrap();
        assert_eq!(out._0, "Term life");
    }

    #[test]
    fn test_deploy_data_appends_constructor_args() {
        let bytecode = [0x60, 0x80, 0x60, 0x40];
        let data = deploy_data(&bytecode, Address::repeat_byte(7), "term life");
        assert_eq!(&data[..4], &bytecode);
        // address word, string offset, string length, one data word
        assert_eq!(data.len(), 4 + 4 * 32);
        assert_eq!(data[4 + 31], 7);
    }
}
