//! EIP-2612 permit typed data.

use alloy_primitives::{B256, U256};
use alloy_sol_types::{sol, Eip712Domain, SolStruct};

use crate::port::PermitRequest;

sol! {
    struct Permit {
        address owner;
        address spender;
        uint256 value;
        uint256 nonce;
        uint256 deadline;
    }
}

/// Domain of a standard permit token: the token's name, version `1`.
fn permit_domain(request: &PermitRequest) -> Eip712Domain {
    Eip712Domain::new(
        Some(request.token_name.clone().into()),
        Some("1".into()),
        Some(U256::from(request.chain_id.value())),
        Some(request.token),
        None,
    )
}

/// Hash the wallet signs to authorize `request`.
#[must_use]
pub fn permit_signing_hash(request: &PermitRequest) -> B256 {
    let permit = Permit {
        owner: request.owner,
        spender: request.spender,
        value: request.amount,
        nonce: request.nonce,
        deadline: U256::from(request.deadline),
    };
    permit.eip712_signing_hash(&permit_domain(request))
}
