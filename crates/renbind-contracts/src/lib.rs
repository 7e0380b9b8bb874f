//! renbind-contracts: typed bindings for the Republic Protocol contracts.
//!
//! One module per contract. Every module has the same shape:
//!
//! - `<NAME>_ABI`: the contract's JSON ABI
//! - `<Name>Caller` / `<Name>Transactor` / `<Name>Filterer`: read-only calls,
//!   transactions and event queries, each over a [`BoundContract`]
//! - `<Name>`: all three together
//! - one struct per event, with `filter_<event>` (historical, pull) and
//!   `watch_<event>` (live, push)
//! - `deploy_<name>` for contracts that can be deployed on their own
//!
//! Bindings do not depend on each other. Deployment bytecode is not embedded;
//! load it from the contract's truffle artifact ([`renbind_core::Artifact`]).

use std::sync::Arc;

use renbind_core::{Address, BindError, BoundContract, ContractAbi, DynSolValue, RpcTransport, Tokenize};

pub mod basic_token;
pub mod darknode_registry;
pub mod erc20;
pub mod erc20_basic;
pub mod ownable;
pub mod pausable;
pub mod ren_ledger;
pub mod republic_token;
pub mod standard_token;

pub use basic_token::BasicToken;
pub use darknode_registry::DarknodeRegistry;
pub use erc20::Erc20;
pub use erc20_basic::Erc20Basic;
pub use ownable::Ownable;
pub use pausable::Pausable;
pub use ren_ledger::RenLedger;
pub use republic_token::RepublicToken;
pub use standard_token::StandardToken;

/// A bound contract ABI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContractInfo {
    /// Solidity contract name (also the truffle artifact name).
    pub name: &'static str,
    pub abi: &'static str,
    /// `false` for interfaces, which have no bytecode of their own.
    pub deployable: bool,
}

static REGISTRY: [ContractInfo; 9] = [
    ContractInfo { name: erc20_basic::CONTRACT_NAME, abi: erc20_basic::ERC20_BASIC_ABI, deployable: false },
    ContractInfo { name: erc20::CONTRACT_NAME, abi: erc20::ERC20_ABI, deployable: false },
    ContractInfo { name: basic_token::CONTRACT_NAME, abi: basic_token::BASIC_TOKEN_ABI, deployable: true },
    ContractInfo { name: standard_token::CONTRACT_NAME, abi: standard_token::STANDARD_TOKEN_ABI, deployable: true },
    ContractInfo { name: ownable::CONTRACT_NAME, abi: ownable::OWNABLE_ABI, deployable: true },
    ContractInfo { name: pausable::CONTRACT_NAME, abi: pausable::PAUSABLE_ABI, deployable: true },
    ContractInfo { name: republic_token::CONTRACT_NAME, abi: republic_token::REPUBLIC_TOKEN_ABI, deployable: true },
    ContractInfo { name: darknode_registry::CONTRACT_NAME, abi: darknode_registry::DARKNODE_REGISTRY_ABI, deployable: true },
    ContractInfo { name: ren_ledger::CONTRACT_NAME, abi: ren_ledger::REN_LEDGER_ABI, deployable: true },
];

/// Every contract in this crate.
pub fn registry() -> &'static [ContractInfo] {
    &REGISTRY
}

/// Look up a contract by name (case-insensitive).
pub fn find(name: &str) -> Option<&'static ContractInfo> {
    REGISTRY.iter().find(|c| c.name.eq_ignore_ascii_case(name))
}

pub(crate) fn bind(
    abi: &str,
    address: Address,
    transport: Arc<dyn RpcTransport>,
) -> Result<BoundContract, BindError> {
    Ok(BoundContract::new(address, ContractAbi::parse(abi)?, transport))
}

/// OR-list topic rule for one indexed event argument.
pub(crate) fn rule<T: Tokenize + Clone>(values: &[T]) -> Vec<DynSolValue> {
    values.iter().cloned().map(Tokenize::into_token).collect()
}
