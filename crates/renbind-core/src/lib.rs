//! renbind-core: the generic bound-contract handle behind every renbind binding.
//!
//! # Overview
//!
//! A binding never talks to a node directly. It holds a [`BoundContract`]
//! (address + parsed ABI + transport) and forwards to it:
//!
//! - [`RpcTransport`]: the async trait every JSON-RPC transport implements
//! - [`ContractAbi`]: JSON ABI parsing, call packing, output and log unpacking
//! - [`BoundContract`]: `eth_call`, `eth_sendTransaction`, deploy, log filter/watch
//! - [`EventIterator`] / [`Subscription`]: pull and push consumption of event logs
//! - [`Artifact`] / [`Bytecode`]: deployment bytecode from truffle build output
//! - [`BindConfig`] / [`init_tracing`]: configuration and logging setup
//!
//! Failures are never retried or reclassified here: whatever the transport or
//! the ABI codec reports is handed back as a [`BindError`].

pub mod abi;
pub mod artifact;
pub mod bound;
pub mod config;
pub mod error;
pub mod http;
pub mod iterator;
pub mod log;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod opts;
pub mod receipt;
pub mod request;
pub mod subscription;
pub mod token;
pub mod tracing_setup;
pub mod transport;

pub use abi::{ContractAbi, DecodedLog};
pub use artifact::{Artifact, Bytecode};
pub use bound::{deploy_contract, BoundContract, ContractEvent};
pub use config::BindConfig;
pub use error::{BindError, TransportError};
pub use http::{HttpConfig, HttpTransport};
pub use iterator::EventIterator;
pub use log::Log;
pub use opts::{BlockTag, CallOpts, FilterOpts, TransactOpts, WatchOpts};
pub use receipt::{wait_deployed, wait_mined, Receipt};
pub use request::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, RpcId};
pub use subscription::Subscription;
pub use token::{Detokenize, Outputs, Tokenize};
pub use tracing_setup::{init_tracing, LogConfig};
pub use transport::{request, RpcTransport};

// Re-export the primitive types used throughout the generated bindings.
pub use alloy_dyn_abi::DynSolValue;
pub use alloy_primitives::{Address, Bytes, FixedBytes, B256, U256};
