//! `Ownable`: a single owner address with transferable ownership.

use std::sync::Arc;

use renbind_core::{
    deploy_contract, Address, BindError, BoundContract, Bytecode, CallOpts, ContractAbi,
    ContractEvent, DecodedLog, EventIterator, FilterOpts, Log, RpcTransport, Subscription,
    TransactOpts, Tokenize, WatchOpts, B256,
};
use tokio::sync::mpsc;

use crate::{bind, rule};

pub const CONTRACT_NAME: &str = "Ownable";

pub const OWNABLE_ABI: &str = r#"[
  {"type":"constructor","inputs":[],"stateMutability":"nonpayable"},
  {"type":"function","name":"owner","inputs":[],"outputs":[{"name":"","type":"address"}],"stateMutability":"view"},
  {"type":"function","name":"transferOwnership","inputs":[{"name":"newOwner","type":"address"}],"outputs":[],"stateMutability":"nonpayable"},
  {"type":"event","name":"OwnershipTransferred","anonymous":false,"inputs":[{"name":"previousOwner","type":"address","indexed":true},{"name":"newOwner","type":"address","indexed":true}]}
]"#;

pub async fn deploy_ownable(
    opts: &TransactOpts,
    transport: Arc<dyn RpcTransport>,
    bytecode: &Bytecode,
) -> Result<(Address, B256, Ownable), BindError> {
    let abi = ContractAbi::parse(OWNABLE_ABI)?;
    let (address, tx, contract) = deploy_contract(opts, abi, bytecode, vec![], transport).await?;
    Ok((address, tx, Ownable::from_bound(contract)))
}

#[derive(Debug, Clone)]
pub struct Ownable {
    pub caller: OwnableCaller,
    pub transactor: OwnableTransactor,
    pub filterer: OwnableFilterer,
}

impl Ownable {
    pub fn new(address: Address, transport: Arc<dyn RpcTransport>) -> Result<Self, BindError> {
        Ok(Self::from_bound(bind(OWNABLE_ABI, address, transport)?))
    }

    fn from_bound(contract: BoundContract) -> Self {
        Self {
            caller: OwnableCaller { contract: contract.clone() },
            transactor: OwnableTransactor { contract: contract.clone() },
            filterer: OwnableFilterer { contract },
        }
    }

    pub fn raw(&self) -> &BoundContract {
        &self.caller.contract
    }
}

#[derive(Debug, Clone)]
pub struct OwnableCaller {
    contract: BoundContract,
}

impl OwnableCaller {
    pub fn new(address: Address, transport: Arc<dyn RpcTransport>) -> Result<Self, BindError> {
        Ok(Self { contract: bind(OWNABLE_ABI, address, transport)? })
    }

    pub async fn owner(&self, opts: &CallOpts) -> Result<Address, BindError> {
        self.contract.call(opts, "owner", vec![]).await?.take()
    }
}

#[derive(Debug, Clone)]
pub struct OwnableTransactor {
    contract: BoundContract,
}

impl OwnableTransactor {
    pub fn new(address: Address, transport: Arc<dyn RpcTransport>) -> Result<Self, BindError> {
        Ok(Self { contract: bind(OWNABLE_ABI, address, transport)? })
    }

    /// Only the current owner may call this.
    pub async fn transfer_ownership(&self, opts: &TransactOpts, new_owner: Address) -> Result<B256, BindError> {
        self.contract
            .transact(opts, "transferOwnership", vec![new_owner.into_token()])
            .await
    }
}

#[derive(Debug, Clone)]
pub struct OwnableFilterer {
    contract: BoundContract,
}

impl OwnableFilterer {
    pub fn new(address: Address, transport: Arc<dyn RpcTransport>) -> Result<Self, BindError> {
        Ok(Self { contract: bind(OWNABLE_ABI, address, transport)? })
    }

    pub async fn filter_ownership_transferred(
        &self,
        opts: &FilterOpts,
        previous_owner: &[Address],
        new_owner: &[Address],
    ) -> Result<EventIterator<OwnableOwnershipTransferred>, BindError> {
        self.contract
            .filter_events(opts, &[rule(previous_owner), rule(new_owner)])
            .await
    }

    pub async fn watch_ownership_transferred(
        &self,
        opts: &WatchOpts,
        sink: mpsc::Sender<OwnableOwnershipTransferred>,
        previous_owner: &[Address],
        new_owner: &[Address],
    ) -> Result<Subscription, BindError> {
        self.contract
            .watch_events(opts, sink, &[rule(previous_owner), rule(new_owner)])
            .await
    }

    pub fn parse_ownership_transferred(&self, log: &Log) -> Result<OwnableOwnershipTransferred, BindError> {
        OwnableOwnershipTransferred::from_log(
            self.contract.unpack_log(OwnableOwnershipTransferred::NAME, log)?,
        )
    }
}

/// `OwnershipTransferred(address indexed previousOwner, address indexed newOwner)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnableOwnershipTransferred {
    pub previous_owner: Address,
    pub new_owner: Address,
    pub raw: Log,
}

impl ContractEvent for OwnableOwnershipTransferred {
    const NAME: &'static str = "OwnershipTransferred";

    fn from_log(mut log: DecodedLog) -> Result<Self, BindError> {
        Ok(Self {
            previous_owner: log.fields.take()?,
            new_owner: log.fields.take()?,
            raw: log.raw,
        })
    }
}
