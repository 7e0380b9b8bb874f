//! `Pausable`: `Ownable` plus an owner-controlled emergency stop.

use std::sync::Arc;

use renbind_core::{
    deploy_contract, Address, BindError, BoundContract, Bytecode, CallOpts, ContractAbi,
    ContractEvent, DecodedLog, EventIterator, FilterOpts, Log, RpcTransport, Subscription,
    TransactOpts, Tokenize, WatchOpts, B256,
};
use tokio::sync::mpsc;

use crate::{bind, rule};

pub const CONTRACT_NAME: &str = "Pausable";

pub const PAUSABLE_ABI: &str = r#"[
  {"type":"function","name":"unpause","inputs":[],"outputs":[],"stateMutability":"nonpayable"},
  {"type":"function","name":"paused","inputs":[],"outputs":[{"name":"","type":"bool"}],"stateMutability":"view"},
  {"type":"function","name":"pause","inputs":[],"outputs":[],"stateMutability":"nonpayable"},
  {"type":"function","name":"owner","inputs":[],"outputs":[{"name":"","type":"address"}],"stateMutability":"view"},
  {"type":"function","name":"transferOwnership","inputs":[{"name":"newOwner","type":"address"}],"outputs":[],"stateMutability":"nonpayable"},
  {"type":"event","name":"Pause","anonymous":false,"inputs":[]},
  {"type":"event","name":"Unpause","anonymous":false,"inputs":[]},
  {"type":"event","name":"OwnershipTransferred","anonymous":false,"inputs":[{"name":"previousOwner","type":"address","indexed":true},{"name":"newOwner","type":"address","indexed":true}]}
]"#;

pub async fn deploy_pausable(
    opts: &TransactOpts,
    transport: Arc<dyn RpcTransport>,
    bytecode: &Bytecode,
) -> Result<(Address, B256, Pausable), BindError> {
    let abi = ContractAbi::parse(PAUSABLE_ABI)?;
    let (address, tx, contract) = deploy_contract(opts, abi, bytecode, vec![], transport).await?;
    Ok((address, tx, Pausable::from_bound(contract)))
}

#[derive(Debug, Clone)]
pub struct Pausable {
    pub caller: PausableCaller,
    pub transactor: PausableTransactor,
    pub filterer: PausableFilterer,
}

impl Pausable {
    pub fn new(address: Address, transport: Arc<dyn RpcTransport>) -> Result<Self, BindError> {
        Ok(Self::from_bound(bind(PAUSABLE_ABI, address, transport)?))
    }

    fn from_bound(contract: BoundContract) -> Self {
        Self {
            caller: PausableCaller { contract: contract.clone() },
            transactor: PausableTransactor { contract: contract.clone() },
            filterer: PausableFilterer { contract },
        }
    }

    pub fn raw(&self) -> &BoundContract {
        &self.caller.contract
    }
}

#[derive(Debug, Clone)]
pub struct PausableCaller {
    contract: BoundContract,
}

impl PausableCaller {
    pub fn new(address: Address, transport: Arc<dyn RpcTransport>) -> Result<Self, BindError> {
        Ok(Self { contract: bind(PAUSABLE_ABI, address, transport)? })
    }

    pub async fn paused(&self, opts: &CallOpts) -> Result<bool, BindError> {
        self.contract.call(opts, "paused", vec![]).await?.take()
    }

    pub async fn owner(&self, opts: &CallOpts) -> Result<Address, BindError> {
        self.contract.call(opts, "owner", vec![]).await?.take()
    }
}

#[derive(Debug, Clone)]
pub struct PausableTransactor {
    contract: BoundContract,
}

impl PausableTransactor {
    pub fn new(address: Address, transport: Arc<dyn RpcTransport>) -> Result<Self, BindError> {
        Ok(Self { contract: bind(PAUSABLE_ABI, address, transport)? })
    }

    pub async fn pause(&self, opts: &TransactOpts) -> Result<B256, BindError> {
        self.contract.transact(opts, "pause", vec![]).await
    }

    pub async fn unpause(&self, opts: &TransactOpts) -> Result<B256, BindError> {
        self.contract.transact(opts, "unpause", vec![]).await
    }

    pub async fn transfer_ownership(&self, opts: &TransactOpts, new_owner: Address) -> Result<B256, BindError> {
        self.contract
            .transact(opts, "transferOwnership", vec![new_owner.into_token()])
            .await
    }
}

#[derive(Debug, Clone)]
pub struct PausableFilterer {
    contract: BoundContract,
}

impl PausableFilterer {
    pub fn new(address: Address, transport: Arc<dyn RpcTransport>) -> Result<Self, BindError> {
        Ok(Self { contract: bind(PAUSABLE_ABI, address, transport)? })
    }

    pub async fn filter_pause(&self, opts: &FilterOpts) -> Result<EventIterator<PausablePause>, BindError> {
        self.contract.filter_events(opts, &[]).await
    }

    pub async fn watch_pause(
        &self,
        opts: &WatchOpts,
        sink: mpsc::Sender<PausablePause>,
    ) -> Result<Subscription, BindError> {
        self.contract.watch_events(opts, sink, &[]).await
    }

    pub fn parse_pause(&self, log: &Log) -> Result<PausablePause, BindError> {
        PausablePause::from_log(self.contract.unpack_log(PausablePause::NAME, log)?)
    }

    pub async fn filter_unpause(&self, opts: &FilterOpts) -> Result<EventIterator<PausableUnpause>, BindError> {
        self.contract.filter_events(opts, &[]).await
    }

    pub async fn watch_unpause(
        &self,
        opts: &WatchOpts,
        sink: mpsc::Sender<PausableUnpause>,
    ) -> Result<Subscription, BindError> {
        self.contract.watch_events(opts, sink, &[]).await
    }

    pub fn parse_unpause(&self, log: &Log) -> Result<PausableUnpause, BindError> {
        PausableUnpause::from_log(self.contract.unpack_log(PausableUnpause::NAME, log)?)
    }

    pub async fn filter_ownership_transferred(
        &self,
        opts: &FilterOpts,
        previous_owner: &[Address],
        new_owner: &[Address],
    ) -> Result<EventIterator<PausableOwnershipTransferred>, BindError> {
        self.contract
            .filter_events(opts, &[rule(previous_owner), rule(new_owner)])
            .await
    }

    pub async fn watch_ownership_transferred(
        &self,
        opts: &WatchOpts,
        sink: mpsc::Sender<PausableOwnershipTransferred>,
        previous_owner: &[Address],
        new_owner: &[Address],
    ) -> Result<Subscription, BindError> {
        self.contract
            .watch_events(opts, sink, &[rule(previous_owner), rule(new_owner)])
            .await
    }

    pub fn parse_ownership_transferred(&self, log: &Log) -> Result<PausableOwnershipTransferred, BindError> {
        PausableOwnershipTransferred::from_log(
            self.contract.unpack_log(PausableOwnershipTransferred::NAME, log)?,
        )
    }
}

/// `Pause()`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PausablePause {
    pub raw: Log,
}

impl ContractEvent for PausablePause {
    const NAME: &'static str = "Pause";

    fn from_log(log: DecodedLog) -> Result<Self, BindError> {
        Ok(Self { raw: log.raw })
    }
}

/// `Unpause()`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PausableUnpause {
    pub raw: Log,
}

impl ContractEvent for PausableUnpause {
    const NAME: &'static str = "Unpause";

    fn from_log(log: DecodedLog) -> Result<Self, BindError> {
        Ok(Self { raw: log.raw })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PausableOwnershipTransferred {
    pub previous_owner: Address,
    pub new_owner: Address,
    pub raw: Log,
}

impl ContractEvent for PausableOwnershipTransferred {
    const NAME: &'static str = "OwnershipTransferred";

    fn from_log(mut log: DecodedLog) -> Result<Self, BindError> {
        Ok(Self {
            previous_owner: log.fields.take()?,
            new_owner: log.fields.take()?,
            raw: log.raw,
        })
    }
}
