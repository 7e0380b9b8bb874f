//! `ERC20Basic`: the minimal ERC-20 interface (balance and transfer only).

use std::sync::Arc;

use renbind_core::{
    Address, BindError, BoundContract, CallOpts, ContractEvent, DecodedLog, EventIterator,
    FilterOpts, Log, RpcTransport, Subscription, TransactOpts, Tokenize, WatchOpts, B256, U256,
};
use tokio::sync::mpsc;

use crate::{bind, rule};

pub const CONTRACT_NAME: &str = "ERC20Basic";

pub const ERC20_BASIC_ABI: &str = r#"[
  {"type":"function","name":"totalSupply","inputs":[],"outputs":[{"name":"","type":"uint256"}],"stateMutability":"view"},
  {"type":"function","name":"balanceOf","inputs":[{"name":"who","type":"address"}],"outputs":[{"name":"","type":"uint256"}],"stateMutability":"view"},
  {"type":"function","name":"transfer","inputs":[{"name":"to","type":"address"},{"name":"value","type":"uint256"}],"outputs":[{"name":"","type":"bool"}],"stateMutability":"nonpayable"},
  {"type":"event","name":"Transfer","anonymous":false,"inputs":[{"name":"from","type":"address","indexed":true},{"name":"to","type":"address","indexed":true},{"name":"value","type":"uint256","indexed":false}]}
]"#;

/// Read-only, write and event access to an `ERC20Basic` contract.
#[derive(Debug, Clone)]
pub struct Erc20Basic {
    pub caller: Erc20BasicCaller,
    pub transactor: Erc20BasicTransactor,
    pub filterer: Erc20BasicFilterer,
}

impl Erc20Basic {
    pub fn new(address: Address, transport: Arc<dyn RpcTransport>) -> Result<Self, BindError> {
        let contract = bind(ERC20_BASIC_ABI, address, transport)?;
        Ok(Self {
            caller: Erc20BasicCaller { contract: contract.clone() },
            transactor: Erc20BasicTransactor { contract: contract.clone() },
            filterer: Erc20BasicFilterer { contract },
        })
    }

    pub fn raw(&self) -> &BoundContract {
        &self.caller.contract
    }
}

#[derive(Debug, Clone)]
pub struct Erc20BasicCaller {
    contract: BoundContract,
}

impl Erc20BasicCaller {
    pub fn new(address: Address, transport: Arc<dyn RpcTransport>) -> Result<Self, BindError> {
        Ok(Self { contract: bind(ERC20_BASIC_ABI, address, transport)? })
    }

    /// `totalSupply() view returns (uint256)`
    pub async fn total_supply(&self, opts: &CallOpts) -> Result<U256, BindError> {
        self.contract.call(opts, "totalSupply", vec![]).await?.take()
    }

    /// `balanceOf(address who) view returns (uint256)`
    pub async fn balance_of(&self, opts: &CallOpts, who: Address) -> Result<U256, BindError> {
        self.contract.call(opts, "balanceOf", vec![who.into_token()]).await?.take()
    }
}

#[derive(Debug, Clone)]
pub struct Erc20BasicTransactor {
    contract: BoundContract,
}

impl Erc20BasicTransactor {
    pub fn new(address: Address, transport: Arc<dyn RpcTransport>) -> Result<Self, BindError> {
        Ok(Self { contract: bind(ERC20_BASIC_ABI, address, transport)? })
    }

    /// `transfer(address to, uint256 value) returns (bool)`
    pub async fn transfer(&self, opts: &TransactOpts, to: Address, value: U256) -> Result<B256, BindError> {
        self.contract
            .transact(opts, "transfer", vec![to.into_token(), value.into_token()])
            .await
    }
}

#[derive(Debug, Clone)]
pub struct Erc20BasicFilterer {
    contract: BoundContract,
}

impl Erc20BasicFilterer {
    pub fn new(address: Address, transport: Arc<dyn RpcTransport>) -> Result<Self, BindError> {
        Ok(Self { contract: bind(ERC20_BASIC_ABI, address, transport)? })
    }

    pub async fn filter_transfer(
        &self,
        opts: &FilterOpts,
        from: &[Address],
        to: &[Address],
    ) -> Result<EventIterator<Erc20BasicTransfer>, BindError> {
        self.contract.filter_events(opts, &[rule(from), rule(to)]).await
    }

    pub async fn watch_transfer(
        &self,
        opts: &WatchOpts,
        sink: mpsc::Sender<Erc20BasicTransfer>,
        from: &[Address],
        to: &[Address],
    ) -> Result<Subscription, BindError> {
        self.contract.watch_events(opts, sink, &[rule(from), rule(to)]).await
    }

    pub fn parse_transfer(&self, log: &Log) -> Result<Erc20BasicTransfer, BindError> {
        Erc20BasicTransfer::from_log(self.contract.unpack_log(Erc20BasicTransfer::NAME, log)?)
    }
}

/// `Transfer(address indexed from, address indexed to, uint256 value)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Erc20BasicTransfer {
    pub from: Address,
    pub to: Address,
    pub value: U256,
    pub raw: Log,
}

impl ContractEvent for Erc20BasicTransfer {
    const NAME: &'static str = "Transfer";

    fn from_log(mut log: DecodedLog) -> Result<Self, BindError> {
        Ok(Self {
            from: log.fields.take()?,
            to: log.fields.take()?,
            value: log.fields.take()?,
            raw: log.raw,
        })
    }
}
