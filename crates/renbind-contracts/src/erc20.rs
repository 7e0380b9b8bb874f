//! `ERC20`: the full ERC-20 interface, `ERC20Basic` plus allowances.

use std::sync::Arc;

use renbind_core::{
    Address, BindError, BoundContract, CallOpts, ContractEvent, DecodedLog, EventIterator,
    FilterOpts, Log, RpcTransport, Subscription, TransactOpts, Tokenize, WatchOpts, B256, U256,
};
use tokio::sync::mpsc;

use crate::{bind, rule};

pub const CONTRACT_NAME: &str = "ERC20";

pub const ERC20_ABI: &str = r#"[
  {"type":"function","name":"approve","inputs":[{"name":"spender","type":"address"},{"name":"value","type":"uint256"}],"outputs":[{"name":"","type":"bool"}],"stateMutability":"nonpayable"},
  {"type":"function","name":"totalSupply","inputs":[],"outputs":[{"name":"","type":"uint256"}],"stateMutability":"view"},
  {"type":"function","name":"transferFrom","inputs":[{"name":"from","type":"address"},{"name":"to","type":"address"},{"name":"value","type":"uint256"}],"outputs":[{"name":"","type":"bool"}],"stateMutability":"nonpayable"},
  {"type":"function","name":"balanceOf","inputs":[{"name":"who","type":"address"}],"outputs":[{"name":"","type":"uint256"}],"stateMutability":"view"},
  {"type":"function","name":"transfer","inputs":[{"name":"to","type":"address"},{"name":"value","type":"uint256"}],"outputs":[{"name":"","type":"bool"}],"stateMutability":"nonpayable"},
  {"type":"function","name":"allowance","inputs":[{"name":"owner","type":"address"},{"name":"spender","type":"address"}],"outputs":[{"name":"","type":"uint256"}],"stateMutability":"view"},
  {"type":"event","name":"Approval","anonymous":false,"inputs":[{"name":"owner","type":"address","indexed":true},{"name":"spender","type":"address","indexed":true},{"name":"value","type":"uint256","indexed":false}]},
  {"type":"event","name":"Transfer","anonymous":false,"inputs":[{"name":"from","type":"address","indexed":true},{"name":"to","type":"address","indexed":true},{"name":"value","type":"uint256","indexed":false}]}
]"#;

#[derive(Debug, Clone)]
pub struct Erc20 {
    pub caller: Erc20Caller,
    pub transactor: Erc20Transactor,
    pub filterer: Erc20Filterer,
}

impl Erc20 {
    pub fn new(address: Address, transport: Arc<dyn RpcTransport>) -> Result<Self, BindError> {
        let contract = bind(ERC20_ABI, address, transport)?;
        Ok(Self {
            caller: Erc20Caller { contract: contract.clone() },
            transactor: Erc20Transactor { contract: contract.clone() },
            filterer: Erc20Filterer { contract },
        })
    }

    pub fn raw(&self) -> &BoundContract {
        &self.caller.contract
    }
}

#[derive(Debug, Clone)]
pub struct Erc20Caller {
    contract: BoundContract,
}

impl Erc20Caller {
    pub fn new(address: Address, transport: Arc<dyn RpcTransport>) -> Result<Self, BindError> {
        Ok(Self { contract: bind(ERC20_ABI, address, transport)? })
    }

    pub async fn total_supply(&self, opts: &CallOpts) -> Result<U256, BindError> {
        self.contract.call(opts, "totalSupply", vec![]).await?.take()
    }

    pub async fn balance_of(&self, opts: &CallOpts, who: Address) -> Result<U256, BindError> {
        self.contract.call(opts, "balanceOf", vec![who.into_token()]).await?.take()
    }

    /// `allowance(address owner, address spender) view returns (uint256)`
    pub async fn allowance(&self, opts: &CallOpts, owner: Address, spender: Address) -> Result<U256, BindError> {
        self.contract
            .call(opts, "allowance", vec![owner.into_token(), spender.into_token()])
            .await?
            .take()
    }
}

#[derive(Debug, Clone)]
pub struct Erc20Transactor {
    contract: BoundContract,
}

impl Erc20Transactor {
    pub fn new(address: Address, transport: Arc<dyn RpcTransport>) -> Result<Self, BindError> {
        Ok(Self { contract: bind(ERC20_ABI, address, transport)? })
    }

    pub async fn transfer(&self, opts: &TransactOpts, to: Address, value: U256) -> Result<B256, BindError> {
        self.contract
            .transact(opts, "transfer", vec![to.into_token(), value.into_token()])
            .await
    }

    pub async fn transfer_from(
        &self,
        opts: &TransactOpts,
        from: Address,
        to: Address,
        value: U256,
    ) -> Result<B256, BindError> {
        self.contract
            .transact(opts, "transferFrom", vec![from.into_token(), to.into_token(), value.into_token()])
            .await
    }

    pub async fn approve(&self, opts: &TransactOpts, spender: Address, value: U256) -> Result<B256, BindError> {
        self.contract
            .transact(opts, "approve", vec![spender.into_token(), value.into_token()])
            .await
    }
}

#[derive(Debug, Clone)]
pub struct Erc20Filterer {
    contract: BoundContract,
}

impl Erc20Filterer {
    pub fn new(address: Address, transport: Arc<dyn RpcTransport>) -> Result<Self, BindError> {
        Ok(Self { contract: bind(ERC20_ABI, address, transport)? })
    }

    pub async fn filter_approval(
        &self,
        opts: &FilterOpts,
        owner: &[Address],
        spender: &[Address],
    ) -> Result<EventIterator<Erc20Approval>, BindError> {
        self.contract.filter_events(opts, &[rule(owner), rule(spender)]).await
    }

    pub async fn watch_approval(
        &self,
        opts: &WatchOpts,
        sink: mpsc::Sender<Erc20Approval>,
        owner: &[Address],
        spender: &[Address],
    ) -> Result<Subscription, BindError> {
        self.contract.watch_events(opts, sink, &[rule(owner), rule(spender)]).await
    }

    pub fn parse_approval(&self, log: &Log) -> Result<Erc20Approval, BindError> {
        Erc20Approval::from_log(self.contract.unpack_log(Erc20Approval::NAME, log)?)
    }

    pub async fn filter_transfer(
        &self,
        opts: &FilterOpts,
        from: &[Address],
        to: &[Address],
    ) -> Result<EventIterator<Erc20Transfer>, BindError> {
        self.contract.filter_events(opts, &[rule(from), rule(to)]).await
    }

    pub async fn watch_transfer(
        &self,
        opts: &WatchOpts,
        sink: mpsc::Sender<Erc20Transfer>,
        from: &[Address],
        to: &[Address],
    ) -> Result<Subscription, BindError> {
        self.contract.watch_events(opts, sink, &[rule(from), rule(to)]).await
    }

    pub fn parse_transfer(&self, log: &Log) -> Result<Erc20Transfer, BindError> {
        Erc20Transfer::from_log(self.contract.unpack_log(Erc20Transfer::NAME, log)?)
    }
}

/// `Approval(address indexed owner, address indexed spender, uint256 value)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Erc20Approval {
    pub owner: Address,
    pub spender: Address,
    pub value: U256,
    pub raw: Log,
}

impl ContractEvent for Erc20Approval {
    const NAME: &'static str = "Approval";

    fn from_log(mut log: DecodedLog) -> Result<Self, BindError> {
        Ok(Self {
            owner: log.fields.take()?,
            spender: log.fields.take()?,
            value: log.fields.take()?,
            raw: log.raw,
        })
    }
}

/// `Transfer(address indexed from, address indexed to, uint256 value)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Erc20Transfer {
    pub from: Address,
    pub to: Address,
    pub value: U256,
    pub raw: Log,
}

impl ContractEvent for Erc20Transfer {
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
