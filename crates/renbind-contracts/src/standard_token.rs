//! `StandardToken`: `BasicToken` plus allowances, with the
//! increase/decreaseApproval helpers that avoid the approve race.

use std::sync::Arc;

use renbind_core::{
    deploy_contract, Address, BindError, BoundContract, Bytecode, CallOpts, ContractAbi,
    ContractEvent, DecodedLog, EventIterator, FilterOpts, Log, RpcTransport, Subscription,
    TransactOpts, Tokenize, WatchOpts, B256, U256,
};
use tokio::sync::mpsc;

use crate::{bind, rule};

pub const CONTRACT_NAME: &str = "StandardToken";

pub const STANDARD_TOKEN_ABI: &str = r#"[
  {"type":"function","name":"approve","inputs":[{"name":"_spender","type":"address"},{"name":"_value","type":"uint256"}],"outputs":[{"name":"","type":"bool"}],"stateMutability":"nonpayable"},
  {"type":"function","name":"totalSupply","inputs":[],"outputs":[{"name":"","type":"uint256"}],"stateMutability":"view"},
  {"type":"function","name":"transferFrom","inputs":[{"name":"_from","type":"address"},{"name":"_to","type":"address"},{"name":"_value","type":"uint256"}],"outputs":[{"name":"","type":"bool"}],"stateMutability":"nonpayable"},
  {"type":"function","name":"decreaseApproval","inputs":[{"name":"_spender","type":"address"},{"name":"_subtractedValue","type":"uint256"}],"outputs":[{"name":"","type":"bool"}],"stateMutability":"nonpayable"},
  {"type":"function","name":"balanceOf","inputs":[{"name":"_owner","type":"address"}],"outputs":[{"name":"balance","type":"uint256"}],"stateMutability":"view"},
  {"type":"function","name":"transfer","inputs":[{"name":"_to","type":"address"},{"name":"_value","type":"uint256"}],"outputs":[{"name":"","type":"bool"}],"stateMutability":"nonpayable"},
  {"type":"function","name":"increaseApproval","inputs":[{"name":"_spender","type":"address"},{"name":"_addedValue","type":"uint256"}],"outputs":[{"name":"","type":"bool"}],"stateMutability":"nonpayable"},
  {"type":"function","name":"allowance","inputs":[{"name":"_owner","type":"address"},{"name":"_spender","type":"address"}],"outputs":[{"name":"","type":"uint256"}],"stateMutability":"view"},
  {"type":"event","name":"Approval","anonymous":false,"inputs":[{"name":"owner","type":"address","indexed":true},{"name":"spender","type":"address","indexed":true},{"name":"value","type":"uint256","indexed":false}]},
  {"type":"event","name":"Transfer","anonymous":false,"inputs":[{"name":"from","type":"address","indexed":true},{"name":"to","type":"address","indexed":true},{"name":"value","type":"uint256","indexed":false}]}
]"#;

pub async fn deploy_standard_token(
    opts: &TransactOpts,
    transport: Arc<dyn RpcTransport>,
    bytecode: &Bytecode,
) -> Result<(Address, B256, StandardToken), BindError> {
    let abi = ContractAbi::parse(STANDARD_TOKEN_ABI)?;
    let (address, tx, contract) = deploy_contract(opts, abi, bytecode, vec![], transport).await?;
    Ok((address, tx, StandardToken::from_bound(contract)))
}

#[derive(Debug, Clone)]
pub struct StandardToken {
    pub caller: StandardTokenCaller,
    pub transactor: StandardTokenTransactor,
    pub filterer: StandardTokenFilterer,
}

impl StandardToken {
    pub fn new(address: Address, transport: Arc<dyn RpcTransport>) -> Result<Self, BindError> {
        Ok(Self::from_bound(bind(STANDARD_TOKEN_ABI, address, transport)?))
    }

    fn from_bound(contract: BoundContract) -> Self {
        Self {
            caller: StandardTokenCaller { contract: contract.clone() },
            transactor: StandardTokenTransactor { contract: contract.clone() },
            filterer: StandardTokenFilterer { contract },
        }
    }

    pub fn raw(&self) -> &BoundContract {
        &self.caller.contract
    }
}

#[derive(Debug, Clone)]
pub struct StandardTokenCaller {
    contract: BoundContract,
}

impl StandardTokenCaller {
    pub fn new(address: Address, transport: Arc<dyn RpcTransport>) -> Result<Self, BindError> {
        Ok(Self { contract: bind(STANDARD_TOKEN_ABI, address, transport)? })
    }

    pub async fn total_supply(&self, opts: &CallOpts) -> Result<U256, BindError> {
        self.contract.call(opts, "totalSupply", vec![]).await?.take()
    }

    pub async fn balance_of(&self, opts: &CallOpts, owner: Address) -> Result<U256, BindError> {
        self.contract.call(opts, "balanceOf", vec![owner.into_token()]).await?.take()
    }

    pub async fn allowance(&self, opts: &CallOpts, owner: Address, spender: Address) -> Result<U256, BindError> {
        self.contract
            .call(opts, "allowance", vec![owner.into_token(), spender.into_token()])
            .await?
            .take()
    }
}

#[derive(Debug, Clone)]
pub struct StandardTokenTransactor {
    contract: BoundContract,
}

impl StandardTokenTransactor {
    pub fn new(address: Address, transport: Arc<dyn RpcTransport>) -> Result<Self, BindError> {
        Ok(Self { contract: bind(STANDARD_TOKEN_ABI, address, transport)? })
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

    pub async fn increase_approval(
        &self,
        opts: &TransactOpts,
        spender: Address,
        added_value: U256,
    ) -> Result<B256, BindError> {
        self.contract
            .transact(opts, "increaseApproval", vec![spender.into_token(), added_value.into_token()])
            .await
    }

    pub async fn decrease_approval(
        &self,
        opts: &TransactOpts,
        spender: Address,
        subtracted_value: U256,
    ) -> Result<B256, BindError> {
        self.contract
            .transact(opts, "decreaseApproval", vec![spender.into_token(), subtracted_value.into_token()])
            .await
    }
}

#[derive(Debug, Clone)]
pub struct StandardTokenFilterer {
    contract: BoundContract,
}

impl StandardTokenFilterer {
    pub fn new(address: Address, transport: Arc<dyn RpcTransport>) -> Result<Self, BindError> {
        Ok(Self { contract: bind(STANDARD_TOKEN_ABI, address, transport)? })
    }

    pub async fn filter_approval(
        &self,
        opts: &FilterOpts,
        owner: &[Address],
        spender: &[Address],
    ) -> Result<EventIterator<StandardTokenApproval>, BindError> {
        self.contract.filter_events(opts, &[rule(owner), rule(spender)]).await
    }

    pub async fn watch_approval(
        &self,
        opts: &WatchOpts,
        sink: mpsc::Sender<StandardTokenApproval>,
        owner: &[Address],
        spender: &[Address],
    ) -> Result<Subscription, BindError> {
        self.contract.watch_events(opts, sink, &[rule(owner), rule(spender)]).await
    }

    pub fn parse_approval(&self, log: &Log) -> Result<StandardTokenApproval, BindError> {
        StandardTokenApproval::from_log(self.contract.unpack_log(StandardTokenApproval::NAME, log)?)
    }

    pub async fn filter_transfer(
        &self,
        opts: &FilterOpts,
        from: &[Address],
        to: &[Address],
    ) -> Result<EventIterator<StandardTokenTransfer>, BindError> {
        self.contract.filter_events(opts, &[rule(from), rule(to)]).await
    }

    pub async fn watch_transfer(
        &self,
        opts: &WatchOpts,
        sink: mpsc::Sender<StandardTokenTransfer>,
        from: &[Address],
        to: &[Address],
    ) -> Result<Subscription, BindError> {
        self.contract.watch_events(opts, sink, &[rule(from), rule(to)]).await
    }

    pub fn parse_transfer(&self, log: &Log) -> Result<StandardTokenTransfer, BindError> {
        StandardTokenTransfer::from_log(self.contract.unpack_log(StandardTokenTransfer::NAME, log)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardTokenApproval {
    pub owner: Address,
    pub spender: Address,
    pub value: U256,
    pub raw: Log,
}

impl ContractEvent for StandardTokenApproval {
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

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardTokenTransfer {
    pub from: Address,
    pub to: Address,
    pub value: U256,
    pub raw: Log,
}

impl ContractEvent for StandardTokenTransfer {
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
