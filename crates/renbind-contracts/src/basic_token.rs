//! `BasicToken`: the reference `ERC20Basic` implementation (balances only,
//! no allowances).

use std::sync::Arc;

use renbind_core::{
    deploy_contract, Address, BindError, BoundContract, Bytecode, CallOpts, ContractAbi,
    ContractEvent, DecodedLog, EventIterator, FilterOpts, Log, RpcTransport, Subscription,
    TransactOpts, Tokenize, WatchOpts, B256, U256,
};
use tokio::sync::mpsc;

use crate::{bind, rule};

pub const CONTRACT_NAME: &str = "BasicToken";

pub const BASIC_TOKEN_ABI: &str = r#"[
  {"type":"function","name":"totalSupply","inputs":[],"outputs":[{"name":"","type":"uint256"}],"stateMutability":"view"},
  {"type":"function","name":"balanceOf","inputs":[{"name":"_owner","type":"address"}],"outputs":[{"name":"balance","type":"uint256"}],"stateMutability":"view"},
  {"type":"function","name":"transfer","inputs":[{"name":"_to","type":"address"},{"name":"_value","type":"uint256"}],"outputs":[{"name":"","type":"bool"}],"stateMutability":"nonpayable"},
  {"type":"event","name":"Transfer","anonymous":false,"inputs":[{"name":"from","type":"address","indexed":true},{"name":"to","type":"address","indexed":true},{"name":"value","type":"uint256","indexed":false}]}
]"#;

/// Deploy a new `BasicToken`. Returns the predicted address, the deployment
/// transaction hash and a binding to the new contract.
pub async fn deploy_basic_token(
    opts: &TransactOpts,
    transport: Arc<dyn RpcTransport>,
    bytecode: &Bytecode,
) -> Result<(Address, B256, BasicToken), BindError> {
    let abi = ContractAbi::parse(BASIC_TOKEN_ABI)?;
    let (address, tx, contract) = deploy_contract(opts, abi, bytecode, vec![], transport).await?;
    Ok((address, tx, BasicToken::from_bound(contract)))
}

#[derive(Debug, Clone)]
pub struct BasicToken {
    pub caller: BasicTokenCaller,
    pub transactor: BasicTokenTransactor,
    pub filterer: BasicTokenFilterer,
}

impl BasicToken {
    pub fn new(address: Address, transport: Arc<dyn RpcTransport>) -> Result<Self, BindError> {
        Ok(Self::from_bound(bind(BASIC_TOKEN_ABI, address, transport)?))
    }

    fn from_bound(contract: BoundContract) -> Self {
        Self {
            caller: BasicTokenCaller { contract: contract.clone() },
            transactor: BasicTokenTransactor { contract: contract.clone() },
            filterer: BasicTokenFilterer { contract },
        }
    }

    pub fn raw(&self) -> &BoundContract {
        &self.caller.contract
    }
}

#[derive(Debug, Clone)]
pub struct BasicTokenCaller {
    contract: BoundContract,
}

impl BasicTokenCaller {
    pub fn new(address: Address, transport: Arc<dyn RpcTransport>) -> Result<Self, BindError> {
        Ok(Self { contract: bind(BASIC_TOKEN_ABI, address, transport)? })
    }

    pub async fn total_supply(&self, opts: &CallOpts) -> Result<U256, BindError> {
        self.contract.call(opts, "totalSupply", vec![]).await?.take()
    }

    pub async fn balance_of(&self, opts: &CallOpts, owner: Address) -> Result<U256, BindError> {
        self.contract.call(opts, "balanceOf", vec![owner.into_token()]).await?.take()
    }
}

#[derive(Debug, Clone)]
pub struct BasicTokenTransactor {
    contract: BoundContract,
}

impl BasicTokenTransactor {
    pub fn new(address: Address, transport: Arc<dyn RpcTransport>) -> Result<Self, BindError> {
        Ok(Self { contract: bind(BASIC_TOKEN_ABI, address, transport)? })
    }

    pub async fn transfer(&self, opts: &TransactOpts, to: Address, value: U256) -> Result<B256, BindError> {
        self.contract
            .transact(opts, "transfer", vec![to.into_token(), value.into_token()])
            .await
    }
}

#[derive(Debug, Clone)]
pub struct BasicTokenFilterer {
    contract: BoundContract,
}

impl BasicTokenFilterer {
    pub fn new(address: Address, transport: Arc<dyn RpcTransport>) -> Result<Self, BindError> {
        Ok(Self { contract: bind(BASIC_TOKEN_ABI, address, transport)? })
    }

    pub async fn filter_transfer(
        &self,
        opts: &FilterOpts,
        from: &[Address],
        to: &[Address],
    ) -> Result<EventIterator<BasicTokenTransfer>, BindError> {
        self.contract.filter_events(opts, &[rule(from), rule(to)]).await
    }

    pub async fn watch_transfer(
        &self,
        opts: &WatchOpts,
        sink: mpsc::Sender<BasicTokenTransfer>,
        from: &[Address],
        to: &[Address],
    ) -> Result<Subscription, BindError> {
        self.contract.watch_events(opts, sink, &[rule(from), rule(to)]).await
    }

    pub fn parse_transfer(&self, log: &Log) -> Result<BasicTokenTransfer, BindError> {
        BasicTokenTransfer::from_log(self.contract.unpack_log(BasicTokenTransfer::NAME, log)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicTokenTransfer {
    pub from: Address,
    pub to: Address,
    pub value: U256,
    pub raw: Log,
}

impl ContractEvent for BasicTokenTransfer {
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
