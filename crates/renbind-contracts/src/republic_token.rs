//! `RepublicToken`: the REN token. A pausable, burnable `StandardToken`
//! whose owner can hand out tokens from the initial supply.

use std::sync::Arc;

use renbind_core::{
    deploy_contract, Address, BindError, BoundContract, Bytecode, CallOpts, ContractAbi,
    ContractEvent, DecodedLog, EventIterator, FilterOpts, Log, RpcTransport, Subscription,
    TransactOpts, Tokenize, WatchOpts, B256, U256,
};
use tokio::sync::mpsc;

use crate::{bind, rule};

pub const CONTRACT_NAME: &str = "RepublicToken";

pub const REPUBLIC_TOKEN_ABI: &str = r#"[
  {"type":"constructor","inputs":[],"stateMutability":"nonpayable"},
  {"type":"function","name":"name","inputs":[],"outputs":[{"name":"","type":"string"}],"stateMutability":"view"},
  {"type":"function","name":"approve","inputs":[{"name":"_spender","type":"address"},{"name":"_value","type":"uint256"}],"outputs":[{"name":"","type":"bool"}],"stateMutability":"nonpayable"},
  {"type":"function","name":"totalSupply","inputs":[],"outputs":[{"name":"","type":"uint256"}],"stateMutability":"view"},
  {"type":"function","name":"transferFrom","inputs":[{"name":"_from","type":"address"},{"name":"_to","type":"address"},{"name":"_value","type":"uint256"}],"outputs":[{"name":"","type":"bool"}],"stateMutability":"nonpayable"},
  {"type":"function","name":"INITIAL_SUPPLY","inputs":[],"outputs":[{"name":"","type":"uint256"}],"stateMutability":"view"},
  {"type":"function","name":"decimals","inputs":[],"outputs":[{"name":"","type":"uint8"}],"stateMutability":"view"},
  {"type":"function","name":"unpause","inputs":[],"outputs":[],"stateMutability":"nonpayable"},
  {"type":"function","name":"burn","inputs":[{"name":"_value","type":"uint256"}],"outputs":[],"stateMutability":"nonpayable"},
  {"type":"function","name":"paused","inputs":[],"outputs":[{"name":"","type":"bool"}],"stateMutability":"view"},
  {"type":"function","name":"decreaseApproval","inputs":[{"name":"_spender","type":"address"},{"name":"_subtractedValue","type":"uint256"}],"outputs":[{"name":"success","type":"bool"}],"stateMutability":"nonpayable"},
  {"type":"function","name":"balanceOf","inputs":[{"name":"_owner","type":"address"}],"outputs":[{"name":"balance","type":"uint256"}],"stateMutability":"view"},
  {"type":"function","name":"pause","inputs":[],"outputs":[],"stateMutability":"nonpayable"},
  {"type":"function","name":"owner","inputs":[],"outputs":[{"name":"","type":"address"}],"stateMutability":"view"},
  {"type":"function","name":"symbol","inputs":[],"outputs":[{"name":"","type":"string"}],"stateMutability":"view"},
  {"type":"function","name":"transfer","inputs":[{"name":"_to","type":"address"},{"name":"_value","type":"uint256"}],"outputs":[{"name":"","type":"bool"}],"stateMutability":"nonpayable"},
  {"type":"function","name":"transferTokens","inputs":[{"name":"beneficiary","type":"address"},{"name":"amount","type":"uint256"}],"outputs":[{"name":"","type":"bool"}],"stateMutability":"nonpayable"},
  {"type":"function","name":"increaseApproval","inputs":[{"name":"_spender","type":"address"},{"name":"_addedValue","type":"uint256"}],"outputs":[{"name":"success","type":"bool"}],"stateMutability":"nonpayable"},
  {"type":"function","name":"allowance","inputs":[{"name":"_owner","type":"address"},{"name":"_spender","type":"address"}],"outputs":[{"name":"","type":"uint256"}],"stateMutability":"view"},
  {"type":"function","name":"transferOwnership","inputs":[{"name":"newOwner","type":"address"}],"outputs":[],"stateMutability":"nonpayable"},
  {"type":"event","name":"Burn","anonymous":false,"inputs":[{"name":"burner","type":"address","indexed":true},{"name":"value","type":"uint256","indexed":false}]},
  {"type":"event","name":"Pause","anonymous":false,"inputs":[]},
  {"type":"event","name":"Unpause","anonymous":false,"inputs":[]},
  {"type":"event","name":"OwnershipTransferred","anonymous":false,"inputs":[{"name":"previousOwner","type":"address","indexed":true},{"name":"newOwner","type":"address","indexed":true}]},
  {"type":"event","name":"Approval","anonymous":false,"inputs":[{"name":"owner","type":"address","indexed":true},{"name":"spender","type":"address","indexed":true},{"name":"value","type":"uint256","indexed":false}]},
  {"type":"event","name":"Transfer","anonymous":false,"inputs":[{"name":"from","type":"address","indexed":true},{"name":"to","type":"address","indexed":true},{"name":"value","type":"uint256","indexed":false}]}
]"#;

/// Deploy a new `RepublicToken`; the sender becomes owner and holds the
/// whole initial supply.
pub async fn deploy_republic_token(
    opts: &TransactOpts,
    transport: Arc<dyn RpcTransport>,
    bytecode: &Bytecode,
) -> Result<(Address, B256, RepublicToken), BindError> {
    let abi = ContractAbi::parse(REPUBLIC_TOKEN_ABI)?;
    let (address, tx, contract) = deploy_contract(opts, abi, bytecode, vec![], transport).await?;
    Ok((address, tx, RepublicToken::from_bound(contract)))
}

#[derive(Debug, Clone)]
pub struct RepublicToken {
    pub caller: RepublicTokenCaller,
    pub transactor: RepublicTokenTransactor,
    pub filterer: RepublicTokenFilterer,
}

impl RepublicToken {
    pub fn new(address: Address, transport: Arc<dyn RpcTransport>) -> Result<Self, BindError> {
        Ok(Self::from_bound(bind(REPUBLIC_TOKEN_ABI, address, transport)?))
    }

    fn from_bound(contract: BoundContract) -> Self {
        Self {
            caller: RepublicTokenCaller { contract: contract.clone() },
            transactor: RepublicTokenTransactor { contract: contract.clone() },
            filterer: RepublicTokenFilterer { contract },
        }
    }

    pub fn raw(&self) -> &BoundContract {
        &self.caller.contract
    }
}

#[derive(Debug, Clone)]
pub struct RepublicTokenCaller {
    contract: BoundContract,
}

impl RepublicTokenCaller {
    pub fn new(address: Address, transport: Arc<dyn RpcTransport>) -> Result<Self, BindError> {
        Ok(Self { contract: bind(REPUBLIC_TOKEN_ABI, address, transport)? })
    }

    pub async fn name(&self, opts: &CallOpts) -> Result<String, BindError> {
        self.contract.call(opts, "name", vec![]).await?.take()
    }

    pub async fn symbol(&self, opts: &CallOpts) -> Result<String, BindError> {
        self.contract.call(opts, "symbol", vec![]).await?.take()
    }

    pub async fn decimals(&self, opts: &CallOpts) -> Result<u8, BindError> {
        self.contract.call(opts, "decimals", vec![]).await?.take()
    }

    /// `INITIAL_SUPPLY() view returns (uint256)`
    pub async fn initial_supply(&self, opts: &CallOpts) -> Result<U256, BindError> {
        self.contract.call(opts, "INITIAL_SUPPLY", vec![]).await?.take()
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

    pub async fn paused(&self, opts: &CallOpts) -> Result<bool, BindError> {
        self.contract.call(opts, "paused", vec![]).await?.take()
    }

    pub async fn owner(&self, opts: &CallOpts) -> Result<Address, BindError> {
        self.contract.call(opts, "owner", vec![]).await?.take()
    }
}

#[derive(Debug, Clone)]
pub struct RepublicTokenTransactor {
    contract: BoundContract,
}

impl RepublicTokenTransactor {
    pub fn new(address: Address, transport: Arc<dyn RpcTransport>) -> Result<Self, BindError> {
        Ok(Self { contract: bind(REPUBLIC_TOKEN_ABI, address, transport)? })
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

    /// Burn `value` of the sender's tokens.
    pub async fn burn(&self, opts: &TransactOpts, value: U256) -> Result<B256, BindError> {
        self.contract.transact(opts, "burn", vec![value.into_token()]).await
    }

    /// Owner-only transfer that works while the token is paused.
    pub async fn transfer_tokens(
        &self,
        opts: &TransactOpts,
        beneficiary: Address,
        amount: U256,
    ) -> Result<B256, BindError> {
        self.contract
            .transact(opts, "transferTokens", vec![beneficiary.into_token(), amount.into_token()])
            .await
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
pub struct RepublicTokenFilterer {
    contract: BoundContract,
}

impl RepublicTokenFilterer {
    pub fn new(address: Address, transport: Arc<dyn RpcTransport>) -> Result<Self, BindError> {
        Ok(Self { contract: bind(REPUBLIC_TOKEN_ABI, address, transport)? })
    }

    pub async fn filter_burn(
        &self,
        opts: &FilterOpts,
        burner: &[Address],
    ) -> Result<EventIterator<RepublicTokenBurn>, BindError> {
        self.contract.filter_events(opts, &[rule(burner)]).await
    }

    pub async fn watch_burn(
        &self,
        opts: &WatchOpts,
        sink: mpsc::Sender<RepublicTokenBurn>,
        burner: &[Address],
    ) -> Result<Subscription, BindError> {
        self.contract.watch_events(opts, sink, &[rule(burner)]).await
    }

    pub fn parse_burn(&self, log: &Log) -> Result<RepublicTokenBurn, BindError> {
        RepublicTokenBurn::from_log(self.contract.unpack_log(RepublicTokenBurn::NAME, log)?)
    }

    pub async fn filter_pause(&self, opts: &FilterOpts) -> Result<EventIterator<RepublicTokenPause>, BindError> {
        self.contract.filter_events(opts, &[]).await
    }

    pub async fn watch_pause(
        &self,
        opts: &WatchOpts,
        sink: mpsc::Sender<RepublicTokenPause>,
    ) -> Result<Subscription, BindError> {
        self.contract.watch_events(opts, sink, &[]).await
    }

    pub fn parse_pause(&self, log: &Log) -> Result<RepublicTokenPause, BindError> {
        RepublicTokenPause::from_log(self.contract.unpack_log(RepublicTokenPause::NAME, log)?)
    }

    pub async fn filter_unpause(&self, opts: &FilterOpts) -> Result<EventIterator<RepublicTokenUnpause>, BindError> {
        self.contract.filter_events(opts, &[]).await
    }

    pub async fn watch_unpause(
        &self,
        opts: &WatchOpts,
        sink: mpsc::Sender<RepublicTokenUnpause>,
    ) -> Result<Subscription, BindError> {
        self.contract.watch_events(opts, sink, &[]).await
    }

    pub fn parse_unpause(&self, log: &Log) -> Result<RepublicTokenUnpause, BindError> {
        RepublicTokenUnpause::from_log(self.contract.unpack_log(RepublicTokenUnpause::NAME, log)?)
    }

    pub async fn filter_ownership_transferred(
        &self,
        opts: &FilterOpts,
        previous_owner: &[Address],
        new_owner: &[Address],
    ) -> Result<EventIterator<RepublicTokenOwnershipTransferred>, BindError> {
        self.contract
            .filter_events(opts, &[rule(previous_owner), rule(new_owner)])
            .await
    }

    pub async fn watch_ownership_transferred(
        &self,
        opts: &WatchOpts,
        sink: mpsc::Sender<RepublicTokenOwnershipTransferred>,
        previous_owner: &[Address],
        new_owner: &[Address],
    ) -> Result<Subscription, BindError> {
        self.contract
            .watch_events(opts, sink, &[rule(previous_owner), rule(new_owner)])
            .await
    }

    pub fn parse_ownership_transferred(&self, log: &Log) -> Result<RepublicTokenOwnershipTransferred, BindError> {
        RepublicTokenOwnershipTransferred::from_log(
            self.contract.unpack_log(RepublicTokenOwnershipTransferred::NAME, log)?,
        )
    }

    pub async fn filter_approval(
        &self,
        opts: &FilterOpts,
        owner: &[Address],
        spender: &[Address],
    ) -> Result<EventIterator<RepublicTokenApproval>, BindError> {
        self.contract.filter_events(opts, &[rule(owner), rule(spender)]).await
    }

    pub async fn watch_approval(
        &self,
        opts: &WatchOpts,
        sink: mpsc::Sender<RepublicTokenApproval>,
        owner: &[Address],
        spender: &[Address],
    ) -> Result<Subscription, BindError> {
        self.contract.watch_events(opts, sink, &[rule(owner), rule(spender)]).await
    }

    pub fn parse_approval(&self, log: &Log) -> Result<RepublicTokenApproval, BindError> {
        RepublicTokenApproval::from_log(self.contract.unpack_log(RepublicTokenApproval::NAME, log)?)
    }

    pub async fn filter_transfer(
        &self,
        opts: &FilterOpts,
        from: &[Address],
        to: &[Address],
    ) -> Result<EventIterator<RepublicTokenTransfer>, BindError> {
        self.contract.filter_events(opts, &[rule(from), rule(to)]).await
    }

    pub async fn watch_transfer(
        &self,
        opts: &WatchOpts,
        sink: mpsc::Sender<RepublicTokenTransfer>,
        from: &[Address],
        to: &[Address],
    ) -> Result<Subscription, BindError> {
        self.contract.watch_events(opts, sink, &[rule(from), rule(to)]).await
    }

    pub fn parse_transfer(&self, log: &Log) -> Result<RepublicTokenTransfer, BindError> {
        RepublicTokenTransfer::from_log(self.contract.unpack_log(RepublicTokenTransfer::NAME, log)?)
    }
}

/// `Burn(address indexed burner, uint256 value)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepublicTokenBurn {
    pub burner: Address,
    pub value: U256,
    pub raw: Log,
}

impl ContractEvent for RepublicTokenBurn {
    const NAME: &'static str = "Burn";

    fn from_log(mut log: DecodedLog) -> Result<Self, BindError> {
        Ok(Self {
            burner: log.fields.take()?,
            value: log.fields.take()?,
            raw: log.raw,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepublicTokenPause {
    pub raw: Log,
}

impl ContractEvent for RepublicTokenPause {
    const NAME: &'static str = "Pause";

    fn from_log(log: DecodedLog) -> Result<Self, BindError> {
        Ok(Self { raw: log.raw })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepublicTokenUnpause {
    pub raw: Log,
}

impl ContractEvent for RepublicTokenUnpause {
    const NAME: &'static str = "Unpause";

    fn from_log(log: DecodedLog) -> Result<Self, BindError> {
        Ok(Self { raw: log.raw })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepublicTokenOwnershipTransferred {
    pub previous_owner: Address,
    pub new_owner: Address,
    pub raw: Log,
}

impl ContractEvent for RepublicTokenOwnershipTransferred {
    const NAME: &'static str = "OwnershipTransferred";

    fn from_log(mut log: DecodedLog) -> Result<Self, BindError> {
        Ok(Self {
            previous_owner: log.fields.take()?,
            new_owner: log.fields.take()?,
            raw: log.raw,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepublicTokenApproval {
    pub owner: Address,
    pub spender: Address,
    pub value: U256,
    pub raw: Log,
}

impl ContractEvent for RepublicTokenApproval {
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
pub struct RepublicTokenTransfer {
    pub from: Address,
    pub to: Address,
    pub value: U256,
    pub raw: Log,
}

impl ContractEvent for RepublicTokenTransfer {
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
