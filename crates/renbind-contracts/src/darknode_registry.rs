//! `DarknodeRegistry`: darknodes bond REN to register, and registrations
//! take effect at epoch boundaries.
//!
//! A darknode is identified by the 20-byte hash of its public key. Calls to
//! `register` need a prior `approve` of the bond on the REN token.

use std::sync::Arc;

use renbind_core::{
    deploy_contract, Address, BindError, BoundContract, Bytecode, Bytes, CallOpts, ContractAbi,
    ContractEvent, DecodedLog, EventIterator, FilterOpts, FixedBytes, Log, RpcTransport,
    Subscription, TransactOpts, Tokenize, WatchOpts, B256, U256,
};
use tokio::sync::mpsc;

use crate::bind;

pub const CONTRACT_NAME: &str = "DarknodeRegistry";

pub const DARKNODE_REGISTRY_ABI: &str = r#"[
  {"type":"constructor","inputs":[{"name":"_token","type":"address"},{"name":"_minimumBond","type":"uint256"},{"name":"_minimumDarkPoolSize","type":"uint256"},{"name":"_minimumEpochInterval","type":"uint256"}],"stateMutability":"nonpayable"},
  {"type":"function","name":"register","inputs":[{"name":"_darknodeID","type":"bytes20"},{"name":"_publicKey","type":"bytes"},{"name":"_bond","type":"uint256"}],"outputs":[],"stateMutability":"nonpayable"},
  {"type":"function","name":"deregister","inputs":[{"name":"_darknodeID","type":"bytes20"}],"outputs":[],"stateMutability":"nonpayable"},
  {"type":"function","name":"refund","inputs":[{"name":"_darknodeID","type":"bytes20"}],"outputs":[],"stateMutability":"nonpayable"},
  {"type":"function","name":"epoch","inputs":[],"outputs":[],"stateMutability":"nonpayable"},
  {"type":"function","name":"getOwner","inputs":[{"name":"_darknodeID","type":"bytes20"}],"outputs":[{"name":"","type":"address"}],"stateMutability":"view"},
  {"type":"function","name":"getBond","inputs":[{"name":"_darknodeID","type":"bytes20"}],"outputs":[{"name":"","type":"uint256"}],"stateMutability":"view"},
  {"type":"function","name":"getPublicKey","inputs":[{"name":"_darknodeID","type":"bytes20"}],"outputs":[{"name":"","type":"bytes"}],"stateMutability":"view"},
  {"type":"function","name":"getDarknodes","inputs":[],"outputs":[{"name":"","type":"bytes20[]"}],"stateMutability":"view"},
  {"type":"function","name":"isRegistered","inputs":[{"name":"_darknodeID","type":"bytes20"}],"outputs":[{"name":"","type":"bool"}],"stateMutability":"view"},
  {"type":"function","name":"isDeregistered","inputs":[{"name":"_darknodeID","type":"bytes20"}],"outputs":[{"name":"","type":"bool"}],"stateMutability":"view"},
  {"type":"function","name":"isUnregistered","inputs":[{"name":"_darknodeID","type":"bytes20"}],"outputs":[{"name":"","type":"bool"}],"stateMutability":"view"},
  {"type":"function","name":"minimumBond","inputs":[],"outputs":[{"name":"","type":"uint256"}],"stateMutability":"view"},
  {"type":"function","name":"minimumDarkPoolSize","inputs":[],"outputs":[{"name":"","type":"uint256"}],"stateMutability":"view"},
  {"type":"function","name":"minimumEpochInterval","inputs":[],"outputs":[{"name":"","type":"uint256"}],"stateMutability":"view"},
  {"type":"function","name":"numDarknodes","inputs":[],"outputs":[{"name":"","type":"uint256"}],"stateMutability":"view"},
  {"type":"function","name":"numDarknodesNextEpoch","inputs":[],"outputs":[{"name":"","type":"uint256"}],"stateMutability":"view"},
  {"type":"function","name":"currentEpoch","inputs":[],"outputs":[{"name":"epochhash","type":"uint256"},{"name":"blocknumber","type":"uint256"}],"stateMutability":"view"},
  {"type":"event","name":"Registered","anonymous":false,"inputs":[{"name":"_darknodeID","type":"bytes20","indexed":false},{"name":"_bond","type":"uint256","indexed":false}]},
  {"type":"event","name":"Deregistered","anonymous":false,"inputs":[{"name":"_darknodeID","type":"bytes20","indexed":false}]},
  {"type":"event","name":"OwnerRefunded","anonymous":false,"inputs":[{"name":"_owner","type":"address","indexed":false},{"name":"_amount","type":"uint256","indexed":false}]},
  {"type":"event","name":"NewEpoch","anonymous":false,"inputs":[]}
]"#;

/// Darknode identifier (`bytes20`).
pub type DarknodeId = FixedBytes<20>;

/// Return value of `currentEpoch()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Epoch {
    pub epochhash: U256,
    pub blocknumber: U256,
}

/// Deploy a new registry bonding in the REN token at `token`.
pub async fn deploy_darknode_registry(
    opts: &TransactOpts,
    transport: Arc<dyn RpcTransport>,
    bytecode: &Bytecode,
    token: Address,
    minimum_bond: U256,
    minimum_dark_pool_size: U256,
    minimum_epoch_interval: U256,
) -> Result<(Address, B256, DarknodeRegistry), BindError> {
    let abi = ContractAbi::parse(DARKNODE_REGISTRY_ABI)?;
    let args = vec![
        token.into_token(),
        minimum_bond.into_token(),
        minimum_dark_pool_size.into_token(),
        minimum_epoch_interval.into_token(),
    ];
    let (address, tx, contract) = deploy_contract(opts, abi, bytecode, args, transport).await?;
    Ok((address, tx, DarknodeRegistry::from_bound(contract)))
}

#[derive(Debug, Clone)]
pub struct DarknodeRegistry {
    pub caller: DarknodeRegistryCaller,
    pub transactor: DarknodeRegistryTransactor,
    pub filterer: DarknodeRegistryFilterer,
}

impl DarknodeRegistry {
    pub fn new(address: Address, transport: Arc<dyn RpcTransport>) -> Result<Self, BindError> {
        Ok(Self::from_bound(bind(DARKNODE_REGISTRY_ABI, address, transport)?))
    }

    fn from_bound(contract: BoundContract) -> Self {
        Self {
            caller: DarknodeRegistryCaller { contract: contract.clone() },
            transactor: DarknodeRegistryTransactor { contract: contract.clone() },
            filterer: DarknodeRegistryFilterer { contract },
        }
    }

    pub fn raw(&self) -> &BoundContract {
        &self.caller.contract
    }
}

#[derive(Debug, Clone)]
pub struct DarknodeRegistryCaller {
    contract: BoundContract,
}

impl DarknodeRegistryCaller {
    pub fn new(address: Address, transport: Arc<dyn RpcTransport>) -> Result<Self, BindError> {
        Ok(Self { contract: bind(DARKNODE_REGISTRY_ABI, address, transport)? })
    }

    pub async fn get_owner(&self, opts: &CallOpts, darknode_id: DarknodeId) -> Result<Address, BindError> {
        self.contract.call(opts, "getOwner", vec![darknode_id.into_token()]).await?.take()
    }

    pub async fn get_bond(&self, opts: &CallOpts, darknode_id: DarknodeId) -> Result<U256, BindError> {
        self.contract.call(opts, "getBond", vec![darknode_id.into_token()]).await?.take()
    }

    pub async fn get_public_key(&self, opts: &CallOpts, darknode_id: DarknodeId) -> Result<Bytes, BindError> {
        self.contract
            .call(opts, "getPublicKey", vec![darknode_id.into_token()])
            .await?
            .take()
    }

    /// Darknodes registered in the current epoch.
    pub async fn get_darknodes(&self, opts: &CallOpts) -> Result<Vec<DarknodeId>, BindError> {
        self.contract.call(opts, "getDarknodes", vec![]).await?.take()
    }

    pub async fn is_registered(&self, opts: &CallOpts, darknode_id: DarknodeId) -> Result<bool, BindError> {
        self.contract
            .call(opts, "isRegistered", vec![darknode_id.into_token()])
            .await?
            .take()
    }

    pub async fn is_deregistered(&self, opts: &CallOpts, darknode_id: DarknodeId) -> Result<bool, BindError> {
        self.contract
            .call(opts, "isDeregistered", vec![darknode_id.into_token()])
            .await?
            .take()
    }

    pub async fn is_unregistered(&self, opts: &CallOpts, darknode_id: DarknodeId) -> Result<bool, BindError> {
        self.contract
            .call(opts, "isUnregistered", vec![darknode_id.into_token()])
            .await?
            .take()
    }

    pub async fn minimum_bond(&self, opts: &CallOpts) -> Result<U256, BindError> {
        self.contract.call(opts, "minimumBond", vec![]).await?.take()
    }

    pub async fn minimum_dark_pool_size(&self, opts: &CallOpts) -> Result<U256, BindError> {
        self.contract.call(opts, "minimumDarkPoolSize", vec![]).await?.take()
    }

    pub async fn minimum_epoch_interval(&self, opts: &CallOpts) -> Result<U256, BindError> {
        self.contract.call(opts, "minimumEpochInterval", vec![]).await?.take()
    }

    pub async fn num_darknodes(&self, opts: &CallOpts) -> Result<U256, BindError> {
        self.contract.call(opts, "numDarknodes", vec![]).await?.take()
    }

    pub async fn num_darknodes_next_epoch(&self, opts: &CallOpts) -> Result<U256, BindError> {
        self.contract.call(opts, "numDarknodesNextEpoch", vec![]).await?.take()
    }

    pub async fn current_epoch(&self, opts: &CallOpts) -> Result<Epoch, BindError> {
        let mut out = self.contract.call(opts, "currentEpoch", vec![]).await?;
        Ok(Epoch {
            epochhash: out.take()?,
            blocknumber: out.take()?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct DarknodeRegistryTransactor {
    contract: BoundContract,
}

impl DarknodeRegistryTransactor {
    pub fn new(address: Address, transport: Arc<dyn RpcTransport>) -> Result<Self, BindError> {
        Ok(Self { contract: bind(DARKNODE_REGISTRY_ABI, address, transport)? })
    }

    /// Register a darknode, bonding `bond` REN from the sender. Takes effect
    /// at the next epoch.
    pub async fn register(
        &self,
        opts: &TransactOpts,
        darknode_id: DarknodeId,
        public_key: Bytes,
        bond: U256,
    ) -> Result<B256, BindError> {
        self.contract
            .transact(
                opts,
                "register",
                vec![darknode_id.into_token(), public_key.into_token(), bond.into_token()],
            )
            .await
    }

    pub async fn deregister(&self, opts: &TransactOpts, darknode_id: DarknodeId) -> Result<B256, BindError> {
        self.contract.transact(opts, "deregister", vec![darknode_id.into_token()]).await
    }

    /// Return the bond of a deregistered darknode to its owner.
    pub async fn refund(&self, opts: &TransactOpts, darknode_id: DarknodeId) -> Result<B256, BindError> {
        self.contract.transact(opts, "refund", vec![darknode_id.into_token()]).await
    }

    /// Start a new epoch once `minimumEpochInterval` blocks have passed.
    pub async fn epoch(&self, opts: &TransactOpts) -> Result<B256, BindError> {
        self.contract.transact(opts, "epoch", vec![]).await
    }
}

// No event argument is indexed, so the filters take no topic rules.
#[derive(Debug, Clone)]
pub struct DarknodeRegistryFilterer {
    contract: BoundContract,
}

impl DarknodeRegistryFilterer {
    pub fn new(address: Address, transport: Arc<dyn RpcTransport>) -> Result<Self, BindError> {
        Ok(Self { contract: bind(DARKNODE_REGISTRY_ABI, address, transport)? })
    }

    pub async fn filter_registered(
        &self,
        opts: &FilterOpts,
    ) -> Result<EventIterator<DarknodeRegistryRegistered>, BindError> {
        self.contract.filter_events(opts, &[]).await
    }

    pub async fn watch_registered(
        &self,
        opts: &WatchOpts,
        sink: mpsc::Sender<DarknodeRegistryRegistered>,
    ) -> Result<Subscription, BindError> {
        self.contract.watch_events(opts, sink, &[]).await
    }

    pub fn parse_registered(&self, log: &Log) -> Result<DarknodeRegistryRegistered, BindError> {
        DarknodeRegistryRegistered::from_log(self.contract.unpack_log(DarknodeRegistryRegistered::NAME, log)?)
    }

    pub async fn filter_deregistered(
        &self,
        opts: &FilterOpts,
    ) -> Result<EventIterator<DarknodeRegistryDeregistered>, BindError> {
        self.contract.filter_events(opts, &[]).await
    }

    pub async fn watch_deregistered(
        &self,
        opts: &WatchOpts,
        sink: mpsc::Sender<DarknodeRegistryDeregistered>,
    ) -> Result<Subscription, BindError> {
        self.contract.watch_events(opts, sink, &[]).await
    }

    pub fn parse_deregistered(&self, log: &Log) -> Result<DarknodeRegistryDeregistered, BindError> {
        DarknodeRegistryDeregistered::from_log(
            self.contract.unpack_log(DarknodeRegistryDeregistered::NAME, log)?,
        )
    }

    pub async fn filter_owner_refunded(
        &self,
        opts: &FilterOpts,
    ) -> Result<EventIterator<DarknodeRegistryOwnerRefunded>, BindError> {
        self.contract.filter_events(opts, &[]).await
    }

    pub async fn watch_owner_refunded(
        &self,
        opts: &WatchOpts,
        sink: mpsc::Sender<DarknodeRegistryOwnerRefunded>,
    ) -> Result<Subscription, BindError> {
        self.contract.watch_events(opts, sink, &[]).await
    }

    pub fn parse_owner_refunded(&self, log: &Log) -> Result<DarknodeRegistryOwnerRefunded, BindError> {
        DarknodeRegistryOwnerRefunded::from_log(
            self.contract.unpack_log(DarknodeRegistryOwnerRefunded::NAME, log)?,
        )
    }

    pub async fn filter_new_epoch(
        &self,
        opts: &FilterOpts,
    ) -> Result<EventIterator<DarknodeRegistryNewEpoch>, BindError> {
        self.contract.filter_events(opts, &[]).await
    }

    pub async fn watch_new_epoch(
        &self,
        opts: &WatchOpts,
        sink: mpsc::Sender<DarknodeRegistryNewEpoch>,
    ) -> Result<Subscription, BindError> {
        self.contract.watch_events(opts, sink, &[]).await
    }

    pub fn parse_new_epoch(&self, log: &Log) -> Result<DarknodeRegistryNewEpoch, BindError> {
        DarknodeRegistryNewEpoch::from_log(self.contract.unpack_log(DarknodeRegistryNewEpoch::NAME, log)?)
    }
}

/// `Registered(bytes20 _darknodeID, uint256 _bond)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DarknodeRegistryRegistered {
    pub darknode_id: DarknodeId,
    pub bond: U256,
    pub raw: Log,
}

impl ContractEvent for DarknodeRegistryRegistered {
    const NAME: &'static str = "Registered";

    fn from_log(mut log: DecodedLog) -> Result<Self, BindError> {
        Ok(Self {
            darknode_id: log.fields.take()?,
            bond: log.fields.take()?,
            raw: log.raw,
        })
    }
}

/// `Deregistered(bytes20 _darknodeID)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DarknodeRegistryDeregistered {
    pub darknode_id: DarknodeId,
    pub raw: Log,
}

impl ContractEvent for DarknodeRegistryDeregistered {
    const NAME: &'static str = "Deregistered";

    fn from_log(mut log: DecodedLog) -> Result<Self, BindError> {
        Ok(Self {
            darknode_id: log.fields.take()?,
            raw: log.raw,
        })
    }
}

/// `OwnerRefunded(address _owner, uint256 _amount)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DarknodeRegistryOwnerRefunded {
    pub owner: Address,
    pub amount: U256,
    pub raw: Log,
}

impl ContractEvent for DarknodeRegistryOwnerRefunded {
    const NAME: &'static str = "OwnerRefunded";

    fn from_log(mut log: DecodedLog) -> Result<Self, BindError> {
        Ok(Self {
            owner: log.fields.take()?,
            amount: log.fields.take()?,
            raw: log.raw,
        })
    }
}

/// `NewEpoch()`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DarknodeRegistryNewEpoch {
    pub raw: Log,
}

impl ContractEvent for DarknodeRegistryNewEpoch {
    const NAME: &'static str = "NewEpoch";

    fn from_log(log: DecodedLog) -> Result<Self, BindError> {
        Ok(Self { raw: log.raw })
    }
}
