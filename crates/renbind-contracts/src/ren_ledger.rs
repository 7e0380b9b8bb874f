//! `RenLedger`: the on-chain order book. Traders open buy and sell orders
//! by order ID (paying a REN fee), darknodes confirm matches between them.

use std::sync::Arc;

use renbind_core::{
    deploy_contract, Address, BindError, BoundContract, Bytecode, Bytes, CallOpts, ContractAbi,
    ContractEvent, DecodedLog, EventIterator, FilterOpts, Log, RpcTransport, Subscription,
    TransactOpts, Tokenize, WatchOpts, B256, U256,
};
use tokio::sync::mpsc;

use crate::{bind, rule};

pub const CONTRACT_NAME: &str = "RenLedger";

pub const REN_LEDGER_ABI: &str = r#"[
  {"type":"constructor","inputs":[{"name":"_fee","type":"uint256"},{"name":"_ren","type":"address"},{"name":"_darknodeRegistry","type":"address"}],"stateMutability":"nonpayable"},
  {"type":"function","name":"fee","inputs":[],"outputs":[{"name":"","type":"uint256"}],"stateMutability":"view"},
  {"type":"function","name":"openBuyOrder","inputs":[{"name":"_signature","type":"bytes"},{"name":"_orderId","type":"bytes32"}],"outputs":[],"stateMutability":"nonpayable"},
  {"type":"function","name":"openSellOrder","inputs":[{"name":"_signature","type":"bytes"},{"name":"_orderId","type":"bytes32"}],"outputs":[],"stateMutability":"nonpayable"},
  {"type":"function","name":"cancelOrder","inputs":[{"name":"_signature","type":"bytes"},{"name":"_orderId","type":"bytes32"}],"outputs":[],"stateMutability":"nonpayable"},
  {"type":"function","name":"confirmOrder","inputs":[{"name":"_orderId","type":"bytes32"},{"name":"_orderMatches","type":"bytes32[]"}],"outputs":[],"stateMutability":"nonpayable"},
  {"type":"function","name":"buyOrder","inputs":[{"name":"_index","type":"uint256"}],"outputs":[{"name":"","type":"bytes32"},{"name":"","type":"bool"}],"stateMutability":"view"},
  {"type":"function","name":"sellOrder","inputs":[{"name":"_index","type":"uint256"}],"outputs":[{"name":"","type":"bytes32"},{"name":"","type":"bool"}],"stateMutability":"view"},
  {"type":"function","name":"getOrder","inputs":[{"name":"_index","type":"uint256"}],"outputs":[{"name":"","type":"bytes32"},{"name":"","type":"bool"}],"stateMutability":"view"},
  {"type":"function","name":"getOrdersCount","inputs":[],"outputs":[{"name":"","type":"uint256"}],"stateMutability":"view"},
  {"type":"function","name":"orderState","inputs":[{"name":"_orderId","type":"bytes32"}],"outputs":[{"name":"","type":"uint8"}],"stateMutability":"view"},
  {"type":"function","name":"orderMatch","inputs":[{"name":"_orderId","type":"bytes32"}],"outputs":[{"name":"","type":"bytes32[]"}],"stateMutability":"view"},
  {"type":"function","name":"orderPriority","inputs":[{"name":"_orderId","type":"bytes32"}],"outputs":[{"name":"","type":"uint256"}],"stateMutability":"view"},
  {"type":"function","name":"orderTrader","inputs":[{"name":"_orderId","type":"bytes32"}],"outputs":[{"name":"","type":"address"}],"stateMutability":"view"},
  {"type":"function","name":"orderBroker","inputs":[{"name":"_orderId","type":"bytes32"}],"outputs":[{"name":"","type":"address"}],"stateMutability":"view"},
  {"type":"function","name":"orderConfirmer","inputs":[{"name":"_orderId","type":"bytes32"}],"outputs":[{"name":"","type":"address"}],"stateMutability":"view"},
  {"type":"function","name":"orderDepth","inputs":[{"name":"_orderId","type":"bytes32"}],"outputs":[{"name":"","type":"uint256"}],"stateMutability":"view"},
  {"type":"function","name":"orderBlockNumber","inputs":[{"name":"_orderId","type":"bytes32"}],"outputs":[{"name":"","type":"uint256"}],"stateMutability":"view"},
  {"type":"event","name":"OrderOpened","anonymous":false,"inputs":[{"name":"orderId","type":"bytes32","indexed":true},{"name":"orderType","type":"uint8","indexed":false},{"name":"trader","type":"address","indexed":true}]},
  {"type":"event","name":"OrderConfirmed","anonymous":false,"inputs":[{"name":"orderId","type":"bytes32","indexed":true},{"name":"orderMatches","type":"bytes32[]","indexed":false}]},
  {"type":"event","name":"OrderCanceled","anonymous":false,"inputs":[{"name":"orderId","type":"bytes32","indexed":true}]}
]"#;

/// Values of `orderState(bytes32)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum OrderState {
    Undefined = 0,
    Open = 1,
    Confirmed = 2,
    Canceled = 3,
}

impl TryFrom<u8> for OrderState {
    type Error = BindError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Undefined),
            1 => Ok(Self::Open),
            2 => Ok(Self::Confirmed),
            3 => Ok(Self::Canceled),
            other => Err(BindError::Decode {
                name: "orderState".into(),
                reason: format!("unknown order state {other}"),
            }),
        }
    }
}

pub async fn deploy_ren_ledger(
    opts: &TransactOpts,
    transport: Arc<dyn RpcTransport>,
    bytecode: &Bytecode,
    fee: U256,
    ren: Address,
    darknode_registry: Address,
) -> Result<(Address, B256, RenLedger), BindError> {
    let abi = ContractAbi::parse(REN_LEDGER_ABI)?;
    let args = vec![fee.into_token(), ren.into_token(), darknode_registry.into_token()];
    let (address, tx, contract) = deploy_contract(opts, abi, bytecode, args, transport).await?;
    Ok((address, tx, RenLedger::from_bound(contract)))
}

#[derive(Debug, Clone)]
pub struct RenLedger {
    pub caller: RenLedgerCaller,
    pub transactor: RenLedgerTransactor,
    pub filterer: RenLedgerFilterer,
}

impl RenLedger {
    pub fn new(address: Address, transport: Arc<dyn RpcTransport>) -> Result<Self, BindError> {
        Ok(Self::from_bound(bind(REN_LEDGER_ABI, address, transport)?))
    }

    fn from_bound(contract: BoundContract) -> Self {
        Self {
            caller: RenLedgerCaller { contract: contract.clone() },
            transactor: RenLedgerTransactor { contract: contract.clone() },
            filterer: RenLedgerFilterer { contract },
        }
    }

    pub fn raw(&self) -> &BoundContract {
        &self.caller.contract
    }
}

#[derive(Debug, Clone)]
pub struct RenLedgerCaller {
    contract: BoundContract,
}

impl RenLedgerCaller {
    pub fn new(address: Address, transport: Arc<dyn RpcTransport>) -> Result<Self, BindError> {
        Ok(Self { contract: bind(REN_LEDGER_ABI, address, transport)? })
    }

    /// REN fee charged for opening an order.
    pub async fn fee(&self, opts: &CallOpts) -> Result<U256, BindError> {
        self.contract.call(opts, "fee", vec![]).await?.take()
    }

    /// The `index`-th buy order: `(orderId, exists)`.
    pub async fn buy_order(&self, opts: &CallOpts, index: U256) -> Result<(B256, bool), BindError> {
        self.indexed_order(opts, "buyOrder", index).await
    }

    /// The `index`-th sell order: `(orderId, exists)`.
    pub async fn sell_order(&self, opts: &CallOpts, index: U256) -> Result<(B256, bool), BindError> {
        self.indexed_order(opts, "sellOrder", index).await
    }

    /// The `index`-th order of either side: `(orderId, exists)`.
    pub async fn get_order(&self, opts: &CallOpts, index: U256) -> Result<(B256, bool), BindError> {
        self.indexed_order(opts, "getOrder", index).await
    }

    pub async fn get_orders_count(&self, opts: &CallOpts) -> Result<U256, BindError> {
        self.contract.call(opts, "getOrdersCount", vec![]).await?.take()
    }

    /// Raw `orderState`; see [`OrderState`].
    pub async fn order_state(&self, opts: &CallOpts, order_id: B256) -> Result<u8, BindError> {
        self.contract.call(opts, "orderState", vec![order_id.into_token()]).await?.take()
    }

    pub async fn order_match(&self, opts: &CallOpts, order_id: B256) -> Result<Vec<B256>, BindError> {
        self.contract.call(opts, "orderMatch", vec![order_id.into_token()]).await?.take()
    }

    pub async fn order_priority(&self, opts: &CallOpts, order_id: B256) -> Result<U256, BindError> {
        self.contract.call(opts, "orderPriority", vec![order_id.into_token()]).await?.take()
    }

    pub async fn order_trader(&self, opts: &CallOpts, order_id: B256) -> Result<Address, BindError> {
        self.contract.call(opts, "orderTrader", vec![order_id.into_token()]).await?.take()
    }

    pub async fn order_broker(&self, opts: &CallOpts, order_id: B256) -> Result<Address, BindError> {
        self.contract.call(opts, "orderBroker", vec![order_id.into_token()]).await?.take()
    }

    pub async fn order_confirmer(&self, opts: &CallOpts, order_id: B256) -> Result<Address, BindError> {
        self.contract.call(opts, "orderConfirmer", vec![order_id.into_token()]).await?.take()
    }

    pub async fn order_depth(&self, opts: &CallOpts, order_id: B256) -> Result<U256, BindError> {
        self.contract.call(opts, "orderDepth", vec![order_id.into_token()]).await?.take()
    }

    pub async fn order_block_number(&self, opts: &CallOpts, order_id: B256) -> Result<U256, BindError> {
        self.contract
            .call(opts, "orderBlockNumber", vec![order_id.into_token()])
            .await?
            .take()
    }

    async fn indexed_order(&self, opts: &CallOpts, method: &str, index: U256) -> Result<(B256, bool), BindError> {
        let mut out = self.contract.call(opts, method, vec![index.into_token()]).await?;
        Ok((out.take()?, out.take()?))
    }
}

#[derive(Debug, Clone)]
pub struct RenLedgerTransactor {
    contract: BoundContract,
}

impl RenLedgerTransactor {
    pub fn new(address: Address, transport: Arc<dyn RpcTransport>) -> Result<Self, BindError> {
        Ok(Self { contract: bind(REN_LEDGER_ABI, address, transport)? })
    }

    /// `signature` is the trader's signature over the order ID.
    pub async fn open_buy_order(&self, opts: &TransactOpts, signature: Bytes, order_id: B256) -> Result<B256, BindError> {
        self.contract
            .transact(opts, "openBuyOrder", vec![signature.into_token(), order_id.into_token()])
            .await
    }

    pub async fn open_sell_order(&self, opts: &TransactOpts, signature: Bytes, order_id: B256) -> Result<B256, BindError> {
        self.contract
            .transact(opts, "openSellOrder", vec![signature.into_token(), order_id.into_token()])
            .await
    }

    pub async fn cancel_order(&self, opts: &TransactOpts, signature: Bytes, order_id: B256) -> Result<B256, BindError> {
        self.contract
            .transact(opts, "cancelOrder", vec![signature.into_token(), order_id.into_token()])
            .await
    }

    /// Darknode-only: confirm `order_id` against its matching orders.
    pub async fn confirm_order(
        &self,
        opts: &TransactOpts,
        order_id: B256,
        order_matches: Vec<B256>,
    ) -> Result<B256, BindError> {
        self.contract
            .transact(opts, "confirmOrder", vec![order_id.into_token(), order_matches.into_token()])
            .await
    }
}

#[derive(Debug, Clone)]
pub struct RenLedgerFilterer {
    contract: BoundContract,
}

impl RenLedgerFilterer {
    pub fn new(address: Address, transport: Arc<dyn RpcTransport>) -> Result<Self, BindError> {
        Ok(Self { contract: bind(REN_LEDGER_ABI, address, transport)? })
    }

    pub async fn filter_order_opened(
        &self,
        opts: &FilterOpts,
        order_id: &[B256],
        trader: &[Address],
    ) -> Result<EventIterator<RenLedgerOrderOpened>, BindError> {
        self.contract.filter_events(opts, &[rule(order_id), rule(trader)]).await
    }

    pub async fn watch_order_opened(
        &self,
        opts: &WatchOpts,
        sink: mpsc::Sender<RenLedgerOrderOpened>,
        order_id: &[B256],
        trader: &[Address],
    ) -> Result<Subscription, BindError> {
        self.contract.watch_events(opts, sink, &[rule(order_id), rule(trader)]).await
    }

    pub fn parse_order_opened(&self, log: &Log) -> Result<RenLedgerOrderOpened, BindError> {
        RenLedgerOrderOpened::from_log(self.contract.unpack_log(RenLedgerOrderOpened::NAME, log)?)
    }

    pub async fn filter_order_confirmed(
        &self,
        opts: &FilterOpts,
        order_id: &[B256],
    ) -> Result<EventIterator<RenLedgerOrderConfirmed>, BindError> {
        self.contract.filter_events(opts, &[rule(order_id)]).await
    }

    pub async fn watch_order_confirmed(
        &self,
        opts: &WatchOpts,
        sink: mpsc::Sender<RenLedgerOrderConfirmed>,
        order_id: &[B256],
    ) -> Result<Subscription, BindError> {
        self.contract.watch_events(opts, sink, &[rule(order_id)]).await
    }

    pub fn parse_order_confirmed(&self, log: &Log) -> Result<RenLedgerOrderConfirmed, BindError> {
        RenLedgerOrderConfirmed::from_log(self.contract.unpack_log(RenLedgerOrderConfirmed::NAME, log)?)
    }

    pub async fn filter_order_canceled(
        &self,
        opts: &FilterOpts,
        order_id: &[B256],
    ) -> Result<EventIterator<RenLedgerOrderCanceled>, BindError> {
        self.contract.filter_events(opts, &[rule(order_id)]).await
    }

    pub async fn watch_order_canceled(
        &self,
        opts: &WatchOpts,
        sink: mpsc::Sender<RenLedgerOrderCanceled>,
        order_id: &[B256],
    ) -> Result<Subscription, BindError> {
        self.contract.watch_events(opts, sink, &[rule(order_id)]).await
    }

    pub fn parse_order_canceled(&self, log: &Log) -> Result<RenLedgerOrderCanceled, BindError> {
        RenLedgerOrderCanceled::from_log(self.contract.unpack_log(RenLedgerOrderCanceled::NAME, log)?)
    }
}

/// `OrderOpened(bytes32 indexed orderId, uint8 orderType, address indexed trader)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenLedgerOrderOpened {
    pub order_id: B256,
    /// 0 = buy, 1 = sell
    pub order_type: u8,
    pub trader: Address,
    pub raw: Log,
}

impl ContractEvent for RenLedgerOrderOpened {
    const NAME: &'static str = "OrderOpened";

    fn from_log(mut log: DecodedLog) -> Result<Self, BindError> {
        Ok(Self {
            order_id: log.fields.take()?,
            order_type: log.fields.take()?,
            trader: log.fields.take()?,
            raw: log.raw,
        })
    }
}

/// `OrderConfirmed(bytes32 indexed orderId, bytes32[] orderMatches)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenLedgerOrderConfirmed {
    pub order_id: B256,
    pub order_matches: Vec<B256>,
    pub raw: Log,
}

impl ContractEvent for RenLedgerOrderConfirmed {
    const NAME: &'static str = "OrderConfirmed";

    fn from_log(mut log: DecodedLog) -> Result<Self, BindError> {
        Ok(Self {
            order_id: log.fields.take()?,
            order_matches: log.fields.take()?,
            raw: log.raw,
        })
    }
}

/// `OrderCanceled(bytes32 indexed orderId)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenLedgerOrderCanceled {
    pub order_id: B256,
    pub raw: Log,
}

impl ContractEvent for RenLedgerOrderCanceled {
    const NAME: &'static str = "OrderCanceled";

    fn from_log(mut log: DecodedLog) -> Result<Self, BindError> {
        Ok(Self {
            order_id: log.fields.take()?,
            raw: log.raw,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_state_values() {
        assert_eq!(OrderState::try_from(1).unwrap(), OrderState::Open);
        assert_eq!(OrderState::try_from(3).unwrap(), OrderState::Canceled);
        assert!(matches!(OrderState::try_from(9), Err(BindError::Decode { .. })));
    }
}
