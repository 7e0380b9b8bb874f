//! `BoundContract`: one deployed contract, its ABI and a transport.
//!
//! Every generated binding is a thin typed layer over these methods:
//!
//! | binding side | forwards to                      | JSON-RPC                      |
//! |--------------|----------------------------------|-------------------------------|
//! | caller       | [`BoundContract::call`]          | `eth_call`                    |
//! | transactor   | [`BoundContract::transact`]      | `eth_sendTransaction`         |
//! | filterer     | [`BoundContract::filter_events`] | `eth_getLogs`                 |
//! | filterer     | [`BoundContract::watch_events`]  | `eth_blockNumber`+`eth_getLogs` polling |
//! | deploy       | [`deploy_contract`]              | `eth_sendTransaction`         |

use std::sync::Arc;

use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{Address, Bytes, B256};
use serde_json::{json, Map, Value};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

use crate::abi::{ContractAbi, DecodedLog};
use crate::artifact::Bytecode;
use crate::error::{BindError, TransportError};
use crate::iterator::EventIterator;
use crate::log::{hex_quantity, parse_hex_u64, Log};
use crate::opts::{CallOpts, FilterOpts, TransactOpts, WatchOpts};
use crate::subscription::Subscription;
use crate::token::Outputs;
use crate::transport::{request, RpcTransport};

/// Buffered logs between a filter/watch producer and its consumer.
const LOG_BUFFER: usize = 128;

/// A typed contract event that can be decoded from a log.
pub trait ContractEvent: Sized + Send + 'static {
    /// Event name as declared in the ABI.
    const NAME: &'static str;

    fn from_log(log: DecodedLog) -> Result<Self, BindError>;
}

/// Generic handle to a deployed contract.
#[derive(Clone)]
pub struct BoundContract {
    address: Address,
    abi: Arc<ContractAbi>,
    transport: Arc<dyn RpcTransport>,
}

impl std::fmt::Debug for BoundContract {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundContract")
            .field("address", &self.address)
            .field("transport", &self.transport.url())
            .finish()
    }
}

impl BoundContract {
    pub fn new(address: Address, abi: ContractAbi, transport: Arc<dyn RpcTransport>) -> Self {
        Self {
            address,
            abi: Arc::new(abi),
            transport,
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn abi(&self) -> &ContractAbi {
        &self.abi
    }

    pub fn transport(&self) -> &Arc<dyn RpcTransport> {
        &self.transport
    }

    /// Invoke a read-only method with `eth_call` and decode its outputs.
    pub async fn call(
        &self,
        opts: &CallOpts,
        method: &str,
        args: Vec<DynSolValue>,
    ) -> Result<Outputs, BindError> {
        let input = self.abi.pack(method, &args)?;

        let mut msg = Map::new();
        if let Some(from) = opts.from {
            msg.insert("from".into(), json!(from));
        }
        msg.insert("to".into(), json!(self.address));
        msg.insert("data".into(), json!(format!("0x{}", hex::encode(&input))));

        tracing::debug!(contract = %self.address, method, "eth_call");
        let output: Bytes = request(
            &*self.transport,
            "eth_call",
            vec![Value::Object(msg), opts.block.to_param()],
        )
        .await?;

        // Empty return data for a method with outputs usually means there is
        // no contract at the address.
        if output.is_empty() && !self.abi.function(method)?.outputs.is_empty() {
            let code: Bytes = request(
                &*self.transport,
                "eth_getCode",
                vec![json!(self.address), opts.block.to_param()],
            )
            .await?;
            if code.is_empty() {
                return Err(BindError::NoCode(self.address));
            }
        }

        self.abi.unpack(method, &output)
    }

    /// Invoke a state-changing method with `eth_sendTransaction`.
    pub async fn transact(
        &self,
        opts: &TransactOpts,
        method: &str,
        args: Vec<DynSolValue>,
    ) -> Result<B256, BindError> {
        let input = self.abi.pack(method, &args)?;
        tracing::debug!(contract = %self.address, method, from = %opts.from, "eth_sendTransaction");
        self.raw_transact(opts, input).await
    }

    /// Send plain value to the contract (its fallback function).
    pub async fn transfer(&self, opts: &TransactOpts) -> Result<B256, BindError> {
        self.raw_transact(opts, Vec::new()).await
    }

    /// Send a transaction with pre-encoded calldata.
    pub async fn raw_transact(&self, opts: &TransactOpts, data: Vec<u8>) -> Result<B256, BindError> {
        let tx = opts.to_tx_object(Some(self.address), &data);
        Ok(request(&*self.transport, "eth_sendTransaction", vec![tx]).await?)
    }

    /// Decode `log` as an instance of `event`.
    pub fn unpack_log(&self, event: &str, log: &Log) -> Result<DecodedLog, BindError> {
        self.abi.unpack_log(event, log)
    }

    /// Fetch past logs of `event` and stream them through a channel.
    ///
    /// The query runs before this returns, so node errors come back here; the
    /// returned subscription only feeds the already-fetched logs.
    pub async fn filter_logs(
        &self,
        opts: &FilterOpts,
        event: &str,
        rules: &[Vec<DynSolValue>],
    ) -> Result<(mpsc::Receiver<Log>, Subscription), BindError> {
        let topics = self.abi.topics(event, rules)?;
        let end = match opts.end {
            Some(end) => end,
            None => block_number(&*self.transport).await?,
        };
        let logs = get_logs_chunked(
            &*self.transport,
            self.address,
            &topics,
            opts.start,
            end,
            opts.max_block_range,
        )
        .await?;
        tracing::debug!(
            contract = %self.address,
            event,
            from = opts.start,
            to = end,
            count = logs.len(),
            "filtered logs"
        );

        let (tx, rx) = mpsc::channel(LOG_BUFFER);
        let sub = Subscription::spawn(move |mut quit| async move {
            for log in logs.into_iter().filter(|l| !l.removed) {
                tokio::select! {
                    _ = &mut quit => return Ok(()),
                    sent = tx.send(log) => {
                        if sent.is_err() {
                            return Ok(());
                        }
                    }
                }
            }
            Ok(())
        });
        Ok((rx, sub))
    }

    /// Poll for new logs of `event` until unsubscribed or a request fails.
    pub async fn watch_logs(
        &self,
        opts: &WatchOpts,
        event: &str,
        rules: &[Vec<DynSolValue>],
    ) -> Result<(mpsc::Receiver<Log>, Subscription), BindError> {
        let topics = self.abi.topics(event, rules)?;
        let mut next = match opts.start {
            Some(start) => start,
            None => block_number(&*self.transport).await? + 1,
        };
        let transport = Arc::clone(&self.transport);
        let address = self.address;
        let interval = opts.poll_interval;
        let max_range = opts.max_block_range;
        tracing::debug!(contract = %address, event, from = next, "watching logs");

        let (tx, rx) = mpsc::channel(LOG_BUFFER);
        let sub = Subscription::spawn(move |mut quit| async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = &mut quit => return Ok(()),
                    _ = ticker.tick() => {}
                }
                let head = block_number(&*transport).await?;
                if head < next {
                    continue;
                }
                let logs =
                    get_logs_chunked(&*transport, address, &topics, next, head, max_range).await?;
                tracing::trace!(contract = %address, from = next, to = head, count = logs.len(), "polled logs");
                for log in logs.into_iter().filter(|l| !l.removed) {
                    tokio::select! {
                        _ = &mut quit => return Ok(()),
                        sent = tx.send(log) => {
                            if sent.is_err() {
                                return Ok(());
                            }
                        }
                    }
                }
                next = head + 1;
            }
        });
        Ok((rx, sub))
    }

    /// Typed [`filter_logs`](Self::filter_logs).
    pub async fn filter_events<E: ContractEvent>(
        &self,
        opts: &FilterOpts,
        rules: &[Vec<DynSolValue>],
    ) -> Result<EventIterator<E>, BindError> {
        let (logs, sub) = self.filter_logs(opts, E::NAME, rules).await?;
        Ok(EventIterator::new(self.clone(), logs, sub))
    }

    /// Typed [`watch_logs`](Self::watch_logs): decoded events are pushed into
    /// `sink` until the subscription is dropped, the sink closes, or watching
    /// or decoding fails.
    pub async fn watch_events<E: ContractEvent>(
        &self,
        opts: &WatchOpts,
        sink: mpsc::Sender<E>,
        rules: &[Vec<DynSolValue>],
    ) -> Result<Subscription, BindError> {
        let (mut logs, mut inner) = self.watch_logs(opts, E::NAME, rules).await?;
        let contract = self.clone();
        Ok(Subscription::spawn(move |mut quit| async move {
            loop {
                // The log channel closes only after the poll loop exits, so
                // every fetched log reaches the sink before its error.
                tokio::select! {
                    biased;
                    _ = &mut quit => return Ok(()),
                    log = logs.recv() => {
                        let Some(log) = log else {
                            return inner.err().await.map_or(Ok(()), Err);
                        };
                        let event = E::from_log(contract.unpack_log(E::NAME, &log)?)?;
                        tokio::select! {
                            _ = &mut quit => return Ok(()),
                            sent = sink.send(event) => {
                                if sent.is_err() {
                                    return Ok(());
                                }
                            }
                        }
                    }
                }
            }
        }))
    }
}

/// Deploy `bytecode` with ABI-encoded constructor `args`.
///
/// The contract address is derived from the sender and nonce, so it is known
/// before the transaction is mined. Use [`crate::wait_deployed`] to wait for it.
pub async fn deploy_contract(
    opts: &TransactOpts,
    abi: ContractAbi,
    bytecode: &Bytecode,
    args: Vec<DynSolValue>,
    transport: Arc<dyn RpcTransport>,
) -> Result<(Address, B256, BoundContract), BindError> {
    let ctor_args = abi.pack("", &args)?;
    let mut data = bytecode.as_bytes().to_vec();
    data.extend_from_slice(&ctor_args);

    let nonce = match opts.nonce {
        Some(nonce) => nonce,
        None => {
            let count: String = request(
                &*transport,
                "eth_getTransactionCount",
                vec![json!(opts.from), json!("pending")],
            )
            .await?;
            parse_hex_u64(&count)
                .ok_or_else(|| TransportError::Other(format!("invalid transaction count '{count}'")))?
        }
    };

    let tx = TransactOpts {
        nonce: Some(nonce),
        ..opts.clone()
    }
    .to_tx_object(None, &data);
    let hash: B256 = request(&*transport, "eth_sendTransaction", vec![tx]).await?;
    let address = opts.from.create(nonce);
    tracing::info!(%address, tx = %hash, nonce, "contract deployment sent");

    Ok((address, hash, BoundContract::new(address, abi, transport)))
}

async fn block_number(transport: &dyn RpcTransport) -> Result<u64, BindError> {
    let head: String = request(transport, "eth_blockNumber", vec![]).await?;
    parse_hex_u64(&head)
        .ok_or_else(|| TransportError::Other(format!("invalid block number '{head}'")).into())
}

async fn get_logs(
    transport: &dyn RpcTransport,
    address: Address,
    topics: &[Value],
    from: u64,
    to: u64,
) -> Result<Vec<Log>, BindError> {
    let filter = json!({
        "address": address,
        "fromBlock": hex_quantity(from),
        "toBlock": hex_quantity(to),
        "topics": topics,
    });
    Ok(request(transport, "eth_getLogs", vec![filter]).await?)
}

/// `eth_getLogs` over `[from, to]`, split into requests of at most
/// `max_range` blocks.
async fn get_logs_chunked(
    transport: &dyn RpcTransport,
    address: Address,
    topics: &[Value],
    from: u64,
    to: u64,
    max_range: u64,
) -> Result<Vec<Log>, BindError> {
    if to < from {
        return Ok(vec![]);
    }
    let span = max_range.max(1);
    let mut all = Vec::new();
    let mut start = from;
    loop {
        let end = start.saturating_add(span - 1).min(to);
        all.extend(get_logs(transport, address, topics, start, end).await?);
        if end >= to {
            break;
        }
        start = end + 1;
    }
    Ok(all)
}
