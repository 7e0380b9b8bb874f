//! Every generated wrapper against a scripted node.
//!
//! Each call and transaction is checked byte for byte: the selector is
//! computed here from the Solidity signature, independently of the embedded
//! ABI, followed by the ABI-encoded argument words. Each filterer decodes one
//! log per event through `parse_<event>`.

use std::collections::HashMap;
use std::sync::Arc;

use alloy_dyn_abi::DynSolValue;
use alloy_primitives::keccak256;
use renbind_contracts::basic_token::{self, BasicToken};
use renbind_contracts::darknode_registry::{self, DarknodeId, DarknodeRegistry, Epoch};
use renbind_contracts::erc20::Erc20;
use renbind_contracts::erc20_basic::Erc20Basic;
use renbind_contracts::ownable::{self, Ownable};
use renbind_contracts::pausable::{self, Pausable};
use renbind_contracts::ren_ledger::{self, OrderState, RenLedger};
use renbind_contracts::republic_token::{self, RepublicToken};
use renbind_contracts::standard_token::{self, StandardToken};
use renbind_core::mock::MockTransport;
use renbind_core::{
    Address, Bytecode, Bytes, CallOpts, JsonRpcError, Log, TransactOpts, B256, U256,
};
use serde_json::{json, Value};

const TOKEN: Address = Address::new([0x10; 20]);
const ALICE: Address = Address::new([0xa1; 20]);
const BOB: Address = Address::new([0xb0; 20]);
const CAROL: Address = Address::new([0xc4; 20]);
const TX: B256 = B256::new([0x77; 32]);
const CODE: &str = "0x6060604052";

fn selector(signature: &str) -> String {
    hex::encode(&keccak256(signature)[..4])
}

/// Expected calldata, without the `0x` prefix.
fn calldata(signature: &str, args: Vec<DynSolValue>) -> String {
    format!(
        "{}{}",
        selector(signature),
        hex::encode(DynSolValue::Tuple(args).abi_encode_params())
    )
}

/// A node that answers `eth_call` by selector and accepts every transaction
/// with hash [`TX`].
fn node(returns: Vec<(&str, Vec<DynSolValue>)>) -> Arc<MockTransport> {
    let table: HashMap<String, Value> = returns
        .into_iter()
        .map(|(signature, out)| {
            let out = hex::encode(DynSolValue::Tuple(out).abi_encode_params());
            (selector(signature), json!(format!("0x{out}")))
        })
        .collect();
    Arc::new(MockTransport::new(move |method, params| match method {
        "eth_call" => {
            let data = data_of(params);
            table
                .get(&data[..8])
                .cloned()
                .ok_or_else(|| JsonRpcError::new(-32000, format!("unscripted call {}", &data[..8])))
        }
        "eth_sendTransaction" => Ok(json!(TX)),
        other => panic!("unexpected {other}"),
    }))
}

fn data_of(params: &[Value]) -> String {
    params[0]["data"].as_str().unwrap().trim_start_matches("0x").to_string()
}

/// Calldata of every request made to `method`, in order.
fn sent(mock: &MockTransport, method: &str) -> Vec<String> {
    mock.calls_to(method).iter().map(|p| data_of(p)).collect()
}

fn uint(n: u64) -> DynSolValue {
    DynSolValue::Uint(U256::from(n), 256)
}

fn addr(a: Address) -> DynSolValue {
    DynSolValue::Address(a)
}

fn b32(word: B256) -> DynSolValue {
    DynSolValue::FixedBytes(word, 32)
}

fn id20(id: DarknodeId) -> DynSolValue {
    DynSolValue::FixedBytes(B256::right_padding_from(id.as_slice()), 20)
}

fn word(a: Address) -> B256 {
    B256::left_padding_from(a.as_slice())
}

fn log(topics: Vec<B256>, data: Vec<DynSolValue>) -> Log {
    Log {
        address: TOKEN,
        topics,
        data: Bytes::from(DynSolValue::Tuple(data).abi_encode_params()),
        block_number: Some("0x2a".into()),
        block_hash: None,
        transaction_hash: Some(TX),
        log_index: Some("0x0".into()),
        removed: false,
    }
}

fn transfer_log() -> Log {
    log(
        vec![keccak256("Transfer(address,address,uint256)"), word(ALICE), word(BOB)],
        vec![uint(250)],
    )
}

fn approval_log() -> Log {
    log(
        vec![keccak256("Approval(address,address,uint256)"), word(ALICE), word(CAROL)],
        vec![uint(60)],
    )
}

fn ownership_log() -> Log {
    log(
        vec![keccak256("OwnershipTransferred(address,address)"), word(ALICE), word(BOB)],
        vec![],
    )
}

/// Send deploy with a fixed nonce so no `eth_getTransactionCount` is needed.
fn deployer() -> TransactOpts {
    TransactOpts {
        nonce: Some(0),
        ..TransactOpts::from(ALICE)
    }
}

#[tokio::test]
async fn erc20_basic_wrappers() {
    let mock = node(vec![
        ("totalSupply()", vec![uint(1_000)]),
        ("balanceOf(address)", vec![uint(40)]),
    ]);
    let token = Erc20Basic::new(TOKEN, mock.clone()).unwrap();
    let call = CallOpts::default();
    let tx = TransactOpts::from(ALICE);

    assert_eq!(token.caller.total_supply(&call).await.unwrap(), U256::from(1_000u64));
    assert_eq!(token.caller.balance_of(&call, ALICE).await.unwrap(), U256::from(40u64));
    assert_eq!(token.transactor.transfer(&tx, BOB, U256::from(5u64)).await.unwrap(), TX);

    assert_eq!(
        sent(&mock, "eth_call"),
        vec![
            calldata("totalSupply()", vec![]),
            calldata("balanceOf(address)", vec![addr(ALICE)]),
        ]
    );
    assert_eq!(
        sent(&mock, "eth_sendTransaction"),
        vec![calldata("transfer(address,uint256)", vec![addr(BOB), uint(5)])]
    );

    let ev = token.filterer.parse_transfer(&transfer_log()).unwrap();
    assert_eq!((ev.from, ev.to, ev.value), (ALICE, BOB, U256::from(250u64)));
    assert_eq!(ev.raw.block_number_u64(), Some(42));
}

#[tokio::test]
async fn erc20_wrappers() {
    let mock = node(vec![
        ("totalSupply()", vec![uint(1_000)]),
        ("balanceOf(address)", vec![uint(40)]),
        ("allowance(address,address)", vec![uint(7)]),
    ]);
    let token = Erc20::new(TOKEN, mock.clone()).unwrap();
    let call = CallOpts::default();
    let tx = TransactOpts::from(ALICE);

    assert_eq!(token.caller.total_supply(&call).await.unwrap(), U256::from(1_000u64));
    assert_eq!(token.caller.balance_of(&call, BOB).await.unwrap(), U256::from(40u64));
    assert_eq!(token.caller.allowance(&call, ALICE, CAROL).await.unwrap(), U256::from(7u64));
    token.transactor.transfer(&tx, BOB, U256::from(5u64)).await.unwrap();
    token
        .transactor
        .transfer_from(&tx, BOB, CAROL, U256::from(6u64))
        .await
        .unwrap();
    token.transactor.approve(&tx, CAROL, U256::from(9u64)).await.unwrap();

    assert_eq!(
        sent(&mock, "eth_call"),
        vec![
            calldata("totalSupply()", vec![]),
            calldata("balanceOf(address)", vec![addr(BOB)]),
            calldata("allowance(address,address)", vec![addr(ALICE), addr(CAROL)]),
        ]
    );
    assert_eq!(
        sent(&mock, "eth_sendTransaction"),
        vec![
            calldata("transfer(address,uint256)", vec![addr(BOB), uint(5)]),
            calldata("transferFrom(address,address,uint256)", vec![addr(BOB), addr(CAROL), uint(6)]),
            calldata("approve(address,uint256)", vec![addr(CAROL), uint(9)]),
        ]
    );

    let ev = token.filterer.parse_transfer(&transfer_log()).unwrap();
    assert_eq!((ev.from, ev.to, ev.value), (ALICE, BOB, U256::from(250u64)));
    let ev = token.filterer.parse_approval(&approval_log()).unwrap();
    assert_eq!((ev.owner, ev.spender, ev.value), (ALICE, CAROL, U256::from(60u64)));
}

#[tokio::test]
async fn basic_token_wrappers() {
    let mock = node(vec![
        ("totalSupply()", vec![uint(1_000)]),
        ("balanceOf(address)", vec![uint(40)]),
    ]);
    let (address, hash, token) = basic_token::deploy_basic_token(
        &deployer(),
        mock.clone(),
        &Bytecode::from_hex(CODE).unwrap(),
    )
    .await
    .unwrap();
    assert_eq!((address, hash), (ALICE.create(0), TX));
    assert_eq!(BasicToken::new(address, mock.clone()).unwrap().raw().address(), address);

    let call = CallOpts::default();
    assert_eq!(token.caller.total_supply(&call).await.unwrap(), U256::from(1_000u64));
    assert_eq!(token.caller.balance_of(&call, ALICE).await.unwrap(), U256::from(40u64));
    token
        .transactor
        .transfer(&TransactOpts::from(ALICE), BOB, U256::from(5u64))
        .await
        .unwrap();

    assert_eq!(
        sent(&mock, "eth_call"),
        vec![
            calldata("totalSupply()", vec![]),
            calldata("balanceOf(address)", vec![addr(ALICE)]),
        ]
    );
    assert_eq!(
        sent(&mock, "eth_sendTransaction"),
        vec![
            CODE.trim_start_matches("0x").to_string(),
            calldata("transfer(address,uint256)", vec![addr(BOB), uint(5)]),
        ]
    );

    let ev = token.filterer.parse_transfer(&transfer_log()).unwrap();
    assert_eq!((ev.from, ev.to, ev.value), (ALICE, BOB, U256::from(250u64)));
}

#[tokio::test]
async fn standard_token_wrappers() {
    let mock = node(vec![
        ("totalSupply()", vec![uint(1_000)]),
        ("balanceOf(address)", vec![uint(40)]),
        ("allowance(address,address)", vec![uint(7)]),
    ]);
    let (address, _, token) = standard_token::deploy_standard_token(
        &deployer(),
        mock.clone(),
        &Bytecode::from_hex(CODE).unwrap(),
    )
    .await
    .unwrap();
    assert_eq!(StandardToken::new(address, mock.clone()).unwrap().raw().address(), address);

    let call = CallOpts::default();
    let tx = TransactOpts::from(ALICE);
    assert_eq!(token.caller.total_supply(&call).await.unwrap(), U256::from(1_000u64));
    assert_eq!(token.caller.balance_of(&call, ALICE).await.unwrap(), U256::from(40u64));
    assert_eq!(token.caller.allowance(&call, ALICE, BOB).await.unwrap(), U256::from(7u64));
    token.transactor.transfer(&tx, BOB, U256::from(1u64)).await.unwrap();
    token
        .transactor
        .transfer_from(&tx, BOB, CAROL, U256::from(2u64))
        .await
        .unwrap();
    token.transactor.approve(&tx, BOB, U256::from(3u64)).await.unwrap();
    token.transactor.increase_approval(&tx, BOB, U256::from(4u64)).await.unwrap();
    token.transactor.decrease_approval(&tx, BOB, U256::from(5u64)).await.unwrap();

    assert_eq!(
        sent(&mock, "eth_call"),
        vec![
            calldata("totalSupply()", vec![]),
            calldata("balanceOf(address)", vec![addr(ALICE)]),
            calldata("allowance(address,address)", vec![addr(ALICE), addr(BOB)]),
        ]
    );
    assert_eq!(
        sent(&mock, "eth_sendTransaction")[1..],
        [
            calldata("transfer(address,uint256)", vec![addr(BOB), uint(1)]),
            calldata("transferFrom(address,address,uint256)", vec![addr(BOB), addr(CAROL), uint(2)]),
            calldata("approve(address,uint256)", vec![addr(BOB), uint(3)]),
            calldata("increaseApproval(address,uint256)", vec![addr(BOB), uint(4)]),
            calldata("decreaseApproval(address,uint256)", vec![addr(BOB), uint(5)]),
        ]
    );

    let ev = token.filterer.parse_transfer(&transfer_log()).unwrap();
    assert_eq!((ev.from, ev.to, ev.value), (ALICE, BOB, U256::from(250u64)));
    let ev = token.filterer.parse_approval(&approval_log()).unwrap();
    assert_eq!((ev.owner, ev.spender, ev.value), (ALICE, CAROL, U256::from(60u64)));
}

#[tokio::test]
async fn ownable_wrappers() {
    let mock = node(vec![("owner()", vec![addr(ALICE)])]);
    let (address, _, owned) = ownable::deploy_ownable(
        &deployer(),
        mock.clone(),
        &Bytecode::from_hex(CODE).unwrap(),
    )
    .await
    .unwrap();
    assert_eq!(Ownable::new(address, mock.clone()).unwrap().raw().address(), address);

    assert_eq!(owned.caller.owner(&CallOpts::default()).await.unwrap(), ALICE);
    owned
        .transactor
        .transfer_ownership(&TransactOpts::from(ALICE), BOB)
        .await
        .unwrap();

    assert_eq!(sent(&mock, "eth_call"), vec![calldata("owner()", vec![])]);
    assert_eq!(
        sent(&mock, "eth_sendTransaction")[1..],
        [calldata("transferOwnership(address)", vec![addr(BOB)])]
    );

    let ev = owned.filterer.parse_ownership_transferred(&ownership_log()).unwrap();
    assert_eq!((ev.previous_owner, ev.new_owner), (ALICE, BOB));
}

#[tokio::test]
async fn pausable_wrappers() {
    let mock = node(vec![
        ("paused()", vec![DynSolValue::Bool(true)]),
        ("owner()", vec![addr(BOB)]),
    ]);
    let (address, _, pausable) = pausable::deploy_pausable(
        &deployer(),
        mock.clone(),
        &Bytecode::from_hex(CODE).unwrap(),
    )
    .await
    .unwrap();
    assert_eq!(Pausable::new(address, mock.clone()).unwrap().raw().address(), address);

    let call = CallOpts::default();
    let tx = TransactOpts::from(BOB);
    assert!(pausable.caller.paused(&call).await.unwrap());
    assert_eq!(pausable.caller.owner(&call).await.unwrap(), BOB);
    pausable.transactor.pause(&tx).await.unwrap();
    pausable.transactor.unpause(&tx).await.unwrap();
    pausable.transactor.transfer_ownership(&tx, CAROL).await.unwrap();

    assert_eq!(
        sent(&mock, "eth_call"),
        vec![calldata("paused()", vec![]), calldata("owner()", vec![])]
    );
    assert_eq!(
        sent(&mock, "eth_sendTransaction")[1..],
        [
            calldata("pause()", vec![]),
            calldata("unpause()", vec![]),
            calldata("transferOwnership(address)", vec![addr(CAROL)]),
        ]
    );

    let pause = log(vec![keccak256("Pause()")], vec![]);
    assert_eq!(pausable.filterer.parse_pause(&pause).unwrap().raw.transaction_hash, Some(TX));
    let unpause = log(vec![keccak256("Unpause()")], vec![]);
    assert!(pausable.filterer.parse_unpause(&unpause).is_ok());
    // A Pause log is not an Unpause.
    assert!(pausable.filterer.parse_unpause(&pause).is_err());
    let ev = pausable.filterer.parse_ownership_transferred(&ownership_log()).unwrap();
    assert_eq!((ev.previous_owner, ev.new_owner), (ALICE, BOB));
}

#[tokio::test]
async fn republic_token_wrappers() {
    let supply = U256::from(10u64).pow(U256::from(27u64));
    let mock = node(vec![
        ("name()", vec![DynSolValue::String("Republic Token".into())]),
        ("symbol()", vec![DynSolValue::String("REN".into())]),
        ("decimals()", vec![DynSolValue::Uint(U256::from(18u64), 8)]),
        ("INITIAL_SUPPLY()", vec![DynSolValue::Uint(supply, 256)]),
        ("totalSupply()", vec![DynSolValue::Uint(supply, 256)]),
        ("balanceOf(address)", vec![uint(40)]),
        ("allowance(address,address)", vec![uint(7)]),
        ("paused()", vec![DynSolValue::Bool(false)]),
        ("owner()", vec![addr(ALICE)]),
    ]);
    let (address, _, ren) = republic_token::deploy_republic_token(
        &deployer(),
        mock.clone(),
        &Bytecode::from_hex(CODE).unwrap(),
    )
    .await
    .unwrap();
    assert_eq!(RepublicToken::new(address, mock.clone()).unwrap().raw().address(), address);

    let call = CallOpts::default();
    let tx = TransactOpts::from(ALICE);
    assert_eq!(ren.caller.name(&call).await.unwrap(), "Republic Token");
    assert_eq!(ren.caller.symbol(&call).await.unwrap(), "REN");
    assert_eq!(ren.caller.decimals(&call).await.unwrap(), 18);
    assert_eq!(ren.caller.initial_supply(&call).await.unwrap(), supply);
    assert_eq!(ren.caller.total_supply(&call).await.unwrap(), supply);
    assert_eq!(ren.caller.balance_of(&call, BOB).await.unwrap(), U256::from(40u64));
    assert_eq!(ren.caller.allowance(&call, ALICE, BOB).await.unwrap(), U256::from(7u64));
    assert!(!ren.caller.paused(&call).await.unwrap());
    assert_eq!(ren.caller.owner(&call).await.unwrap(), ALICE);

    ren.transactor.transfer(&tx, BOB, U256::from(1u64)).await.unwrap();
    ren.transactor.transfer_from(&tx, BOB, CAROL, U256::from(2u64)).await.unwrap();
    ren.transactor.approve(&tx, BOB, U256::from(3u64)).await.unwrap();
    ren.transactor.increase_approval(&tx, BOB, U256::from(4u64)).await.unwrap();
    ren.transactor.decrease_approval(&tx, BOB, U256::from(5u64)).await.unwrap();
    ren.transactor.burn(&tx, U256::from(6u64)).await.unwrap();
    ren.transactor.transfer_tokens(&tx, CAROL, U256::from(7u64)).await.unwrap();
    ren.transactor.pause(&tx).await.unwrap();
    ren.transactor.unpause(&tx).await.unwrap();
    ren.transactor.transfer_ownership(&tx, BOB).await.unwrap();

    assert_eq!(
        sent(&mock, "eth_call"),
        vec![
            calldata("name()", vec![]),
            calldata("symbol()", vec![]),
            calldata("decimals()", vec![]),
            calldata("INITIAL_SUPPLY()", vec![]),
            calldata("totalSupply()", vec![]),
            calldata("balanceOf(address)", vec![addr(BOB)]),
            calldata("allowance(address,address)", vec![addr(ALICE), addr(BOB)]),
            calldata("paused()", vec![]),
            calldata("owner()", vec![]),
        ]
    );
    assert_eq!(
        sent(&mock, "eth_sendTransaction")[1..],
        [
            calldata("transfer(address,uint256)", vec![addr(BOB), uint(1)]),
            calldata("transferFrom(address,address,uint256)", vec![addr(BOB), addr(CAROL), uint(2)]),
            calldata("approve(address,uint256)", vec![addr(BOB), uint(3)]),
            calldata("increaseApproval(address,uint256)", vec![addr(BOB), uint(4)]),
            calldata("decreaseApproval(address,uint256)", vec![addr(BOB), uint(5)]),
            calldata("burn(uint256)", vec![uint(6)]),
            calldata("transferTokens(address,uint256)", vec![addr(CAROL), uint(7)]),
            calldata("pause()", vec![]),
            calldata("unpause()", vec![]),
            calldata("transferOwnership(address)", vec![addr(BOB)]),
        ]
    );

    let burn = log(vec![keccak256("Burn(address,uint256)"), word(CAROL)], vec![uint(6)]);
    let ev = ren.filterer.parse_burn(&burn).unwrap();
    assert_eq!((ev.burner, ev.value), (CAROL, U256::from(6u64)));
    assert!(ren.filterer.parse_pause(&log(vec![keccak256("Pause()")], vec![])).is_ok());
    assert!(ren.filterer.parse_unpause(&log(vec![keccak256("Unpause()")], vec![])).is_ok());
    let ev = ren.filterer.parse_ownership_transferred(&ownership_log()).unwrap();
    assert_eq!((ev.previous_owner, ev.new_owner), (ALICE, BOB));
    let ev = ren.filterer.parse_approval(&approval_log()).unwrap();
    assert_eq!((ev.owner, ev.spender, ev.value), (ALICE, CAROL, U256::from(60u64)));
    let ev = ren.filterer.parse_transfer(&transfer_log()).unwrap();
    assert_eq!((ev.from, ev.to, ev.value), (ALICE, BOB, U256::from(250u64)));
}

#[tokio::test]
async fn darknode_registry_wrappers() {
    let node_a = DarknodeId::repeat_byte(0x0a);
    let node_b = DarknodeId::repeat_byte(0x0b);
    let public_key = Bytes::from(vec![0x04; 65]);
    let mock = node(vec![
        ("getOwner(bytes20)", vec![addr(ALICE)]),
        ("getBond(bytes20)", vec![uint(100)]),
        ("getPublicKey(bytes20)", vec![DynSolValue::Bytes(public_key.to_vec())]),
        ("getDarknodes()", vec![DynSolValue::Array(vec![id20(node_a), id20(node_b)])]),
        ("isRegistered(bytes20)", vec![DynSolValue::Bool(true)]),
        ("isDeregistered(bytes20)", vec![DynSolValue::Bool(false)]),
        ("isUnregistered(bytes20)", vec![DynSolValue::Bool(false)]),
        ("minimumBond()", vec![uint(100)]),
        ("minimumDarkPoolSize()", vec![uint(72)]),
        ("minimumEpochInterval()", vec![uint(2)]),
        ("numDarknodes()", vec![uint(2)]),
        ("numDarknodesNextEpoch()", vec![uint(3)]),
        ("currentEpoch()", vec![uint(99), uint(1234)]),
    ]);
    let dnr = DarknodeRegistry::new(Address::repeat_byte(0xdd), mock.clone()).unwrap();
    let call = CallOpts::default();
    let tx = TransactOpts::from(ALICE);

    let caller = &dnr.caller;
    assert_eq!(caller.get_owner(&call, node_a).await.unwrap(), ALICE);
    assert_eq!(caller.get_bond(&call, node_a).await.unwrap(), U256::from(100u64));
    assert_eq!(caller.get_public_key(&call, node_a).await.unwrap(), public_key);
    assert_eq!(caller.get_darknodes(&call).await.unwrap(), vec![node_a, node_b]);
    assert!(caller.is_registered(&call, node_a).await.unwrap());
    assert!(!caller.is_deregistered(&call, node_a).await.unwrap());
    assert!(!caller.is_unregistered(&call, node_b).await.unwrap());
    assert_eq!(caller.minimum_bond(&call).await.unwrap(), U256::from(100u64));
    assert_eq!(caller.minimum_dark_pool_size(&call).await.unwrap(), U256::from(72u64));
    assert_eq!(caller.minimum_epoch_interval(&call).await.unwrap(), U256::from(2u64));
    assert_eq!(caller.num_darknodes(&call).await.unwrap(), U256::from(2u64));
    assert_eq!(caller.num_darknodes_next_epoch(&call).await.unwrap(), U256::from(3u64));
    assert_eq!(
        caller.current_epoch(&call).await.unwrap(),
        Epoch {
            epochhash: U256::from(99u64),
            blocknumber: U256::from(1234u64),
        }
    );

    dnr.transactor
        .register(&tx, node_a, public_key.clone(), U256::from(100u64))
        .await
        .unwrap();
    dnr.transactor.deregister(&tx, node_a).await.unwrap();
    dnr.transactor.refund(&tx, node_a).await.unwrap();
    dnr.transactor.epoch(&tx).await.unwrap();

    let one = |signature| calldata(signature, vec![id20(node_a)]);
    assert_eq!(
        sent(&mock, "eth_call"),
        vec![
            one("getOwner(bytes20)"),
            one("getBond(bytes20)"),
            one("getPublicKey(bytes20)"),
            calldata("getDarknodes()", vec![]),
            one("isRegistered(bytes20)"),
            one("isDeregistered(bytes20)"),
            calldata("isUnregistered(bytes20)", vec![id20(node_b)]),
            calldata("minimumBond()", vec![]),
            calldata("minimumDarkPoolSize()", vec![]),
            calldata("minimumEpochInterval()", vec![]),
            calldata("numDarknodes()", vec![]),
            calldata("numDarknodesNextEpoch()", vec![]),
            calldata("currentEpoch()", vec![]),
        ]
    );
    assert_eq!(
        sent(&mock, "eth_sendTransaction"),
        vec![
            calldata(
                "register(bytes20,bytes,uint256)",
                vec![id20(node_a), DynSolValue::Bytes(public_key.to_vec()), uint(100)]
            ),
            one("deregister(bytes20)"),
            one("refund(bytes20)"),
            calldata("epoch()", vec![]),
        ]
    );

    let f = &dnr.filterer;
    let ev = f
        .parse_registered(&log(vec![keccak256("Registered(bytes20,uint256)")], vec![id20(node_a), uint(100)]))
        .unwrap();
    assert_eq!((ev.darknode_id, ev.bond), (node_a, U256::from(100u64)));
    let ev = f
        .parse_deregistered(&log(vec![keccak256("Deregistered(bytes20)")], vec![id20(node_b)]))
        .unwrap();
    assert_eq!(ev.darknode_id, node_b);
    let ev = f
        .parse_owner_refunded(&log(vec![keccak256("OwnerRefunded(address,uint256)")], vec![addr(ALICE), uint(100)]))
        .unwrap();
    assert_eq!((ev.owner, ev.amount), (ALICE, U256::from(100u64)));
    assert!(f.parse_new_epoch(&log(vec![keccak256("NewEpoch()")], vec![])).is_ok());
}

#[tokio::test]
async fn darknode_registry_deploy_encodes_constructor() {
    let mock = node(vec![]);
    let (address, _, dnr) = darknode_registry::deploy_darknode_registry(
        &deployer(),
        mock.clone(),
        &Bytecode::from_hex(CODE).unwrap(),
        TOKEN,
        U256::from(100u64),
        U256::from(72u64),
        U256::from(2u64),
    )
    .await
    .unwrap();
    assert_eq!(address, ALICE.create(0));
    assert_eq!(dnr.raw().address(), address);
    let ctor = DynSolValue::Tuple(vec![addr(TOKEN), uint(100), uint(72), uint(2)]).abi_encode_params();
    assert_eq!(
        sent(&mock, "eth_sendTransaction"),
        vec![format!("{}{}", CODE.trim_start_matches("0x"), hex::encode(ctor))]
    );
}

#[tokio::test]
async fn ren_ledger_wrappers() {
    let order = B256::repeat_byte(0x42);
    let other = B256::repeat_byte(0x43);
    let signature = Bytes::from(vec![0x5a; 65]);
    let pair = |index: u8| vec![b32(B256::repeat_byte(index)), DynSolValue::Bool(index % 2 == 0)];
    let mock = node(vec![
        ("fee()", vec![uint(500)]),
        ("buyOrder(uint256)", pair(2)),
        ("sellOrder(uint256)", pair(3)),
        ("getOrder(uint256)", pair(4)),
        ("getOrdersCount()", vec![uint(9)]),
        ("orderState(bytes32)", vec![DynSolValue::Uint(U256::from(2u64), 8)]),
        ("orderMatch(bytes32)", vec![DynSolValue::Array(vec![b32(other)])]),
        ("orderPriority(bytes32)", vec![uint(11)]),
        ("orderTrader(bytes32)", vec![addr(ALICE)]),
        ("orderBroker(bytes32)", vec![addr(BOB)]),
        ("orderConfirmer(bytes32)", vec![addr(CAROL)]),
        ("orderDepth(bytes32)", vec![uint(3)]),
        ("orderBlockNumber(bytes32)", vec![uint(4_000_000)]),
    ]);
    let (address, _, ledger) = ren_ledger::deploy_ren_ledger(
        &deployer(),
        mock.clone(),
        &Bytecode::from_hex(CODE).unwrap(),
        U256::from(500u64),
        TOKEN,
        Address::repeat_byte(0xdd),
    )
    .await
    .unwrap();
    assert_eq!(RenLedger::new(address, mock.clone()).unwrap().raw().address(), address);

    let call = CallOpts::default();
    let tx = TransactOpts::from(ALICE);
    let caller = &ledger.caller;
    assert_eq!(caller.fee(&call).await.unwrap(), U256::from(500u64));
    assert_eq!(caller.buy_order(&call, U256::from(0u64)).await.unwrap(), (B256::repeat_byte(2), true));
    assert_eq!(caller.sell_order(&call, U256::from(1u64)).await.unwrap(), (B256::repeat_byte(3), false));
    assert_eq!(caller.get_order(&call, U256::from(2u64)).await.unwrap(), (B256::repeat_byte(4), true));
    assert_eq!(caller.get_orders_count(&call).await.unwrap(), U256::from(9u64));
    let state = caller.order_state(&call, order).await.unwrap();
    assert_eq!(OrderState::try_from(state).unwrap(), OrderState::Confirmed);
    assert_eq!(caller.order_match(&call, order).await.unwrap(), vec![other]);
    assert_eq!(caller.order_priority(&call, order).await.unwrap(), U256::from(11u64));
    assert_eq!(caller.order_trader(&call, order).await.unwrap(), ALICE);
    assert_eq!(caller.order_broker(&call, order).await.unwrap(), BOB);
    assert_eq!(caller.order_confirmer(&call, order).await.unwrap(), CAROL);
    assert_eq!(caller.order_depth(&call, order).await.unwrap(), U256::from(3u64));
    assert_eq!(caller.order_block_number(&call, order).await.unwrap(), U256::from(4_000_000u64));

    ledger.transactor.open_buy_order(&tx, signature.clone(), order).await.unwrap();
    ledger.transactor.open_sell_order(&tx, signature.clone(), other).await.unwrap();
    ledger.transactor.cancel_order(&tx, signature.clone(), order).await.unwrap();
    ledger.transactor.confirm_order(&tx, order, vec![other]).await.unwrap();

    let by_order = |signature| calldata(signature, vec![b32(order)]);
    assert_eq!(
        sent(&mock, "eth_call"),
        vec![
            calldata("fee()", vec![]),
            calldata("buyOrder(uint256)", vec![uint(0)]),
            calldata("sellOrder(uint256)", vec![uint(1)]),
            calldata("getOrder(uint256)", vec![uint(2)]),
            calldata("getOrdersCount()", vec![]),
            by_order("orderState(bytes32)"),
            by_order("orderMatch(bytes32)"),
            by_order("orderPriority(bytes32)"),
            by_order("orderTrader(bytes32)"),
            by_order("orderBroker(bytes32)"),
            by_order("orderConfirmer(bytes32)"),
            by_order("orderDepth(bytes32)"),
            by_order("orderBlockNumber(bytes32)"),
        ]
    );
    let sig = || DynSolValue::Bytes(signature.to_vec());
    let ctor = DynSolValue::Tuple(vec![uint(500), addr(TOKEN), addr(Address::repeat_byte(0xdd))])
        .abi_encode_params();
    assert_eq!(
        sent(&mock, "eth_sendTransaction"),
        vec![
            format!("{}{}", CODE.trim_start_matches("0x"), hex::encode(ctor)),
            calldata("openBuyOrder(bytes,bytes32)", vec![sig(), b32(order)]),
            calldata("openSellOrder(bytes,bytes32)", vec![sig(), b32(other)]),
            calldata("cancelOrder(bytes,bytes32)", vec![sig(), b32(order)]),
            calldata(
                "confirmOrder(bytes32,bytes32[])",
                vec![b32(order), DynSolValue::Array(vec![b32(other)])]
            ),
        ]
    );

    let f = &ledger.filterer;
    let opened = log(
        vec![keccak256("OrderOpened(bytes32,uint8,address)"), order, word(ALICE)],
        vec![DynSolValue::Uint(U256::from(1u64), 8)],
    );
    let ev = f.parse_order_opened(&opened).unwrap();
    assert_eq!((ev.order_id, ev.order_type, ev.trader), (order, 1, ALICE));
    let confirmed = log(
        vec![keccak256("OrderConfirmed(bytes32,bytes32[])"), order],
        vec![DynSolValue::Array(vec![b32(other)])],
    );
    let ev = f.parse_order_confirmed(&confirmed).unwrap();
    assert_eq!((ev.order_id, ev.order_matches), (order, vec![other]));
    let canceled = log(vec![keccak256("OrderCanceled(bytes32)"), order], vec![]);
    assert_eq!(f.parse_order_canceled(&canceled).unwrap().order_id, order);
}
