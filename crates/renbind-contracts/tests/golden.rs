//! The embedded ABIs parse and declare exactly the expected functions and
//! events, with the expected signatures.

use alloy_json_abi::JsonAbi;
use renbind_contracts::{
    basic_token, darknode_registry, erc20, erc20_basic, find, ownable, pausable, registry,
    ren_ledger, republic_token, standard_token,
};

fn parse(abi: &str) -> JsonAbi {
    serde_json::from_str(abi).expect("embedded ABI must parse")
}

fn selector(abi: &JsonAbi, name: &str) -> String {
    hex::encode(abi.function(name).expect("function")[0].selector())
}

fn topic(abi: &JsonAbi, name: &str) -> String {
    hex::encode(abi.event(name).expect("event")[0].selector())
}

fn signatures(abi: &JsonAbi) -> (Vec<String>, Vec<String>) {
    let mut functions: Vec<_> = abi.functions().map(|f| f.signature()).collect();
    let mut events: Vec<_> = abi.events().map(|e| e.signature()).collect();
    functions.sort();
    events.sort();
    (functions, events)
}

#[test]
fn every_registered_abi_parses() {
    for info in registry() {
        let abi = parse(info.abi);
        assert!(abi.functions().count() > 0, "{} has no functions", info.name);
        assert!(abi.events().count() > 0, "{} has no events", info.name);
    }
}

#[test]
fn function_and_event_counts() {
    let expected = [
        (erc20_basic::CONTRACT_NAME, 3, 1),
        (erc20::CONTRACT_NAME, 6, 2),
        (basic_token::CONTRACT_NAME, 3, 1),
        (standard_token::CONTRACT_NAME, 8, 2),
        (ownable::CONTRACT_NAME, 2, 1),
        (pausable::CONTRACT_NAME, 5, 3),
        (republic_token::CONTRACT_NAME, 19, 6),
        (darknode_registry::CONTRACT_NAME, 17, 4),
        (ren_ledger::CONTRACT_NAME, 17, 3),
    ];
    for (name, functions, events) in expected {
        let abi = parse(find(name).unwrap().abi);
        assert_eq!(abi.functions().count(), functions, "{name} functions");
        assert_eq!(abi.events().count(), events, "{name} events");
    }
}

#[test]
fn erc20_selectors_and_topics() {
    let abi = parse(republic_token::REPUBLIC_TOKEN_ABI);
    assert_eq!(selector(&abi, "totalSupply"), "18160ddd");
    assert_eq!(selector(&abi, "balanceOf"), "70a08231");
    assert_eq!(selector(&abi, "transfer"), "a9059cbb");
    assert_eq!(selector(&abi, "allowance"), "dd62ed3e");
    assert_eq!(selector(&abi, "transferFrom"), "23b872dd");
    assert_eq!(selector(&abi, "approve"), "095ea7b3");
    assert_eq!(selector(&abi, "name"), "06fdde03");
    assert_eq!(selector(&abi, "symbol"), "95d89b41");
    assert_eq!(selector(&abi, "decimals"), "313ce567");
    assert_eq!(selector(&abi, "owner"), "8da5cb5b");
    assert_eq!(selector(&abi, "transferOwnership"), "f2fde38b");
    assert_eq!(selector(&abi, "paused"), "5c975abb");
    assert_eq!(selector(&abi, "pause"), "8456cb59");
    assert_eq!(selector(&abi, "unpause"), "3f4ba83a");
    assert_eq!(selector(&abi, "burn"), "42966c68");

    assert_eq!(
        topic(&abi, "Transfer"),
        "ddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef"
    );
    assert_eq!(
        topic(&abi, "Approval"),
        "8c5be1e5ebec7d5bd14f71427d1e84f3dd0314c0f7b2291e5b200ac8c7c3b925"
    );
    assert_eq!(
        topic(&abi, "OwnershipTransferred"),
        "8be0079c531659141344cd1fd0a4f28419497f9722a3daafe3b4186f6b6457e0"
    );
}

#[test]
fn token_family_shares_signatures() {
    // StandardToken is ERC20 plus the approval helpers.
    let (erc20_fns, erc20_events) = signatures(&parse(erc20::ERC20_ABI));
    let (std_fns, std_events) = signatures(&parse(standard_token::STANDARD_TOKEN_ABI));
    for f in &erc20_fns {
        assert!(std_fns.contains(f), "StandardToken is missing {f}");
    }
    assert_eq!(erc20_events, std_events);

    let (basic_fns, _) = signatures(&parse(erc20_basic::ERC20_BASIC_ABI));
    let (basic_token_fns, _) = signatures(&parse(basic_token::BASIC_TOKEN_ABI));
    assert_eq!(basic_fns, basic_token_fns);

    let (ownable_fns, _) = signatures(&parse(ownable::OWNABLE_ABI));
    let (pausable_fns, _) = signatures(&parse(pausable::PAUSABLE_ABI));
    for f in &ownable_fns {
        assert!(pausable_fns.contains(f), "Pausable is missing {f}");
    }
}

#[test]
fn darknode_registry_signatures() {
    let abi = parse(darknode_registry::DARKNODE_REGISTRY_ABI);
    let (functions, events) = signatures(&abi);
    for sig in [
        "register(bytes20,bytes,uint256)",
        "deregister(bytes20)",
        "refund(bytes20)",
        "epoch()",
        "getOwner(bytes20)",
        "getPublicKey(bytes20)",
        "getDarknodes()",
        "currentEpoch()",
    ] {
        assert!(functions.iter().any(|f| f == sig), "missing {sig}");
    }
    assert_eq!(
        events,
        vec![
            "Deregistered(bytes20)",
            "NewEpoch()",
            "OwnerRefunded(address,uint256)",
            "Registered(bytes20,uint256)",
        ]
    );

    let ctor = abi.constructor().expect("constructor");
    let types: Vec<_> = ctor.inputs.iter().map(|p| p.ty.as_str()).collect();
    assert_eq!(types, ["address", "uint256", "uint256", "uint256"]);

    let epoch = &abi.function("currentEpoch").unwrap()[0];
    let outputs: Vec<_> = epoch.outputs.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(outputs, ["epochhash", "blocknumber"]);
}

#[test]
fn ren_ledger_signatures() {
    let abi = parse(ren_ledger::REN_LEDGER_ABI);
    let (functions, events) = signatures(&abi);
    for sig in [
        "openBuyOrder(bytes,bytes32)",
        "openSellOrder(bytes,bytes32)",
        "cancelOrder(bytes,bytes32)",
        "confirmOrder(bytes32,bytes32[])",
        "getOrder(uint256)",
        "orderMatch(bytes32)",
    ] {
        assert!(functions.iter().any(|f| f == sig), "missing {sig}");
    }
    assert_eq!(
        events,
        vec![
            "OrderCanceled(bytes32)",
            "OrderConfirmed(bytes32,bytes32[])",
            "OrderOpened(bytes32,uint8,address)",
        ]
    );

    let opened = &abi.event("OrderOpened").unwrap()[0];
    let indexed: Vec<_> = opened.inputs.iter().map(|p| p.indexed).collect();
    assert_eq!(indexed, [true, false, true]);

    let ctor = abi.constructor().expect("constructor");
    assert_eq!(ctor.inputs.len(), 3);
}

#[test]
fn interfaces_have_no_constructor() {
    for info in registry().iter().filter(|c| !c.deployable) {
        assert!(parse(info.abi).constructor().is_none(), "{}", info.name);
    }
}
