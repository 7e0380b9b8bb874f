//! `renbind contracts | abi | signatures`: offline ABI inspection.

use anyhow::{anyhow, Result};
use renbind_contracts::{find, registry, ContractInfo};
use renbind_core::ContractAbi;

pub(crate) fn lookup(name: &str) -> Result<&'static ContractInfo> {
    find(name).ok_or_else(|| {
        let known: Vec<_> = registry().iter().map(|c| c.name).collect();
        anyhow!("unknown contract '{name}' (known: {})", known.join(", "))
    })
}

pub fn list() -> Result<()> {
    println!("{:<18} {:>9} {:>6}  deployable", "contract", "functions", "events");
    for info in registry() {
        let abi = ContractAbi::parse(info.abi)?;
        let json = abi.json_abi();
        println!(
            "{:<18} {:>9} {:>6}  {}",
            info.name,
            json.functions().count(),
            json.events().count(),
            if info.deployable { "yes" } else { "no" }
        );
    }
    Ok(())
}

pub fn print_abi(contract: &str) -> Result<()> {
    let info = lookup(contract)?;
    let value: serde_json::Value = serde_json::from_str(info.abi)?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

pub fn signatures(contract: &str) -> Result<()> {
    let info = lookup(contract)?;
    let abi = ContractAbi::parse(info.abi)?;
    let json = abi.json_abi();

    println!("{}", info.name);
    if let Some(ctor) = json.constructor() {
        let types: Vec<_> = ctor.inputs.iter().map(|p| p.ty.as_str()).collect();
        println!("  constructor({})", types.join(","));
    }
    println!("Functions:");
    for f in json.functions() {
        println!("  0x{}  {}", hex::encode(f.selector()), f.signature());
    }
    println!("Events:");
    for e in json.events() {
        println!("  {}  {}", e.selector(), e.signature());
    }
    Ok(())
}
