//! `renbind call`: read-only method call with string arguments.

use alloy_dyn_abi::{DynSolType, DynSolValue, Specifier};
use anyhow::{bail, Context, Result};
use renbind_core::{Address, BindConfig, BoundContract, CallOpts, ContractAbi};

use crate::cmd_abi::lookup;
use crate::format::display;

pub(crate) fn bind(config: &BindConfig, contract: &str, address: &str) -> Result<BoundContract> {
    let info = lookup(contract)?;
    let address: Address = address
        .parse()
        .with_context(|| format!("invalid address '{address}'"))?;
    let abi = ContractAbi::parse(info.abi)?;
    Ok(BoundContract::new(address, abi, config.transport()?))
}

/// Coerce command-line strings to the method's input types.
pub(crate) fn coerce_args(abi: &ContractAbi, method: &str, args: &[String]) -> Result<Vec<DynSolValue>> {
    let func = abi.function(method)?;
    if func.inputs.len() != args.len() {
        bail!(
            "{} takes {} argument(s), got {}",
            func.signature(),
            func.inputs.len(),
            args.len()
        );
    }
    func.inputs
        .iter()
        .zip(args)
        .map(|(param, arg)| {
            let ty: DynSolType = param
                .resolve()
                .with_context(|| format!("unsupported type '{}'", param.ty))?;
            ty.coerce_str(arg)
                .with_context(|| format!("argument '{}' is not a valid {}", param.name, param.ty))
        })
        .collect()
}

pub async fn run(
    config: &BindConfig,
    contract: &str,
    address: &str,
    method: &str,
    args: &[String],
    block: Option<u64>,
) -> Result<()> {
    let bound = bind(config, contract, address)?;
    let values = coerce_args(bound.abi(), method, args)?;
    let opts = match block {
        Some(n) => CallOpts::at_block(n),
        None => CallOpts::default(),
    };

    let outputs = bound.call(&opts, method, values).await?.into_values();
    let func = bound.abi().function(method)?;
    for (i, value) in outputs.iter().enumerate() {
        let name = func
            .outputs
            .get(i)
            .map(|p| p.name.as_str())
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("[{i}]"));
        println!("{name}: {}", display(value));
    }
    Ok(())
}
