//! `renbind logs | watch`: decoded contract events.

use anyhow::Result;
use renbind_core::{BindConfig, DecodedLog, Log};
use serde_json::{json, Map};

use crate::cmd_call::bind;
use crate::format::{display, to_json};

fn render(names: &[String], event: &str, log: &Log, decoded: DecodedLog, as_json: bool) -> String {
    let values = decoded.fields.into_values();
    if as_json {
        let mut fields = Map::new();
        for (name, value) in names.iter().zip(&values) {
            fields.insert(name.clone(), to_json(value));
        }
        json!({
            "event": event,
            "block": log.block_number_u64(),
            "tx": log.transaction_hash,
            "logIndex": log.log_index_u64(),
            "fields": fields,
        })
        .to_string()
    } else {
        let fields: Vec<_> = names
            .iter()
            .zip(&values)
            .map(|(name, value)| format!("{name}={}", display(value)))
            .collect();
        let block = log.block_number_u64().map_or_else(|| "pending".to_string(), |b| b.to_string());
        format!("#{block} {event}({})", fields.join(", "))
    }
}

pub async fn logs(
    config: &BindConfig,
    contract: &str,
    address: &str,
    event: &str,
    from_block: u64,
    to_block: Option<u64>,
    as_json: bool,
) -> Result<()> {
    let bound = bind(config, contract, address)?;
    let names = param_names(&bound, event)?;
    let (mut logs, mut sub) = bound
        .filter_logs(&config.filter_opts(from_block, to_block), event, &[])
        .await?;

    let mut count = 0usize;
    while let Some(log) = logs.recv().await {
        let decoded = bound.unpack_log(event, &log)?;
        println!("{}", render(&names, event, &log, decoded, as_json));
        count += 1;
    }
    if let Some(err) = sub.err().await {
        return Err(err.into());
    }
    tracing::info!(count, event, "done");
    Ok(())
}

pub async fn watch(
    config: &BindConfig,
    contract: &str,
    address: &str,
    event: &str,
    from_block: Option<u64>,
    as_json: bool,
) -> Result<()> {
    let bound = bind(config, contract, address)?;
    let names = param_names(&bound, event)?;
    let (mut logs, mut sub) = bound
        .watch_logs(&config.watch_opts(from_block), event, &[])
        .await?;
    tracing::info!(contract, address, event, "watching, Ctrl-C to stop");

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            err = sub.err() => {
                if let Some(err) = err {
                    return Err(err.into());
                }
                break;
            }
            log = logs.recv() => {
                let Some(log) = log else { break };
                let decoded = bound.unpack_log(event, &log)?;
                println!("{}", render(&names, event, &log, decoded, as_json));
            }
        }
    }
    sub.unsubscribe().await;
    Ok(())
}

fn param_names(bound: &renbind_core::BoundContract, event: &str) -> Result<Vec<String>> {
    let ev = bound.abi().event(event)?;
    Ok(ev
        .inputs
        .iter()
        .enumerate()
        .map(|(i, p)| if p.name.is_empty() { format!("arg{i}") } else { p.name.clone() })
        .collect())
}
