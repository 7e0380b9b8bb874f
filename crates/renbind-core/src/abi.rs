//! Parsed contract ABI: call packing, output unpacking and log decoding.
//!
//! # Encoding rules used here
//! - Function calls: 4-byte selector ++ ABI-encoded input tuple
//! - Constructor (`method == ""`): ABI-encoded input tuple, no selector
//! - Log topics: `topics[0]` is the event selector (non-anonymous events),
//!   `topics[1..]` are indexed arguments. Value types are stored as their
//!   32-byte word; reference types (string, bytes, arrays, tuples) as the
//!   keccak256 of their packed encoding, so the original value is lost.

use alloy_dyn_abi::{DynSolValue, EventExt, FunctionExt, JsonAbiExt};
use alloy_json_abi::{Event, Function, JsonAbi};
use alloy_primitives::{keccak256, B256};
use serde_json::Value;

use crate::error::BindError;
use crate::log::Log;
use crate::token::Outputs;

/// A contract ABI, parsed once and shared by every call through a binding.
#[derive(Debug, Clone)]
pub struct ContractAbi {
    abi: JsonAbi,
}

/// A log decoded against its event definition.
#[derive(Debug, Clone)]
pub struct DecodedLog {
    /// Indexed and non-indexed arguments, in ABI declaration order.
    pub fields: Outputs,
    pub raw: Log,
}

impl ContractAbi {
    /// Parse a standard Ethereum JSON ABI.
    pub fn parse(json: &str) -> Result<Self, BindError> {
        let abi: JsonAbi = serde_json::from_str(json).map_err(BindError::Abi)?;
        Ok(Self { abi })
    }

    /// Build from an already-parsed JSON value (e.g. a truffle artifact's `abi`).
    pub fn from_value(value: Value) -> Result<Self, BindError> {
        let abi: JsonAbi = serde_json::from_value(value).map_err(BindError::Abi)?;
        Ok(Self { abi })
    }

    pub fn json_abi(&self) -> &JsonAbi {
        &self.abi
    }

    /// Look up a function by name. Overloads resolve to the first declaration.
    pub fn function(&self, name: &str) -> Result<&Function, BindError> {
        self.abi
            .function(name)
            .and_then(|overloads| overloads.first())
            .ok_or_else(|| BindError::UnknownMethod(name.to_string()))
    }

    /// Look up an event by name.
    pub fn event(&self, name: &str) -> Result<&Event, BindError> {
        self.abi
            .event(name)
            .and_then(|overloads| overloads.first())
            .ok_or_else(|| BindError::UnknownEvent(name.to_string()))
    }

    /// Encode a method call, or constructor arguments when `method` is empty.
    pub fn pack(&self, method: &str, args: &[DynSolValue]) -> Result<Vec<u8>, BindError> {
        if method.is_empty() {
            return match self.abi.constructor() {
                Some(ctor) => ctor.abi_encode_input(args).map_err(|e| BindError::Encode {
                    name: "constructor".into(),
                    reason: e.to_string(),
                }),
                None if args.is_empty() => Ok(Vec::new()),
                None => Err(BindError::Encode {
                    name: "constructor".into(),
                    reason: format!("ABI has no constructor but {} arguments given", args.len()),
                }),
            };
        }

        let func = self.function(method)?;
        func.abi_encode_input(args).map_err(|e| BindError::Encode {
            name: method.to_string(),
            reason: e.to_string(),
        })
    }

    /// Decode the return data of `method`.
    pub fn unpack(&self, method: &str, data: &[u8]) -> Result<Outputs, BindError> {
        let func = self.function(method)?;
        let values = func
            .abi_decode_output(data, true)
            .map_err(|e| BindError::Decode {
                name: method.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Outputs::new(values))
    }

    /// Build the `topics` filter for `eth_getLogs`.
    ///
    /// `rules[i]` is the OR-list of accepted values for the i-th indexed
    /// argument; an empty list matches anything. Trailing wildcards are
    /// dropped.
    pub fn topics(&self, event: &str, rules: &[Vec<DynSolValue>]) -> Result<Vec<Value>, BindError> {
        let ev = self.event(event)?;
        let indexed = ev.inputs.iter().filter(|p| p.indexed).count();
        if rules.len() > indexed {
            return Err(BindError::Encode {
                name: event.to_string(),
                reason: format!("{} topic rules for {indexed} indexed arguments", rules.len()),
            });
        }

        let mut topics = Vec::with_capacity(1 + rules.len());
        if ev.anonymous {
            topics.push(Value::Null);
        } else {
            topics.push(Value::String(ev.selector().to_string()));
        }
        for rule in rules {
            if rule.is_empty() {
                topics.push(Value::Null);
            } else {
                let words: Vec<Value> = rule
                    .iter()
                    .map(|v| Value::String(topic_word(v).to_string()))
                    .collect();
                topics.push(Value::Array(words));
            }
        }
        while topics.last() == Some(&Value::Null) {
            topics.pop();
        }
        Ok(topics)
    }

    /// Decode `log` as an instance of `event`.
    pub fn unpack_log(&self, event: &str, log: &Log) -> Result<DecodedLog, BindError> {
        let ev = self.event(event)?;
        if !ev.anonymous && log.topics.first() != Some(&ev.selector()) {
            return Err(BindError::Decode {
                name: event.to_string(),
                reason: "event signature mismatch".into(),
            });
        }

        let decoded = ev
            .decode_log_parts(log.topics.iter().copied(), &log.data, true)
            .map_err(|e| BindError::Decode {
                name: event.to_string(),
                reason: e.to_string(),
            })?;

        // Re-interleave indexed topics and data fields in declaration order.
        let mut indexed = decoded.indexed.into_iter();
        let mut body = decoded.body.into_iter();
        let mut fields = Vec::with_capacity(ev.inputs.len());
        for param in &ev.inputs {
            let next = if param.indexed { indexed.next() } else { body.next() };
            let value = next.ok_or_else(|| BindError::Decode {
                name: event.to_string(),
                reason: format!("missing value for '{}'", param.name),
            })?;
            fields.push(value);
        }

        Ok(DecodedLog {
            fields: Outputs::new(fields),
            raw: log.clone(),
        })
    }
}

/// The 32-byte topic representing `value` as an indexed argument.
pub fn topic_word(value: &DynSolValue) -> B256 {
    match value.as_word() {
        Some(word) => word,
        None => keccak256(value.abi_encode_packed()),
    }
}
