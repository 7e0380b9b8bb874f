//! Deployment bytecode and truffle build artifacts.
//!
//! Truffle writes one JSON file per contract to `build/contracts/<Name>.json`
//! holding the ABI and the creation bytecode. Bytecode of a contract that
//! calls a library contains a 40-character placeholder (`__LinkedList____…`)
//! until the library address is linked in.

use std::path::Path;

use alloy_primitives::{Address, Bytes};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::abi::ContractAbi;
use crate::error::BindError;

/// Length of a library placeholder (the width of a hex address).
const PLACEHOLDER_LEN: usize = 40;

/// Validated contract creation bytecode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bytecode(Bytes);

impl Bytecode {
    /// Parse hex bytecode (with or without `0x`).
    pub fn from_hex(hex_str: &str) -> Result<Self, BindError> {
        let body = hex_str.trim();
        let body = body.strip_prefix("0x").unwrap_or(body);
        if !body.is_ascii() {
            return Err(BindError::InvalidBytecode("non-ASCII characters in hex".into()));
        }
        if let Some(library) = first_placeholder(body) {
            return Err(BindError::UnlinkedLibrary(library));
        }
        let bytes = hex::decode(body).map_err(|e| BindError::InvalidBytecode(e.to_string()))?;
        Ok(Self(Bytes::from(bytes)))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A truffle build artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub contract_name: String,
    pub abi: Value,
    pub bytecode: String,
    #[serde(default)]
    pub deployed_bytecode: Option<String>,
}

impl Artifact {
    pub fn from_json(json: &str) -> Result<Self, BindError> {
        serde_json::from_str(json).map_err(|e| BindError::Artifact(e.to_string()))
    }

    /// Load `<dir>/<name>.json`.
    pub fn load(dir: &Path, name: &str) -> Result<Self, BindError> {
        let path = dir.join(format!("{name}.json"));
        tracing::debug!(path = %path.display(), "loading artifact");
        let raw = std::fs::read_to_string(&path)?;
        let artifact = Self::from_json(&raw)?;
        if artifact.contract_name != name {
            return Err(BindError::Artifact(format!(
                "{} holds contract '{}', expected '{name}'",
                path.display(),
                artifact.contract_name
            )));
        }
        Ok(artifact)
    }

    /// Replace every placeholder for `library` with its deployed address.
    ///
    /// Bytecode that is not ASCII is left untouched; [`Artifact::bytecode`]
    /// rejects it.
    pub fn link(&mut self, library: &str, address: Address) {
        let target = hex::encode(address.as_slice());
        for code in std::iter::once(&mut self.bytecode).chain(self.deployed_bytecode.as_mut()) {
            if code.is_ascii() {
                *code = replace_placeholder(code, library, &target);
            }
        }
    }

    /// Creation bytecode; fails while libraries are still unlinked.
    pub fn bytecode(&self) -> Result<Bytecode, BindError> {
        Bytecode::from_hex(&self.bytecode)
    }

    pub fn abi(&self) -> Result<ContractAbi, BindError> {
        ContractAbi::from_value(self.abi.clone())
    }

    /// Whether this artifact's ABI is the same as `abi_json` (order-insensitive).
    pub fn abi_matches(&self, abi_json: &str) -> Result<bool, BindError> {
        let ours = self.abi()?;
        let theirs = ContractAbi::parse(abi_json)?;
        Ok(ours.json_abi() == theirs.json_abi())
    }
}

/// Library name of the first `__Name___…` placeholder in `code`, if any.
fn first_placeholder(code: &str) -> Option<String> {
    let start = code.find("__")?;
    let end = (start + PLACEHOLDER_LEN).min(code.len());
    let name = code.get(start..end)?.trim_matches('_');
    Some(name.split(':').last().unwrap_or(name).to_string())
}

fn replace_placeholder(code: &str, library: &str, address_hex: &str) -> String {
    let mut out = String::with_capacity(code.len());
    let mut rest = code;
    while let Some(pos) = rest.find("__") {
        let end = pos + PLACEHOLDER_LEN;
        if end > rest.len() {
            break;
        }
        let Some(slot) = rest.get(pos..end) else {
            break;
        };
        let name = slot.trim_matches('_');
        let name = name.split(':').last().unwrap_or(name);
        out.push_str(&rest[..pos]);
        if name == library {
            out.push_str(address_hex);
        } else {
            out.push_str(slot);
        }
        rest = &rest[end..];
    }
    out.push_str(rest);
    out
}
