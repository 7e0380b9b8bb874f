//! Conversions between Rust values and alloy `DynSolValue` tokens.
//!
//! Bindings build call arguments with [`Tokenize`] and read results back with
//! [`Detokenize`], one ABI parameter at a time, through an [`Outputs`] cursor.

use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{Address, Bytes, FixedBytes, B256, U256};

use crate::error::BindError;

/// Convert a Rust value into an ABI token.
pub trait Tokenize {
    fn into_token(self) -> DynSolValue;
}

/// Convert an ABI token back into a Rust value.
pub trait Detokenize: Sized {
    fn from_token(token: DynSolValue) -> Result<Self, BindError>;
}

impl Tokenize for Address {
    fn into_token(self) -> DynSolValue {
        DynSolValue::Address(self)
    }
}

impl Tokenize for U256 {
    fn into_token(self) -> DynSolValue {
        DynSolValue::Uint(self, 256)
    }
}

impl Tokenize for u8 {
    fn into_token(self) -> DynSolValue {
        DynSolValue::Uint(U256::from(self), 8)
    }
}

impl Tokenize for bool {
    fn into_token(self) -> DynSolValue {
        DynSolValue::Bool(self)
    }
}

impl Tokenize for String {
    fn into_token(self) -> DynSolValue {
        DynSolValue::String(self)
    }
}

impl Tokenize for &str {
    fn into_token(self) -> DynSolValue {
        DynSolValue::String(self.to_owned())
    }
}

impl Tokenize for Bytes {
    fn into_token(self) -> DynSolValue {
        DynSolValue::Bytes(self.to_vec())
    }
}

// `bytesN` tokens keep their value left-aligned in a 32-byte word.
impl<const N: usize> Tokenize for FixedBytes<N> {
    fn into_token(self) -> DynSolValue {
        DynSolValue::FixedBytes(B256::right_padding_from(self.as_slice()), N)
    }
}

impl<T: Tokenize> Tokenize for Vec<T> {
    fn into_token(self) -> DynSolValue {
        DynSolValue::Array(self.into_iter().map(Tokenize::into_token).collect())
    }
}

impl<T: Tokenize + Clone> Tokenize for &[T] {
    fn into_token(self) -> DynSolValue {
        DynSolValue::Array(self.iter().cloned().map(Tokenize::into_token).collect())
    }
}

impl Detokenize for DynSolValue {
    fn from_token(token: DynSolValue) -> Result<Self, BindError> {
        Ok(token)
    }
}

impl Detokenize for Address {
    fn from_token(token: DynSolValue) -> Result<Self, BindError> {
        match token {
            DynSolValue::Address(a) => Ok(a),
            other => Err(BindError::mismatch("address", other)),
        }
    }
}

impl Detokenize for U256 {
    fn from_token(token: DynSolValue) -> Result<Self, BindError> {
        match token {
            DynSolValue::Uint(u, _) => Ok(u),
            other => Err(BindError::mismatch("uint", other)),
        }
    }
}

impl Detokenize for u8 {
    fn from_token(token: DynSolValue) -> Result<Self, BindError> {
        match token {
            DynSolValue::Uint(u, _) => u8::try_from(u).map_err(|_| BindError::TypeMismatch {
                expected: "uint8".into(),
                got: u.to_string(),
            }),
            other => Err(BindError::mismatch("uint8", other)),
        }
    }
}

impl Detokenize for bool {
    fn from_token(token: DynSolValue) -> Result<Self, BindError> {
        match token {
            DynSolValue::Bool(b) => Ok(b),
            other => Err(BindError::mismatch("bool", other)),
        }
    }
}

impl Detokenize for String {
    fn from_token(token: DynSolValue) -> Result<Self, BindError> {
        match token {
            DynSolValue::String(s) => Ok(s),
            other => Err(BindError::mismatch("string", other)),
        }
    }
}

impl Detokenize for Bytes {
    fn from_token(token: DynSolValue) -> Result<Self, BindError> {
        match token {
            DynSolValue::Bytes(b) => Ok(Bytes::from(b)),
            other => Err(BindError::mismatch("bytes", other)),
        }
    }
}

impl<const N: usize> Detokenize for FixedBytes<N> {
    fn from_token(token: DynSolValue) -> Result<Self, BindError> {
        match token {
            DynSolValue::FixedBytes(word, size) if size == N => {
                Ok(FixedBytes::<N>::from_slice(&word[..N]))
            }
            other => Err(BindError::mismatch(format!("bytes{N}"), other)),
        }
    }
}

impl<T: Detokenize> Detokenize for Vec<T> {
    fn from_token(token: DynSolValue) -> Result<Self, BindError> {
        match token {
            DynSolValue::Array(items) | DynSolValue::FixedArray(items) => {
                items.into_iter().map(T::from_token).collect()
            }
            other => Err(BindError::mismatch("array", other)),
        }
    }
}

/// Ordered cursor over decoded values (call outputs or event fields).
#[derive(Debug, Clone)]
pub struct Outputs {
    values: std::vec::IntoIter<DynSolValue>,
    taken: usize,
}

impl Outputs {
    pub fn new(values: Vec<DynSolValue>) -> Self {
        Self {
            values: values.into_iter(),
            taken: 0,
        }
    }

    /// Take the next value and convert it.
    pub fn take<T: Detokenize>(&mut self) -> Result<T, BindError> {
        let index = self.taken;
        let token = self
            .values
            .next()
            .ok_or(BindError::MissingOutput { index })?;
        self.taken += 1;
        T::from_token(token)
    }

    /// Number of values not yet taken.
    pub fn remaining(&self) -> usize {
        self.values.len()
    }

    /// The values not yet taken.
    pub fn into_values(self) -> Vec<DynSolValue> {
        self.values.collect()
    }
}
