//! Call and transaction envelopes, and positional argument decoding.
//!
//! A call names its target as `module::function` and carries a JSON array of
//! positional arguments. Amounts and ids accept either a JSON number or a
//! decimal string, since u128 values do not fit a JSON number portably.

use crate::error::RuntimeError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;
use vesta_types::{Address, DomainEvent, ProposalId, ProposalStatus, StakeId, Timestamp, TypesError};

/// One state transition request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Call {
    pub target: String,
    #[serde(default)]
    pub arguments: Vec<Value>,
}

impl Call {
    pub fn new(target: impl Into<String>, arguments: Vec<Value>) -> Self {
        Self {
            target: target.into(),
            arguments,
        }
    }

    /// Fail with `ArgumentCount` unless exactly `expected` arguments were given.
    pub(crate) fn expect_args(&self, expected: usize) -> Result<(), RuntimeError> {
        if self.arguments.len() != expected {
            return Err(RuntimeError::ArgumentCount {
                target: self.target.clone(),
                expected,
                got: self.arguments.len(),
            });
        }
        Ok(())
    }

    fn arg(&self, index: usize) -> Result<&Value, RuntimeError> {
        self.arguments
            .get(index)
            .ok_or_else(|| self.invalid(index, "missing"))
    }

    fn invalid(&self, index: usize, reason: impl Into<String>) -> RuntimeError {
        RuntimeError::InvalidArgument {
            target: self.target.clone(),
            index,
            reason: reason.into(),
        }
    }

    pub(crate) fn u128_arg(&self, index: usize) -> Result<u128, RuntimeError> {
        match self.arg(index)? {
            Value::String(s) => s
                .parse::<u128>()
                .map_err(|e| self.invalid(index, format!("{s:?} is not an amount: {e}"))),
            Value::Number(n) => n
                .as_u64()
                .map(u128::from)
                .ok_or_else(|| self.invalid(index, format!("{n} is not a non-negative integer"))),
            other => Err(self.invalid(index, format!("expected amount, got {other}"))),
        }
    }

    pub(crate) fn u64_arg(&self, index: usize) -> Result<u64, RuntimeError> {
        let wide = self.u128_arg(index)?;
        u64::try_from(wide).map_err(|_| self.invalid(index, format!("{wide} exceeds u64")))
    }

    pub(crate) fn bool_arg(&self, index: usize) -> Result<bool, RuntimeError> {
        self.arg(index)?
            .as_bool()
            .ok_or_else(|| self.invalid(index, "expected boolean"))
    }

    pub(crate) fn str_arg(&self, index: usize) -> Result<&str, RuntimeError> {
        self.arg(index)?
            .as_str()
            .ok_or_else(|| self.invalid(index, "expected string"))
    }

    /// A string argument parsed through the type's `FromStr` (addresses, roles,
    /// permissions, proposal kinds).
    pub(crate) fn parsed_arg<T>(&self, index: usize) -> Result<T, RuntimeError>
    where
        T: FromStr<Err = TypesError>,
    {
        Ok(self.str_arg(index)?.parse::<T>()?)
    }

    pub(crate) fn address_arg(&self, index: usize) -> Result<Address, RuntimeError> {
        self.parsed_arg(index)
    }

    /// A structured argument decoded with serde.
    pub(crate) fn json_arg<T: DeserializeOwned>(&self, index: usize) -> Result<T, RuntimeError> {
        serde_json::from_value(self.arg(index)?.clone())
            .map_err(|e| self.invalid(index, e.to_string()))
    }
}

/// A bundle of calls submitted by one sender, applied all-or-nothing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub sender: Address,
    pub calls: Vec<Call>,
}

impl Transaction {
    pub fn new(sender: Address, calls: Vec<Call>) -> Self {
        Self { sender, calls }
    }

    pub fn single(sender: Address, call: Call) -> Self {
        Self::new(sender, vec![call])
    }
}

/// What a single successful call returned.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallReturn {
    StakeId(StakeId),
    /// Rewards paid by a claim.
    Rewards(u128),
    /// Principal and rewards returned by an unstake or withdraw.
    Released { principal: u128, rewards: u128 },
    ProposalId(ProposalId),
    /// Voting power counted for a ballot.
    VotingPower(u128),
    Status(ProposalStatus),
    Unit,
}

/// Result of an accepted transaction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    pub sender: Address,
    pub timestamp: Timestamp,
    /// One entry per call, in submission order.
    pub returns: Vec<CallReturn>,
    /// Every event emitted by the bundle, in emission order.
    pub events: Vec<DomainEvent>,
}
