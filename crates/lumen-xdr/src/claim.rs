//! Claimable balances: claimants and their claim predicates.
//!
//! Predicates form an owned recursive tree. This layer imposes no depth
//! limit; the network bounds nesting by its own transaction size limits.

use crate::codec::{ReadCursor, XdrDecode, XdrEncode};
use crate::error::{Result, XdrError};
use crate::types::{AccountId, Hash256};

/// Maximum number of claimants on a claimable balance.
pub const MAX_CLAIMANTS: usize = 10;

/// A condition under which a claimable balance may be claimed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimPredicate {
    Unconditional,
    And(Vec<ClaimPredicate>),
    Or(Vec<ClaimPredicate>),
    Not(Option<Box<ClaimPredicate>>),
    /// Claimable before an absolute unix time (seconds).
    BeforeAbsoluteTime(i64),
    /// Claimable within a relative number of seconds after balance creation.
    BeforeRelativeTime(i64),
}

impl XdrEncode for ClaimPredicate {
    fn encode(&self, out: &mut Vec<u8>) {
        match self {
            Self::Unconditional => 0u32.encode(out),
            Self::And(operands) => {
                1u32.encode(out);
                operands.encode(out);
            }
            Self::Or(operands) => {
                2u32.encode(out);
                operands.encode(out);
            }
            Self::Not(operand) => {
                3u32.encode(out);
                match operand {
                    Some(p) => {
                        1u32.encode(out);
                        p.encode(out);
                    }
                    None => 0u32.encode(out),
                }
            }
            Self::BeforeAbsoluteTime(t) => {
                4u32.encode(out);
                t.encode(out);
            }
            Self::BeforeRelativeTime(t) => {
                5u32.encode(out);
                t.encode(out);
            }
        }
    }
}

impl XdrDecode for ClaimPredicate {
    fn decode(cur: &mut ReadCursor<'_>) -> Result<Self> {
        match cur.read_u32()? {
            0 => Ok(Self::Unconditional),
            1 => {
                let operands: Vec<ClaimPredicate> = Vec::decode(cur)?;
                check_operands("ClaimPredicate and", &operands)?;
                Ok(Self::And(operands))
            }
            2 => {
                let operands: Vec<ClaimPredicate> = Vec::decode(cur)?;
                check_operands("ClaimPredicate or", &operands)?;
                Ok(Self::Or(operands))
            }
            3 => {
                let operand = if cur.read_bool()? {
                    Some(Box::new(ClaimPredicate::decode(cur)?))
                } else {
                    None
                };
                Ok(Self::Not(operand))
            }
            4 => Ok(Self::BeforeAbsoluteTime(cur.read_i64()?)),
            5 => Ok(Self::BeforeRelativeTime(cur.read_i64()?)),
            value => Err(XdrError::InvalidDiscriminant {
                ty: "ClaimPredicate",
                value,
            }),
        }
    }
}

fn check_operands(ty: &'static str, operands: &[ClaimPredicate]) -> Result<()> {
    if operands.len() > 2 {
        return Err(XdrError::LengthExceedsMax {
            ty,
            len: operands.len(),
            max: 2,
        });
    }
    Ok(())
}

/// A party entitled to claim a balance, with the predicate gating the claim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Claimant {
    V0 {
        destination: AccountId,
        predicate: ClaimPredicate,
    },
}

impl XdrEncode for Claimant {
    fn encode(&self, out: &mut Vec<u8>) {
        let Self::V0 {
            destination,
            predicate,
        } = self;
        0u32.encode(out);
        destination.encode(out);
        predicate.encode(out);
    }
}

impl XdrDecode for Claimant {
    fn decode(cur: &mut ReadCursor<'_>) -> Result<Self> {
        match cur.read_u32()? {
            0 => Ok(Self::V0 {
                destination: AccountId::decode(cur)?,
                predicate: ClaimPredicate::decode(cur)?,
            }),
            value => Err(XdrError::InvalidDiscriminant {
                ty: "Claimant",
                value,
            }),
        }
    }
}

/// Identifier of a claimable balance ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimableBalanceId {
    V0(Hash256),
}

impl ClaimableBalanceId {
    pub fn hash(&self) -> &Hash256 {
        let Self::V0(h) = self;
        h
    }
}

impl XdrEncode for ClaimableBalanceId {
    fn encode(&self, out: &mut Vec<u8>) {
        let Self::V0(hash) = self;
        0u32.encode(out);
        hash.encode(out);
    }
}

impl XdrDecode for ClaimableBalanceId {
    fn decode(cur: &mut ReadCursor<'_>) -> Result<Self> {
        match cur.read_u32()? {
            0 => Ok(Self::V0(Hash256::decode(cur)?)),
            value => Err(XdrError::InvalidDiscriminant {
                ty: "ClaimableBalanceId",
                value,
            }),
        }
    }
}
