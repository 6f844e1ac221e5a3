//! Ledger entry keys, used in footprints and sponsorship revocation.

use crate::asset::TrustLineAsset;
use crate::claim::ClaimableBalanceId;
use crate::codec::{encode_string, ReadCursor, XdrDecode, XdrEncode};
use crate::error::{Result, XdrError};
use crate::scval::{ScAddress, ScVal};
use crate::types::{AccountId, Hash256};

/// Maximum byte length of a data entry name.
pub const MAX_DATA_NAME: usize = 64;

/// Storage durability of a contract data entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContractDataDurability {
    Temporary,
    Persistent,
}

impl XdrEncode for ContractDataDurability {
    fn encode(&self, out: &mut Vec<u8>) {
        match self {
            Self::Temporary => 0u32.encode(out),
            Self::Persistent => 1u32.encode(out),
        }
    }
}

impl XdrDecode for ContractDataDurability {
    fn decode(cur: &mut ReadCursor<'_>) -> Result<Self> {
        match cur.read_u32()? {
            0 => Ok(Self::Temporary),
            1 => Ok(Self::Persistent),
            value => Err(XdrError::InvalidDiscriminant {
                ty: "ContractDataDurability",
                value,
            }),
        }
    }
}

/// A key identifying one ledger entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerKey {
    Account {
        account_id: AccountId,
    },
    TrustLine {
        account_id: AccountId,
        asset: TrustLineAsset,
    },
    Offer {
        seller_id: AccountId,
        offer_id: i64,
    },
    Data {
        account_id: AccountId,
        data_name: String,
    },
    ClaimableBalance {
        balance_id: ClaimableBalanceId,
    },
    LiquidityPool {
        pool_id: Hash256,
    },
    ContractData {
        contract: ScAddress,
        key: ScVal,
        durability: ContractDataDurability,
    },
    ContractCode {
        hash: Hash256,
    },
}

impl XdrEncode for LedgerKey {
    fn encode(&self, out: &mut Vec<u8>) {
        match self {
            Self::Account { account_id } => {
                0u32.encode(out);
                account_id.encode(out);
            }
            Self::TrustLine { account_id, asset } => {
                1u32.encode(out);
                account_id.encode(out);
                asset.encode(out);
            }
            Self::Offer {
                seller_id,
                offer_id,
            } => {
                2u32.encode(out);
                seller_id.encode(out);
                offer_id.encode(out);
            }
            Self::Data {
                account_id,
                data_name,
            } => {
                3u32.encode(out);
                account_id.encode(out);
                encode_string(out, data_name);
            }
            Self::ClaimableBalance { balance_id } => {
                4u32.encode(out);
                balance_id.encode(out);
            }
            Self::LiquidityPool { pool_id } => {
                5u32.encode(out);
                pool_id.encode(out);
            }
            Self::ContractData {
                contract,
                key,
                durability,
            } => {
                6u32.encode(out);
                contract.encode(out);
                key.encode(out);
                durability.encode(out);
            }
            Self::ContractCode { hash } => {
                7u32.encode(out);
                hash.encode(out);
            }
        }
    }
}

impl XdrDecode for LedgerKey {
    fn decode(cur: &mut ReadCursor<'_>) -> Result<Self> {
        match cur.read_u32()? {
            0 => Ok(Self::Account {
                account_id: AccountId::decode(cur)?,
            }),
            1 => Ok(Self::TrustLine {
                account_id: AccountId::decode(cur)?,
                asset: TrustLineAsset::decode(cur)?,
            }),
            2 => Ok(Self::Offer {
                seller_id: AccountId::decode(cur)?,
                offer_id: cur.read_i64()?,
            }),
            3 => Ok(Self::Data {
                account_id: AccountId::decode(cur)?,
                data_name: cur.read_string("data name", MAX_DATA_NAME)?,
            }),
            4 => Ok(Self::ClaimableBalance {
                balance_id: ClaimableBalanceId::decode(cur)?,
            }),
            5 => Ok(Self::LiquidityPool {
                pool_id: Hash256::decode(cur)?,
            }),
            6 => Ok(Self::ContractData {
                contract: ScAddress::decode(cur)?,
                key: ScVal::decode(cur)?,
                durability: ContractDataDurability::decode(cur)?,
            }),
            7 => Ok(Self::ContractCode {
                hash: Hash256::decode(cur)?,
            }),
            value => Err(XdrError::InvalidDiscriminant {
                ty: "LedgerKey",
                value,
            }),
        }
    }
}
