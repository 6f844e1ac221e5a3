//! Operations: the tagged union of everything a transaction can do.
//!
//! Each variant's wire number is fixed by the protocol; the enum is closed,
//! so adding a variant forces every encode/decode/transcode site to be
//! updated at compile time.

use crate::asset::{Asset, AssetCode, ChangeTrustAsset};
use crate::claim::{Claimant, ClaimableBalanceId, MAX_CLAIMANTS};
use crate::codec::{encode_string, encode_var_opaque, ReadCursor, XdrDecode, XdrEncode};
use crate::error::{Result, XdrError};
use crate::ledger_key::{LedgerKey, MAX_DATA_NAME};
use crate::soroban::{HostFunction, SorobanAuthorizationEntry};
use crate::types::{AccountId, Hash256, MuxedAccount, Price, Signer, SignerKey};

/// Maximum number of hops in a path payment.
pub const MAX_PATH_LEN: usize = 5;

/// Maximum byte length of a home domain.
pub const MAX_HOME_DOMAIN: usize = 32;

/// Maximum byte length of a managed data value.
pub const MAX_DATA_VALUE: usize = 64;

/// The target of a revoke-sponsorship operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevokeSponsorship {
    LedgerEntry(LedgerKey),
    Signer {
        account_id: AccountId,
        signer_key: SignerKey,
    },
}

impl XdrEncode for RevokeSponsorship {
    fn encode(&self, out: &mut Vec<u8>) {
        match self {
            Self::LedgerEntry(key) => {
                0u32.encode(out);
                key.encode(out);
            }
            Self::Signer {
                account_id,
                signer_key,
            } => {
                1u32.encode(out);
                account_id.encode(out);
                signer_key.encode(out);
            }
        }
    }
}

impl XdrDecode for RevokeSponsorship {
    fn decode(cur: &mut ReadCursor<'_>) -> Result<Self> {
        match cur.read_u32()? {
            0 => Ok(Self::LedgerEntry(LedgerKey::decode(cur)?)),
            1 => Ok(Self::Signer {
                account_id: AccountId::decode(cur)?,
                signer_key: SignerKey::decode(cur)?,
            }),
            value => Err(XdrError::InvalidDiscriminant {
                ty: "RevokeSponsorship",
                value,
            }),
        }
    }
}

/// The body of one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationBody {
    CreateAccount {
        destination: AccountId,
        starting_balance: i64,
    },
    Payment {
        destination: MuxedAccount,
        asset: Asset,
        amount: i64,
    },
    PathPaymentStrictReceive {
        send_asset: Asset,
        send_max: i64,
        destination: MuxedAccount,
        dest_asset: Asset,
        dest_amount: i64,
        path: Vec<Asset>,
    },
    ManageSellOffer {
        selling: Asset,
        buying: Asset,
        amount: i64,
        price: Price,
        offer_id: i64,
    },
    CreatePassiveSellOffer {
        selling: Asset,
        buying: Asset,
        amount: i64,
        price: Price,
    },
    SetOptions {
        inflation_dest: Option<AccountId>,
        clear_flags: Option<u32>,
        set_flags: Option<u32>,
        master_weight: Option<u32>,
        low_threshold: Option<u32>,
        med_threshold: Option<u32>,
        high_threshold: Option<u32>,
        home_domain: Option<String>,
        signer: Option<Signer>,
    },
    ChangeTrust {
        line: ChangeTrustAsset,
        limit: i64,
    },
    AllowTrust {
        trustor: AccountId,
        asset: AssetCode,
        authorize: u32,
    },
    AccountMerge {
        destination: MuxedAccount,
    },
    Inflation,
    ManageData {
        data_name: String,
        data_value: Option<Vec<u8>>,
    },
    BumpSequence {
        bump_to: i64,
    },
    ManageBuyOffer {
        selling: Asset,
        buying: Asset,
        buy_amount: i64,
        price: Price,
        offer_id: i64,
    },
    PathPaymentStrictSend {
        send_asset: Asset,
        send_amount: i64,
        destination: MuxedAccount,
        dest_asset: Asset,
        dest_min: i64,
        path: Vec<Asset>,
    },
    CreateClaimableBalance {
        asset: Asset,
        amount: i64,
        claimants: Vec<Claimant>,
    },
    ClaimClaimableBalance {
        balance_id: ClaimableBalanceId,
    },
    BeginSponsoringFutureReserves {
        sponsored_id: AccountId,
    },
    EndSponsoringFutureReserves,
    RevokeSponsorship(RevokeSponsorship),
    Clawback {
        asset: Asset,
        from: MuxedAccount,
        amount: i64,
    },
    ClawbackClaimableBalance {
        balance_id: ClaimableBalanceId,
    },
    SetTrustLineFlags {
        trustor: AccountId,
        asset: Asset,
        clear_flags: u32,
        set_flags: u32,
    },
    LiquidityPoolDeposit {
        pool_id: Hash256,
        max_amount_a: i64,
        max_amount_b: i64,
        min_price: Price,
        max_price: Price,
    },
    LiquidityPoolWithdraw {
        pool_id: Hash256,
        amount: i64,
        min_amount_a: i64,
        min_amount_b: i64,
    },
    InvokeHostFunction {
        host_function: HostFunction,
        auth: Vec<SorobanAuthorizationEntry>,
    },
    ExtendFootprintTtl {
        extend_to: u32,
    },
    RestoreFootprint,
}

impl OperationBody {
    /// The wire discriminant of this variant.
    pub fn discriminant(&self) -> u32 {
        match self {
            Self::CreateAccount { .. } => 0,
            Self::Payment { .. } => 1,
            Self::PathPaymentStrictReceive { .. } => 2,
            Self::ManageSellOffer { .. } => 3,
            Self::CreatePassiveSellOffer { .. } => 4,
            Self::SetOptions { .. } => 5,
            Self::ChangeTrust { .. } => 6,
            Self::AllowTrust { .. } => 7,
            Self::AccountMerge { .. } => 8,
            Self::Inflation => 9,
            Self::ManageData { .. } => 10,
            Self::BumpSequence { .. } => 11,
            Self::ManageBuyOffer { .. } => 12,
            Self::PathPaymentStrictSend { .. } => 13,
            Self::CreateClaimableBalance { .. } => 14,
            Self::ClaimClaimableBalance { .. } => 15,
            Self::BeginSponsoringFutureReserves { .. } => 16,
            Self::EndSponsoringFutureReserves => 17,
            Self::RevokeSponsorship(_) => 18,
            Self::Clawback { .. } => 19,
            Self::ClawbackClaimableBalance { .. } => 20,
            Self::SetTrustLineFlags { .. } => 21,
            Self::LiquidityPoolDeposit { .. } => 22,
            Self::LiquidityPoolWithdraw { .. } => 23,
            Self::InvokeHostFunction { .. } => 24,
            Self::ExtendFootprintTtl { .. } => 25,
            Self::RestoreFootprint => 26,
        }
    }
}

fn check_path(path: &[Asset]) -> Result<()> {
    if path.len() > MAX_PATH_LEN {
        return Err(XdrError::LengthExceedsMax {
            ty: "payment path",
            len: path.len(),
            max: MAX_PATH_LEN,
        });
    }
    Ok(())
}

impl XdrEncode for OperationBody {
    fn encode(&self, out: &mut Vec<u8>) {
        self.discriminant().encode(out);
        match self {
            Self::CreateAccount {
                destination,
                starting_balance,
            } => {
                destination.encode(out);
                starting_balance.encode(out);
            }
            Self::Payment {
                destination,
                asset,
                amount,
            } => {
                destination.encode(out);
                asset.encode(out);
                amount.encode(out);
            }
            Self::PathPaymentStrictReceive {
                send_asset,
                send_max,
                destination,
                dest_asset,
                dest_amount,
                path,
            } => {
                send_asset.encode(out);
                send_max.encode(out);
                destination.encode(out);
                dest_asset.encode(out);
                dest_amount.encode(out);
                path.encode(out);
            }
            Self::ManageSellOffer {
                selling,
                buying,
                amount,
                price,
                offer_id,
            } => {
                selling.encode(out);
                buying.encode(out);
                amount.encode(out);
                price.encode(out);
                offer_id.encode(out);
            }
            Self::CreatePassiveSellOffer {
                selling,
                buying,
                amount,
                price,
            } => {
                selling.encode(out);
                buying.encode(out);
                amount.encode(out);
                price.encode(out);
            }
            Self::SetOptions {
                inflation_dest,
                clear_flags,
                set_flags,
                master_weight,
                low_threshold,
                med_threshold,
                high_threshold,
                home_domain,
                signer,
            } => {
                inflation_dest.encode(out);
                clear_flags.encode(out);
                set_flags.encode(out);
                master_weight.encode(out);
                low_threshold.encode(out);
                med_threshold.encode(out);
                high_threshold.encode(out);
                match home_domain {
                    Some(domain) => {
                        1u32.encode(out);
                        encode_string(out, domain);
                    }
                    None => 0u32.encode(out),
                }
                signer.encode(out);
            }
            Self::ChangeTrust { line, limit } => {
                line.encode(out);
                limit.encode(out);
            }
            Self::AllowTrust {
                trustor,
                asset,
                authorize,
            } => {
                trustor.encode(out);
                asset.encode(out);
                authorize.encode(out);
            }
            Self::AccountMerge { destination } => destination.encode(out),
            Self::Inflation => {}
            Self::ManageData {
                data_name,
                data_value,
            } => {
                encode_string(out, data_name);
                match data_value {
                    Some(value) => {
                        1u32.encode(out);
                        encode_var_opaque(out, value);
                    }
                    None => 0u32.encode(out),
                }
            }
            Self::BumpSequence { bump_to } => bump_to.encode(out),
            Self::ManageBuyOffer {
                selling,
                buying,
                buy_amount,
                price,
                offer_id,
            } => {
                selling.encode(out);
                buying.encode(out);
                buy_amount.encode(out);
                price.encode(out);
                offer_id.encode(out);
            }
            Self::PathPaymentStrictSend {
                send_asset,
                send_amount,
                destination,
                dest_asset,
                dest_min,
                path,
            } => {
                send_asset.encode(out);
                send_amount.encode(out);
                destination.encode(out);
                dest_asset.encode(out);
                dest_min.encode(out);
                path.encode(out);
            }
            Self::CreateClaimableBalance {
                asset,
                amount,
                claimants,
            } => {
                asset.encode(out);
                amount.encode(out);
                claimants.encode(out);
            }
            Self::ClaimClaimableBalance { balance_id } => balance_id.encode(out),
            Self::BeginSponsoringFutureReserves { sponsored_id } => sponsored_id.encode(out),
            Self::EndSponsoringFutureReserves => {}
            Self::RevokeSponsorship(target) => target.encode(out),
            Self::Clawback {
                asset,
                from,
                amount,
            } => {
                asset.encode(out);
                from.encode(out);
                amount.encode(out);
            }
            Self::ClawbackClaimableBalance { balance_id } => balance_id.encode(out),
            Self::SetTrustLineFlags {
                trustor,
                asset,
                clear_flags,
                set_flags,
            } => {
                trustor.encode(out);
                asset.encode(out);
                clear_flags.encode(out);
                set_flags.encode(out);
            }
            Self::LiquidityPoolDeposit {
                pool_id,
                max_amount_a,
                max_amount_b,
                min_price,
                max_price,
            } => {
                pool_id.encode(out);
                max_amount_a.encode(out);
                max_amount_b.encode(out);
                min_price.encode(out);
                max_price.encode(out);
            }
            Self::LiquidityPoolWithdraw {
                pool_id,
                amount,
                min_amount_a,
                min_amount_b,
            } => {
                pool_id.encode(out);
                amount.encode(out);
                min_amount_a.encode(out);
                min_amount_b.encode(out);
            }
            Self::InvokeHostFunction {
                host_function,
                auth,
            } => {
                host_function.encode(out);
                auth.encode(out);
            }
            Self::ExtendFootprintTtl { extend_to } => {
                // Extension point, always v0.
                0u32.encode(out);
                extend_to.encode(out);
            }
            Self::RestoreFootprint => 0u32.encode(out),
        }
    }
}

impl XdrDecode for OperationBody {
    fn decode(cur: &mut ReadCursor<'_>) -> Result<Self> {
        match cur.read_u32()? {
            0 => Ok(Self::CreateAccount {
                destination: AccountId::decode(cur)?,
                starting_balance: cur.read_i64()?,
            }),
            1 => Ok(Self::Payment {
                destination: MuxedAccount::decode(cur)?,
                asset: Asset::decode(cur)?,
                amount: cur.read_i64()?,
            }),
            2 => {
                let send_asset = Asset::decode(cur)?;
                let send_max = cur.read_i64()?;
                let destination = MuxedAccount::decode(cur)?;
                let dest_asset = Asset::decode(cur)?;
                let dest_amount = cur.read_i64()?;
                let path: Vec<Asset> = Vec::decode(cur)?;
                check_path(&path)?;
                Ok(Self::PathPaymentStrictReceive {
                    send_asset,
                    send_max,
                    destination,
                    dest_asset,
                    dest_amount,
                    path,
                })
            }
            3 => Ok(Self::ManageSellOffer {
                selling: Asset::decode(cur)?,
                buying: Asset::decode(cur)?,
                amount: cur.read_i64()?,
                price: Price::decode(cur)?,
                offer_id: cur.read_i64()?,
            }),
            4 => Ok(Self::CreatePassiveSellOffer {
                selling: Asset::decode(cur)?,
                buying: Asset::decode(cur)?,
                amount: cur.read_i64()?,
                price: Price::decode(cur)?,
            }),
            5 => Ok(Self::SetOptions {
                inflation_dest: Option::decode(cur)?,
                clear_flags: Option::decode(cur)?,
                set_flags: Option::decode(cur)?,
                master_weight: Option::decode(cur)?,
                low_threshold: Option::decode(cur)?,
                med_threshold: Option::decode(cur)?,
                high_threshold: Option::decode(cur)?,
                home_domain: if cur.read_bool()? {
                    Some(cur.read_string("home domain", MAX_HOME_DOMAIN)?)
                } else {
                    None
                },
                signer: Option::decode(cur)?,
            }),
            6 => Ok(Self::ChangeTrust {
                line: ChangeTrustAsset::decode(cur)?,
                limit: cur.read_i64()?,
            }),
            7 => Ok(Self::AllowTrust {
                trustor: AccountId::decode(cur)?,
                asset: AssetCode::decode(cur)?,
                authorize: cur.read_u32()?,
            }),
            8 => Ok(Self::AccountMerge {
                destination: MuxedAccount::decode(cur)?,
            }),
            9 => Ok(Self::Inflation),
            10 => Ok(Self::ManageData {
                data_name: cur.read_string("data name", MAX_DATA_NAME)?,
                data_value: if cur.read_bool()? {
                    Some(cur.read_var_opaque("data value", MAX_DATA_VALUE)?)
                } else {
                    None
                },
            }),
            11 => Ok(Self::BumpSequence {
                bump_to: cur.read_i64()?,
            }),
            12 => Ok(Self::ManageBuyOffer {
                selling: Asset::decode(cur)?,
                buying: Asset::decode(cur)?,
                buy_amount: cur.read_i64()?,
                price: Price::decode(cur)?,
                offer_id: cur.read_i64()?,
            }),
            13 => {
                let send_asset = Asset::decode(cur)?;
                let send_amount = cur.read_i64()?;
                let destination = MuxedAccount::decode(cur)?;
                let dest_asset = Asset::decode(cur)?;
                let dest_min = cur.read_i64()?;
                let path: Vec<Asset> = Vec::decode(cur)?;
                check_path(&path)?;
                Ok(Self::PathPaymentStrictSend {
                    send_asset,
                    send_amount,
                    destination,
                    dest_asset,
                    dest_min,
                    path,
                })
            }
            14 => {
                let asset = Asset::decode(cur)?;
                let amount = cur.read_i64()?;
                let claimants: Vec<Claimant> = Vec::decode(cur)?;
                if claimants.len() > MAX_CLAIMANTS {
                    return Err(XdrError::LengthExceedsMax {
                        ty: "claimants",
                        len: claimants.len(),
                        max: MAX_CLAIMANTS,
                    });
                }
                Ok(Self::CreateClaimableBalance {
                    asset,
                    amount,
                    claimants,
                })
            }
            15 => Ok(Self::ClaimClaimableBalance {
                balance_id: ClaimableBalanceId::decode(cur)?,
            }),
            16 => Ok(Self::BeginSponsoringFutureReserves {
                sponsored_id: AccountId::decode(cur)?,
            }),
            17 => Ok(Self::EndSponsoringFutureReserves),
            18 => Ok(Self::RevokeSponsorship(RevokeSponsorship::decode(cur)?)),
            19 => Ok(Self::Clawback {
                asset: Asset::decode(cur)?,
                from: MuxedAccount::decode(cur)?,
                amount: cur.read_i64()?,
            }),
            20 => Ok(Self::ClawbackClaimableBalance {
                balance_id: ClaimableBalanceId::decode(cur)?,
            }),
            21 => Ok(Self::SetTrustLineFlags {
                trustor: AccountId::decode(cur)?,
                asset: Asset::decode(cur)?,
                clear_flags: cur.read_u32()?,
                set_flags: cur.read_u32()?,
            }),
            22 => Ok(Self::LiquidityPoolDeposit {
                pool_id: Hash256::decode(cur)?,
                max_amount_a: cur.read_i64()?,
                max_amount_b: cur.read_i64()?,
                min_price: Price::decode(cur)?,
                max_price: Price::decode(cur)?,
            }),
            23 => Ok(Self::LiquidityPoolWithdraw {
                pool_id: Hash256::decode(cur)?,
                amount: cur.read_i64()?,
                min_amount_a: cur.read_i64()?,
                min_amount_b: cur.read_i64()?,
            }),
            24 => Ok(Self::InvokeHostFunction {
                host_function: HostFunction::decode(cur)?,
                auth: Vec::decode(cur)?,
            }),
            25 => {
                match cur.read_u32()? {
                    0 => {}
                    value => {
                        return Err(XdrError::InvalidDiscriminant {
                            ty: "ExtendFootprintTtl ext",
                            value,
                        })
                    }
                }
                Ok(Self::ExtendFootprintTtl {
                    extend_to: cur.read_u32()?,
                })
            }
            26 => match cur.read_u32()? {
                0 => Ok(Self::RestoreFootprint),
                value => Err(XdrError::InvalidDiscriminant {
                    ty: "RestoreFootprint ext",
                    value,
                }),
            },
            value => Err(XdrError::InvalidDiscriminant {
                ty: "OperationBody",
                value,
            }),
        }
    }
}

/// One operation: an optional per-operation source override plus the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    pub source: Option<MuxedAccount>,
    pub body: OperationBody,
}

impl Operation {
    /// An operation running as the transaction's source account.
    pub fn new(body: OperationBody) -> Self {
        Self { source: None, body }
    }

    /// An operation with its own source account.
    pub fn with_source(source: MuxedAccount, body: OperationBody) -> Self {
        Self {
            source: Some(source),
            body,
        }
    }
}

impl XdrEncode for Operation {
    fn encode(&self, out: &mut Vec<u8>) {
        self.source.encode(out);
        self.body.encode(out);
    }
}

impl XdrDecode for Operation {
    fn decode(cur: &mut ReadCursor<'_>) -> Result<Self> {
        Ok(Self {
            source: Option::decode(cur)?,
            body: OperationBody::decode(cur)?,
        })
    }
}
