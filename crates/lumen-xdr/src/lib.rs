//! # Lumen XDR
//!
//! The ledger wire format: a strict XDR codec plus the typed object model
//! for transactions, operations, contract values, and envelopes.
//!
//! This crate contains no I/O and no cryptography. It is pure encoding and
//! decoding over byte buffers.
//!
//! ## Key Types
//!
//! - [`TransactionEnvelope`] - The top-level type exchanged in base64
//! - [`Transaction`] / [`Operation`] - The transaction object model
//! - [`ScVal`] - Contract values, including 128/256-bit integers
//! - [`XdrEncode`] / [`XdrDecode`] - The codec traits everything implements
//!
//! ## Wire Discipline
//!
//! Encoding is infallible because values are validated at construction.
//! Decoding is strict: bad padding, unknown discriminants, out-of-range
//! lengths, and trailing bytes are all hard errors. See [`codec`].

pub mod asset;
pub mod bignum;
pub mod claim;
pub mod codec;
pub mod error;
pub mod ledger_key;
pub mod memo;
pub mod operation;
pub mod scval;
pub mod soroban;
pub mod transaction;
pub mod types;

pub use asset::{
    Asset, AssetCode, AssetCode4, AssetCode12, ChangeTrustAsset,
    LiquidityPoolConstantProductParameters, LiquidityPoolParameters, TrustLineAsset,
};
pub use bignum::{Int128Parts, Int256Parts, UInt128Parts, UInt256Parts};
pub use claim::{ClaimPredicate, Claimant, ClaimableBalanceId};
pub use codec::{ReadCursor, XdrDecode, XdrEncode};
pub use error::{Result, XdrError};
pub use ledger_key::{ContractDataDurability, LedgerKey};
pub use memo::Memo;
pub use operation::{Operation, OperationBody, RevokeSponsorship};
pub use scval::{ScAddress, ScMapEntry, ScSymbol, ScVal};
pub use soroban::{
    ContractExecutable, ContractIdPreimage, CreateContractArgs, HostFunction, InvokeContractArgs,
    LedgerFootprint, SorobanAddressCredentials, SorobanAuthorizationEntry,
    SorobanAuthorizedFunction, SorobanAuthorizedInvocation, SorobanCredentials, SorobanResources,
    SorobanTransactionData,
};
pub use transaction::{
    FeeBumpTransaction, FeeBumpTransactionEnvelope, LedgerBounds, Preconditions, PreconditionsV2,
    TimeBounds, Transaction, TransactionEnvelope, TransactionExt, TransactionV0,
    TransactionV0Envelope, TransactionV1Envelope,
};
pub use types::{
    AccountId, DecoratedSignature, Hash256, MuxedAccount, Price, Signer, SignerKey,
    MAX_OPERATIONS,
};
