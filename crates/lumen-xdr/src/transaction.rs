//! Transactions, preconditions and the three envelope forms.

use crate::codec::{ReadCursor, XdrDecode, XdrEncode};
use crate::error::{Result, XdrError};
use crate::memo::Memo;
use crate::operation::Operation;
use crate::soroban::SorobanTransactionData;
use crate::types::{
    DecoratedSignature, MuxedAccount, SignerKey, MAX_EXTRA_SIGNERS, MAX_OPERATIONS,
};

/// Maximum number of signatures an envelope may carry.
pub const MAX_SIGNATURES: usize = 20;

/// A validity window in seconds since epoch. `max_time` of zero means no
/// upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeBounds {
    pub min_time: u64,
    pub max_time: u64,
}

impl XdrEncode for TimeBounds {
    fn encode(&self, out: &mut Vec<u8>) {
        self.min_time.encode(out);
        self.max_time.encode(out);
    }
}

impl XdrDecode for TimeBounds {
    fn decode(cur: &mut ReadCursor<'_>) -> Result<Self> {
        Ok(Self {
            min_time: cur.read_u64()?,
            max_time: cur.read_u64()?,
        })
    }
}

/// A validity window in ledger sequence numbers. `max_ledger` of zero means
/// no upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerBounds {
    pub min_ledger: u32,
    pub max_ledger: u32,
}

impl XdrEncode for LedgerBounds {
    fn encode(&self, out: &mut Vec<u8>) {
        self.min_ledger.encode(out);
        self.max_ledger.encode(out);
    }
}

impl XdrDecode for LedgerBounds {
    fn decode(cur: &mut ReadCursor<'_>) -> Result<Self> {
        Ok(Self {
            min_ledger: cur.read_u32()?,
            max_ledger: cur.read_u32()?,
        })
    }
}

/// The full validity precondition set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PreconditionsV2 {
    pub time_bounds: Option<TimeBounds>,
    pub ledger_bounds: Option<LedgerBounds>,
    pub min_seq_num: Option<i64>,
    pub min_seq_age: u64,
    pub min_seq_ledger_gap: u32,
    pub extra_signers: Vec<SignerKey>,
}

impl XdrEncode for PreconditionsV2 {
    fn encode(&self, out: &mut Vec<u8>) {
        self.time_bounds.encode(out);
        self.ledger_bounds.encode(out);
        self.min_seq_num.encode(out);
        self.min_seq_age.encode(out);
        self.min_seq_ledger_gap.encode(out);
        self.extra_signers.encode(out);
    }
}

impl XdrDecode for PreconditionsV2 {
    fn decode(cur: &mut ReadCursor<'_>) -> Result<Self> {
        let time_bounds = Option::decode(cur)?;
        let ledger_bounds = Option::decode(cur)?;
        let min_seq_num = Option::decode(cur)?;
        let min_seq_age = cur.read_u64()?;
        let min_seq_ledger_gap = cur.read_u32()?;
        let extra_signers: Vec<SignerKey> = Vec::decode(cur)?;
        if extra_signers.len() > MAX_EXTRA_SIGNERS {
            return Err(XdrError::LengthExceedsMax {
                ty: "extra signers",
                len: extra_signers.len(),
                max: MAX_EXTRA_SIGNERS,
            });
        }
        Ok(Self {
            time_bounds,
            ledger_bounds,
            min_seq_num,
            min_seq_age,
            min_seq_ledger_gap,
            extra_signers,
        })
    }
}

/// Transaction validity preconditions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Preconditions {
    #[default]
    None,
    Time(TimeBounds),
    V2(PreconditionsV2),
}

impl Preconditions {
    /// The time bounds, regardless of which form carries them.
    pub fn time_bounds(&self) -> Option<TimeBounds> {
        match self {
            Self::None => None,
            Self::Time(tb) => Some(*tb),
            Self::V2(v2) => v2.time_bounds,
        }
    }
}

impl XdrEncode for Preconditions {
    fn encode(&self, out: &mut Vec<u8>) {
        match self {
            Self::None => 0u32.encode(out),
            Self::Time(tb) => {
                1u32.encode(out);
                tb.encode(out);
            }
            Self::V2(v2) => {
                2u32.encode(out);
                v2.encode(out);
            }
        }
    }
}

impl XdrDecode for Preconditions {
    fn decode(cur: &mut ReadCursor<'_>) -> Result<Self> {
        match cur.read_u32()? {
            0 => Ok(Self::None),
            1 => Ok(Self::Time(TimeBounds::decode(cur)?)),
            2 => Ok(Self::V2(PreconditionsV2::decode(cur)?)),
            value => Err(XdrError::InvalidDiscriminant {
                ty: "Preconditions",
                value,
            }),
        }
    }
}

/// Transaction extension: empty, or contract resource data.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TransactionExt {
    #[default]
    V0,
    V1(SorobanTransactionData),
}

impl XdrEncode for TransactionExt {
    fn encode(&self, out: &mut Vec<u8>) {
        match self {
            Self::V0 => 0u32.encode(out),
            Self::V1(data) => {
                1u32.encode(out);
                data.encode(out);
            }
        }
    }
}

impl XdrDecode for TransactionExt {
    fn decode(cur: &mut ReadCursor<'_>) -> Result<Self> {
        match cur.read_u32()? {
            0 => Ok(Self::V0),
            1 => Ok(Self::V1(SorobanTransactionData::decode(cur)?)),
            value => Err(XdrError::InvalidDiscriminant {
                ty: "TransactionExt",
                value,
            }),
        }
    }
}

fn check_operations(operations: &[Operation]) -> Result<()> {
    if operations.len() > MAX_OPERATIONS {
        return Err(XdrError::LengthExceedsMax {
            ty: "operations",
            len: operations.len(),
            max: MAX_OPERATIONS,
        });
    }
    Ok(())
}

fn check_signatures(signatures: &[DecoratedSignature]) -> Result<()> {
    if signatures.len() > MAX_SIGNATURES {
        return Err(XdrError::LengthExceedsMax {
            ty: "signatures",
            len: signatures.len(),
            max: MAX_SIGNATURES,
        });
    }
    Ok(())
}

/// A transaction in its current form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub source: MuxedAccount,
    pub fee: u32,
    pub seq_num: i64,
    pub cond: Preconditions,
    pub memo: Memo,
    pub operations: Vec<Operation>,
    pub ext: TransactionExt,
}

impl XdrEncode for Transaction {
    fn encode(&self, out: &mut Vec<u8>) {
        self.source.encode(out);
        self.fee.encode(out);
        self.seq_num.encode(out);
        self.cond.encode(out);
        self.memo.encode(out);
        self.operations.encode(out);
        self.ext.encode(out);
    }
}

impl XdrDecode for Transaction {
    fn decode(cur: &mut ReadCursor<'_>) -> Result<Self> {
        let source = MuxedAccount::decode(cur)?;
        let fee = cur.read_u32()?;
        let seq_num = cur.read_i64()?;
        let cond = Preconditions::decode(cur)?;
        let memo = Memo::decode(cur)?;
        let operations: Vec<Operation> = Vec::decode(cur)?;
        check_operations(&operations)?;
        let ext = TransactionExt::decode(cur)?;
        Ok(Self {
            source,
            fee,
            seq_num,
            cond,
            memo,
            operations,
            ext,
        })
    }
}

/// The legacy transaction form: a raw ed25519 source key and at most a
/// time-bounds precondition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionV0 {
    pub source_ed25519: [u8; 32],
    pub fee: u32,
    pub seq_num: i64,
    pub time_bounds: Option<TimeBounds>,
    pub memo: Memo,
    pub operations: Vec<Operation>,
}

impl TransactionV0 {
    /// Upgrade to the current form. The signable hash of a legacy envelope
    /// is defined over this upgraded form.
    pub fn upgrade(&self) -> Transaction {
        Transaction {
            source: MuxedAccount::Ed25519(self.source_ed25519),
            fee: self.fee,
            seq_num: self.seq_num,
            cond: match self.time_bounds {
                Some(tb) => Preconditions::Time(tb),
                None => Preconditions::None,
            },
            memo: self.memo.clone(),
            operations: self.operations.clone(),
            ext: TransactionExt::V0,
        }
    }
}

impl XdrEncode for TransactionV0 {
    fn encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.source_ed25519);
        self.fee.encode(out);
        self.seq_num.encode(out);
        self.time_bounds.encode(out);
        self.memo.encode(out);
        self.operations.encode(out);
        // Extension point, always v0.
        0u32.encode(out);
    }
}

impl XdrDecode for TransactionV0 {
    fn decode(cur: &mut ReadCursor<'_>) -> Result<Self> {
        let source_ed25519 = cur.read_fixed::<32>()?;
        let fee = cur.read_u32()?;
        let seq_num = cur.read_i64()?;
        let time_bounds = Option::decode(cur)?;
        let memo = Memo::decode(cur)?;
        let operations: Vec<Operation> = Vec::decode(cur)?;
        check_operations(&operations)?;
        match cur.read_u32()? {
            0 => {}
            value => {
                return Err(XdrError::InvalidDiscriminant {
                    ty: "TransactionV0 ext",
                    value,
                })
            }
        }
        Ok(Self {
            source_ed25519,
            fee,
            seq_num,
            time_bounds,
            memo,
            operations,
        })
    }
}

/// A legacy transaction plus its signatures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionV0Envelope {
    pub tx: TransactionV0,
    pub signatures: Vec<DecoratedSignature>,
}

impl XdrEncode for TransactionV0Envelope {
    fn encode(&self, out: &mut Vec<u8>) {
        self.tx.encode(out);
        self.signatures.encode(out);
    }
}

impl XdrDecode for TransactionV0Envelope {
    fn decode(cur: &mut ReadCursor<'_>) -> Result<Self> {
        let tx = TransactionV0::decode(cur)?;
        let signatures: Vec<DecoratedSignature> = Vec::decode(cur)?;
        check_signatures(&signatures)?;
        Ok(Self { tx, signatures })
    }
}

/// A transaction plus its signatures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionV1Envelope {
    pub tx: Transaction,
    pub signatures: Vec<DecoratedSignature>,
}

impl XdrEncode for TransactionV1Envelope {
    fn encode(&self, out: &mut Vec<u8>) {
        self.tx.encode(out);
        self.signatures.encode(out);
    }
}

impl XdrDecode for TransactionV1Envelope {
    fn decode(cur: &mut ReadCursor<'_>) -> Result<Self> {
        let tx = Transaction::decode(cur)?;
        let signatures: Vec<DecoratedSignature> = Vec::decode(cur)?;
        check_signatures(&signatures)?;
        Ok(Self { tx, signatures })
    }
}

/// A fee bump: a new fee source pays a replacement fee for an already
/// signed inner envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeBumpTransaction {
    pub fee_source: MuxedAccount,
    pub fee: i64,
    pub inner: TransactionV1Envelope,
}

impl XdrEncode for FeeBumpTransaction {
    fn encode(&self, out: &mut Vec<u8>) {
        self.fee_source.encode(out);
        self.fee.encode(out);
        // The inner envelope nests under its own envelope-type tag.
        2u32.encode(out);
        self.inner.encode(out);
        // Extension point, always v0.
        0u32.encode(out);
    }
}

impl XdrDecode for FeeBumpTransaction {
    fn decode(cur: &mut ReadCursor<'_>) -> Result<Self> {
        let fee_source = MuxedAccount::decode(cur)?;
        let fee = cur.read_i64()?;
        match cur.read_u32()? {
            2 => {}
            value => {
                return Err(XdrError::InvalidDiscriminant {
                    ty: "FeeBumpTransaction innerTx",
                    value,
                })
            }
        }
        let inner = TransactionV1Envelope::decode(cur)?;
        match cur.read_u32()? {
            0 => {}
            value => {
                return Err(XdrError::InvalidDiscriminant {
                    ty: "FeeBumpTransaction ext",
                    value,
                })
            }
        }
        Ok(Self {
            fee_source,
            fee,
            inner,
        })
    }
}

/// A fee bump plus the fee source's signatures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeBumpTransactionEnvelope {
    pub tx: FeeBumpTransaction,
    pub signatures: Vec<DecoratedSignature>,
}

impl XdrEncode for FeeBumpTransactionEnvelope {
    fn encode(&self, out: &mut Vec<u8>) {
        self.tx.encode(out);
        self.signatures.encode(out);
    }
}

impl XdrDecode for FeeBumpTransactionEnvelope {
    fn decode(cur: &mut ReadCursor<'_>) -> Result<Self> {
        let tx = FeeBumpTransaction::decode(cur)?;
        let signatures: Vec<DecoratedSignature> = Vec::decode(cur)?;
        check_signatures(&signatures)?;
        Ok(Self { tx, signatures })
    }
}

/// Any of the three envelope forms. This is the top-level type exchanged
/// in base64 between tools.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionEnvelope {
    V0(TransactionV0Envelope),
    V1(TransactionV1Envelope),
    FeeBump(FeeBumpTransactionEnvelope),
}

impl TransactionEnvelope {
    /// The signatures attached at this envelope's level.
    pub fn signatures(&self) -> &[DecoratedSignature] {
        match self {
            Self::V0(e) => &e.signatures,
            Self::V1(e) => &e.signatures,
            Self::FeeBump(e) => &e.signatures,
        }
    }

    /// Append a signature at this envelope's level. Duplicates are kept.
    pub fn push_signature(&mut self, sig: DecoratedSignature) {
        match self {
            Self::V0(e) => e.signatures.push(sig),
            Self::V1(e) => e.signatures.push(sig),
            Self::FeeBump(e) => e.signatures.push(sig),
        }
    }
}

impl XdrEncode for TransactionEnvelope {
    fn encode(&self, out: &mut Vec<u8>) {
        match self {
            Self::V0(e) => {
                0u32.encode(out);
                e.encode(out);
            }
            Self::V1(e) => {
                2u32.encode(out);
                e.encode(out);
            }
            Self::FeeBump(e) => {
                5u32.encode(out);
                e.encode(out);
            }
        }
    }
}

impl XdrDecode for TransactionEnvelope {
    fn decode(cur: &mut ReadCursor<'_>) -> Result<Self> {
        match cur.read_u32()? {
            0 => Ok(Self::V0(TransactionV0Envelope::decode(cur)?)),
            2 => Ok(Self::V1(TransactionV1Envelope::decode(cur)?)),
            5 => Ok(Self::FeeBump(FeeBumpTransactionEnvelope::decode(cur)?)),
            value => Err(XdrError::InvalidDiscriminant {
                ty: "TransactionEnvelope",
                value,
            }),
        }
    }
}
