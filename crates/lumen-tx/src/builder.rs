//! Building transactions.
//!
//! The builder accumulates operations and options mutably and `build()`
//! freezes them into an immutable [`Transaction`]. Identical inputs always
//! produce byte-identical XDR. The sequence number is supplied by the
//! caller; this layer never talks to the network.

use lumen_xdr::{
    Memo, MuxedAccount, Operation, Preconditions, SorobanTransactionData, TimeBounds, Transaction,
    TransactionExt, MAX_OPERATIONS,
};

use crate::error::{Result, TxError};

/// Default fee in stroops per operation.
pub const BASE_FEE: u32 = 100;

/// Builder for transactions.
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    source: MuxedAccount,
    seq_num: i64,
    fee: u32,
    memo: Memo,
    cond: Preconditions,
    operations: Vec<Operation>,
    soroban_data: Option<SorobanTransactionData>,
}

impl TransactionBuilder {
    /// Start building a transaction for `source` at sequence `seq_num`.
    pub fn new(source: MuxedAccount, seq_num: i64) -> Self {
        Self {
            source,
            seq_num,
            fee: BASE_FEE,
            memo: Memo::None,
            cond: Preconditions::None,
            operations: Vec::new(),
            soroban_data: None,
        }
    }

    /// Set the total fee in stroops.
    pub fn fee(mut self, fee: u32) -> Self {
        self.fee = fee;
        self
    }

    /// Set the memo.
    pub fn memo(mut self, memo: Memo) -> Self {
        self.memo = memo;
        self
    }

    /// Set the full precondition set.
    pub fn preconditions(mut self, cond: Preconditions) -> Self {
        self.cond = cond;
        self
    }

    /// Set a plain time-bounds precondition.
    pub fn time_bounds(mut self, min_time: u64, max_time: u64) -> Self {
        self.cond = Preconditions::Time(TimeBounds { min_time, max_time });
        self
    }

    /// Attach contract resource data, carried in the v1 extension.
    pub fn soroban_data(mut self, data: SorobanTransactionData) -> Self {
        self.soroban_data = Some(data);
        self
    }

    /// Append an operation.
    pub fn add_operation(mut self, op: Operation) -> Self {
        self.operations.push(op);
        self
    }

    /// Freeze into a transaction, validating the operation count.
    pub fn build(self) -> Result<Transaction> {
        if self.operations.is_empty() {
            return Err(TxError::NoOperations);
        }
        if self.operations.len() > MAX_OPERATIONS {
            return Err(TxError::TooManyOperations(self.operations.len()));
        }
        tracing::debug!(
            seq_num = self.seq_num,
            fee = self.fee,
            operations = self.operations.len(),
            "built transaction"
        );
        Ok(Transaction {
            source: self.source,
            fee: self.fee,
            seq_num: self.seq_num,
            cond: self.cond,
            memo: self.memo,
            operations: self.operations,
            ext: match self.soroban_data {
                Some(data) => TransactionExt::V1(data),
                None => TransactionExt::V0,
            },
        })
    }
}
