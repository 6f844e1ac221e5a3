//! Variant name tables shared by the writer and the parser.

/// Operation variant names and their field prefixes, indexed by wire
/// discriminant. An empty prefix means the body has no field block.
pub(crate) const OP_NAMES: [(&str, &str); 27] = [
    ("CREATE_ACCOUNT", "createAccountOp"),
    ("PAYMENT", "paymentOp"),
    ("PATH_PAYMENT_STRICT_RECEIVE", "pathPaymentStrictReceiveOp"),
    ("MANAGE_SELL_OFFER", "manageSellOfferOp"),
    ("CREATE_PASSIVE_SELL_OFFER", "createPassiveSellOfferOp"),
    ("SET_OPTIONS", "setOptionsOp"),
    ("CHANGE_TRUST", "changeTrustOp"),
    ("ALLOW_TRUST", "allowTrustOp"),
    ("ACCOUNT_MERGE", ""),
    ("INFLATION", ""),
    ("MANAGE_DATA", "manageDataOp"),
    ("BUMP_SEQUENCE", "bumpSequenceOp"),
    ("MANAGE_BUY_OFFER", "manageBuyOfferOp"),
    ("PATH_PAYMENT_STRICT_SEND", "pathPaymentStrictSendOp"),
    ("CREATE_CLAIMABLE_BALANCE", "createClaimableBalanceOp"),
    ("CLAIM_CLAIMABLE_BALANCE", "claimClaimableBalanceOp"),
    (
        "BEGIN_SPONSORING_FUTURE_RESERVES",
        "beginSponsoringFutureReservesOp",
    ),
    ("END_SPONSORING_FUTURE_RESERVES", ""),
    ("REVOKE_SPONSORSHIP", "revokeSponsorshipOp"),
    ("CLAWBACK", "clawbackOp"),
    ("CLAWBACK_CLAIMABLE_BALANCE", "clawbackClaimableBalanceOp"),
    ("SET_TRUST_LINE_FLAGS", "setTrustLineFlagsOp"),
    ("LIQUIDITY_POOL_DEPOSIT", "liquidityPoolDepositOp"),
    ("LIQUIDITY_POOL_WITHDRAW", "liquidityPoolWithdrawOp"),
    ("INVOKE_HOST_FUNCTION", "invokeHostFunctionOp"),
    ("EXTEND_FOOTPRINT_TTL", "extendFootprintTTLOp"),
    ("RESTORE_FOOTPRINT", ""),
];

pub(crate) const MEMO_NAMES: [&str; 5] =
    ["MEMO_NONE", "MEMO_TEXT", "MEMO_ID", "MEMO_HASH", "MEMO_RETURN"];

pub(crate) const PRECOND_NAMES: [&str; 3] = ["PRECOND_NONE", "PRECOND_TIME", "PRECOND_V2"];

pub(crate) const PREDICATE_NAMES: [&str; 6] = [
    "CLAIM_PREDICATE_UNCONDITIONAL",
    "CLAIM_PREDICATE_AND",
    "CLAIM_PREDICATE_OR",
    "CLAIM_PREDICATE_NOT",
    "CLAIM_PREDICATE_BEFORE_ABSOLUTE_TIME",
    "CLAIM_PREDICATE_BEFORE_RELATIVE_TIME",
];

pub(crate) const SCVAL_NAMES: [(&str, u32); 20] = [
    ("SCV_BOOL", 0),
    ("SCV_VOID", 1),
    ("SCV_U32", 3),
    ("SCV_I32", 4),
    ("SCV_U64", 5),
    ("SCV_I64", 6),
    ("SCV_TIMEPOINT", 7),
    ("SCV_DURATION", 8),
    ("SCV_U128", 9),
    ("SCV_I128", 10),
    ("SCV_U256", 11),
    ("SCV_I256", 12),
    ("SCV_BYTES", 13),
    ("SCV_STRING", 14),
    ("SCV_SYMBOL", 15),
    ("SCV_VEC", 16),
    ("SCV_MAP", 17),
    ("SCV_ADDRESS", 18),
    ("SCV_LEDGER_KEY_CONTRACT_INSTANCE", 20),
    ("SCV_LEDGER_KEY_NONCE", 21),
];

pub(crate) const LEDGER_KEY_NAMES: [&str; 8] = [
    "ACCOUNT",
    "TRUSTLINE",
    "OFFER",
    "DATA",
    "CLAIMABLE_BALANCE",
    "LIQUIDITY_POOL",
    "CONTRACT_DATA",
    "CONTRACT_CODE",
];

pub(crate) const HOST_FUNCTION_NAMES: [&str; 3] = [
    "HOST_FUNCTION_TYPE_INVOKE_CONTRACT",
    "HOST_FUNCTION_TYPE_CREATE_CONTRACT",
    "HOST_FUNCTION_TYPE_UPLOAD_CONTRACT_WASM",
];

pub(crate) const PREIMAGE_NAMES: [&str; 2] = [
    "CONTRACT_ID_PREIMAGE_FROM_ADDRESS",
    "CONTRACT_ID_PREIMAGE_FROM_ASSET",
];

pub(crate) const EXECUTABLE_NAMES: [&str; 2] =
    ["CONTRACT_EXECUTABLE_WASM", "CONTRACT_EXECUTABLE_STELLAR_ASSET"];

pub(crate) const CREDENTIALS_NAMES: [&str; 2] = [
    "SOROBAN_CREDENTIALS_SOURCE_ACCOUNT",
    "SOROBAN_CREDENTIALS_ADDRESS",
];

pub(crate) const AUTH_FUNCTION_NAMES: [&str; 2] = [
    "SOROBAN_AUTHORIZED_FUNCTION_TYPE_CONTRACT_FN",
    "SOROBAN_AUTHORIZED_FUNCTION_TYPE_CREATE_CONTRACT_HOST_FN",
];

pub(crate) const REVOKE_NAMES: [&str; 2] =
    ["REVOKE_SPONSORSHIP_LEDGER_ENTRY", "REVOKE_SPONSORSHIP_SIGNER"];

pub(crate) const DURABILITY_NAMES: [&str; 2] = ["TEMPORARY", "PERSISTENT"];

pub(crate) const ENVELOPE_TX_V0: &str = "ENVELOPE_TYPE_TX_V0";
pub(crate) const ENVELOPE_TX: &str = "ENVELOPE_TYPE_TX";
pub(crate) const ENVELOPE_TX_FEE_BUMP: &str = "ENVELOPE_TYPE_TX_FEE_BUMP";

/// Index of `name` in `table`.
pub(crate) fn lookup(table: &[&str], name: &str) -> Option<usize> {
    table.iter().position(|&n| n == name)
}
