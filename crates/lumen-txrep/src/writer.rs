//! Rendering envelopes as the line-oriented text form.
//!
//! The writer walks the envelope in pre-order and emits one `path: value`
//! line per leaf. Array lengths (`*.len`) precede their elements, union
//! tags (`*.type`) precede their payloads, and optionals announce
//! themselves with `*._present` lines, so a parser can replay the grammar
//! top-down without lookahead.

use lumen_crypto::strkey;
use lumen_xdr::{
    ChangeTrustAsset, ClaimPredicate, Claimant, ClaimableBalanceId, ContractDataDurability,
    ContractExecutable, ContractIdPreimage, CreateContractArgs, DecoratedSignature, HostFunction,
    InvokeContractArgs, LedgerKey, LiquidityPoolParameters, Memo, Operation, OperationBody,
    Preconditions, PreconditionsV2, Price, RevokeSponsorship, ScVal, Signer,
    SorobanAuthorizationEntry, SorobanAuthorizedFunction, SorobanAuthorizedInvocation,
    SorobanCredentials, SorobanTransactionData, TimeBounds, Transaction, TransactionEnvelope,
    TransactionExt, TransactionV0, TrustLineAsset,
};

use crate::names::*;
use crate::value::{asset_to_string, quote, sc_address_to_string, signer_key_to_string};

/// Options controlling the rendered text.
#[derive(Debug, Clone, Copy, Default)]
pub struct TxRepOptions {
    /// Append human-readable annotations (scaled amounts) after leaf
    /// values. Off by default; annotated output still parses.
    pub annotations: bool,
}

/// Render an envelope with default options.
pub fn to_txrep(envelope: &TransactionEnvelope) -> String {
    to_txrep_with(envelope, &TxRepOptions::default())
}

/// Render an envelope.
pub fn to_txrep_with(envelope: &TransactionEnvelope, options: &TxRepOptions) -> String {
    let mut w = Writer {
        out: String::new(),
        annotations: options.annotations,
    };
    w.envelope(envelope);
    w.out
}

/// A stroop amount as whole tokens, for annotations.
fn scaled_amount(v: i64) -> String {
    let sign = if v < 0 { "-" } else { "" };
    let abs = v.unsigned_abs();
    let whole = abs / 10_000_000;
    let frac = format!("{:07}", abs % 10_000_000);
    let frac = frac.trim_end_matches('0');
    if frac.is_empty() {
        format!("{sign}{whole}")
    } else {
        format!("{sign}{whole}.{frac}")
    }
}

struct Writer {
    out: String,
    annotations: bool,
}

impl Writer {
    fn put(&mut self, path: &str, value: impl std::fmt::Display) {
        self.out.push_str(path);
        self.out.push_str(": ");
        self.out.push_str(&value.to_string());
        self.out.push('\n');
    }

    fn put_amount(&mut self, path: &str, value: i64) {
        if self.annotations {
            self.put(path, format!("{value} ({})", scaled_amount(value)));
        } else {
            self.put(path, value);
        }
    }

    fn put_present(&mut self, path: &str, present: bool) {
        self.put(&format!("{path}._present"), present);
    }

    fn envelope(&mut self, envelope: &TransactionEnvelope) {
        match envelope {
            TransactionEnvelope::V0(e) => {
                self.put("type", ENVELOPE_TX_V0);
                self.tx_v0("tx", &e.tx);
                self.signatures("signatures", &e.signatures);
            }
            TransactionEnvelope::V1(e) => {
                self.put("type", ENVELOPE_TX);
                self.tx("tx", &e.tx);
                self.signatures("signatures", &e.signatures);
            }
            TransactionEnvelope::FeeBump(e) => {
                self.put("type", ENVELOPE_TX_FEE_BUMP);
                self.put(
                    "feeBump.tx.feeSource",
                    strkey::encode_muxed_account(&e.tx.fee_source),
                );
                self.put_amount("feeBump.tx.fee", e.tx.fee);
                self.put("feeBump.tx.innerTx.type", ENVELOPE_TX);
                self.tx("feeBump.tx.innerTx.tx", &e.tx.inner.tx);
                self.signatures("feeBump.tx.innerTx.signatures", &e.tx.inner.signatures);
                self.signatures("feeBump.signatures", &e.signatures);
            }
        }
    }

    fn tx(&mut self, p: &str, tx: &Transaction) {
        self.put(
            &format!("{p}.sourceAccount"),
            strkey::encode_muxed_account(&tx.source),
        );
        self.put(&format!("{p}.fee"), tx.fee);
        self.put(&format!("{p}.seqNum"), tx.seq_num);
        self.cond(&format!("{p}.cond"), &tx.cond);
        self.memo(&format!("{p}.memo"), &tx.memo);
        self.operations(p, &tx.operations);
        match &tx.ext {
            TransactionExt::V0 => self.put(&format!("{p}.ext.v"), 0),
            TransactionExt::V1(data) => {
                self.put(&format!("{p}.ext.v"), 1);
                self.soroban_data(&format!("{p}.sorobanData"), data);
            }
        }
    }

    fn tx_v0(&mut self, p: &str, tx: &TransactionV0) {
        self.put(
            &format!("{p}.sourceAccountEd25519"),
            strkey::encode_account_id(&tx.source_ed25519),
        );
        self.put(&format!("{p}.fee"), tx.fee);
        self.put(&format!("{p}.seqNum"), tx.seq_num);
        let tb_path = format!("{p}.timeBounds");
        match &tx.time_bounds {
            Some(tb) => {
                self.put_present(&tb_path, true);
                self.time_bounds(&tb_path, tb);
            }
            None => self.put_present(&tb_path, false),
        }
        self.memo(&format!("{p}.memo"), &tx.memo);
        self.operations(p, &tx.operations);
    }

    fn operations(&mut self, p: &str, operations: &[Operation]) {
        self.put(&format!("{p}.operations.len"), operations.len());
        for (i, op) in operations.iter().enumerate() {
            self.operation(&format!("{p}.operations[{i}]"), op);
        }
    }

    fn time_bounds(&mut self, p: &str, tb: &TimeBounds) {
        self.put(&format!("{p}.minTime"), tb.min_time);
        self.put(&format!("{p}.maxTime"), tb.max_time);
    }

    fn cond(&mut self, p: &str, cond: &Preconditions) {
        match cond {
            Preconditions::None => self.put(&format!("{p}.type"), PRECOND_NAMES[0]),
            Preconditions::Time(tb) => {
                self.put(&format!("{p}.type"), PRECOND_NAMES[1]);
                self.time_bounds(&format!("{p}.timeBounds"), tb);
            }
            Preconditions::V2(v2) => {
                self.put(&format!("{p}.type"), PRECOND_NAMES[2]);
                self.cond_v2(&format!("{p}.v2"), v2);
            }
        }
    }

    fn cond_v2(&mut self, p: &str, v2: &PreconditionsV2) {
        let tb_path = format!("{p}.timeBounds");
        match &v2.time_bounds {
            Some(tb) => {
                self.put_present(&tb_path, true);
                self.time_bounds(&tb_path, tb);
            }
            None => self.put_present(&tb_path, false),
        }
        let lb_path = format!("{p}.ledgerBounds");
        match &v2.ledger_bounds {
            Some(lb) => {
                self.put_present(&lb_path, true);
                self.put(&format!("{lb_path}.minLedger"), lb.min_ledger);
                self.put(&format!("{lb_path}.maxLedger"), lb.max_ledger);
            }
            None => self.put_present(&lb_path, false),
        }
        let seq_path = format!("{p}.minSeqNum");
        match v2.min_seq_num {
            Some(v) => {
                self.put_present(&seq_path, true);
                self.put(&seq_path, v);
            }
            None => self.put_present(&seq_path, false),
        }
        self.put(&format!("{p}.minSeqAge"), v2.min_seq_age);
        self.put(&format!("{p}.minSeqLedgerGap"), v2.min_seq_ledger_gap);
        self.put(&format!("{p}.extraSigners.len"), v2.extra_signers.len());
        for (i, key) in v2.extra_signers.iter().enumerate() {
            self.put(&format!("{p}.extraSigners[{i}]"), signer_key_to_string(key));
        }
    }

    fn memo(&mut self, p: &str, memo: &Memo) {
        match memo {
            Memo::None => self.put(&format!("{p}.type"), MEMO_NAMES[0]),
            Memo::Text(text) => {
                self.put(&format!("{p}.type"), MEMO_NAMES[1]);
                self.put(&format!("{p}.text"), quote(text));
            }
            Memo::Id(id) => {
                self.put(&format!("{p}.type"), MEMO_NAMES[2]);
                self.put(&format!("{p}.id"), id);
            }
            Memo::Hash(hash) => {
                self.put(&format!("{p}.type"), MEMO_NAMES[3]);
                self.put(&format!("{p}.hash"), hash.to_hex());
            }
            Memo::Return(hash) => {
                self.put(&format!("{p}.type"), MEMO_NAMES[4]);
                self.put(&format!("{p}.retHash"), hash.to_hex());
            }
        }
    }

    fn signatures(&mut self, p: &str, signatures: &[DecoratedSignature]) {
        self.put(&format!("{p}.len"), signatures.len());
        for (i, sig) in signatures.iter().enumerate() {
            self.put(&format!("{p}[{i}].hint"), hex::encode(sig.hint));
            self.put(&format!("{p}[{i}].signature"), hex::encode(&sig.signature));
        }
    }

    fn operation(&mut self, p: &str, op: &Operation) {
        let src_path = format!("{p}.sourceAccount");
        match &op.source {
            Some(source) => {
                self.put_present(&src_path, true);
                self.put(&src_path, strkey::encode_muxed_account(source));
            }
            None => self.put_present(&src_path, false),
        }
        let disc = op.body.discriminant() as usize;
        let (name, field) = OP_NAMES[disc];
        self.put(&format!("{p}.body.type"), name);
        let b = if field.is_empty() {
            format!("{p}.body")
        } else {
            format!("{p}.body.{field}")
        };
        self.body(&b, &op.body);
    }

    fn body(&mut self, b: &str, body: &OperationBody) {
        match body {
            OperationBody::CreateAccount {
                destination,
                starting_balance,
            } => {
                self.put(
                    &format!("{b}.destination"),
                    strkey::account_id_to_string(destination),
                );
                self.put_amount(&format!("{b}.startingBalance"), *starting_balance);
            }
            OperationBody::Payment {
                destination,
                asset,
                amount,
            } => {
                self.put(
                    &format!("{b}.destination"),
                    strkey::encode_muxed_account(destination),
                );
                self.put(&format!("{b}.asset"), asset_to_string(asset));
                self.put_amount(&format!("{b}.amount"), *amount);
            }
            OperationBody::PathPaymentStrictReceive {
                send_asset,
                send_max,
                destination,
                dest_asset,
                dest_amount,
                path,
            } => {
                self.put(&format!("{b}.sendAsset"), asset_to_string(send_asset));
                self.put_amount(&format!("{b}.sendMax"), *send_max);
                self.put(
                    &format!("{b}.destination"),
                    strkey::encode_muxed_account(destination),
                );
                self.put(&format!("{b}.destAsset"), asset_to_string(dest_asset));
                self.put_amount(&format!("{b}.destAmount"), *dest_amount);
                self.asset_path(b, path);
            }
            OperationBody::ManageSellOffer {
                selling,
                buying,
                amount,
                price,
                offer_id,
            } => {
                self.put(&format!("{b}.selling"), asset_to_string(selling));
                self.put(&format!("{b}.buying"), asset_to_string(buying));
                self.put_amount(&format!("{b}.amount"), *amount);
                self.price(&format!("{b}.price"), price);
                self.put(&format!("{b}.offerID"), offer_id);
            }
            OperationBody::CreatePassiveSellOffer {
                selling,
                buying,
                amount,
                price,
            } => {
                self.put(&format!("{b}.selling"), asset_to_string(selling));
                self.put(&format!("{b}.buying"), asset_to_string(buying));
                self.put_amount(&format!("{b}.amount"), *amount);
                self.price(&format!("{b}.price"), price);
            }
            OperationBody::SetOptions {
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
                self.optional(&format!("{b}.inflationDest"), inflation_dest, |w, p, v| {
                    w.put(p, strkey::account_id_to_string(v))
                });
                self.optional(&format!("{b}.clearFlags"), clear_flags, |w, p, v| w.put(p, v));
                self.optional(&format!("{b}.setFlags"), set_flags, |w, p, v| w.put(p, v));
                self.optional(&format!("{b}.masterWeight"), master_weight, |w, p, v| {
                    w.put(p, v)
                });
                self.optional(&format!("{b}.lowThreshold"), low_threshold, |w, p, v| {
                    w.put(p, v)
                });
                self.optional(&format!("{b}.medThreshold"), med_threshold, |w, p, v| {
                    w.put(p, v)
                });
                self.optional(&format!("{b}.highThreshold"), high_threshold, |w, p, v| {
                    w.put(p, v)
                });
                self.optional(&format!("{b}.homeDomain"), home_domain, |w, p, v| {
                    w.put(p, quote(v))
                });
                self.optional(&format!("{b}.signer"), signer, |w, p, v: &Signer| {
                    w.put(&format!("{p}.key"), signer_key_to_string(&v.key));
                    w.put(&format!("{p}.weight"), v.weight);
                });
            }
            OperationBody::ChangeTrust { line, limit } => {
                let lp = format!("{b}.line");
                match line {
                    ChangeTrustAsset::Native => {
                        self.put(&format!("{lp}.type"), "ASSET");
                        self.put(&format!("{lp}.asset"), "native");
                    }
                    ChangeTrustAsset::CreditAlphanum4 { code, issuer } => {
                        self.put(&format!("{lp}.type"), "ASSET");
                        self.put(
                            &format!("{lp}.asset"),
                            asset_to_string(&lumen_xdr::Asset::CreditAlphanum4 {
                                code: *code,
                                issuer: *issuer,
                            }),
                        );
                    }
                    ChangeTrustAsset::CreditAlphanum12 { code, issuer } => {
                        self.put(&format!("{lp}.type"), "ASSET");
                        self.put(
                            &format!("{lp}.asset"),
                            asset_to_string(&lumen_xdr::Asset::CreditAlphanum12 {
                                code: *code,
                                issuer: *issuer,
                            }),
                        );
                    }
                    ChangeTrustAsset::LiquidityPool(params) => {
                        self.put(&format!("{lp}.type"), "LIQUIDITY_POOL");
                        let LiquidityPoolParameters::ConstantProduct(cp) = params;
                        self.put(
                            &format!("{lp}.liquidityPool.assetA"),
                            asset_to_string(&cp.asset_a),
                        );
                        self.put(
                            &format!("{lp}.liquidityPool.assetB"),
                            asset_to_string(&cp.asset_b),
                        );
                        self.put(&format!("{lp}.liquidityPool.fee"), cp.fee);
                    }
                }
                self.put_amount(&format!("{b}.limit"), *limit);
            }
            OperationBody::AllowTrust {
                trustor,
                asset,
                authorize,
            } => {
                self.put(&format!("{b}.trustor"), strkey::account_id_to_string(trustor));
                self.put(&format!("{b}.asset"), asset.to_string_lossy());
                self.put(&format!("{b}.authorize"), authorize);
            }
            OperationBody::AccountMerge { destination } => {
                self.put(
                    &format!("{b}.destination"),
                    strkey::encode_muxed_account(destination),
                );
            }
            OperationBody::Inflation | OperationBody::EndSponsoringFutureReserves => {}
            OperationBody::ManageData {
                data_name,
                data_value,
            } => {
                self.put(&format!("{b}.dataName"), quote(data_name));
                self.optional(&format!("{b}.dataValue"), data_value, |w, p, v| {
                    w.put(p, hex::encode(v))
                });
            }
            OperationBody::BumpSequence { bump_to } => {
                self.put(&format!("{b}.bumpTo"), bump_to);
            }
            OperationBody::ManageBuyOffer {
                selling,
                buying,
                buy_amount,
                price,
                offer_id,
            } => {
                self.put(&format!("{b}.selling"), asset_to_string(selling));
                self.put(&format!("{b}.buying"), asset_to_string(buying));
                self.put_amount(&format!("{b}.buyAmount"), *buy_amount);
                self.price(&format!("{b}.price"), price);
                self.put(&format!("{b}.offerID"), offer_id);
            }
            OperationBody::PathPaymentStrictSend {
                send_asset,
                send_amount,
                destination,
                dest_asset,
                dest_min,
                path,
            } => {
                self.put(&format!("{b}.sendAsset"), asset_to_string(send_asset));
                self.put_amount(&format!("{b}.sendAmount"), *send_amount);
                self.put(
                    &format!("{b}.destination"),
                    strkey::encode_muxed_account(destination),
                );
                self.put(&format!("{b}.destAsset"), asset_to_string(dest_asset));
                self.put_amount(&format!("{b}.destMin"), *dest_min);
                self.asset_path(b, path);
            }
            OperationBody::CreateClaimableBalance {
                asset,
                amount,
                claimants,
            } => {
                self.put(&format!("{b}.asset"), asset_to_string(asset));
                self.put_amount(&format!("{b}.amount"), *amount);
                self.put(&format!("{b}.claimants.len"), claimants.len());
                for (i, claimant) in claimants.iter().enumerate() {
                    let cp = format!("{b}.claimants[{i}]");
                    let Claimant::V0 {
                        destination,
                        predicate,
                    } = claimant;
                    self.put(&format!("{cp}.type"), "CLAIMANT_TYPE_V0");
                    self.put(
                        &format!("{cp}.v0.destination"),
                        strkey::account_id_to_string(destination),
                    );
                    self.predicate(&format!("{cp}.v0.predicate"), predicate);
                }
            }
            OperationBody::ClaimClaimableBalance { balance_id } => {
                self.balance_id(&format!("{b}.balanceID"), balance_id);
            }
            OperationBody::BeginSponsoringFutureReserves { sponsored_id } => {
                self.put(
                    &format!("{b}.sponsoredID"),
                    strkey::account_id_to_string(sponsored_id),
                );
            }
            OperationBody::RevokeSponsorship(target) => match target {
                RevokeSponsorship::LedgerEntry(key) => {
                    self.put(&format!("{b}.type"), REVOKE_NAMES[0]);
                    self.ledger_key(&format!("{b}.ledgerKey"), key);
                }
                RevokeSponsorship::Signer {
                    account_id,
                    signer_key,
                } => {
                    self.put(&format!("{b}.type"), REVOKE_NAMES[1]);
                    self.put(
                        &format!("{b}.signer.accountID"),
                        strkey::account_id_to_string(account_id),
                    );
                    self.put(
                        &format!("{b}.signer.signerKey"),
                        signer_key_to_string(signer_key),
                    );
                }
            },
            OperationBody::Clawback {
                asset,
                from,
                amount,
            } => {
                self.put(&format!("{b}.asset"), asset_to_string(asset));
                self.put(&format!("{b}.from"), strkey::encode_muxed_account(from));
                self.put_amount(&format!("{b}.amount"), *amount);
            }
            OperationBody::ClawbackClaimableBalance { balance_id } => {
                self.balance_id(&format!("{b}.balanceID"), balance_id);
            }
            OperationBody::SetTrustLineFlags {
                trustor,
                asset,
                clear_flags,
                set_flags,
            } => {
                self.put(&format!("{b}.trustor"), strkey::account_id_to_string(trustor));
                self.put(&format!("{b}.asset"), asset_to_string(asset));
                self.put(&format!("{b}.clearFlags"), clear_flags);
                self.put(&format!("{b}.setFlags"), set_flags);
            }
            OperationBody::LiquidityPoolDeposit {
                pool_id,
                max_amount_a,
                max_amount_b,
                min_price,
                max_price,
            } => {
                self.put(&format!("{b}.liquidityPoolID"), pool_id.to_hex());
                self.put_amount(&format!("{b}.maxAmountA"), *max_amount_a);
                self.put_amount(&format!("{b}.maxAmountB"), *max_amount_b);
                self.price(&format!("{b}.minPrice"), min_price);
                self.price(&format!("{b}.maxPrice"), max_price);
            }
            OperationBody::LiquidityPoolWithdraw {
                pool_id,
                amount,
                min_amount_a,
                min_amount_b,
            } => {
                self.put(&format!("{b}.liquidityPoolID"), pool_id.to_hex());
                self.put_amount(&format!("{b}.amount"), *amount);
                self.put_amount(&format!("{b}.minAmountA"), *min_amount_a);
                self.put_amount(&format!("{b}.minAmountB"), *min_amount_b);
            }
            OperationBody::InvokeHostFunction {
                host_function,
                auth,
            } => {
                self.host_function(&format!("{b}.hostFunction"), host_function);
                self.put(&format!("{b}.auth.len"), auth.len());
                for (i, entry) in auth.iter().enumerate() {
                    self.auth_entry(&format!("{b}.auth[{i}]"), entry);
                }
            }
            OperationBody::ExtendFootprintTtl { extend_to } => {
                self.put(&format!("{b}.extendTo"), extend_to);
            }
            OperationBody::RestoreFootprint => {}
        }
    }

    fn optional<T>(&mut self, path: &str, value: &Option<T>, put: impl Fn(&mut Self, &str, &T)) {
        match value {
            Some(v) => {
                self.put_present(path, true);
                put(self, path, v);
            }
            None => self.put_present(path, false),
        }
    }

    fn asset_path(&mut self, b: &str, path: &[lumen_xdr::Asset]) {
        self.put(&format!("{b}.path.len"), path.len());
        for (i, asset) in path.iter().enumerate() {
            self.put(&format!("{b}.path[{i}]"), asset_to_string(asset));
        }
    }

    fn price(&mut self, p: &str, price: &Price) {
        self.put(&format!("{p}.n"), price.n);
        self.put(&format!("{p}.d"), price.d);
    }

    fn balance_id(&mut self, p: &str, id: &ClaimableBalanceId) {
        let ClaimableBalanceId::V0(hash) = id;
        self.put(&format!("{p}.type"), "CLAIMABLE_BALANCE_ID_TYPE_V0");
        self.put(&format!("{p}.v0"), hash.to_hex());
    }

    fn predicate(&mut self, p: &str, predicate: &ClaimPredicate) {
        match predicate {
            ClaimPredicate::Unconditional => self.put(&format!("{p}.type"), PREDICATE_NAMES[0]),
            ClaimPredicate::And(operands) => {
                self.put(&format!("{p}.type"), PREDICATE_NAMES[1]);
                self.put(&format!("{p}.andPredicates.len"), operands.len());
                for (i, operand) in operands.iter().enumerate() {
                    self.predicate(&format!("{p}.andPredicates[{i}]"), operand);
                }
            }
            ClaimPredicate::Or(operands) => {
                self.put(&format!("{p}.type"), PREDICATE_NAMES[2]);
                self.put(&format!("{p}.orPredicates.len"), operands.len());
                for (i, operand) in operands.iter().enumerate() {
                    self.predicate(&format!("{p}.orPredicates[{i}]"), operand);
                }
            }
            ClaimPredicate::Not(operand) => {
                self.put(&format!("{p}.type"), PREDICATE_NAMES[3]);
                let np = format!("{p}.notPredicate");
                match operand {
                    Some(inner) => {
                        self.put_present(&np, true);
                        self.predicate(&np, inner);
                    }
                    None => self.put_present(&np, false),
                }
            }
            ClaimPredicate::BeforeAbsoluteTime(t) => {
                self.put(&format!("{p}.type"), PREDICATE_NAMES[4]);
                self.put(&format!("{p}.absBefore"), t);
            }
            ClaimPredicate::BeforeRelativeTime(t) => {
                self.put(&format!("{p}.type"), PREDICATE_NAMES[5]);
                self.put(&format!("{p}.relBefore"), t);
            }
        }
    }

    fn ledger_key(&mut self, p: &str, key: &LedgerKey) {
        match key {
            LedgerKey::Account { account_id } => {
                self.put(&format!("{p}.type"), LEDGER_KEY_NAMES[0]);
                self.put(
                    &format!("{p}.account.accountID"),
                    strkey::account_id_to_string(account_id),
                );
            }
            LedgerKey::TrustLine { account_id, asset } => {
                self.put(&format!("{p}.type"), LEDGER_KEY_NAMES[1]);
                self.put(
                    &format!("{p}.trustLine.accountID"),
                    strkey::account_id_to_string(account_id),
                );
                let ap = format!("{p}.trustLine.asset");
                match asset {
                    TrustLineAsset::Native => {
                        self.put(&format!("{ap}.type"), "ASSET");
                        self.put(&format!("{ap}.asset"), "native");
                    }
                    TrustLineAsset::CreditAlphanum4 { code, issuer } => {
                        self.put(&format!("{ap}.type"), "ASSET");
                        self.put(
                            &format!("{ap}.asset"),
                            asset_to_string(&lumen_xdr::Asset::CreditAlphanum4 {
                                code: *code,
                                issuer: *issuer,
                            }),
                        );
                    }
                    TrustLineAsset::CreditAlphanum12 { code, issuer } => {
                        self.put(&format!("{ap}.type"), "ASSET");
                        self.put(
                            &format!("{ap}.asset"),
                            asset_to_string(&lumen_xdr::Asset::CreditAlphanum12 {
                                code: *code,
                                issuer: *issuer,
                            }),
                        );
                    }
                    TrustLineAsset::PoolShare(id) => {
                        self.put(&format!("{ap}.type"), "POOL_SHARE");
                        self.put(&format!("{ap}.poolID"), id.to_hex());
                    }
                }
            }
            LedgerKey::Offer {
                seller_id,
                offer_id,
            } => {
                self.put(&format!("{p}.type"), LEDGER_KEY_NAMES[2]);
                self.put(
                    &format!("{p}.offer.sellerID"),
                    strkey::account_id_to_string(seller_id),
                );
                self.put(&format!("{p}.offer.offerID"), offer_id);
            }
            LedgerKey::Data {
                account_id,
                data_name,
            } => {
                self.put(&format!("{p}.type"), LEDGER_KEY_NAMES[3]);
                self.put(
                    &format!("{p}.data.accountID"),
                    strkey::account_id_to_string(account_id),
                );
                self.put(&format!("{p}.data.dataName"), quote(data_name));
            }
            LedgerKey::ClaimableBalance { balance_id } => {
                self.put(&format!("{p}.type"), LEDGER_KEY_NAMES[4]);
                self.balance_id(&format!("{p}.claimableBalance.balanceID"), balance_id);
            }
            LedgerKey::LiquidityPool { pool_id } => {
                self.put(&format!("{p}.type"), LEDGER_KEY_NAMES[5]);
                self.put(&format!("{p}.liquidityPool.liquidityPoolID"), pool_id.to_hex());
            }
            LedgerKey::ContractData {
                contract,
                key,
                durability,
            } => {
                self.put(&format!("{p}.type"), LEDGER_KEY_NAMES[6]);
                self.put(
                    &format!("{p}.contractData.contract"),
                    sc_address_to_string(contract),
                );
                self.scval(&format!("{p}.contractData.key"), key);
                let durability = match durability {
                    ContractDataDurability::Temporary => DURABILITY_NAMES[0],
                    ContractDataDurability::Persistent => DURABILITY_NAMES[1],
                };
                self.put(&format!("{p}.contractData.durability"), durability);
            }
            LedgerKey::ContractCode { hash } => {
                self.put(&format!("{p}.type"), LEDGER_KEY_NAMES[7]);
                self.put(&format!("{p}.contractCode.hash"), hash.to_hex());
            }
        }
    }

    fn scval(&mut self, p: &str, val: &ScVal) {
        let ty = format!("{p}.type");
        match val {
            ScVal::Bool(v) => {
                self.put(&ty, "SCV_BOOL");
                self.put(&format!("{p}.b"), v);
            }
            ScVal::Void => self.put(&ty, "SCV_VOID"),
            ScVal::U32(v) => {
                self.put(&ty, "SCV_U32");
                self.put(&format!("{p}.u32"), v);
            }
            ScVal::I32(v) => {
                self.put(&ty, "SCV_I32");
                self.put(&format!("{p}.i32"), v);
            }
            ScVal::U64(v) => {
                self.put(&ty, "SCV_U64");
                self.put(&format!("{p}.u64"), v);
            }
            ScVal::I64(v) => {
                self.put(&ty, "SCV_I64");
                self.put(&format!("{p}.i64"), v);
            }
            ScVal::Timepoint(v) => {
                self.put(&ty, "SCV_TIMEPOINT");
                self.put(&format!("{p}.timepoint"), v);
            }
            ScVal::Duration(v) => {
                self.put(&ty, "SCV_DURATION");
                self.put(&format!("{p}.duration"), v);
            }
            ScVal::U128(v) => {
                self.put(&ty, "SCV_U128");
                self.put(&format!("{p}.u128"), v.to_u128());
            }
            ScVal::I128(v) => {
                self.put(&ty, "SCV_I128");
                self.put(&format!("{p}.i128"), v.to_i128());
            }
            ScVal::U256(v) => {
                self.put(&ty, "SCV_U256");
                self.put(&format!("{p}.u256"), v.to_biguint());
            }
            ScVal::I256(v) => {
                self.put(&ty, "SCV_I256");
                self.put(&format!("{p}.i256"), v.to_bigint());
            }
            ScVal::Bytes(bytes) => {
                self.put(&ty, "SCV_BYTES");
                self.put(&format!("{p}.bytes"), hex::encode(bytes));
            }
            ScVal::String(s) => {
                self.put(&ty, "SCV_STRING");
                self.put(&format!("{p}.str"), quote(s));
            }
            ScVal::Symbol(s) => {
                self.put(&ty, "SCV_SYMBOL");
                self.put(&format!("{p}.sym"), s.as_str());
            }
            ScVal::Vec(items) => {
                self.put(&ty, "SCV_VEC");
                let vp = format!("{p}.vec");
                match items {
                    Some(items) => {
                        self.put_present(&vp, true);
                        self.put(&format!("{vp}.len"), items.len());
                        for (i, item) in items.iter().enumerate() {
                            self.scval(&format!("{vp}[{i}]"), item);
                        }
                    }
                    None => self.put_present(&vp, false),
                }
            }
            ScVal::Map(entries) => {
                self.put(&ty, "SCV_MAP");
                let mp = format!("{p}.map");
                match entries {
                    Some(entries) => {
                        self.put_present(&mp, true);
                        self.put(&format!("{mp}.len"), entries.len());
                        for (i, entry) in entries.iter().enumerate() {
                            self.scval(&format!("{mp}[{i}].key"), &entry.key);
                            self.scval(&format!("{mp}[{i}].val"), &entry.val);
                        }
                    }
                    None => self.put_present(&mp, false),
                }
            }
            ScVal::Address(address) => {
                self.put(&ty, "SCV_ADDRESS");
                self.put(&format!("{p}.address"), sc_address_to_string(address));
            }
            ScVal::LedgerKeyContractInstance => {
                self.put(&ty, "SCV_LEDGER_KEY_CONTRACT_INSTANCE")
            }
            ScVal::LedgerKeyNonce(nonce) => {
                self.put(&ty, "SCV_LEDGER_KEY_NONCE");
                self.put(&format!("{p}.nonce"), nonce);
            }
        }
    }

    fn host_function(&mut self, p: &str, hf: &HostFunction) {
        match hf {
            HostFunction::InvokeContract(args) => {
                self.put(&format!("{p}.type"), HOST_FUNCTION_NAMES[0]);
                self.invoke_args(&format!("{p}.invokeContract"), args);
            }
            HostFunction::CreateContract(args) => {
                self.put(&format!("{p}.type"), HOST_FUNCTION_NAMES[1]);
                self.create_args(&format!("{p}.createContract"), args);
            }
            HostFunction::UploadContractWasm(wasm) => {
                self.put(&format!("{p}.type"), HOST_FUNCTION_NAMES[2]);
                self.put(&format!("{p}.uploadContractWasm.wasm"), hex::encode(wasm));
            }
        }
    }

    fn invoke_args(&mut self, p: &str, args: &InvokeContractArgs) {
        self.put(
            &format!("{p}.contractAddress"),
            sc_address_to_string(&args.contract_address),
        );
        self.put(&format!("{p}.functionName"), args.function_name.as_str());
        self.put(&format!("{p}.args.len"), args.args.len());
        for (i, arg) in args.args.iter().enumerate() {
            self.scval(&format!("{p}.args[{i}]"), arg);
        }
    }

    fn create_args(&mut self, p: &str, args: &CreateContractArgs) {
        let pp = format!("{p}.contractIDPreimage");
        match &args.contract_id_preimage {
            ContractIdPreimage::Address { address, salt } => {
                self.put(&format!("{pp}.type"), PREIMAGE_NAMES[0]);
                self.put(
                    &format!("{pp}.fromAddress.address"),
                    sc_address_to_string(address),
                );
                self.put(&format!("{pp}.fromAddress.salt"), salt.to_hex());
            }
            ContractIdPreimage::Asset(asset) => {
                self.put(&format!("{pp}.type"), PREIMAGE_NAMES[1]);
                self.put(&format!("{pp}.fromAsset"), asset_to_string(asset));
            }
        }
        let ep = format!("{p}.executable");
        match &args.executable {
            ContractExecutable::Wasm(hash) => {
                self.put(&format!("{ep}.type"), EXECUTABLE_NAMES[0]);
                self.put(&format!("{ep}.wasmHash"), hash.to_hex());
            }
            ContractExecutable::StellarAsset => {
                self.put(&format!("{ep}.type"), EXECUTABLE_NAMES[1]);
            }
        }
    }

    fn auth_entry(&mut self, p: &str, entry: &SorobanAuthorizationEntry) {
        let cp = format!("{p}.credentials");
        match &entry.credentials {
            SorobanCredentials::SourceAccount => {
                self.put(&format!("{cp}.type"), CREDENTIALS_NAMES[0]);
            }
            SorobanCredentials::Address(creds) => {
                self.put(&format!("{cp}.type"), CREDENTIALS_NAMES[1]);
                self.put(
                    &format!("{cp}.address.address"),
                    sc_address_to_string(&creds.address),
                );
                self.put(&format!("{cp}.address.nonce"), creds.nonce);
                self.put(
                    &format!("{cp}.address.signatureExpirationLedger"),
                    creds.signature_expiration_ledger,
                );
                self.scval(&format!("{cp}.address.signature"), &creds.signature);
            }
        }
        self.invocation(&format!("{p}.rootInvocation"), &entry.root_invocation);
    }

    fn invocation(&mut self, p: &str, invocation: &SorobanAuthorizedInvocation) {
        let fp = format!("{p}.function");
        match &invocation.function {
            SorobanAuthorizedFunction::ContractFn(args) => {
                self.put(&format!("{fp}.type"), AUTH_FUNCTION_NAMES[0]);
                self.invoke_args(&format!("{fp}.contractFn"), args);
            }
            SorobanAuthorizedFunction::CreateContractHostFn(args) => {
                self.put(&format!("{fp}.type"), AUTH_FUNCTION_NAMES[1]);
                self.create_args(&format!("{fp}.createContractHostFn"), args);
            }
        }
        self.put(
            &format!("{p}.subInvocations.len"),
            invocation.sub_invocations.len(),
        );
        for (i, sub) in invocation.sub_invocations.iter().enumerate() {
            self.invocation(&format!("{p}.subInvocations[{i}]"), sub);
        }
    }

    fn soroban_data(&mut self, p: &str, data: &SorobanTransactionData) {
        let fp = format!("{p}.resources.footprint");
        self.put(
            &format!("{fp}.readOnly.len"),
            data.resources.footprint.read_only.len(),
        );
        for (i, key) in data.resources.footprint.read_only.iter().enumerate() {
            self.ledger_key(&format!("{fp}.readOnly[{i}]"), key);
        }
        self.put(
            &format!("{fp}.readWrite.len"),
            data.resources.footprint.read_write.len(),
        );
        for (i, key) in data.resources.footprint.read_write.iter().enumerate() {
            self.ledger_key(&format!("{fp}.readWrite[{i}]"), key);
        }
        self.put(&format!("{p}.resources.instructions"), data.resources.instructions);
        self.put(&format!("{p}.resources.readBytes"), data.resources.read_bytes);
        self.put(&format!("{p}.resources.writeBytes"), data.resources.write_bytes);
        self.put(&format!("{p}.resourceFee"), data.resource_fee);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaled_amount() {
        assert_eq!(scaled_amount(1_234_567_890), "123.456789");
        assert_eq!(scaled_amount(10_000_000), "1");
        assert_eq!(scaled_amount(1), "0.0000001");
        assert_eq!(scaled_amount(-25_000_000), "-2.5");
        assert_eq!(scaled_amount(0), "0");
    }
}
