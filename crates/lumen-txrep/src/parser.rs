//! Parsing the line-oriented text form back into an envelope.
//!
//! Parsing is two-phase: the text is first split into a `path: value` map
//! (rejecting malformed and duplicate lines), then the envelope grammar is
//! replayed top-down against that map. Blank lines and lines starting with
//! `#` are ignored, as are trailing parenthesized annotations on unquoted
//! values.

use std::collections::HashMap;
use std::str::FromStr;

use num_bigint::{BigInt, BigUint};

use lumen_crypto::strkey;
use lumen_xdr::{
    AccountId, Asset, AssetCode, ChangeTrustAsset, ClaimPredicate, Claimant, ClaimableBalanceId,
    ContractDataDurability, ContractExecutable, ContractIdPreimage, CreateContractArgs,
    DecoratedSignature, FeeBumpTransaction, FeeBumpTransactionEnvelope, Hash256, HostFunction,
    Int128Parts, Int256Parts, InvokeContractArgs, LedgerBounds, LedgerFootprint, LedgerKey,
    LiquidityPoolConstantProductParameters, LiquidityPoolParameters, Memo, MuxedAccount,
    Operation, OperationBody, Preconditions, PreconditionsV2, Price, RevokeSponsorship, ScSymbol,
    ScAddress, ScMapEntry, ScVal, Signer, SignerKey, SorobanAddressCredentials,
    SorobanAuthorizationEntry, SorobanAuthorizedFunction, SorobanAuthorizedInvocation,
    SorobanCredentials, SorobanResources, SorobanTransactionData, TimeBounds, Transaction,
    TransactionEnvelope, TransactionExt, TransactionV0, TransactionV0Envelope,
    TransactionV1Envelope, TrustLineAsset, UInt128Parts, UInt256Parts,
};

use crate::error::{Result, TxRepError};
use crate::names::*;
use crate::value::{
    asset_from_string, sc_address_from_string, signer_key_from_string, unquote,
};

/// Parse the text form of an envelope.
pub fn from_txrep(text: &str) -> Result<TransactionEnvelope> {
    let parser = Parser::new(text)?;
    match parser.get("type")? {
        ENVELOPE_TX_V0 => {
            let tx = parser.tx_v0("tx")?;
            let signatures = parser.signatures("signatures")?;
            Ok(TransactionEnvelope::V0(TransactionV0Envelope {
                tx,
                signatures,
            }))
        }
        ENVELOPE_TX => {
            let tx = parser.tx("tx")?;
            let signatures = parser.signatures("signatures")?;
            Ok(TransactionEnvelope::V1(TransactionV1Envelope {
                tx,
                signatures,
            }))
        }
        ENVELOPE_TX_FEE_BUMP => {
            let inner_type = parser.get("feeBump.tx.innerTx.type")?;
            if inner_type != ENVELOPE_TX {
                return Err(TxRepError::UnknownVariant {
                    path: "feeBump.tx.innerTx.type".to_string(),
                    name: inner_type.to_string(),
                });
            }
            let tx = FeeBumpTransaction {
                fee_source: parser.muxed("feeBump.tx.feeSource")?,
                fee: parser.num("feeBump.tx.fee")?,
                inner: TransactionV1Envelope {
                    tx: parser.tx("feeBump.tx.innerTx.tx")?,
                    signatures: parser.signatures("feeBump.tx.innerTx.signatures")?,
                },
            };
            let signatures = parser.signatures("feeBump.signatures")?;
            Ok(TransactionEnvelope::FeeBump(FeeBumpTransactionEnvelope {
                tx,
                signatures,
            }))
        }
        name => Err(TxRepError::UnknownVariant {
            path: "type".to_string(),
            name: name.to_string(),
        }),
    }
}

/// Strip a trailing ` (...)` annotation from an unquoted value.
fn strip_annotation(value: &str) -> &str {
    if value.starts_with('"') || !value.ends_with(')') {
        return value;
    }
    match value.rfind(" (") {
        Some(at) => value[..at].trim_end(),
        None => value,
    }
}

#[derive(Debug)]
struct Parser {
    fields: HashMap<String, String>,
}

impl Parser {
    fn new(text: &str) -> Result<Self> {
        let mut fields = HashMap::new();
        for (i, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (path, value) = line.split_once(':').ok_or(TxRepError::MalformedLine(i + 1))?;
            let path = path.trim();
            if path.is_empty() || path.contains(char::is_whitespace) {
                return Err(TxRepError::MalformedLine(i + 1));
            }
            let value = strip_annotation(value.trim());
            if fields.insert(path.to_string(), value.to_string()).is_some() {
                return Err(TxRepError::DuplicatePath(path.to_string()));
            }
        }
        Ok(Self { fields })
    }

    fn get(&self, path: &str) -> Result<&str> {
        self.fields
            .get(path)
            .map(String::as_str)
            .ok_or_else(|| TxRepError::MissingField(path.to_string()))
    }

    fn num<T: FromStr>(&self, path: &str) -> Result<T> {
        self.get(path)?
            .parse()
            .map_err(|_| TxRepError::invalid(path, "not a number in range"))
    }

    fn boolean(&self, path: &str) -> Result<bool> {
        match self.get(path)? {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(TxRepError::invalid(path, "expected `true` or `false`")),
        }
    }

    fn present(&self, path: &str) -> Result<bool> {
        self.boolean(&format!("{path}._present"))
    }

    fn quoted(&self, path: &str) -> Result<String> {
        unquote(path, self.get(path)?)
    }

    fn bytes(&self, path: &str) -> Result<Vec<u8>> {
        hex::decode(self.get(path)?).map_err(|_| TxRepError::invalid(path, "bad hex"))
    }

    fn hash(&self, path: &str) -> Result<Hash256> {
        Hash256::from_hex(self.get(path)?).map_err(|_| TxRepError::invalid(path, "bad hash hex"))
    }

    fn account(&self, path: &str) -> Result<AccountId> {
        strkey::account_id_from_string(self.get(path)?)
            .map_err(|e| TxRepError::invalid(path, format!("bad account: {e}")))
    }

    fn muxed(&self, path: &str) -> Result<MuxedAccount> {
        strkey::decode_muxed_account(self.get(path)?)
            .map_err(|e| TxRepError::invalid(path, format!("bad account: {e}")))
    }

    fn asset(&self, path: &str) -> Result<Asset> {
        asset_from_string(path, self.get(path)?)
    }

    fn signer_key(&self, path: &str) -> Result<SignerKey> {
        signer_key_from_string(path, self.get(path)?)
    }

    fn sc_address(&self, path: &str) -> Result<ScAddress> {
        sc_address_from_string(path, self.get(path)?)
    }

    /// The variant index of `{path}.type` in `table`.
    fn variant(&self, path: &str, table: &[&str]) -> Result<usize> {
        let ty_path = format!("{path}.type");
        let name = self.get(&ty_path)?;
        lookup(table, name).ok_or_else(|| TxRepError::UnknownVariant {
            path: ty_path,
            name: name.to_string(),
        })
    }

    /// The declared `{path}.len`, checked against the entries present.
    /// Any indexed child at or past the declared length is a mismatch,
    /// contiguous or not.
    fn array_len(&self, path: &str) -> Result<usize> {
        let declared: usize = self.num(&format!("{path}.len"))?;
        let prefix = format!("{path}[");
        for key in self.fields.keys() {
            let Some(rest) = key.strip_prefix(&prefix) else {
                continue;
            };
            let Some(end) = rest.find(']') else {
                continue;
            };
            if let Ok(index) = rest[..end].parse::<usize>() {
                if index >= declared {
                    return Err(TxRepError::LengthMismatch {
                        path: path.to_string(),
                        declared,
                        actual: index + 1,
                    });
                }
            }
        }
        Ok(declared)
    }

    fn price(&self, p: &str) -> Result<Price> {
        Ok(Price {
            n: self.num(&format!("{p}.n"))?,
            d: self.num(&format!("{p}.d"))?,
        })
    }

    fn time_bounds(&self, p: &str) -> Result<TimeBounds> {
        Ok(TimeBounds {
            min_time: self.num(&format!("{p}.minTime"))?,
            max_time: self.num(&format!("{p}.maxTime"))?,
        })
    }

    fn tx(&self, p: &str) -> Result<Transaction> {
        Ok(Transaction {
            source: self.muxed(&format!("{p}.sourceAccount"))?,
            fee: self.num(&format!("{p}.fee"))?,
            seq_num: self.num(&format!("{p}.seqNum"))?,
            cond: self.cond(&format!("{p}.cond"))?,
            memo: self.memo(&format!("{p}.memo"))?,
            operations: self.operations(p)?,
            ext: match self.num::<u32>(&format!("{p}.ext.v"))? {
                0 => TransactionExt::V0,
                1 => TransactionExt::V1(self.soroban_data(&format!("{p}.sorobanData"))?),
                _ => {
                    return Err(TxRepError::invalid(
                        &format!("{p}.ext.v"),
                        "expected 0 or 1",
                    ))
                }
            },
        })
    }

    fn tx_v0(&self, p: &str) -> Result<TransactionV0> {
        let ed25519_path = format!("{p}.sourceAccountEd25519");
        let source_ed25519 = strkey::decode_account_id(self.get(&ed25519_path)?)
            .map_err(|e| TxRepError::invalid(&ed25519_path, format!("bad account: {e}")))?;
        let tb_path = format!("{p}.timeBounds");
        Ok(TransactionV0 {
            source_ed25519,
            fee: self.num(&format!("{p}.fee"))?,
            seq_num: self.num(&format!("{p}.seqNum"))?,
            time_bounds: if self.present(&tb_path)? {
                Some(self.time_bounds(&tb_path)?)
            } else {
                None
            },
            memo: self.memo(&format!("{p}.memo"))?,
            operations: self.operations(p)?,
        })
    }

    fn cond(&self, p: &str) -> Result<Preconditions> {
        match self.variant(p, &PRECOND_NAMES)? {
            0 => Ok(Preconditions::None),
            1 => Ok(Preconditions::Time(
                self.time_bounds(&format!("{p}.timeBounds"))?,
            )),
            _ => Ok(Preconditions::V2(self.cond_v2(&format!("{p}.v2"))?)),
        }
    }

    fn cond_v2(&self, p: &str) -> Result<PreconditionsV2> {
        let tb_path = format!("{p}.timeBounds");
        let lb_path = format!("{p}.ledgerBounds");
        let seq_path = format!("{p}.minSeqNum");
        let signers_path = format!("{p}.extraSigners");
        let mut extra_signers = Vec::new();
        for i in 0..self.array_len(&signers_path)? {
            extra_signers.push(self.signer_key(&format!("{signers_path}[{i}]"))?);
        }
        Ok(PreconditionsV2 {
            time_bounds: if self.present(&tb_path)? {
                Some(self.time_bounds(&tb_path)?)
            } else {
                None
            },
            ledger_bounds: if self.present(&lb_path)? {
                Some(LedgerBounds {
                    min_ledger: self.num(&format!("{lb_path}.minLedger"))?,
                    max_ledger: self.num(&format!("{lb_path}.maxLedger"))?,
                })
            } else {
                None
            },
            min_seq_num: if self.present(&seq_path)? {
                Some(self.num(&seq_path)?)
            } else {
                None
            },
            min_seq_age: self.num(&format!("{p}.minSeqAge"))?,
            min_seq_ledger_gap: self.num(&format!("{p}.minSeqLedgerGap"))?,
            extra_signers,
        })
    }

    fn memo(&self, p: &str) -> Result<Memo> {
        match self.variant(p, &MEMO_NAMES)? {
            0 => Ok(Memo::None),
            1 => {
                let text_path = format!("{p}.text");
                Memo::text(&self.quoted(&text_path)?)
                    .map_err(|e| TxRepError::invalid(&text_path, e.to_string()))
            }
            2 => Ok(Memo::Id(self.num(&format!("{p}.id"))?)),
            3 => Ok(Memo::Hash(self.hash(&format!("{p}.hash"))?)),
            _ => Ok(Memo::Return(self.hash(&format!("{p}.retHash"))?)),
        }
    }

    fn signatures(&self, p: &str) -> Result<Vec<DecoratedSignature>> {
        let mut signatures = Vec::new();
        for i in 0..self.array_len(p)? {
            let hint_path = format!("{p}[{i}].hint");
            let hint: [u8; 4] = self
                .bytes(&hint_path)?
                .try_into()
                .map_err(|_| TxRepError::invalid(&hint_path, "expected 4 bytes"))?;
            signatures.push(DecoratedSignature {
                hint,
                signature: self.bytes(&format!("{p}[{i}].signature"))?,
            });
        }
        Ok(signatures)
    }

    fn operations(&self, p: &str) -> Result<Vec<Operation>> {
        let ops_path = format!("{p}.operations");
        let mut operations = Vec::new();
        for i in 0..self.array_len(&ops_path)? {
            operations.push(self.operation(&format!("{ops_path}[{i}]"))?);
        }
        Ok(operations)
    }

    fn operation(&self, p: &str) -> Result<Operation> {
        let src_path = format!("{p}.sourceAccount");
        let source = if self.present(&src_path)? {
            Some(self.muxed(&src_path)?)
        } else {
            None
        };
        let ty_path = format!("{p}.body.type");
        let name = self.get(&ty_path)?;
        let disc = OP_NAMES
            .iter()
            .position(|&(n, _)| n == name)
            .ok_or_else(|| TxRepError::UnknownVariant {
                path: ty_path,
                name: name.to_string(),
            })?;
        let field = OP_NAMES[disc].1;
        let b = if field.is_empty() {
            format!("{p}.body")
        } else {
            format!("{p}.body.{field}")
        };
        Ok(Operation {
            source,
            body: self.body(&b, disc)?,
        })
    }

    fn body(&self, b: &str, disc: usize) -> Result<OperationBody> {
        match disc {
            0 => Ok(OperationBody::CreateAccount {
                destination: self.account(&format!("{b}.destination"))?,
                starting_balance: self.num(&format!("{b}.startingBalance"))?,
            }),
            1 => Ok(OperationBody::Payment {
                destination: self.muxed(&format!("{b}.destination"))?,
                asset: self.asset(&format!("{b}.asset"))?,
                amount: self.num(&format!("{b}.amount"))?,
            }),
            2 => Ok(OperationBody::PathPaymentStrictReceive {
                send_asset: self.asset(&format!("{b}.sendAsset"))?,
                send_max: self.num(&format!("{b}.sendMax"))?,
                destination: self.muxed(&format!("{b}.destination"))?,
                dest_asset: self.asset(&format!("{b}.destAsset"))?,
                dest_amount: self.num(&format!("{b}.destAmount"))?,
                path: self.asset_path(b)?,
            }),
            3 => Ok(OperationBody::ManageSellOffer {
                selling: self.asset(&format!("{b}.selling"))?,
                buying: self.asset(&format!("{b}.buying"))?,
                amount: self.num(&format!("{b}.amount"))?,
                price: self.price(&format!("{b}.price"))?,
                offer_id: self.num(&format!("{b}.offerID"))?,
            }),
            4 => Ok(OperationBody::CreatePassiveSellOffer {
                selling: self.asset(&format!("{b}.selling"))?,
                buying: self.asset(&format!("{b}.buying"))?,
                amount: self.num(&format!("{b}.amount"))?,
                price: self.price(&format!("{b}.price"))?,
            }),
            5 => self.set_options(b),
            6 => Ok(OperationBody::ChangeTrust {
                line: self.change_trust_asset(&format!("{b}.line"))?,
                limit: self.num(&format!("{b}.limit"))?,
            }),
            7 => {
                let code_path = format!("{b}.asset");
                Ok(OperationBody::AllowTrust {
                    trustor: self.account(&format!("{b}.trustor"))?,
                    asset: AssetCode::new(self.get(&code_path)?)
                        .map_err(|e| TxRepError::invalid(&code_path, e.to_string()))?,
                    authorize: self.num(&format!("{b}.authorize"))?,
                })
            }
            8 => Ok(OperationBody::AccountMerge {
                destination: self.muxed(&format!("{b}.destination"))?,
            }),
            9 => Ok(OperationBody::Inflation),
            10 => {
                let value_path = format!("{b}.dataValue");
                Ok(OperationBody::ManageData {
                    data_name: self.quoted(&format!("{b}.dataName"))?,
                    data_value: if self.present(&value_path)? {
                        Some(self.bytes(&value_path)?)
                    } else {
                        None
                    },
                })
            }
            11 => Ok(OperationBody::BumpSequence {
                bump_to: self.num(&format!("{b}.bumpTo"))?,
            }),
            12 => Ok(OperationBody::ManageBuyOffer {
                selling: self.asset(&format!("{b}.selling"))?,
                buying: self.asset(&format!("{b}.buying"))?,
                buy_amount: self.num(&format!("{b}.buyAmount"))?,
                price: self.price(&format!("{b}.price"))?,
                offer_id: self.num(&format!("{b}.offerID"))?,
            }),
            13 => Ok(OperationBody::PathPaymentStrictSend {
                send_asset: self.asset(&format!("{b}.sendAsset"))?,
                send_amount: self.num(&format!("{b}.sendAmount"))?,
                destination: self.muxed(&format!("{b}.destination"))?,
                dest_asset: self.asset(&format!("{b}.destAsset"))?,
                dest_min: self.num(&format!("{b}.destMin"))?,
                path: self.asset_path(b)?,
            }),
            14 => {
                let claimants_path = format!("{b}.claimants");
                let mut claimants = Vec::new();
                for i in 0..self.array_len(&claimants_path)? {
                    claimants.push(self.claimant(&format!("{claimants_path}[{i}]"))?);
                }
                Ok(OperationBody::CreateClaimableBalance {
                    asset: self.asset(&format!("{b}.asset"))?,
                    amount: self.num(&format!("{b}.amount"))?,
                    claimants,
                })
            }
            15 => Ok(OperationBody::ClaimClaimableBalance {
                balance_id: self.balance_id(&format!("{b}.balanceID"))?,
            }),
            16 => Ok(OperationBody::BeginSponsoringFutureReserves {
                sponsored_id: self.account(&format!("{b}.sponsoredID"))?,
            }),
            17 => Ok(OperationBody::EndSponsoringFutureReserves),
            18 => match self.variant(b, &REVOKE_NAMES)? {
                0 => Ok(OperationBody::RevokeSponsorship(
                    RevokeSponsorship::LedgerEntry(self.ledger_key(&format!("{b}.ledgerKey"))?),
                )),
                _ => Ok(OperationBody::RevokeSponsorship(RevokeSponsorship::Signer {
                    account_id: self.account(&format!("{b}.signer.accountID"))?,
                    signer_key: self.signer_key(&format!("{b}.signer.signerKey"))?,
                })),
            },
            19 => Ok(OperationBody::Clawback {
                asset: self.asset(&format!("{b}.asset"))?,
                from: self.muxed(&format!("{b}.from"))?,
                amount: self.num(&format!("{b}.amount"))?,
            }),
            20 => Ok(OperationBody::ClawbackClaimableBalance {
                balance_id: self.balance_id(&format!("{b}.balanceID"))?,
            }),
            21 => Ok(OperationBody::SetTrustLineFlags {
                trustor: self.account(&format!("{b}.trustor"))?,
                asset: self.asset(&format!("{b}.asset"))?,
                clear_flags: self.num(&format!("{b}.clearFlags"))?,
                set_flags: self.num(&format!("{b}.setFlags"))?,
            }),
            22 => Ok(OperationBody::LiquidityPoolDeposit {
                pool_id: self.hash(&format!("{b}.liquidityPoolID"))?,
                max_amount_a: self.num(&format!("{b}.maxAmountA"))?,
                max_amount_b: self.num(&format!("{b}.maxAmountB"))?,
                min_price: self.price(&format!("{b}.minPrice"))?,
                max_price: self.price(&format!("{b}.maxPrice"))?,
            }),
            23 => Ok(OperationBody::LiquidityPoolWithdraw {
                pool_id: self.hash(&format!("{b}.liquidityPoolID"))?,
                amount: self.num(&format!("{b}.amount"))?,
                min_amount_a: self.num(&format!("{b}.minAmountA"))?,
                min_amount_b: self.num(&format!("{b}.minAmountB"))?,
            }),
            24 => {
                let auth_path = format!("{b}.auth");
                let mut auth = Vec::new();
                for i in 0..self.array_len(&auth_path)? {
                    auth.push(self.auth_entry(&format!("{auth_path}[{i}]"))?);
                }
                Ok(OperationBody::InvokeHostFunction {
                    host_function: self.host_function(&format!("{b}.hostFunction"))?,
                    auth,
                })
            }
            25 => Ok(OperationBody::ExtendFootprintTtl {
                extend_to: self.num(&format!("{b}.extendTo"))?,
            }),
            _ => Ok(OperationBody::RestoreFootprint),
        }
    }

    fn set_options(&self, b: &str) -> Result<OperationBody> {
        let dest_path = format!("{b}.inflationDest");
        let domain_path = format!("{b}.homeDomain");
        let signer_path = format!("{b}.signer");
        Ok(OperationBody::SetOptions {
            inflation_dest: if self.present(&dest_path)? {
                Some(self.account(&dest_path)?)
            } else {
                None
            },
            clear_flags: self.optional_num(&format!("{b}.clearFlags"))?,
            set_flags: self.optional_num(&format!("{b}.setFlags"))?,
            master_weight: self.optional_num(&format!("{b}.masterWeight"))?,
            low_threshold: self.optional_num(&format!("{b}.lowThreshold"))?,
            med_threshold: self.optional_num(&format!("{b}.medThreshold"))?,
            high_threshold: self.optional_num(&format!("{b}.highThreshold"))?,
            home_domain: if self.present(&domain_path)? {
                Some(self.quoted(&domain_path)?)
            } else {
                None
            },
            signer: if self.present(&signer_path)? {
                Some(Signer {
                    key: self.signer_key(&format!("{signer_path}.key"))?,
                    weight: self.num(&format!("{signer_path}.weight"))?,
                })
            } else {
                None
            },
        })
    }

    fn optional_num<T: FromStr>(&self, path: &str) -> Result<Option<T>> {
        if self.present(path)? {
            Ok(Some(self.num(path)?))
        } else {
            Ok(None)
        }
    }

    fn asset_path(&self, b: &str) -> Result<Vec<Asset>> {
        let path = format!("{b}.path");
        let mut assets = Vec::new();
        for i in 0..self.array_len(&path)? {
            assets.push(self.asset(&format!("{path}[{i}]"))?);
        }
        Ok(assets)
    }

    fn change_trust_asset(&self, p: &str) -> Result<ChangeTrustAsset> {
        match self.get(&format!("{p}.type"))? {
            "ASSET" => Ok(self.asset(&format!("{p}.asset"))?.into()),
            "LIQUIDITY_POOL" => {
                let lp = format!("{p}.liquidityPool");
                Ok(ChangeTrustAsset::LiquidityPool(
                    LiquidityPoolParameters::ConstantProduct(
                        LiquidityPoolConstantProductParameters {
                            asset_a: self.asset(&format!("{lp}.assetA"))?,
                            asset_b: self.asset(&format!("{lp}.assetB"))?,
                            fee: self.num(&format!("{lp}.fee"))?,
                        },
                    ),
                ))
            }
            name => Err(TxRepError::UnknownVariant {
                path: format!("{p}.type"),
                name: name.to_string(),
            }),
        }
    }

    fn claimant(&self, p: &str) -> Result<Claimant> {
        let ty_path = format!("{p}.type");
        let name = self.get(&ty_path)?;
        if name != "CLAIMANT_TYPE_V0" {
            return Err(TxRepError::UnknownVariant {
                path: ty_path,
                name: name.to_string(),
            });
        }
        Ok(Claimant::V0 {
            destination: self.account(&format!("{p}.v0.destination"))?,
            predicate: self.predicate(&format!("{p}.v0.predicate"))?,
        })
    }

    fn predicate(&self, p: &str) -> Result<ClaimPredicate> {
        match self.variant(p, &PREDICATE_NAMES)? {
            0 => Ok(ClaimPredicate::Unconditional),
            1 => Ok(ClaimPredicate::And(
                self.predicate_operands(&format!("{p}.andPredicates"))?,
            )),
            2 => Ok(ClaimPredicate::Or(
                self.predicate_operands(&format!("{p}.orPredicates"))?,
            )),
            3 => {
                let np = format!("{p}.notPredicate");
                Ok(ClaimPredicate::Not(if self.present(&np)? {
                    Some(Box::new(self.predicate(&np)?))
                } else {
                    None
                }))
            }
            4 => Ok(ClaimPredicate::BeforeAbsoluteTime(
                self.num(&format!("{p}.absBefore"))?,
            )),
            _ => Ok(ClaimPredicate::BeforeRelativeTime(
                self.num(&format!("{p}.relBefore"))?,
            )),
        }
    }

    fn predicate_operands(&self, p: &str) -> Result<Vec<ClaimPredicate>> {
        let len = self.array_len(p)?;
        if len > 2 {
            return Err(TxRepError::invalid(p, "at most 2 operands"));
        }
        let mut operands = Vec::new();
        for i in 0..len {
            operands.push(self.predicate(&format!("{p}[{i}]"))?);
        }
        Ok(operands)
    }

    fn balance_id(&self, p: &str) -> Result<ClaimableBalanceId> {
        let ty_path = format!("{p}.type");
        let name = self.get(&ty_path)?;
        if name != "CLAIMABLE_BALANCE_ID_TYPE_V0" {
            return Err(TxRepError::UnknownVariant {
                path: ty_path,
                name: name.to_string(),
            });
        }
        Ok(ClaimableBalanceId::V0(self.hash(&format!("{p}.v0"))?))
    }

    fn ledger_key(&self, p: &str) -> Result<LedgerKey> {
        match self.variant(p, &LEDGER_KEY_NAMES)? {
            0 => Ok(LedgerKey::Account {
                account_id: self.account(&format!("{p}.account.accountID"))?,
            }),
            1 => {
                let ap = format!("{p}.trustLine.asset");
                let asset = match self.get(&format!("{ap}.type"))? {
                    "ASSET" => self.asset(&format!("{ap}.asset"))?.into(),
                    "POOL_SHARE" => {
                        TrustLineAsset::PoolShare(self.hash(&format!("{ap}.poolID"))?)
                    }
                    name => {
                        return Err(TxRepError::UnknownVariant {
                            path: format!("{ap}.type"),
                            name: name.to_string(),
                        })
                    }
                };
                Ok(LedgerKey::TrustLine {
                    account_id: self.account(&format!("{p}.trustLine.accountID"))?,
                    asset,
                })
            }
            2 => Ok(LedgerKey::Offer {
                seller_id: self.account(&format!("{p}.offer.sellerID"))?,
                offer_id: self.num(&format!("{p}.offer.offerID"))?,
            }),
            3 => Ok(LedgerKey::Data {
                account_id: self.account(&format!("{p}.data.accountID"))?,
                data_name: self.quoted(&format!("{p}.data.dataName"))?,
            }),
            4 => Ok(LedgerKey::ClaimableBalance {
                balance_id: self.balance_id(&format!("{p}.claimableBalance.balanceID"))?,
            }),
            5 => Ok(LedgerKey::LiquidityPool {
                pool_id: self.hash(&format!("{p}.liquidityPool.liquidityPoolID"))?,
            }),
            6 => {
                let durability_path = format!("{p}.contractData.durability");
                let durability = match self.get(&durability_path)? {
                    "TEMPORARY" => ContractDataDurability::Temporary,
                    "PERSISTENT" => ContractDataDurability::Persistent,
                    name => {
                        return Err(TxRepError::UnknownVariant {
                            path: durability_path,
                            name: name.to_string(),
                        })
                    }
                };
                Ok(LedgerKey::ContractData {
                    contract: self.sc_address(&format!("{p}.contractData.contract"))?,
                    key: self.scval(&format!("{p}.contractData.key"))?,
                    durability,
                })
            }
            _ => Ok(LedgerKey::ContractCode {
                hash: self.hash(&format!("{p}.contractCode.hash"))?,
            }),
        }
    }

    fn scval(&self, p: &str) -> Result<ScVal> {
        let ty_path = format!("{p}.type");
        let name = self.get(&ty_path)?;
        let index = SCVAL_NAMES
            .iter()
            .position(|&(n, _)| n == name)
            .ok_or_else(|| TxRepError::UnknownVariant {
                path: ty_path,
                name: name.to_string(),
            })?;
        match SCVAL_NAMES[index].0 {
            "SCV_BOOL" => Ok(ScVal::Bool(self.boolean(&format!("{p}.b"))?)),
            "SCV_VOID" => Ok(ScVal::Void),
            "SCV_U32" => Ok(ScVal::U32(self.num(&format!("{p}.u32"))?)),
            "SCV_I32" => Ok(ScVal::I32(self.num(&format!("{p}.i32"))?)),
            "SCV_U64" => Ok(ScVal::U64(self.num(&format!("{p}.u64"))?)),
            "SCV_I64" => Ok(ScVal::I64(self.num(&format!("{p}.i64"))?)),
            "SCV_TIMEPOINT" => Ok(ScVal::Timepoint(self.num(&format!("{p}.timepoint"))?)),
            "SCV_DURATION" => Ok(ScVal::Duration(self.num(&format!("{p}.duration"))?)),
            "SCV_U128" => Ok(ScVal::U128(UInt128Parts::from_u128(
                self.num(&format!("{p}.u128"))?,
            ))),
            "SCV_I128" => Ok(ScVal::I128(Int128Parts::from_i128(
                self.num(&format!("{p}.i128"))?,
            ))),
            "SCV_U256" => {
                let path = format!("{p}.u256");
                let v = BigUint::from_str(self.get(&path)?)
                    .map_err(|_| TxRepError::invalid(&path, "not an unsigned integer"))?;
                UInt256Parts::from_biguint(&v)
                    .map(ScVal::U256)
                    .map_err(|_| TxRepError::invalid(&path, "does not fit in 256 bits"))
            }
            "SCV_I256" => {
                let path = format!("{p}.i256");
                let v = BigInt::from_str(self.get(&path)?)
                    .map_err(|_| TxRepError::invalid(&path, "not an integer"))?;
                Int256Parts::from_bigint(&v)
                    .map(ScVal::I256)
                    .map_err(|_| TxRepError::invalid(&path, "does not fit in 256 bits"))
            }
            "SCV_BYTES" => Ok(ScVal::Bytes(self.bytes(&format!("{p}.bytes"))?)),
            "SCV_STRING" => Ok(ScVal::String(self.quoted(&format!("{p}.str"))?)),
            "SCV_SYMBOL" => {
                let path = format!("{p}.sym");
                ScSymbol::new(self.get(&path)?)
                    .map(ScVal::Symbol)
                    .map_err(|e| TxRepError::invalid(&path, e.to_string()))
            }
            "SCV_VEC" => {
                let vp = format!("{p}.vec");
                if !self.present(&vp)? {
                    return Ok(ScVal::Vec(None));
                }
                let mut items = Vec::new();
                for i in 0..self.array_len(&vp)? {
                    items.push(self.scval(&format!("{vp}[{i}]"))?);
                }
                Ok(ScVal::vec(items))
            }
            "SCV_MAP" => {
                let mp = format!("{p}.map");
                if !self.present(&mp)? {
                    return Ok(ScVal::Map(None));
                }
                let mut entries = Vec::new();
                for i in 0..self.array_len(&mp)? {
                    entries.push(ScMapEntry {
                        key: self.scval(&format!("{mp}[{i}].key"))?,
                        val: self.scval(&format!("{mp}[{i}].val"))?,
                    });
                }
                Ok(ScVal::map(entries))
            }
            "SCV_ADDRESS" => Ok(ScVal::Address(self.sc_address(&format!("{p}.address"))?)),
            "SCV_LEDGER_KEY_CONTRACT_INSTANCE" => Ok(ScVal::LedgerKeyContractInstance),
            _ => Ok(ScVal::LedgerKeyNonce(self.num(&format!("{p}.nonce"))?)),
        }
    }

    fn invoke_args(&self, p: &str) -> Result<InvokeContractArgs> {
        let name_path = format!("{p}.functionName");
        let function_name = ScSymbol::new(self.get(&name_path)?)
            .map_err(|e| TxRepError::invalid(&name_path, e.to_string()))?;
        let args_path = format!("{p}.args");
        let mut args = Vec::new();
        for i in 0..self.array_len(&args_path)? {
            args.push(self.scval(&format!("{args_path}[{i}]"))?);
        }
        Ok(InvokeContractArgs {
            contract_address: self.sc_address(&format!("{p}.contractAddress"))?,
            function_name,
            args,
        })
    }

    fn create_args(&self, p: &str) -> Result<CreateContractArgs> {
        let pp = format!("{p}.contractIDPreimage");
        let contract_id_preimage = match self.variant(&pp, &PREIMAGE_NAMES)? {
            0 => ContractIdPreimage::Address {
                address: self.sc_address(&format!("{pp}.fromAddress.address"))?,
                salt: self.hash(&format!("{pp}.fromAddress.salt"))?,
            },
            _ => ContractIdPreimage::Asset(self.asset(&format!("{pp}.fromAsset"))?),
        };
        let ep = format!("{p}.executable");
        let executable = match self.variant(&ep, &EXECUTABLE_NAMES)? {
            0 => ContractExecutable::Wasm(self.hash(&format!("{ep}.wasmHash"))?),
            _ => ContractExecutable::StellarAsset,
        };
        Ok(CreateContractArgs {
            contract_id_preimage,
            executable,
        })
    }

    fn host_function(&self, p: &str) -> Result<HostFunction> {
        match self.variant(p, &HOST_FUNCTION_NAMES)? {
            0 => Ok(HostFunction::InvokeContract(
                self.invoke_args(&format!("{p}.invokeContract"))?,
            )),
            1 => Ok(HostFunction::CreateContract(
                self.create_args(&format!("{p}.createContract"))?,
            )),
            _ => Ok(HostFunction::UploadContractWasm(
                self.bytes(&format!("{p}.uploadContractWasm.wasm"))?,
            )),
        }
    }

    fn auth_entry(&self, p: &str) -> Result<SorobanAuthorizationEntry> {
        let cp = format!("{p}.credentials");
        let credentials = match self.variant(&cp, &CREDENTIALS_NAMES)? {
            0 => SorobanCredentials::SourceAccount,
            _ => SorobanCredentials::Address(SorobanAddressCredentials {
                address: self.sc_address(&format!("{cp}.address.address"))?,
                nonce: self.num(&format!("{cp}.address.nonce"))?,
                signature_expiration_ledger: self
                    .num(&format!("{cp}.address.signatureExpirationLedger"))?,
                signature: self.scval(&format!("{cp}.address.signature"))?,
            }),
        };
        Ok(SorobanAuthorizationEntry {
            credentials,
            root_invocation: self.invocation(&format!("{p}.rootInvocation"))?,
        })
    }

    fn invocation(&self, p: &str) -> Result<SorobanAuthorizedInvocation> {
        let fp = format!("{p}.function");
        let function = match self.variant(&fp, &AUTH_FUNCTION_NAMES)? {
            0 => SorobanAuthorizedFunction::ContractFn(
                self.invoke_args(&format!("{fp}.contractFn"))?,
            ),
            _ => SorobanAuthorizedFunction::CreateContractHostFn(
                self.create_args(&format!("{fp}.createContractHostFn"))?,
            ),
        };
        let subs_path = format!("{p}.subInvocations");
        let mut sub_invocations = Vec::new();
        for i in 0..self.array_len(&subs_path)? {
            sub_invocations.push(self.invocation(&format!("{subs_path}[{i}]"))?);
        }
        Ok(SorobanAuthorizedInvocation {
            function,
            sub_invocations,
        })
    }

    fn soroban_data(&self, p: &str) -> Result<SorobanTransactionData> {
        let fp = format!("{p}.resources.footprint");
        let ro_path = format!("{fp}.readOnly");
        let mut read_only = Vec::new();
        for i in 0..self.array_len(&ro_path)? {
            read_only.push(self.ledger_key(&format!("{ro_path}[{i}]"))?);
        }
        let rw_path = format!("{fp}.readWrite");
        let mut read_write = Vec::new();
        for i in 0..self.array_len(&rw_path)? {
            read_write.push(self.ledger_key(&format!("{rw_path}[{i}]"))?);
        }
        Ok(SorobanTransactionData {
            resources: SorobanResources {
                footprint: LedgerFootprint {
                    read_only,
                    read_write,
                },
                instructions: self.num(&format!("{p}.resources.instructions"))?,
                read_bytes: self.num(&format!("{p}.resources.readBytes"))?,
                write_bytes: self.num(&format!("{p}.resources.writeBytes"))?,
            },
            resource_fee: self.num(&format!("{p}.resourceFee"))?,
        })
    }
}
