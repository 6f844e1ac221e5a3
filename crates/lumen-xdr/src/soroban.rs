//! Smart-contract invocation structures: host functions, authorization
//! entries, footprints, and transaction resource data.
//!
//! Authorization entries carry a recursive invocation tree: each node owns
//! its sub-invocations outright, so recursive encode/decode needs no arena
//! or shared ownership.

use crate::asset::Asset;
use crate::codec::{encode_var_opaque, ReadCursor, XdrDecode, XdrEncode};
use crate::error::{Result, XdrError};
use crate::ledger_key::LedgerKey;
use crate::scval::{ScAddress, ScSymbol, ScVal};
use crate::types::Hash256;

/// Arguments of a contract function call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvokeContractArgs {
    pub contract_address: ScAddress,
    pub function_name: ScSymbol,
    pub args: Vec<ScVal>,
}

impl XdrEncode for InvokeContractArgs {
    fn encode(&self, out: &mut Vec<u8>) {
        self.contract_address.encode(out);
        self.function_name.encode(out);
        self.args.encode(out);
    }
}

impl XdrDecode for InvokeContractArgs {
    fn decode(cur: &mut ReadCursor<'_>) -> Result<Self> {
        Ok(Self {
            contract_address: ScAddress::decode(cur)?,
            function_name: ScSymbol::decode(cur)?,
            args: Vec::decode(cur)?,
        })
    }
}

/// The seed from which a new contract id is derived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractIdPreimage {
    Address { address: ScAddress, salt: Hash256 },
    Asset(Asset),
}

impl XdrEncode for ContractIdPreimage {
    fn encode(&self, out: &mut Vec<u8>) {
        match self {
            Self::Address { address, salt } => {
                0u32.encode(out);
                address.encode(out);
                salt.encode(out);
            }
            Self::Asset(asset) => {
                1u32.encode(out);
                asset.encode(out);
            }
        }
    }
}

impl XdrDecode for ContractIdPreimage {
    fn decode(cur: &mut ReadCursor<'_>) -> Result<Self> {
        match cur.read_u32()? {
            0 => Ok(Self::Address {
                address: ScAddress::decode(cur)?,
                salt: Hash256::decode(cur)?,
            }),
            1 => Ok(Self::Asset(Asset::decode(cur)?)),
            value => Err(XdrError::InvalidDiscriminant {
                ty: "ContractIdPreimage",
                value,
            }),
        }
    }
}

/// What a deployed contract executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractExecutable {
    Wasm(Hash256),
    StellarAsset,
}

impl XdrEncode for ContractExecutable {
    fn encode(&self, out: &mut Vec<u8>) {
        match self {
            Self::Wasm(hash) => {
                0u32.encode(out);
                hash.encode(out);
            }
            Self::StellarAsset => 1u32.encode(out),
        }
    }
}

impl XdrDecode for ContractExecutable {
    fn decode(cur: &mut ReadCursor<'_>) -> Result<Self> {
        match cur.read_u32()? {
            0 => Ok(Self::Wasm(Hash256::decode(cur)?)),
            1 => Ok(Self::StellarAsset),
            value => Err(XdrError::InvalidDiscriminant {
                ty: "ContractExecutable",
                value,
            }),
        }
    }
}

/// Arguments for deploying a contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateContractArgs {
    pub contract_id_preimage: ContractIdPreimage,
    pub executable: ContractExecutable,
}

impl XdrEncode for CreateContractArgs {
    fn encode(&self, out: &mut Vec<u8>) {
        self.contract_id_preimage.encode(out);
        self.executable.encode(out);
    }
}

impl XdrDecode for CreateContractArgs {
    fn decode(cur: &mut ReadCursor<'_>) -> Result<Self> {
        Ok(Self {
            contract_id_preimage: ContractIdPreimage::decode(cur)?,
            executable: ContractExecutable::decode(cur)?,
        })
    }
}

/// The host function an invoke-host-function operation executes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostFunction {
    InvokeContract(InvokeContractArgs),
    CreateContract(CreateContractArgs),
    UploadContractWasm(Vec<u8>),
}

impl XdrEncode for HostFunction {
    fn encode(&self, out: &mut Vec<u8>) {
        match self {
            Self::InvokeContract(args) => {
                0u32.encode(out);
                args.encode(out);
            }
            Self::CreateContract(args) => {
                1u32.encode(out);
                args.encode(out);
            }
            Self::UploadContractWasm(wasm) => {
                2u32.encode(out);
                encode_var_opaque(out, wasm);
            }
        }
    }
}

impl XdrDecode for HostFunction {
    fn decode(cur: &mut ReadCursor<'_>) -> Result<Self> {
        match cur.read_u32()? {
            0 => Ok(Self::InvokeContract(InvokeContractArgs::decode(cur)?)),
            1 => Ok(Self::CreateContract(CreateContractArgs::decode(cur)?)),
            2 => Ok(Self::UploadContractWasm(
                cur.read_var_opaque("contract wasm", u32::MAX as usize)?,
            )),
            value => Err(XdrError::InvalidDiscriminant {
                ty: "HostFunction",
                value,
            }),
        }
    }
}

/// The function authorized by one node of an invocation tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SorobanAuthorizedFunction {
    ContractFn(InvokeContractArgs),
    CreateContractHostFn(CreateContractArgs),
}

impl XdrEncode for SorobanAuthorizedFunction {
    fn encode(&self, out: &mut Vec<u8>) {
        match self {
            Self::ContractFn(args) => {
                0u32.encode(out);
                args.encode(out);
            }
            Self::CreateContractHostFn(args) => {
                1u32.encode(out);
                args.encode(out);
            }
        }
    }
}

impl XdrDecode for SorobanAuthorizedFunction {
    fn decode(cur: &mut ReadCursor<'_>) -> Result<Self> {
        match cur.read_u32()? {
            0 => Ok(Self::ContractFn(InvokeContractArgs::decode(cur)?)),
            1 => Ok(Self::CreateContractHostFn(CreateContractArgs::decode(cur)?)),
            value => Err(XdrError::InvalidDiscriminant {
                ty: "SorobanAuthorizedFunction",
                value,
            }),
        }
    }
}

/// A node of the authorized invocation tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SorobanAuthorizedInvocation {
    pub function: SorobanAuthorizedFunction,
    pub sub_invocations: Vec<SorobanAuthorizedInvocation>,
}

impl XdrEncode for SorobanAuthorizedInvocation {
    fn encode(&self, out: &mut Vec<u8>) {
        self.function.encode(out);
        self.sub_invocations.encode(out);
    }
}

impl XdrDecode for SorobanAuthorizedInvocation {
    fn decode(cur: &mut ReadCursor<'_>) -> Result<Self> {
        Ok(Self {
            function: SorobanAuthorizedFunction::decode(cur)?,
            sub_invocations: Vec::decode(cur)?,
        })
    }
}

/// Credentials for an address-authorized invocation.
///
/// The signature is itself a contract value, typically a vector of
/// signature structures produced by the authorizing wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SorobanAddressCredentials {
    pub address: ScAddress,
    pub nonce: i64,
    pub signature_expiration_ledger: u32,
    pub signature: ScVal,
}

impl XdrEncode for SorobanAddressCredentials {
    fn encode(&self, out: &mut Vec<u8>) {
        self.address.encode(out);
        self.nonce.encode(out);
        self.signature_expiration_ledger.encode(out);
        self.signature.encode(out);
    }
}

impl XdrDecode for SorobanAddressCredentials {
    fn decode(cur: &mut ReadCursor<'_>) -> Result<Self> {
        Ok(Self {
            address: ScAddress::decode(cur)?,
            nonce: cur.read_i64()?,
            signature_expiration_ledger: cur.read_u32()?,
            signature: ScVal::decode(cur)?,
        })
    }
}

/// Who authorized an invocation tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SorobanCredentials {
    /// Authorization comes from the transaction source account's signature.
    SourceAccount,
    /// Authorization is a separate address with its own signature.
    Address(SorobanAddressCredentials),
}

impl XdrEncode for SorobanCredentials {
    fn encode(&self, out: &mut Vec<u8>) {
        match self {
            Self::SourceAccount => 0u32.encode(out),
            Self::Address(creds) => {
                1u32.encode(out);
                creds.encode(out);
            }
        }
    }
}

impl XdrDecode for SorobanCredentials {
    fn decode(cur: &mut ReadCursor<'_>) -> Result<Self> {
        match cur.read_u32()? {
            0 => Ok(Self::SourceAccount),
            1 => Ok(Self::Address(SorobanAddressCredentials::decode(cur)?)),
            value => Err(XdrError::InvalidDiscriminant {
                ty: "SorobanCredentials",
                value,
            }),
        }
    }
}

/// One authorization: credentials plus the invocation tree they cover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SorobanAuthorizationEntry {
    pub credentials: SorobanCredentials,
    pub root_invocation: SorobanAuthorizedInvocation,
}

impl XdrEncode for SorobanAuthorizationEntry {
    fn encode(&self, out: &mut Vec<u8>) {
        self.credentials.encode(out);
        self.root_invocation.encode(out);
    }
}

impl XdrDecode for SorobanAuthorizationEntry {
    fn decode(cur: &mut ReadCursor<'_>) -> Result<Self> {
        Ok(Self {
            credentials: SorobanCredentials::decode(cur)?,
            root_invocation: SorobanAuthorizedInvocation::decode(cur)?,
        })
    }
}

/// Encode a bare list of authorization entries: u32 count + entries.
///
/// This is the out-of-band wire form used for remote co-signing callbacks.
pub fn encode_auth_entries(entries: &[SorobanAuthorizationEntry]) -> Vec<u8> {
    let mut out = Vec::new();
    (entries.len() as u32).encode(&mut out);
    for entry in entries {
        entry.encode(&mut out);
    }
    out
}

/// Decode a bare list of authorization entries.
pub fn decode_auth_entries(bytes: &[u8]) -> Result<Vec<SorobanAuthorizationEntry>> {
    Vec::from_xdr(bytes)
}

/// Base64 form of [`encode_auth_entries`].
pub fn auth_entries_to_base64(entries: &[SorobanAuthorizationEntry]) -> String {
    data_encoding::BASE64.encode(&encode_auth_entries(entries))
}

/// Base64 form of [`decode_auth_entries`].
pub fn auth_entries_from_base64(text: &str) -> Result<Vec<SorobanAuthorizationEntry>> {
    let bytes = data_encoding::BASE64
        .decode(text.trim().as_bytes())
        .map_err(|_| XdrError::InvalidBase64)?;
    decode_auth_entries(&bytes)
}

/// The ledger entries an invocation reads and writes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LedgerFootprint {
    pub read_only: Vec<LedgerKey>,
    pub read_write: Vec<LedgerKey>,
}

impl XdrEncode for LedgerFootprint {
    fn encode(&self, out: &mut Vec<u8>) {
        self.read_only.encode(out);
        self.read_write.encode(out);
    }
}

impl XdrDecode for LedgerFootprint {
    fn decode(cur: &mut ReadCursor<'_>) -> Result<Self> {
        Ok(Self {
            read_only: Vec::decode(cur)?,
            read_write: Vec::decode(cur)?,
        })
    }
}

/// Resource declaration for a contract transaction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SorobanResources {
    pub footprint: LedgerFootprint,
    pub instructions: u32,
    pub read_bytes: u32,
    pub write_bytes: u32,
}

impl XdrEncode for SorobanResources {
    fn encode(&self, out: &mut Vec<u8>) {
        self.footprint.encode(out);
        self.instructions.encode(out);
        self.read_bytes.encode(out);
        self.write_bytes.encode(out);
    }
}

impl XdrDecode for SorobanResources {
    fn decode(cur: &mut ReadCursor<'_>) -> Result<Self> {
        Ok(Self {
            footprint: LedgerFootprint::decode(cur)?,
            instructions: cur.read_u32()?,
            read_bytes: cur.read_u32()?,
            write_bytes: cur.read_u32()?,
        })
    }
}

/// The resource/fee extension attached to contract transactions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SorobanTransactionData {
    pub resources: SorobanResources,
    pub resource_fee: i64,
}

impl XdrEncode for SorobanTransactionData {
    fn encode(&self, out: &mut Vec<u8>) {
        // Extension point, always v0.
        0u32.encode(out);
        self.resources.encode(out);
        self.resource_fee.encode(out);
    }
}

impl XdrDecode for SorobanTransactionData {
    fn decode(cur: &mut ReadCursor<'_>) -> Result<Self> {
        match cur.read_u32()? {
            0 => Ok(Self {
                resources: SorobanResources::decode(cur)?,
                resource_fee: cur.read_i64()?,
            }),
            value => Err(XdrError::InvalidDiscriminant {
                ty: "SorobanTransactionData",
                value,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AccountId;

    fn contract_call(name: &str, args: Vec<ScVal>) -> InvokeContractArgs {
        InvokeContractArgs {
            contract_address: ScAddress::Contract(Hash256::from_bytes([0xc0; 32])),
            function_name: ScSymbol::new(name).unwrap(),
            args,
        }
    }

    fn nested_invocation() -> SorobanAuthorizedInvocation {
        SorobanAuthorizedInvocation {
            function: SorobanAuthorizedFunction::ContractFn(contract_call(
                "swap",
                vec![ScVal::u128(1000)],
            )),
            sub_invocations: vec![
                SorobanAuthorizedInvocation {
                    function: SorobanAuthorizedFunction::ContractFn(contract_call(
                        "transfer",
                        vec![ScVal::i128(-5)],
                    )),
                    sub_invocations: vec![SorobanAuthorizedInvocation {
                        function: SorobanAuthorizedFunction::ContractFn(contract_call(
                            "burn",
                            vec![],
                        )),
                        sub_invocations: vec![],
                    }],
                },
                SorobanAuthorizedInvocation {
                    function: SorobanAuthorizedFunction::ContractFn(contract_call("mint", vec![])),
                    sub_invocations: vec![],
                },
            ],
        }
    }

    #[test]
    fn test_invocation_tree_roundtrip() {
        let inv = nested_invocation();
        assert_eq!(
            SorobanAuthorizedInvocation::from_xdr(&inv.to_xdr()).unwrap(),
            inv
        );
    }

    #[test]
    fn test_auth_entry_roundtrip() {
        let entry = SorobanAuthorizationEntry {
            credentials: SorobanCredentials::Address(SorobanAddressCredentials {
                address: ScAddress::Account(AccountId::from_bytes([1; 32])),
                nonce: 77,
                signature_expiration_ledger: 500_000,
                signature: ScVal::vec(vec![ScVal::Bytes(vec![9; 64])]),
            }),
            root_invocation: nested_invocation(),
        };
        assert_eq!(
            SorobanAuthorizationEntry::from_xdr(&entry.to_xdr()).unwrap(),
            entry
        );
    }

    #[test]
    fn test_auth_entry_list_wire_form() {
        let entries = vec![
            SorobanAuthorizationEntry {
                credentials: SorobanCredentials::SourceAccount,
                root_invocation: nested_invocation(),
            },
            SorobanAuthorizationEntry {
                credentials: SorobanCredentials::SourceAccount,
                root_invocation: nested_invocation(),
            },
        ];
        let bytes = encode_auth_entries(&entries);
        assert_eq!(&bytes[..4], [0, 0, 0, 2]);
        assert_eq!(decode_auth_entries(&bytes).unwrap(), entries);

        let text = auth_entries_to_base64(&entries);
        assert_eq!(auth_entries_from_base64(&text).unwrap(), entries);
    }

    #[test]
    fn test_host_function_variants_roundtrip() {
        let fns = [
            HostFunction::InvokeContract(contract_call("hello", vec![ScVal::Void])),
            HostFunction::CreateContract(CreateContractArgs {
                contract_id_preimage: ContractIdPreimage::Address {
                    address: ScAddress::Account(AccountId::from_bytes([2; 32])),
                    salt: Hash256::from_bytes([3; 32]),
                },
                executable: ContractExecutable::Wasm(Hash256::from_bytes([4; 32])),
            }),
            HostFunction::CreateContract(CreateContractArgs {
                contract_id_preimage: ContractIdPreimage::Asset(Asset::Native),
                executable: ContractExecutable::StellarAsset,
            }),
            HostFunction::UploadContractWasm(vec![0; 100]),
        ];
        for f in fns {
            assert_eq!(HostFunction::from_xdr(&f.to_xdr()).unwrap(), f);
        }
    }

    #[test]
    fn test_transaction_data_roundtrip() {
        let data = SorobanTransactionData {
            resources: SorobanResources {
                footprint: LedgerFootprint {
                    read_only: vec![LedgerKey::ContractCode {
                        hash: Hash256::from_bytes([8; 32]),
                    }],
                    read_write: vec![LedgerKey::ContractData {
                        contract: ScAddress::Contract(Hash256::from_bytes([9; 32])),
                        key: ScVal::LedgerKeyContractInstance,
                        durability: crate::ledger_key::ContractDataDurability::Persistent,
                    }],
                },
                instructions: 1_000_000,
                read_bytes: 2048,
                write_bytes: 1024,
            },
            resource_fee: 50_000,
        };
        assert_eq!(
            SorobanTransactionData::from_xdr(&data.to_xdr()).unwrap(),
            data
        );
    }
}
