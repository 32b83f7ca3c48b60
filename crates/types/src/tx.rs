use alloy::{
    network::TransactionBuilder,
    primitives::{Address, Bytes, TxHash},
    rpc::types::TransactionRequest,
};
use serde::{Deserialize, Serialize};

/// A populated, unsigned contract call.
///
/// Produced once per planned action and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnsignedTransaction {
    /// Contract the call is addressed to.
    to: Address,
    /// ABI-encoded calldata.
    input: Bytes,
}

impl UnsignedTransaction {
    /// Create a new unsigned transaction.
    pub const fn new(to: Address, input: Bytes) -> Self {
        Self { to, input }
    }

    /// Get the contract address.
    pub const fn to(&self) -> Address {
        self.to
    }

    /// Get the calldata.
    pub const fn input(&self) -> &Bytes {
        &self.input
    }

    /// Convert into a [`TransactionRequest`] sent from `from`.
    pub fn to_request(&self, from: Address) -> TransactionRequest {
        TransactionRequest::default()
            .with_from(from)
            .with_to(self.to)
            .with_input(self.input.clone())
    }
}

/// One entry of a bundle, before nonce assignment and signing.
///
/// Gas limit and gas price are optional. A missing limit is estimated, a
/// missing price falls back to the round's default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleTransaction {
    /// The populated call.
    pub transaction: UnsignedTransaction,
    /// Recipient of the signed transaction.
    pub recipient: Address,
    /// Gas limit, estimated when absent.
    pub gas_limit: Option<u64>,
    /// Gas price in wei, defaulted when absent.
    pub gas_price: Option<u128>,
}

impl BundleTransaction {
    /// Wrap a populated call, sending it to the address it was populated for.
    pub const fn new(transaction: UnsignedTransaction) -> Self {
        let recipient = transaction.to;
        Self { transaction, recipient, gas_limit: None, gas_price: None }
    }

    /// Set an explicit gas limit.
    pub const fn with_gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = Some(gas_limit);
        self
    }

    /// Set an explicit gas price.
    pub const fn with_gas_price(mut self, gas_price: u128) -> Self {
        self.gas_price = Some(gas_price);
        self
    }

    /// Build the request used to estimate gas for this entry.
    pub fn estimate_request(&self, from: Address) -> TransactionRequest {
        self.transaction.to_request(from).with_to(self.recipient)
    }
}

impl From<UnsignedTransaction> for BundleTransaction {
    fn from(transaction: UnsignedTransaction) -> Self {
        Self::new(transaction)
    }
}

/// A signed member of a bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BundledTx {
    /// Transaction hash.
    pub hash: TxHash,
    /// Signing account.
    pub signer: Address,
    /// Nonce the transaction was signed with.
    pub nonce: u64,
}

/// An ordered set of transactions signed together as one bundle.
///
/// All members share one signer and strictly increasing nonces, so the
/// settlement layer can only apply them in this order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedBundle {
    /// EIP-2718 encoded signed transactions, in bundle order.
    txs: Vec<Bytes>,
    /// Hash, signer and nonce of each member, in bundle order.
    members: Vec<BundledTx>,
}

impl SignedBundle {
    /// Create an empty bundle.
    pub const fn new() -> Self {
        Self { txs: Vec::new(), members: Vec::new() }
    }

    /// Append a signed transaction.
    pub fn push(&mut self, raw: Bytes, member: BundledTx) {
        self.txs.push(raw);
        self.members.push(member);
    }

    /// Encoded transactions.
    pub fn txs(&self) -> &[Bytes] {
        &self.txs
    }

    /// Member metadata.
    pub fn members(&self) -> &[BundledTx] {
        &self.members
    }

    /// Number of transactions in the bundle.
    pub fn len(&self) -> usize {
        self.txs.len()
    }

    /// True if the bundle holds no transactions.
    pub fn is_empty(&self) -> bool {
        self.txs.is_empty()
    }

    /// Nonces of the members, in bundle order.
    pub fn nonces(&self) -> impl Iterator<Item = u64> + '_ {
        self.members.iter().map(|member| member.nonce)
    }
}
