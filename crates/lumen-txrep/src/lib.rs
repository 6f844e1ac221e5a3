//! # Lumen TxRep
//!
//! A line-oriented, human-readable text form for transaction envelopes,
//! convertible losslessly to and from the binary wire encoding.
//!
//! Each line is `path: value`, where the path spells out the position of
//! one leaf field in the envelope. Union tags, array lengths, and optional
//! presence flags appear as their own lines ahead of the data they govern,
//! so the text can be read and edited top to bottom.
//!
//! ```text
//! type: ENVELOPE_TYPE_TX
//! tx.sourceAccount: GBCJLPKHE2QTXTYZNZG6K3OBRPHJHABT2MG6JLAMM5FOARHM2GL67VCW
//! tx.fee: 100
//! ...
//! ```
//!
//! [`to_txrep`] renders an envelope; [`from_txrep`] parses one back.
//! Rendering then parsing returns the identical envelope, and parsing
//! accepts blank lines, `#` comments, and trailing parenthesized
//! annotations on unquoted values.

pub mod error;
mod names;
pub mod parser;
mod value;
pub mod writer;

pub use error::{Result, TxRepError};
pub use parser::from_txrep;
pub use writer::{to_txrep, to_txrep_with, TxRepOptions};
