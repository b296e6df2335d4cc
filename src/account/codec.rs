//! Storage-layer adapter over the canonical account encoding.

use std::cmp::Ordering;
use std::io::{self, Read, Write};

use super::types::AccountDetail;
use crate::encoding::{CanonicalDeserialize, CanonicalSerialize};
use crate::error::{DecodeError, LedgerError, Result};

/// The encode/decode/compare triple a storage backend needs for one record type.
pub trait Codec {
    type Item;

    fn encode<W: Write>(&self, item: &Self::Item, writer: &mut W) -> io::Result<()>;

    fn decode<R: Read>(&self, reader: &mut R) -> std::result::Result<Self::Item, DecodeError>;

    /// Orders two items. Codecs without a meaningful order return
    /// `NotImplemented`; the store must extract its own keys instead.
    fn compare(&self, a: &Self::Item, b: &Self::Item) -> Result<Ordering>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AccountDetailCodec;

impl Codec for AccountDetailCodec {
    type Item = AccountDetail;

    fn encode<W: Write>(&self, item: &AccountDetail, writer: &mut W) -> io::Result<()> {
        item.canonical_serialize(writer)
    }

    fn decode<R: Read>(&self, reader: &mut R) -> std::result::Result<AccountDetail, DecodeError> {
        AccountDetail::canonical_deserialize(reader)
    }

    fn compare(&self, _a: &AccountDetail, _b: &AccountDetail) -> Result<Ordering> {
        Err(LedgerError::NotImplemented("AccountDetailCodec::compare"))
    }
}
