#![allow(missing_debug_implementations)]

use crate::{
    parse::{self, ParseError},
    query::QueryDecoder,
    Dsn,
};
use alloc::string::String;
use core::num::NonZeroUsize;

pub trait Parse {
    type Val;
    type Err;

    fn parse_with<D: QueryDecoder>(self, decoder: D) -> Result<Dsn<Self::Val>, Self::Err>;
}

impl<'a> Parse for &'a str {
    type Val = &'a str;
    type Err = ParseError;

    fn parse_with<D: QueryDecoder>(self, decoder: D) -> Result<Dsn<Self::Val>, Self::Err> {
        parse::parse(self, decoder).map(|(meta, params)| Dsn::new(self, meta, params))
    }
}

impl Parse for String {
    type Val = Self;
    type Err = (ParseError, Self);

    fn parse_with<D: QueryDecoder>(self, decoder: D) -> Result<Dsn<Self::Val>, Self::Err> {
        match parse::parse(&self, decoder) {
            Ok((meta, params)) => Ok(Dsn::new(self, meta, params)),
            Err(e) => Err((e, self)),
        }
    }
}

/// Component bounds within the input. Absent components are `(0, 0)`.
#[derive(Clone, Copy, Default)]
pub struct Meta {
    // The index of the colon in "://", zero if there is no scheme.
    pub scheme_end: usize,
    pub username: (usize, usize),
    pub password: (usize, usize),
    pub protocol: (usize, usize),
    pub address: (usize, usize),
    pub path: (usize, usize),
    // One byte past the '?'.
    pub query_start: Option<NonZeroUsize>,
}
