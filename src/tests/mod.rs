//! Cross-module scenario tests exercising the parser end to end.

pub(crate) mod helpers;

mod mutations;
mod stub;
