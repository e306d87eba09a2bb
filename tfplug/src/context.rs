//! Request-scoped context
//!
//! Every provider, resource and data source call receives a Context. It
//! carries no cancellation or deadline; calls run to completion.

/// Token passed to every framework call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Context;

impl Context {
    pub fn new() -> Self {
        Self
    }
}
