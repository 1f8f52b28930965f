//! Form definitions backing the order routes.

pub mod order;
