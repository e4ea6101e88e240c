pub mod client;
pub mod rows;
#[cfg(test)]
pub(crate) mod test_utils;

pub use client::{StoreClient, StoreClientParams, StoreError};
