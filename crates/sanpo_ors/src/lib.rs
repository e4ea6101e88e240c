pub mod client;
pub mod profile;
pub mod response;
#[cfg(test)]
pub(crate) mod test_utils;

pub use client::{ORS_DEFAULT_BASE_URL, OrsClient, OrsClientParams, OrsError};
pub use profile::OrsProfile;
