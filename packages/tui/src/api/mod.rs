pub mod client;

pub use client::{ApiClient, ClientError, ClientResult};
