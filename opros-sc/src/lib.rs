//! opros-sc library - Survey submission Client
//!
//! Delivers validated survey responses to the storage service with bounded
//! retries and an alternate-encoding fallback, and fetches results back.

pub mod client;
pub mod retry;

pub use client::{SubmitClient, TransportError};
pub use retry::{RetryPolicy, RetryState, RetryStep, Strategy};
