#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

//! Credential verification for LLM, identity and text-to-speech providers
//!
//! Each [`Check`] validates credential shape locally, then sends exactly one
//! live probe and classifies the outcome into a [`Diagnostic`]. The
//! [`Runner`] executes checks in sequence, honors gates between them and
//! prints a summary through a [`Report`].

mod artifact;
pub mod check;
mod credential;
mod diagnostic;
mod error;
mod http_client;
mod report;
mod result;
mod runner;
mod service;

pub use artifact::ArtifactWriter;
pub use check::{Check, CredentialSummary};
pub use credential::mask;
pub use diagnostic::{Diagnostic, Failure};
pub use error::ProbeError;
pub use http_client::http_client;
pub use report::Report;
pub use result::{CheckResult, Success};
pub use runner::{Runner, Suite, all_passed, run_check};
pub use service::Service;
