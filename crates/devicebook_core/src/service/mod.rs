//! Use-case services.
//!
//! # Responsibility
//! - Layer caller-facing APIs over repository contracts.
//! - Keep presentation code decoupled from storage details.

pub mod storage_facade;
