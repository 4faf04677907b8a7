//! # skr-core
//!
//! Core types and error types for skrump.
//!
//! This crate provides the foundational types shared across all skrump crates:
//! - The raw OAuth2 user payload and token bundle handed over by the framework
//! - The Smartsheet user model the raw payload is decoded into
//! - The canonical identity produced by translation
//! - Persisted entities (account records, external-auth links)
//! - The per-request sign-in stage state machine
//! - The storage collaborator error type

pub mod entities;
pub mod enums;
pub mod errors;
pub mod identity;
pub mod payload;
pub mod smartsheet;
