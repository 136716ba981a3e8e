//! # lex-core
//!
//! Core domain types and error types for LexCorp.
//!
//! This crate provides the foundational types shared across all LexCorp crates:
//! - Identity types handed out by the auth provider (users, sessions)
//! - Organization records and the profile payload used to create them
//! - Agreements with their status workflow and risk levels
//! - Brand settings and clause templates
//! - Agreement filtering and portfolio analytics
//! - Cross-cutting error types

pub mod analytics;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod filter;
