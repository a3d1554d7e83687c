//! Core business logic for Billsplit.
//!
//! This crate contains pure business logic with ZERO web dependencies.
//! All domain types, conversion rules, and settlement calculations live here.
//!
//! # Modules
//!
//! - `split` - People, bills, and the settlement engine
//! - `currency` - Rate tables, rate caching, and bill normalization

pub mod currency;
pub mod split;
