//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id with a configurable work factor)
//! - Compact HS256 token signing and verification

pub mod password;
pub mod token;
