//! # noteboard-api
//!
//! HTTP surface for the noteboard service: response envelope, wire DTOs,
//! the entity/DTO mapper, and the note service orchestration layer.
//!
//! The binary in `main.rs` wires these against the PostgreSQL record
//! store; tests exercise them against an in-memory repository.

pub mod dto;
pub mod mapper;
pub mod response;
pub mod services;
