//! Core use-case services.
//!
//! # Responsibility
//! - Hold every memo business rule behind stable service APIs.
//! - Keep API/transport layers decoupled from storage details.

pub mod memo_service;
