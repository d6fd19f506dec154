//! # Business Logic Services
//!
//! This module contains the core business logic services for the agenda
//! application. Services encapsulate domain-specific functionality and
//! provide clean interfaces for use by HTTP handlers.
//!
//! ## Available Services
//!
//! - **Booking** (`booking`) - Appointment validation and lifecycle rules
//! - **JWT** (`jwt`) - Access token minting and validation
//! - **Notice** (`notice`) - Localized notification wording

pub mod booking;
pub mod jwt;
pub mod notice;
