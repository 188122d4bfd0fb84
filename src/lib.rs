//! Sammelbestellung - Group food orders in a chat room
//!
//! This crate implements a chat command (`!bestellung`) that lets room
//! members build a shared delivery order, prints totals and tip suggestions,
//! and splits the paid amount proportionally, booking each share on an
//! external tally ledger ("Strichliste").

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
