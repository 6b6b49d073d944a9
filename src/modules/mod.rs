//! Modules layer - Infrastructure components for external collaborators
//!
//! Contains adapters for the platform services the bill-board reports to.

pub mod audit;
