//! Use-Cases der Application-Layer-Orchestrierung.

pub mod editing;
pub mod layout;
pub mod persistence;
pub mod selection;
pub mod viewport;
