#![deny(missing_debug_implementations)]
#![warn(missing_docs)]
//! Game types for Isolation.
//!
//! The [types] module holds the small capability traits that searches are generic over, along
//! with the [types::Move] and [types::Player] value types. [board::Board] is the concrete
//! Isolation implementation, and [wire_representation] is the serde shape used for fixtures.

pub mod board;
pub mod types;
pub mod wire_representation;

pub use board::{Board, Movement};
pub use types::{Move, Player};
