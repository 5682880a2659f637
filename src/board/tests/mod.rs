//! Board module tests.
//!
//! Tests are organized into separate files by category:
//! - `perft.rs` - Performance tests for move generation
//! - `movegen.rs` - Pins, checks, castling and en passant edge cases
//! - `draw.rs` - Fifty-move rule and draw scoring
//! - `make_unmake.rs` - Make/unmake move correctness
//! - `search.rs` - Alpha-beta, quiescence and mate scoring
//! - `proptest.rs` - Property-based tests

mod proptest;
