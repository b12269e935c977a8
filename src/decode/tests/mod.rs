//! Unit tests for the decoding engine

mod palette_tests;
