//! Unit tests for the TIFF container parsing module

mod test_utils;
