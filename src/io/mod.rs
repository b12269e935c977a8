//! I/O utilities for stream handling
//!
//! This module provides traits and implementations for reading TIFF
//! streams in either byte order.

pub mod seekable;
pub mod byte_order;
