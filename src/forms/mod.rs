//! Parsing of visitor-supplied input into typed values.

pub mod catalog;
