//! Integration tests for pagesift
//!
//! These tests run the full search pipeline against wiremock HTTP servers.

mod search_tests;
