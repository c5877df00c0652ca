//! Tests for account service
