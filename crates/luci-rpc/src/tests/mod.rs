//! Test module for luci-rpc
//!
//! Covers:
//! - Login handshake and transport failures
//! - Single UCI calls against scripted replies
//! - Full section lifecycle against an in-memory device

mod section_tests;
