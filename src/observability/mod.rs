// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! Centralized message types for all diagnostic and operational logging in
//! the switchboard core. Message types follow a struct-based pattern with a
//! `Display` implementation so that log text lives in one place instead of
//! being scattered as magic strings through routing and engine code.
//!
//! Messages are organized by subsystem:
//! * `messages::routing` - capability resolution and fallback events
//! * `messages::engine` - pattern run lifecycle and step events
//! * `messages::template` - template resolution warnings
//! * `messages::outputs` - output extraction and fuzzy-match events

pub mod messages;
