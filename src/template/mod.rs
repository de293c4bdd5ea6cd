// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Templated data flow between steps.
//!
//! A pure substitution engine, intentionally not a scripting language: no
//! arithmetic, no conditionals. Keeping workflows declarative keeps them
//! auditable.

mod path;
mod resolver;

pub use path::lookup_path;
pub use resolver::TemplateResolver;
