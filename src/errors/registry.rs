// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Errors raised while configuring capability bindings.
///
/// These surface synchronously to the caller doing the registration;
/// nothing is partially applied when they occur.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    /// A binding already exists for the capability and the new registration
    /// did not opt into dual registration.
    #[error("capability '{capability}' already has a binding; handler '{handler}' was registered with allow_dual=false")]
    DuplicateBinding { capability: String, handler: String },

    /// Unregistration referenced a binding that does not exist.
    #[error("no binding for handler '{handler}' under capability '{capability}'")]
    UnknownBinding { capability: String, handler: String },
}
