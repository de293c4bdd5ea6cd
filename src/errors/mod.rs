// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod handler;
mod loading;
mod registry;
mod routing;
mod run;
mod validation;

pub use handler::HandlerError;
pub use loading::LoadError;
pub use registry::RegistryError;
pub use routing::RoutingError;
pub use run::RunError;
pub use validation::PatternValidationError;
