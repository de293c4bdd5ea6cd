// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod local;
pub mod nested;
pub mod stub;

pub use local::{ConstantHandler, EchoHandler};
pub use nested::NestedPatternHandler;
pub use stub::{FailingHandler, RecordingHandler, SlowHandler, StubHandler, UnavailableHandler};
