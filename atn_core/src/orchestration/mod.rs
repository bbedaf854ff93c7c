//! Multi-pass parse orchestration
//!
//! Sequences parser configurations over one input source, reconfiguring
//! the input between passes and threading a shared output through them.
//! The parse itself is delegated to a [`ParseExecutor`].

pub mod cancel;
pub mod error;
pub mod input;
pub mod multi;
pub mod settings;

pub use cancel::CancellationFlag;
pub use error::{BoxedError, OrchestrationError};
pub use input::{InputOptions, InputSource, VecInput};
pub use multi::{MultiParseSettings, PassConfig};
pub use settings::{
    InputDecision, ParseExecutor, ParseRequest, ParseSettings, Reconfigure, ReconfigureStrategy,
};
