//! Image pipeline components.
//!
//! This module contains the stages of the pipeline and their plumbing:
//! - **codec**: Read/decode sources and encode/write results
//! - **transform**: Resize and grayscale conversion
//! - **job**: The unit of work and its destination rule
//! - **channel**: Handoff queues and the generic stage runner
//! - **stages**: The load, resize, grayscale and save bodies
//! - **orchestrator**: Wires the stages together for either execution mode

pub mod channel;
pub mod codec;
pub mod job;
pub mod orchestrator;
pub mod stages;
pub mod transform;

// Re-exports for convenient access
pub use channel::{handoff_channel, HandoffReceiver, HandoffSender, PipelineStage};
pub use codec::ImageCodec;
pub use job::{DestinationRule, Job};
pub use orchestrator::Pipeline;
pub use stages::{StageObserver, Stages};
