//! Trait definitions for the Explainer animation pipeline.
//!
//! The pipeline talks to two external collaborators, a text-generation
//! service and a rendering engine. Both sit behind the traits in this crate so
//! the orchestrator can be driven by real providers in production and by
//! scripted doubles in tests.

mod traits;

pub use traits::{ExplainerDriver, SceneRenderer};
