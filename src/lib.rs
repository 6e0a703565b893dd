//! winestudy - map region labeling and self-quiz
//!
//! Draw named polygons over a map image, then be quizzed by clicking the
//! region whose name is prompted. The crate is the engine behind that:
//! viewport transform, polygon hit-testing, the region store, drawing and
//! quiz state, and a renderer that targets any [`render::RenderTarget`].
//!
//! Front-ends drive a [`Session`] with [`Message`]s; storage of images and
//! region documents sits behind the traits in [`storage`].

pub mod config;
pub mod constants;
pub mod format;
pub mod geometry;
pub mod message;
pub mod model;
pub mod quiz;
pub mod render;
mod rng;
pub mod session;
pub mod storage;
pub mod store;
pub mod viewport;

pub use message::{Message, Mode};
pub use session::{Feedback, LoadReport, Session, SessionSettings};

// WASM entry point
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::*;
