//! Browser platform layer
//!
//! Scoped guards over browser callbacks:
//! - `AnimationLoop`: a requestAnimationFrame loop, cancelled on drop
//! - `EventListener`: a DOM listener, removed on drop
//!
//! Plus DOM lookup helpers and the surface snapshot used by the glitch effect.

pub mod capture;
pub mod dom;
pub mod frame;
pub mod listener;

pub use frame::AnimationLoop;
pub use listener::EventListener;
