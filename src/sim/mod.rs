//! Widget simulation
//!
//! All interactive behavior lives here. This module must stay free of
//! platform dependencies:
//! - Time is passed in explicitly (ms)
//! - Seeded RNG only
//! - Timers are deadlines checked on tick

pub mod achievements;
pub mod bubbles;
pub mod buttons;
pub mod challenge;
pub mod effects;
pub mod motion;
pub mod sdf;
pub mod shapes;
pub mod sliders;
pub mod spinner;
pub mod state;
pub mod transient;
pub mod wave;

pub use achievements::{Achievement, AchievementId, Achievements};
pub use bubbles::BubbleGrid;
pub use buttons::{ButtonBoard, ButtonEffect, PressOutcome};
pub use challenge::{ActiveChallenge, Challenge};
pub use effects::{MatrixRain, Rainfall, Vortex};
pub use motion::{Bounds, Motion, integrate};
pub use shapes::{Shape, ShapeBoard, ShapeKind};
pub use sliders::{SliderBank, SliderOutcome};
pub use spinner::{Direction, SpeedLabel, Spinner, SpinnerDesign};
pub use state::{Command, FidgetState, HudSnapshot, Reaction, Section};
pub use transient::Transient;
pub use wave::propagate_wave;
