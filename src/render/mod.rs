//! Render - scene painting behind a drawing surface trait
//!
//! - surface:      the `Surface` trait and paint styles
//! - scene:        layered scene, pure function of a `FrameView`
//! - display_list: recording surface for tests and headless runs
//! - canvas2d:     browser canvas backend

pub mod canvas2d;
pub mod display_list;
pub mod scene;
pub mod surface;

pub use display_list::{DisplayList, DrawCommand};
pub use scene::{draw_scene, FrameView, SpeckleTexture};
pub use surface::{Paint, Surface};
