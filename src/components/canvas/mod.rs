//! Decorative canvas animators: a particle field and a polygon-connection graph.
//!
//! The scenes and the animator are plain data and run anywhere; only the
//! Leptos components and the frame loop touch the browser.

mod component;
mod frame_loop;
mod generate;
mod particles;
mod polygons;
mod render;
mod sizer;
mod state;
mod types;

pub use component::{ParticlesBackground, PolygonConnections};
