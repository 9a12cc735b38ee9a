//! vignette
//!
//! A small, cross-platform renderer for self-contained demo scenes, built on
//! wgpu and winit for native and WASM targets. The crate revolves around a
//! CPU-side scene graph that plain code can build and animate without
//! touching the GPU; a renderer uploads the graph once and replays it every
//! frame under Blinn-Phong lighting with optional spot-light shadows.
//!
//! High-level modules
//! - `scene`: the node arena, transforms, mesh data and materials
//! - `geometry`: procedural primitives (boxes, spheres, toruses, tubes)
//! - `camera`: perspective camera and its uniform representation
//! - `lighting`: directional and spot lights, the packed lights uniform
//! - `controls`: mouse-driven orbit/pan/zoom camera controls
//! - `viewport`: window surface, device and depth buffer ownership
//! - `renderer`: frame composition over mesh, line and shadow pipelines
//! - `pipelines`: pipeline construction and the WGSL shaders
//! - `driver`: the winit event loop, animation clock and run entry point
//! - `scenes`: the ready-made demo scenes
//!

pub mod camera;
pub mod controls;
pub mod driver;
pub mod geometry;
pub mod lighting;
pub mod pipelines;
pub mod renderer;
pub mod scene;
pub mod scenes;
pub mod viewport;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath::{Deg, Point3, Quaternion, Rad, Vector3};
pub use wgpu::Color;
pub use winit::event::{DeviceEvent, WindowEvent};

pub use driver::{Animate, DriverConfig, StopSignal, run};
pub use scene::{Material, NodeId, Scene, rgb};
