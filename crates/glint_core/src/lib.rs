//! Glint core - scene description for the ray tracer.
//!
//! This crate provides:
//!
//! - **Materials**: `Material`, `StripePattern`
//! - **Scene configuration**: `SceneConfig` and friends, loadable from JSON
//! - **Textures**: image-backed `Texture` sampling
//!
//! # Example
//!
//! ```ignore
//! use glint_core::SceneConfig;
//!
//! let config = SceneConfig::load("scene.json")?;
//! println!("{} primitives", config.primitives.len());
//! ```

pub mod config;
pub mod material;
pub mod texture;

// Re-export commonly used types
pub use config::{
    CameraConfig, ConfigError, PrimitiveConfig, RenderSettings, SceneConfig, ShapeConfig,
};
pub use material::{Material, StripePattern};
pub use texture::{Texture, TextureError};
