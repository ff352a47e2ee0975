//! lensgram Application Library
//!
//! This library provides the application modules composing the
//! Instagram-to-Google-Lens relay pipeline.

pub mod modules;
