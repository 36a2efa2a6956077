//! Configuration shell around the `ammo-payload` engine.

#![deny(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

pub mod config;
