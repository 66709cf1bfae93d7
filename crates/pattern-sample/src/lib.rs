//! # Pattern Sample App Library
//!
//! A small users/catalog/orders system built on `pattern_framework`. Every
//! pattern here is derived rather than written out: controllers get theirs
//! from their type name or registered path, services from their type name
//! or explicit `service_name`.
//!
//! This library exposes the core modules of the application for integration testing.

pub mod controllers;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod services;
