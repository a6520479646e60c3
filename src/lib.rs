//! Library exports for the URL shortener application
//!
//! This module exposes internal components for testing and potential
//! library usage.

pub mod database;
pub mod handler;
pub mod model;
pub mod resolver;
pub mod route;
pub mod service;
