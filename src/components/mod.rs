//! UI components.

pub mod particle_viewer;
