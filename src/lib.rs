//! Procedural mazes explored through a DDA ray caster.
//!
//! A maze is carved over a cell lattice ([`maze`]), expanded into an occupancy
//! grid ([`grid`]) and projected one screen column at a time ([`projector`]).

pub mod camera;
pub mod caster;
pub mod config;
pub mod error;
pub mod grid;
pub mod input;
pub mod maze;
pub mod minimap;
pub mod movement;
pub mod projector;
pub mod renderer;
pub mod scaler;
pub mod session;
