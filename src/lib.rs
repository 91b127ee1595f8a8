//! Ant Colony - needs-driven colony simulation with a heuristic builder

pub mod city;
pub mod core;
pub mod entity;
pub mod planner;
pub mod render;
pub mod simulation;
pub mod spatial;
pub mod world;
