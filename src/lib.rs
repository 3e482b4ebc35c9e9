//! Stocktake: offline warehouse stock-takes against a parts master
//!
//! Holds a reference catalog of stockable parts, turns scan input into
//! classified inventory records, and reconciles counts across stations.

pub mod cli;
pub mod core;
pub mod engine;
pub mod entities;
