//! Domain Layer
//!
//! Scene extraction, output resolution and argument building, without I/O.
//!
//! ## Structure
//!
//! - `entities/` - Scene snapshot, render prims and job descriptions
//! - `value_objects/` - Frame ranges, frame templates, prim patterns, path mapping
//! - `services/` - Extractor, derivation resolver, command builder
//! - `ports/` - Interfaces implemented by infrastructure (scene reading, job submission)
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never spawns processes or touches the file system
//! 2. **Pure Functions** - Services are stateless and testable
//! 3. **Ports & Adapters** - `usdcat` and `deadlinecommand` sit behind trait-defined ports

pub mod entities;
pub mod options;
pub mod ports;
pub mod services;
pub mod value_objects;
