//! Top-level test module for catalog-import
//!
//! This file organizes the library-level tests by pipeline stage.

mod helpers;
mod pipeline;
mod template;
