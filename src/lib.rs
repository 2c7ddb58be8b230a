//! # Codealign-RS: Alignment-Based Code Similarity
//!
//! Groups source-code samples by structural similarity and synthesizes a
//! representative template for every group:
//!
//! - **Normalization**: doc-strings, type annotations, and comments stripped;
//!   tokens case-folded and stemmed into a canonical string
//! - **Alignment**: global pairwise alignment scores between canonical strings
//! - **Clustering**: k-medoids over the derived distance matrix
//! - **Templates**: common substrings of each cluster joined by placeholders
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         API Layer                            │
//! ├──────────────────────────────────────────────────────────────┤
//! │  Core          │  Detectors       │  Language   │  I/O       │
//! │ • Config       │ • Normalization  │ • Python    │ • Samples  │
//! │ • Errors       │ • Alignment      │ • Text      │ • Reports  │
//! │ • Samples      │ • Clustering     │             │            │
//! │                │ • Templates      │             │            │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use codealign_rs::{CodealignConfig, CodealignEngine, SourceSample};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut config = CodealignConfig::default();
//!     config.clustering.k = 2;
//!
//!     let engine = CodealignEngine::new(config)?;
//!     let results = engine.analyze(vec![
//!         SourceSample::new("a.py", "def scan(self):\n    return self.tokens\n")?,
//!         SourceSample::new("b.py", "def scan(self):\n    return self.tokens\n")?,
//!         SourceSample::new("c.py", "while True:\n    pass\n")?,
//!     ])?;
//!
//!     for template in &results.templates {
//!         println!("cluster {}: {}", template.cluster_id, template);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(feature = "mimalloc")]
#[global_allocator]
static ALLOC: mimalloc::MiMalloc = mimalloc::MiMalloc;

// Core data structures, configuration, and errors
pub mod core {
    //! Core data structures, configuration, and errors.

    pub mod config;
    pub mod errors;
    pub mod sample;
}

// Pipeline stages
pub mod detectors {
    //! Pipeline stages from normalization to template synthesis.

    pub mod alignment;
    pub mod clustering;
    pub mod normalization;
    pub mod templates;
}

// Language-specific structural stripping
pub mod lang;

// Sample ingestion and reporting
pub mod io {
    //! Sample ingestion and report rendering.

    pub mod reports;
    pub mod samples;
}

// Public API and engine interface
pub mod api {
    //! High-level API and engine interface.

    pub mod engine;
    pub mod results;
}

// Re-export primary types for convenience
pub use api::engine::CodealignEngine;
pub use api::results::AnalysisResults;
pub use core::config::CodealignConfig;
pub use core::errors::{CodealignError, Result, ResultExt};
pub use core::sample::SourceSample;

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

