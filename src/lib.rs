//! # admonition-filter
//!
//! Pandoc JSON filter rewriting admonition divs into LaTeX environments.
//!
//! A div such as
//!
//! ```markdown
//! ::: attention
//! Do not divide by zero.
//! :::
//! ```
//!
//! is replaced by `\begin{attention}`, its content, and `\end{attention}`
//! as raw LaTeX blocks. Recognized classes are listed in [`ADMONITIONS`].
//!
//! ## Example
//!
//! ```no_run
//! use admonition_filter::{admonitions, FilterOptions};
//!
//! let pipeline = admonitions(FilterOptions::default());
//! pipeline
//!     .run(std::io::stdin().lock(), std::io::stdout().lock())
//!     .unwrap();
//! ```

pub mod adapters;
pub mod core;
pub mod error;
pub mod filters;
pub mod render;
pub mod samples;

pub use error::{Error, Result};
pub use filters::{admonitions, is_admonition, AdmonitionRewriter, FilterPipeline, ADMONITIONS};

/// Options for a filter run.
#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    /// Whether to pretty-print the output JSON.
    pub pretty: bool,
    /// Whether documents newer than the supported API version are rejected.
    pub strict_api_version: bool,
    /// Output format Pandoc passed on the command line.
    pub target_format: Option<String>,
}

// Python bindings (only when 'python' feature is enabled)
#[cfg(feature = "python")]
mod python_bindings {
    use super::*;
    use pyo3::prelude::*;

    /// Rewrites admonitions in a Pandoc JSON document.
    #[pyfunction]
    #[pyo3(signature = (json, pretty = false))]
    fn filter_json(json: &str, pretty: bool) -> PyResult<String> {
        let options = FilterOptions {
            pretty,
            ..Default::default()
        };
        admonitions(options)
            .filter_str(json)
            .map_err(|e| PyErr::new::<pyo3::exceptions::PyValueError, _>(e.to_string()))
    }

    /// A Python module implemented in Rust.
    #[pymodule]
    pub fn admonition_filter(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(filter_json, m)?)?;
        Ok(())
    }
}
