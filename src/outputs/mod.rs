//! Output generation for the coverage report.
//!
//! # Output Structure
//!
//! ```text
//! json_output_dir/
//! └── 2025-05-06/
//!     ├── 09-14-02.json
//!     └── 17-40-31.json
//! ```

pub mod json;
