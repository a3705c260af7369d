//! # buildr
//!
//! A build launcher for CMake projects: prepares a build directory and
//! delegates to the native toolchain.
//!
//! `buildr` provides a builder-pattern API around the classic
//! `mkdir build && cd build && cmake .. && make` sequence, with support for
//! CMake presets, custom defines, tool overrides, and both synchronous and
//! asynchronous execution. The compile step only runs if the configure step
//! succeeds, and both run with the build directory as their working directory
//! rather than mutating the process-wide working directory.
//!
//! ## Quick Start
//!
//! ```no_run
//! use buildr::Launcher;
//!
//! // Synchronous launch
//! let result = Launcher::new()
//!     .set_path("./my_project")
//!     .set_build_path("./my_project/build")
//!     .add_define("CMAKE_EXPORT_COMPILE_COMMANDS", "ON")
//!     .launch();
//!
//! assert!(result.is_ok());
//! ```
//!
//! ```no_run
//! use buildr::Launcher;
//!
//! // Asynchronous launch
//! let rx = Launcher::new()
//!     .set_path("./my_project")
//!     .set_preset("default")
//!     .spawn();
//!
//! let result = rx.recv().unwrap();
//! assert!(result.is_ok());
//! ```

pub mod error;
pub mod launcher;
mod presets;

pub use error::{LaunchError, Result};
pub use launcher::Launcher;
