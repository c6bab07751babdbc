//! Profiling support via Tracy.
//!
//! Enabled with the `profiling` Cargo feature:
//!
//! ```toml
//! [dependencies]
//! redlilium-mesh = { version = "0.1", features = ["profiling"] }
//! ```
//!
//! The converting accessors on [`MeshData`](crate::mesh::MeshData) and the
//! shape generators are instrumented with the macros below. With the feature
//! disabled (the default) every macro expands to nothing.
//!
//! ```ignore
//! use redlilium_mesh::profiling::{profile_function, profile_scope};
//!
//! fn convert() {
//!     profile_function!();
//!     {
//!         profile_scope!("widen_indices");
//!         // ...
//!     }
//! }
//! ```

#[cfg(feature = "profiling")]
pub use tracy_client::{self, Client, span};

/// Create a profiling span for the current scope.
///
/// The span ends when the scope exits.
#[macro_export]
#[cfg(feature = "profiling")]
macro_rules! profile_scope {
    ($name:expr) => {
        let _profile_span = $crate::profiling::span!($name);
    };
}

/// Create a profiling span (no-op when profiling disabled).
#[macro_export]
#[cfg(not(feature = "profiling"))]
macro_rules! profile_scope {
    ($name:expr) => {};
}

/// Create a profiling span covering the enclosing function.
#[macro_export]
#[cfg(feature = "profiling")]
macro_rules! profile_function {
    () => {
        let _profile_span = $crate::profiling::span!();
    };
}

/// Create a profiling span for a function (no-op when profiling disabled).
#[macro_export]
#[cfg(not(feature = "profiling"))]
macro_rules! profile_function {
    () => {};
}

pub use profile_function;
pub use profile_scope;
