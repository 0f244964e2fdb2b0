//! Build configuration shared across the staging components.
//!
//! Configuration is an explicit immutable value passed into each
//! component; a component that needs a different policy for one call
//! copies the value instead of mutating shared state.

use std::env;

/// Configuration consumed by the staging components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    /// Include every listed source file during package resolution,
    /// bypassing the resolver's default file-filtering heuristics.
    pub use_all_files: bool,
    /// The C compiler executable consulted for toolchain discovery.
    pub cc: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            use_all_files: false,
            cc: "gcc".to_string(),
        }
    }
}

impl BuildConfig {
    /// Load configuration from environment variables.
    ///
    /// `CC` overrides the compiler executable when set and non-empty;
    /// everything else keeps its default.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(cc) = env::var("CC") {
            if !cc.is_empty() {
                config.cc = cc;
            }
        }
        config
    }

    /// Return a copy with `use_all_files` replaced.
    pub fn with_use_all_files(mut self, use_all_files: bool) -> Self {
        self.use_all_files = use_all_files;
        self
    }
}
