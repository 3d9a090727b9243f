//! Platform registry: the declarative catalog of detectable platforms.
//!
//! Every platform declares the patterns that count as evidence for it in each of the
//! four signal categories (framework files, dependencies, build configs, environment).
//! The catalog is data, not code: new platforms are added by editing the registry
//! document, and the registry is immutable once loaded so concurrent detection runs can
//! share a single instance without synchronization.
//!
//! # Example
//!
//! ```
//! use stackprobe::stack::{PlatformRegistry, SignalCategory};
//!
//! let registry = PlatformRegistry::with_defaults();
//! let first = registry.all_platforms()[0].clone();
//! let patterns = registry
//!     .patterns_for(&first, SignalCategory::Dependency)
//!     .expect("platform is registered");
//! assert!(!patterns.is_empty());
//! ```

pub mod category;
pub mod platform;
pub mod registry;
pub mod version;

pub use category::SignalCategory;
pub use platform::{
    BuildConfigPattern, DependencyPattern, Ecosystem, EnvPattern, FilePattern, MarkerRule,
    PlatformDefinition, PlatformId,
};
pub use registry::{Normalization, PatternSet, PlatformRegistry, DEFAULT_REGISTRY};
pub use version::Version;
