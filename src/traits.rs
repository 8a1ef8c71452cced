//! Shared trait bounds used across the crate.

/// Types that can flow through samplers and evaluation contexts.
///
/// Samplers are `Arc<dyn Fn() -> T + Send + Sync>` closures and drawn values
/// are memoized in a type-erased per-draw context, so every sample type must
/// be cloneable, thread-safe, and free of borrowed data. Implemented for
/// every type that meets the bounds.
pub trait Samplable: Clone + Send + Sync + 'static {}

impl<T> Samplable for T where T: Clone + Send + Sync + 'static {}
