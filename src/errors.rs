mod dependency_resolver;
mod instantiate;
mod instantiator;
mod signature;

pub use dependency_resolver::ResolveErrorKind;
pub use instantiate::InstantiateErrorKind;
pub use instantiator::InstantiatorErrorKind;
pub use signature::SignatureErrorKind;

/// Result type returned by factories.
pub type InstantiatorResult<T> = Result<T, InstantiateErrorKind>;
