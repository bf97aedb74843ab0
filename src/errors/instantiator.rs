#[derive(thiserror::Error, Debug)]
pub enum InstantiatorErrorKind<DepsErr, FactoryErr> {
    #[error("Failed to convert factory arguments: {0}")]
    Deps(DepsErr),
    #[error("Factory failed: {0}")]
    Factory(FactoryErr),
}
