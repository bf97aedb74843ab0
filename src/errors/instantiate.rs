/// Error returned by a user factory.
///
/// Any [`anyhow::Error`] converts into it, so factories can use `?` on their own fallible calls
/// after wrapping them with [`anyhow::Context`] or [`anyhow::anyhow!`].
#[derive(thiserror::Error, Debug)]
pub enum InstantiateErrorKind {
    #[error(transparent)]
    Custom(#[from] anyhow::Error),
}
