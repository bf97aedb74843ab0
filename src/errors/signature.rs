use alloc::string::String;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum SignatureErrorKind {
    #[error("Parameter list not found in factory signature `{signature}`")]
    NoParameterList { signature: String },
    #[error("Unbalanced delimiters in parameter list of factory signature `{signature}`")]
    Unbalanced { signature: String },
    #[error("Parameter pattern `{pattern}` doesn't bind a single name, list dependency names explicitly")]
    UnsupportedPattern { pattern: String },
    #[error("Factory takes {expected} arguments, but {actual} dependency names were declared")]
    ArityMismatch { expected: usize, actual: usize },
}
