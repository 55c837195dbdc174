use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid scope name: {0:?}")]
    InvalidScope(String),

    #[error("invalid schema reference: {0:?}")]
    InvalidSchemaRef(String),

    #[error("mapping specification must be a JSON object")]
    SpecNotObject,

    #[error("scope '{scope}' in mapping specification must be a JSON object")]
    ScopeNotObject { scope: String },

    #[error("rule '{target}' in scope '{scope}' must name a source attribute as a string")]
    RuleNotString { scope: String, target: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
