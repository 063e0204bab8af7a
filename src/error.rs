use thiserror::Error;

#[derive(Debug, Error)]
pub enum FieldError {
    #[error("particle field configured with zero particles")]
    EmptyField,
}
