//! Tab error types

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TabError {
    #[error("Invalid tab request: {0} is required")]
    MissingField(&'static str),
}
