//! Application layer (UseCase - entry point)

pub mod query_usecase;

pub use query_usecase::{NestedQueryUseCase, NestedQueryUseCaseImpl};
