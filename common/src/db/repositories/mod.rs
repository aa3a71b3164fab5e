// Repository layer for database operations

pub mod job;
pub mod queries;

pub use job::JobRepository;
