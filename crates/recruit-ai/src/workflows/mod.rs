pub mod jobs;
pub mod screening;
