pub mod credential;
pub mod envelope;
