pub mod graphql;
pub mod retry;
pub mod upstream;
