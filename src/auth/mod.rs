pub mod access_token;
pub mod routes;
pub mod token;
pub mod token_issuing;
pub mod user;
