pub mod routes;
pub mod valve;
