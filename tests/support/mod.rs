pub mod fixture;
pub mod iris_env;
pub mod server;
