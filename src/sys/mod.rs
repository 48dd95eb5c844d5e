pub mod remote;
pub mod runtime;
pub mod server;
