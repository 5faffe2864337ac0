//! Pure Rust async monitor for game servers speaking the [Source A2S_INFO Query Protocol](https://developer.valvesoftware.com/wiki/Server_queries#A2S_INFO)
pub mod config;
pub mod endpoint;
pub mod error;
pub mod info;
pub mod packet;
pub mod poll;
pub mod query;
pub mod transport;
mod parse;
