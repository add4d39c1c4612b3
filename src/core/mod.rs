pub mod engine;
pub mod provider;
pub mod resolver;
pub mod types;
pub mod wordlist;
