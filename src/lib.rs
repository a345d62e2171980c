pub mod controller;
pub mod engine;
pub mod events;
pub mod output;
pub mod session;
pub mod sink;
