pub mod analyzers;
pub mod city;
pub mod error;
pub mod filter;
pub mod loader;
pub mod output;
pub mod session;
pub mod trip;
