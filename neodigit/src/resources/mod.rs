//! Resource implementations

pub mod example;

pub use example::ExampleResource;
