//! Data source implementations

pub mod example;

pub use example::ExampleDataSource;
