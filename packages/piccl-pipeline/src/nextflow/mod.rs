mod command;
mod executor;

pub use executor::NextflowExecutor;
