mod update;

pub use update::{UpdateArgs, update};
