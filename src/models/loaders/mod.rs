pub mod toml_loader;

pub use toml_loader::{load_all_banks, load_toml_to_batch};
