pub mod loaders;
pub mod question;

pub use loaders::{load_all_banks, load_toml_to_batch};
pub use question::{Difficulty, DiagramSpec, QuestionBatch, QuestionRecord, ShapeKind};
