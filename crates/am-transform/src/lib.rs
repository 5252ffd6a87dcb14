pub mod detect;
pub mod identifier;
pub mod map;
pub mod methods;
pub mod pipeline;
pub mod units;

pub use detect::detect_layout;
pub use identifier::{CANONICAL_PREFIX, NormalizedId, normalize_sample_id};
pub use pipeline::{Conversion, convert_table};
