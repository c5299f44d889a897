//! FinSight Index: exact cosine nearest-neighbor lookup over chunk
//! embeddings.

pub mod index;

pub use index::{SearchHit, VectorIndex};
