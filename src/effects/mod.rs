pub mod aurora;
pub mod chroma_key;
