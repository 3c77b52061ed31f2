/// Labels, ordered catalogs and collapse weights
pub mod catalog;
/// Derivation of rotated rule entries from oriented samples
pub mod rotation;
/// Rule extraction from sample images
pub mod sample;
/// Adjacency rule tables
pub mod table;
