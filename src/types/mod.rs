mod monetary;

pub use monetary::Tinybars;
