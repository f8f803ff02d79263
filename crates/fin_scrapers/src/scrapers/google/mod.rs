pub mod decoder;
pub mod search;

pub use decoder::GoogleNewsDecoder;
pub use search::GoogleNewsSearch;
