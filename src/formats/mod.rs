pub mod sniff;

pub use sniff::classify;
