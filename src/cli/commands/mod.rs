pub mod content;
pub mod fingerprint;
