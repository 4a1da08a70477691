pub mod candidate;
pub mod vendor;
