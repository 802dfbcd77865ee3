//! Services wrapping remote procedures with the client's failure policy.

pub mod ztoken;
