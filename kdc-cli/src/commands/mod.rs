pub mod distribute;
pub mod sign;
