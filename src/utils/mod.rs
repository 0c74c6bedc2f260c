//! Utility modules for paperlint

pub mod timing;
