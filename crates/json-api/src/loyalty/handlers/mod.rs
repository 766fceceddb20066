//! Loyalty Handlers

pub(crate) mod summary;
