//! Extensions

mod depot;
mod pagination;

pub(crate) use depot::DepotExt;
pub(crate) use pagination::page_param;
