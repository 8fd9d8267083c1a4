pub(crate) mod common;
mod catalog_api;
