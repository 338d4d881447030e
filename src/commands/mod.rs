//! One module per resource kind; each exposes its `clap::Args` structs and
//! the create/list/delete entry points.

pub mod api;
pub mod apikey;
pub mod app;
pub mod login;
pub mod org;
pub mod proxy;
pub mod user;
