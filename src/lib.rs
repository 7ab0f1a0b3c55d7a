//! custview - browse a customers table.
//!
//! The data service ([`server`]) returns every customer over http. The table
//! view ([`model`], [`ui`], [`controller`]) fetches them once and searches,
//! sorts and pages them locally.

pub mod controller;
pub mod domain;
pub mod fetch;
pub mod highlight;
pub mod inputter;
pub mod model;
pub mod record;
pub mod server;
pub mod ui;
