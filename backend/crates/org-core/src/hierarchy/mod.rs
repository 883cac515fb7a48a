//! Department reporting hierarchies: canonical map, structural queries,
//! cycle validation, read-side resolution and the store-facing service.

pub mod directory_store;
pub mod graph;
pub mod hierarchy_entry_dto;
pub mod hierarchy_map;
pub mod membership_delta;
pub mod resolver;
pub mod service;
pub mod validator;
pub mod views;
