//! campus-gateway: data access for a campus social app (feed, course exchange,
//! course teaming) over a hosted relational backend, with Hexagonal Architecture.

pub mod adapters;
pub mod domain;
pub mod mapper;
pub mod ports;
pub mod shared;
pub mod usecases;
