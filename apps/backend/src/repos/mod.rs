//! Repository layer: domain structs + free functions over the adapters.
//!
//! Functions are generic over `ConnectionTrait` so they run against either
//! the pooled connection or an open transaction, and they map `DbErr` into
//! `DomainError`.

pub mod activity;
pub mod league_members;
pub mod leagues;
pub mod pod_players;
pub mod pods;
pub mod roles;
pub mod users;
pub mod win_conditions;
