//! SeaORM adapters - thin DB access functions generic over `ConnectionTrait`.
//!
//! Adapter functions return `DbErr`; the repos layer maps to `DomainError`.

pub mod activity_sea;
pub mod league_members_sea;
pub mod leagues_sea;
pub mod pod_players_sea;
pub mod pods_sea;
pub mod roles_sea;
pub mod users_sea;
pub mod win_conditions_sea;
