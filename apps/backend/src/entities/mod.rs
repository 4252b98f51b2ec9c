pub mod activity_log;
pub mod league_members;
pub mod leagues;
pub mod pod_players;
pub mod pods;
pub mod role_grants;
pub mod role_inherits;
pub mod roles;
pub mod user_roles;
pub mod users;
pub mod win_conditions;
