pub mod current_user;
pub mod pod_id;
