use crate::entities::pods::PodOutcome;

/// Payload for inserting a new pod.
#[derive(Debug, Clone)]
pub struct PodCreate {
    pub league_id: i64,
    pub created_by: Option<i64>,
}

/// Payload for recording a result declaration on a pod.
#[derive(Debug, Clone)]
pub struct PodDeclaration {
    pub id: i64,
    pub outcome: PodOutcome,
    pub win_condition_id: Option<i64>,
}
