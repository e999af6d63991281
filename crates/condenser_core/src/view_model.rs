use crate::state::{JobHandle, OperationOutcome};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub url_input: String,
    pub selected_filename: Option<String>,
    pub outcome: OperationOutcome,
    pub active_job: Option<JobHandle>,
    pub polls_observed: u32,
    pub in_flight: bool,
    pub dirty: bool,
}
