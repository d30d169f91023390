use rocket::{serde::json::Json, Route, State};

use crate::{
    config::Config,
    error::Result,
    model::{
        api::admin::{CandidateSpec, ResetRequest},
        common::CandidateId,
        db::Candidate,
        storage::SharedStore,
    },
};

pub fn routes() -> Vec<Route> {
    routes![add_candidate, remove_candidate, reset_election]
}

#[post("/admin/candidates", data = "<spec>", format = "json")]
pub fn add_candidate(
    spec: Json<CandidateSpec>,
    store: &State<SharedStore>,
    config: &State<Config>,
) -> Result<Json<Candidate>> {
    store
        .election(config.rules(), |election| {
            election.add_candidate(spec.into_inner())
        })
        .map(Json)
}

#[delete("/admin/candidates/<candidate_id>")]
pub fn remove_candidate(
    candidate_id: CandidateId,
    store: &State<SharedStore>,
    config: &State<Config>,
) -> Result<()> {
    store
        .election(config.rules(), |election| {
            election.remove_candidate(&candidate_id)
        })
        .map(|_| ())
}

#[post("/admin/reset", data = "<request>", format = "json")]
pub fn reset_election(
    request: Json<ResetRequest>,
    store: &State<SharedStore>,
    config: &State<Config>,
) -> Result<()> {
    store.election(config.rules(), |election| {
        election.reset_election(request.confirm)
    })
}
