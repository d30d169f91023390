use rocket::{serde::json::Json, Route, State};

use crate::{
    config::Config,
    error::Result,
    model::{
        api::ballot::{BallotView, VoteRequest},
        storage::SharedStore,
    },
};

pub fn routes() -> Vec<Route> {
    routes![ballot, vote]
}

#[get("/voter/ballot")]
pub fn ballot(store: &State<SharedStore>, config: &State<Config>) -> Result<Json<BallotView>> {
    store
        .election(config.rules(), |election| election.ballot())
        .map(Json)
}

#[post("/voter/vote", data = "<request>", format = "json")]
pub fn vote(
    request: Json<VoteRequest>,
    store: &State<SharedStore>,
    config: &State<Config>,
) -> Result<()> {
    store.election(config.rules(), |election| {
        election.cast_vote(&request.candidate_id)
    })
}
