use rocket::{serde::json::Json, Route, State};

use crate::{
    config::Config, error::Result, model::api::results::ResultsView, model::storage::SharedStore,
};

pub fn routes() -> Vec<Route> {
    routes![results]
}

#[get("/results")]
pub fn results(store: &State<SharedStore>, config: &State<Config>) -> Result<Json<ResultsView>> {
    store
        .election(config.rules(), |election| election.results())
        .map(Json)
}
