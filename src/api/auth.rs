use rocket::{serde::json::Json, Route, State};

use crate::{
    config::Config,
    error::{Error, Result},
    model::{
        api::auth::{LoginRequest, SignupRequest},
        db::Session,
        storage::SharedStore,
    },
};

pub fn routes() -> Vec<Route> {
    routes![signup, login, current_session, logout]
}

#[post("/auth/signup", data = "<request>", format = "json")]
pub fn signup(
    request: Json<SignupRequest>,
    store: &State<SharedStore>,
    config: &State<Config>,
) -> Result<Json<Session>> {
    store
        .election(config.rules(), |election| {
            election.signup(request.into_inner())
        })
        .map(Json)
}

#[post("/auth/login", data = "<request>", format = "json")]
pub fn login(
    request: Json<LoginRequest>,
    store: &State<SharedStore>,
    config: &State<Config>,
) -> Result<Json<Session>> {
    store
        .election(config.rules(), |election| election.login(request.into_inner()))
        .map(Json)
}

#[get("/auth/session")]
pub fn current_session(store: &State<SharedStore>, config: &State<Config>) -> Result<Json<Session>> {
    store
        .election(config.rules(), |election| election.current_session())?
        .map(Json)
        .ok_or_else(|| Error::not_found("No active session"))
}

#[delete("/auth")]
pub fn logout(store: &State<SharedStore>, config: &State<Config>) -> Result<()> {
    store.election(config.rules(), |election| election.logout())
}
