#[macro_use]
extern crate rocket;

#[macro_use]
extern crate log;

#[cfg(test)]
#[macro_use]
extern crate backend_test;

use rocket::{Build, Rocket};

use crate::config::{ConfigFairing, StoreFairing};
use crate::logging::LoggerFairing;
use crate::model::storage::{KeyValueStore, SharedStore};

pub mod api;
pub mod config;
pub mod election;
pub mod error;
pub mod logging;
pub mod model;

/// Build the server, opening whichever store is configured.
pub fn build() -> Rocket<Build> {
    rocket::build()
        .mount("/", api::routes())
        .attach(LoggerFairing)
        .attach(ConfigFairing)
        .attach(StoreFairing)
}

/// Build the server over an already-open store.
pub fn rocket_for_store(store: impl KeyValueStore + Send + 'static) -> Rocket<Build> {
    rocket::build()
        .mount("/", api::routes())
        .attach(LoggerFairing)
        .attach(ConfigFairing)
        .manage(SharedStore::new(store))
}
