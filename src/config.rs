use std::path::PathBuf;

use rocket::{
    fairing::{Fairing, Info, Kind},
    Build, Rocket,
};
use serde::Deserialize;

use crate::election::ElectionRules;
use crate::model::storage::{FileStore, MemoryStore, SharedStore};

fn enabled() -> bool {
    true
}

/// Application configuration, derived from `Rocket.toml` and `ROCKET_*`
/// environment variables. This struct becomes managed state and can be
/// inspected by any endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "enabled")]
    seed_default_candidates: bool,
    #[serde(default = "enabled")]
    block_voted_login: bool,
}

impl Config {
    /// Whether an empty ballot gets the default candidates.
    pub fn seed_default_candidates(&self) -> bool {
        self.seed_default_candidates
    }

    /// Whether voters who have voted are refused sign-in.
    pub fn block_voted_login(&self) -> bool {
        self.block_voted_login
    }

    /// The election rules these settings describe.
    pub fn rules(&self) -> ElectionRules {
        ElectionRules {
            seed_default_candidates: self.seed_default_candidates,
            block_voted_login: self.block_voted_login,
        }
    }
}

/// A fairing that loads the application config and puts it in managed state.
pub struct ConfigFairing;

#[rocket::async_trait]
impl Fairing for ConfigFairing {
    fn info(&self) -> Info {
        Info {
            name: "Config",
            kind: Kind::Ignite,
        }
    }

    async fn on_ignite(&self, mut rocket: Rocket<Build>) -> rocket::fairing::Result {
        let config = match rocket.figment().extract::<Config>() {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load application config");
                rocket::config::pretty_print_error(e);
                return Err(rocket);
            }
        };
        debug!("Loaded config: {config:?}");

        rocket = rocket.manage(config);
        Ok(rocket)
    }
}

/// Configuration for the store.
#[derive(Deserialize)]
struct StoreConfig {
    /// Where to persist state. Without it, state lives only as long as the process.
    #[serde(default)]
    store_path: Option<PathBuf>,
}

/// A fairing that loads the store config, opens the store, and places it
/// into managed state.
pub struct StoreFairing;

#[rocket::async_trait]
impl Fairing for StoreFairing {
    fn info(&self) -> Info {
        Info {
            name: "Store",
            kind: Kind::Ignite,
        }
    }

    async fn on_ignite(&self, mut rocket: Rocket<Build>) -> rocket::fairing::Result {
        let config = match rocket.figment().extract::<StoreConfig>() {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load store config");
                rocket::config::pretty_print_error(e);
                return Err(rocket);
            }
        };

        let store = match config.store_path {
            Some(path) => match FileStore::open(&path) {
                Ok(store) => {
                    info!("Using file store at {}", path.display());
                    SharedStore::new(store)
                }
                Err(e) => {
                    error!("Failed to open store at {}: {e}", path.display());
                    return Err(rocket);
                }
            },
            None => {
                warn!("No `store_path` configured, state will not outlive the server");
                SharedStore::new(MemoryStore::new())
            }
        };

        rocket = rocket.manage(store);
        Ok(rocket)
    }
}
