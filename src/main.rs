use log::{error, info, LevelFilter};
use rocket::Error as RocketError;
use thiserror::Error;

use civic_vote::config::Config;

/// Failures that stop the server from coming up at all.
#[derive(Debug, Error)]
enum Error {
    #[error(transparent)]
    Launch(#[from] RocketError),
}

async fn serve() -> Result<(), Error> {
    info!("Preparing election server...");
    let rocket = civic_vote::build().ignite().await?;
    if let Some(config) = rocket.state::<Config>() {
        info!(
            "Election rules: seed default candidates = {}, block voted login = {}",
            config.seed_default_candidates(),
            config.block_voted_login()
        );
    }
    info!(
        "Listening on http://{}:{}",
        rocket.config().address,
        rocket.config().port
    );
    // Our fairing reports requests from here on.
    log4rs_dynamic_filters::DynamicLevelFilter::set("rocket", LevelFilter::Off);
    let _ = rocket.launch().await?;
    Ok(())
}

#[rocket::main]
async fn main() {
    log4rs::init_file("log4rs.yaml", log4rs_dynamic_filters::default_deserializers())
        .expect("Failed to initialise logging");

    if let Err(err) = serve().await {
        error!("{err}");
        error!("Election server failed to start");
        std::process::exit(1)
    }
}
