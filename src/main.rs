use scrawl::app::{build_server, AppState};
use scrawl::config::Config;
use scrawl::{db, error, log};

#[tokio::main]
async fn main() {
    let config = Config::load_default();

    let db = match db::connect(&config.database.url).await {
        Ok(db) => db,
        Err(e) => {
            error!("[db] connection failed: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = db::init_schema(&db).await {
        error!("[db] schema init failed: {}", e);
        std::process::exit(1);
    }
    log!("[db] connected to {}", config.database.url);

    let state = AppState {
        db,
        auth: config.auth.clone(),
    };

    let addr = config.bind_address();
    log!("Server running on http://{}", addr);

    if let Err(e) = build_server(state).listen(&addr).await {
        error!("[server] {}", e);
        std::process::exit(1);
    }
}
