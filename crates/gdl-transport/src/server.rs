use crate::message::{self, Request};
use actix_cors::Cors;
use actix_web::{http::header, middleware::Logger, web, App, HttpResponse, HttpServer, Responder};
use gdl_session::{GdlError, Registry};
use std::path::PathBuf;

/// Ambient per-deployment settings that don't belong on the wire protocol:
/// the name reported in INFO replies, and where to dump the final match
/// tree as a DOT file at STOP/ABORT (CLI `--graphviz`).
pub struct PlayerConfig {
    pub name: String,
    pub graphviz_path: Option<PathBuf>,
}

async fn health() -> impl Responder {
    HttpResponse::Ok().body("ok")
}

async fn root(
    body: web::Bytes,
    registry: web::Data<Registry>,
    config: web::Data<PlayerConfig>,
) -> impl Responder {
    let text = match std::str::from_utf8(&body) {
        Ok(s) => s,
        Err(_) => return text_response(400, "malformed utf-8"),
    };
    let request = match message::parse_request(text) {
        Ok(r) => r,
        Err(GdlError::UnknownVerb(v)) => {
            log::warn!("unknown verb on the wire: {}", v);
            return text_response(400, "unknown verb");
        }
        Err(e) => {
            log::warn!("parse error: {}", e);
            return text_response(400, "parse error");
        }
    };

    match handle(request, &registry, &config).await {
        Ok(body) => text_response(200, &body),
        Err(e) => {
            log::warn!("request handling failed: {}", e);
            text_response(500, &e.to_string())
        }
    }
}

async fn handle(
    request: Request,
    registry: &Registry,
    config: &PlayerConfig,
) -> Result<String, GdlError> {
    match request {
        Request::Info => Ok(message::encode_info(&config.name)),
        Request::Start {
            match_id,
            role,
            rules,
            start_clock_secs,
            play_clock_secs,
        } => {
            let session = registry.get_or_create(&match_id).await;
            let mut session = session.lock().await;
            let mut rng = rand::rng();
            let rules = gdl_core::RuleDatabase::build(rules);
            session.start(role, rules, start_clock_secs, play_clock_secs, &mut rng)?;
            Ok(message::encode_ready())
        }
        Request::Play { match_id, moves } => {
            let session = registry.get_or_create(&match_id).await;
            let mut session = session.lock().await;
            let mut rng = rand::rng();
            let action = session.play(moves, &mut rng)?;
            Ok(message::encode_action(&action))
        }
        Request::Stop { match_id, .. } => {
            finish(registry, config, &match_id).await;
            Ok(message::encode_done())
        }
        Request::Abort { match_id } => {
            finish(registry, config, &match_id).await;
            Ok(message::encode_done())
        }
    }
}

async fn finish(registry: &Registry, config: &PlayerConfig, match_id: &str) {
    let Some(session) = registry.remove(match_id).await else {
        return;
    };
    let Some(tree) = session.lock().await.stop() else {
        return;
    };
    let Some(path) = &config.graphviz_path else {
        return;
    };
    if let Err(e) = tokio::fs::write(path, tree.to_dot()).await {
        log::warn!("failed to write graphviz dump to {}: {}", path.display(), e);
    }
}

fn text_response(status: u16, body: &str) -> HttpResponse {
    HttpResponse::build(actix_web::http::StatusCode::from_u16(status).unwrap())
        .content_type("text/acl")
        .body(body.to_string())
}

/// Binds and serves the actix-web app: a single `POST /` route, permissive
/// CORS, and an ambient `GET /health`. Returns once the server shuts down
/// (SIGINT or bind failure).
pub async fn run(hostname: &str, port: u16, config: PlayerConfig) -> std::io::Result<()> {
    let registry = web::Data::new(Registry::new());
    let config = web::Data::new(config);
    log::info!("starting ggp-player on {}:{}", hostname, port);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::new("%r %s %Ts"))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allowed_methods(vec!["POST", "GET", "OPTIONS"])
                    .allowed_header(header::CONTENT_TYPE)
                    .max_age(86400),
            )
            .app_data(registry.clone())
            .app_data(config.clone())
            .route("/", web::post().to(root))
            .route("/health", web::get().to(health))
    })
    .bind((hostname, port))?
    .run()
    .await
}
