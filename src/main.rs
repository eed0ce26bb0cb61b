use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use club_feed::config::{Settings, StoreBackend};
use club_feed::core::{ContentFilter, RecommendationEngine, RecommendationWeights, RegistrationPolicy, TagVocabulary};
use club_feed::error::{handle_json_payload_error, handle_query_payload_error};
use club_feed::middleware::request_id_middleware;
use club_feed::routes::{self, AppState};
use club_feed::services::{
    AppwriteStore, CacheManager, Catalog, DocumentStore, MemoryStore, SeedData, StoreCollections, TokenVerifier,
};

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        EnvFilter::new(level)
    });
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }
}

fn config_error(message: String) -> std::io::Error {
    error!("{}", message);
    std::io::Error::new(std::io::ErrorKind::InvalidInput, message)
}

fn build_store(settings: &Settings) -> std::io::Result<Arc<dyn DocumentStore>> {
    match settings.store.backend {
        StoreBackend::Appwrite => {
            let collections = StoreCollections {
                clubs: settings.collection.clubs.clone(),
                events: settings.collection.events.clone(),
                users: settings.collection.users.clone(),
            };

            let store = AppwriteStore::new(
                settings.store.endpoint.clone(),
                settings.store.api_key.clone(),
                settings.store.project_id.clone(),
                settings.store.database_id.clone(),
                collections,
                Duration::from_secs(settings.store.timeout_secs),
            )
            .map_err(|e| config_error(format!("Failed to build Appwrite client: {}", e)))?
            .with_page_size(settings.store.page_size);

            info!("Appwrite store initialized ({})", settings.store.endpoint);
            Ok(Arc::new(store))
        }
        StoreBackend::Memory => {
            let store = match &settings.store.seed_path {
                Some(path) => MemoryStore::from_seed_file(path)
                    .map_err(|e| config_error(format!("Failed to seed memory store: {}", e)))?,
                None => {
                    warn!("Memory store started without seed data");
                    MemoryStore::new(SeedData::default())
                }
            };

            info!("Memory store initialized");
            Ok(Arc::new(store))
        }
    }
}

fn build_verifier(settings: &Settings) -> std::io::Result<TokenVerifier> {
    let auth = &settings.auth;
    let mut verifier = match (&auth.public_key_pem, &auth.jwt_secret) {
        (Some(pem), _) => TokenVerifier::rs256(pem)
            .map_err(|e| config_error(format!("Invalid auth public key: {}", e)))?,
        (None, Some(secret)) => TokenVerifier::hs256(secret),
        (None, None) => {
            return Err(config_error(
                "Either auth.jwt_secret (JWT_SECRET) or auth.public_key_pem must be set".to_string(),
            ))
        }
    };

    if let Some(issuer) = &auth.issuer {
        verifier = verifier.with_issuer(issuer);
    }
    if let Some(audience) = &auth.audience {
        verifier = verifier.with_audience(audience);
    }

    Ok(verifier)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    init_logging();

    info!("Starting Club Feed service...");

    let settings = Settings::load().map_err(|e| config_error(format!("Failed to load configuration: {}", e)))?;

    info!("Configuration loaded successfully");

    let store = build_store(&settings)?;

    // Cache: Redis is optional, the in-process tier always exists
    let cache_ttl = settings.cache.ttl_secs.unwrap_or(60);
    let l1_cache_size = settings.cache.l1_cache_size.unwrap_or(100);

    let cache = match CacheManager::new(settings.cache.redis_url.as_deref(), l1_cache_size, cache_ttl).await {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to connect to Redis ({}), using the in-process cache only", e);
            CacheManager::in_memory(l1_cache_size, cache_ttl)
        }
    };

    info!(
        "Cache manager initialized (L1: {} entries, TTL: {}s, Redis: {})",
        l1_cache_size,
        cache_ttl,
        cache.has_redis()
    );

    let weights = RecommendationWeights {
        tag_overlap: settings.recommendation.weights.tag_overlap,
        popularity: settings.recommendation.weights.popularity,
    };

    let engine = RecommendationEngine::new(
        weights,
        TagVocabulary::new(&settings.vocabulary.tags),
        ContentFilter::new(&settings.moderation.blocked_terms),
    );

    info!(
        "Recommendation engine initialized with weights: {:?}, {} tags",
        weights,
        engine.vocabulary().len()
    );

    let app_state = AppState {
        catalog: Catalog::new(store, Arc::new(cache)),
        engine,
        verifier: Arc::new(build_verifier(&settings)?),
        registration: Arc::new(RegistrationPolicy::new(
            settings.registration.student_email_domain.clone(),
            &settings.registration.approved_club_emails,
        )),
        default_limit: settings.recommendation.default_limit,
        max_limit: settings.recommendation.max_limit,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .wrap(middleware::from_fn(request_id_middleware))
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
