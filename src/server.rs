use crate::actors::{query_cache, QueryCacheMessage, QueryState};
use crate::components::{Page, StatsView, UserForm};
use crate::health;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use ractor::ActorRef;
use serde::Deserialize;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

/// Root of the widget: the current username plus the shared query cache
#[derive(Clone)]
pub struct AppState {
    current_user: Arc<RwLock<String>>,
    pub cache: ActorRef<QueryCacheMessage>,
    pub stats_view: Arc<StatsView>,
    pub refresh: Duration,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(
        default_user: impl Into<String>,
        cache: ActorRef<QueryCacheMessage>,
        stats_view: StatsView,
        refresh: Duration,
    ) -> Self {
        Self {
            current_user: Arc::new(RwLock::new(default_user.into())),
            cache,
            stats_view: Arc::new(stats_view),
            refresh,
            start_time: Instant::now(),
        }
    }

    pub fn current_user(&self) -> String {
        match self.current_user.read() {
            Ok(user) => user.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn set_current_user(&self, user: String) {
        info!(user = %user, "Current user changed");

        match self.current_user.write() {
            Ok(mut current) => *current = user,
            Err(poisoned) => *poisoned.into_inner() = user,
        }
    }

    fn render_page(&self, user: &str, state: &QueryState) -> String {
        Page {
            user,
            state,
            stats_view: &self.stats_view,
            refresh: self.refresh,
        }
        .render()
    }
}

/// Body of the search form
#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub user: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index).post(search))
        .merge(health::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the router until `shutdown` resolves
pub async fn serve<F>(state: AppState, bind: &str, shutdown: F) -> crate::error::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("Widget listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}

async fn index(State(state): State<AppState>) -> Response {
    let user = state.current_user();

    match query_cache::observe(&state.cache, &user).await {
        Ok(query_state) => Html(state.render_page(&user, &query_state)).into_response(),
        Err(e) => {
            error!(user = %user, error = %e, "Query cache unavailable");
            let page = state.render_page(&user, &QueryState::Error(e.to_string()));
            (StatusCode::SERVICE_UNAVAILABLE, Html(page)).into_response()
        }
    }
}

async fn search(State(state): State<AppState>, Form(input): Form<SearchForm>) -> Response {
    let mut form = UserForm::new(state.current_user());
    form.set_value(input.user);

    if let Err(e) = form.submit(|user| state.set_current_user(user)) {
        warn!(error = %e, "Rejected search");
        let user = state.current_user();
        let query_state = query_cache::query_state(&state.cache, &user)
            .await
            .unwrap_or_else(|e| QueryState::Error(e.to_string()));

        return (StatusCode::BAD_REQUEST, Html(state.render_page(&user, &query_state)))
            .into_response();
    }

    Redirect::to("/").into_response()
}
