use crate::error::{RepoStatsError, Result};
use crate::github::GitHubClient;
use crate::types::Repository;
use chrono::{DateTime, Utc};
use ractor::{
    concurrency::JoinHandle,
    rpc::CallResult,
    Actor, ActorProcessingErr, ActorRef, RpcReplyPort, SpawnErr,
};
use serde::Serialize;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

const CALL_TIMEOUT: Duration = Duration::from_secs(5);

/// Tunables for the cache, mirroring the usual client-side query cache knobs
#[derive(Debug, Clone)]
pub struct QueryCacheConfig {
    /// How long a settled result is served before the next fetch refreshes it
    pub stale_time: Duration,
    /// How long an entry nobody reads is kept around
    pub cache_time: Duration,
    /// How often unread entries are swept
    pub gc_interval: Duration,
}

impl Default for QueryCacheConfig {
    fn default() -> Self {
        Self {
            stale_time: Duration::ZERO,
            cache_time: Duration::from_secs(300),
            gc_interval: Duration::from_secs(60),
        }
    }
}

/// What the cache knows about one username
#[derive(Debug, Clone, PartialEq)]
pub enum QueryState {
    Idle,
    Loading,
    Error(String),
    Success {
        repositories: Vec<Repository>,
        fetched_at: DateTime<Utc>,
    },
}

impl QueryState {
    /// No settled result yet
    pub fn is_pending(&self) -> bool {
        matches!(self, QueryState::Idle | QueryState::Loading)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct QueryCacheStats {
    pub entries: usize,
    pub in_flight: usize,
    pub fetches_issued: u64,
}

#[derive(Debug)]
pub enum QueryCacheMessage {
    /// Load the repositories of a user unless a fresh result or a fetch in flight exists
    Fetch(String),
    /// Outcome of a fetch task
    Resolved {
        user: String,
        result: Result<Vec<Repository>>,
    },
    GetState(String, RpcReplyPort<QueryState>),
    /// `Fetch` followed by `GetState`, in one turn of the mailbox
    Observe(String, RpcReplyPort<QueryState>),
    GetStats(RpcReplyPort<QueryCacheStats>),
    /// Drop entries nobody has read for `cache_time`
    CollectGarbage,
}

#[derive(Debug)]
struct CacheEntry {
    state: QueryState,
    in_flight: bool,
    settled_at: Option<Instant>,
    last_accessed: Instant,
}

impl CacheEntry {
    fn new() -> Self {
        Self {
            state: QueryState::Idle,
            in_flight: false,
            settled_at: None,
            last_accessed: Instant::now(),
        }
    }

    fn is_stale(&self, stale_time: Duration) -> bool {
        self.settled_at
            .map_or(true, |settled| settled.elapsed() >= stale_time)
    }
}

/// Owns every fetch result, keyed by username
pub struct QueryCache;

pub struct QueryCacheArgs {
    pub client: GitHubClient,
    pub config: QueryCacheConfig,
}

pub struct QueryCacheState {
    client: GitHubClient,
    config: QueryCacheConfig,
    entries: HashMap<String, CacheEntry>,
    fetches_issued: u64,
    gc_handle: Option<JoinHandle<()>>,
}

impl QueryCache {
    pub async fn spawn(
        client: GitHubClient,
        config: QueryCacheConfig,
    ) -> std::result::Result<ActorRef<QueryCacheMessage>, SpawnErr> {
        let (actor_ref, _handle) =
            Actor::spawn(None, QueryCache, QueryCacheArgs { client, config }).await?;

        info!("Query cache started");
        Ok(actor_ref)
    }

    fn start_fetch(myself: &ActorRef<QueryCacheMessage>, client: GitHubClient, user: String) {
        let myself = myself.clone();

        tokio::spawn(async move {
            let result = client.list_user_repos(&user).await;
            if let Err(e) = myself.send_message(QueryCacheMessage::Resolved { user, result }) {
                error!("Failed to deliver fetch result to query cache: {}", e);
            }
        });
    }

    fn handle_fetch(
        myself: &ActorRef<QueryCacheMessage>,
        state: &mut QueryCacheState,
        user: String,
    ) {
        let entry = state
            .entries
            .entry(user.clone())
            .or_insert_with(CacheEntry::new);
        entry.last_accessed = Instant::now();

        if entry.in_flight {
            debug!(user = %user, "Fetch already in flight, reusing it");
            return;
        }

        if !entry.is_stale(state.config.stale_time) {
            debug!(user = %user, "Cached result is fresh, skipping fetch");
            return;
        }

        // Data stays visible until the refetch settles; without data the query is loading again
        if !matches!(entry.state, QueryState::Success { .. }) {
            entry.state = QueryState::Loading;
        }
        entry.in_flight = true;
        state.fetches_issued += 1;

        debug!(user = %user, fetches_issued = state.fetches_issued, "Starting fetch");
        Self::start_fetch(myself, state.client.clone(), user);
    }

    fn handle_resolved(
        state: &mut QueryCacheState,
        user: String,
        result: Result<Vec<Repository>>,
    ) {
        let Some(entry) = state.entries.get_mut(&user) else {
            debug!(user = %user, "Dropping result for an evicted query");
            return;
        };

        entry.in_flight = false;
        entry.settled_at = Some(Instant::now());

        match result {
            Ok(repositories) => {
                info!(user = %user, count = repositories.len(), "Query succeeded");
                entry.state = QueryState::Success {
                    repositories,
                    fetched_at: Utc::now(),
                };
            }
            Err(e) => {
                warn!(user = %user, error = %e, "Query failed");
                entry.state = QueryState::Error(e.to_string());
            }
        }
    }
}

#[ractor::async_trait]
impl Actor for QueryCache {
    type Msg = QueryCacheMessage;
    type State = QueryCacheState;
    type Arguments = QueryCacheArgs;

    async fn pre_start(
        &self,
        myself: ActorRef<Self::Msg>,
        args: Self::Arguments,
    ) -> std::result::Result<Self::State, ActorProcessingErr> {
        info!(
            stale_time_secs = args.config.stale_time.as_secs(),
            cache_time_secs = args.config.cache_time.as_secs(),
            "Starting query cache"
        );

        let gc_handle = myself.send_interval(args.config.gc_interval, || {
            QueryCacheMessage::CollectGarbage
        });

        Ok(QueryCacheState {
            client: args.client,
            config: args.config,
            entries: HashMap::new(),
            fetches_issued: 0,
            gc_handle: Some(gc_handle),
        })
    }

    async fn handle(
        &self,
        myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> std::result::Result<(), ActorProcessingErr> {
        match message {
            QueryCacheMessage::Fetch(user) => {
                Self::handle_fetch(&myself, state, user);
            }
            QueryCacheMessage::Resolved { user, result } => {
                Self::handle_resolved(state, user, result);
            }
            QueryCacheMessage::Observe(user, reply) => {
                Self::handle_fetch(&myself, state, user.clone());
                let query_state = state
                    .entries
                    .get(&user)
                    .map_or(QueryState::Idle, |entry| entry.state.clone());

                if reply.send(query_state).is_err() {
                    debug!(user = %user, "Observer went away");
                }
            }
            QueryCacheMessage::GetState(user, reply) => {
                let query_state = match state.entries.get_mut(&user) {
                    Some(entry) => {
                        entry.last_accessed = Instant::now();
                        entry.state.clone()
                    }
                    None => QueryState::Idle,
                };

                if reply.send(query_state).is_err() {
                    debug!(user = %user, "State requester went away");
                }
            }
            QueryCacheMessage::GetStats(reply) => {
                let stats = QueryCacheStats {
                    entries: state.entries.len(),
                    in_flight: state.entries.values().filter(|e| e.in_flight).count(),
                    fetches_issued: state.fetches_issued,
                };

                if reply.send(stats).is_err() {
                    debug!("Stats requester went away");
                }
            }
            QueryCacheMessage::CollectGarbage => {
                let cache_time = state.config.cache_time;
                let before = state.entries.len();

                state
                    .entries
                    .retain(|_, entry| entry.in_flight || entry.last_accessed.elapsed() < cache_time);

                let evicted = before - state.entries.len();
                if evicted > 0 {
                    debug!(evicted, remaining = state.entries.len(), "Evicted unused queries");
                }
            }
        }

        Ok(())
    }

    async fn post_stop(
        &self,
        _myself: ActorRef<Self::Msg>,
        state: &mut Self::State,
    ) -> std::result::Result<(), ActorProcessingErr> {
        if let Some(handle) = state.gc_handle.take() {
            handle.abort();
        }

        info!(
            fetches_issued = state.fetches_issued,
            "Query cache stopped"
        );
        Ok(())
    }
}

/// Current state of the query for `user`
pub async fn query_state(cache: &ActorRef<QueryCacheMessage>, user: &str) -> Result<QueryState> {
    let key = user.to_string();

    match cache
        .call(|reply| QueryCacheMessage::GetState(key, reply), Some(CALL_TIMEOUT))
        .await
    {
        Ok(CallResult::Success(state)) => Ok(state),
        Ok(CallResult::Timeout) => Err(RepoStatsError::CacheError("GetState timed out".to_string())),
        Ok(CallResult::SenderError) => Err(RepoStatsError::CacheError(
            "GetState reply channel closed".to_string(),
        )),
        Err(e) => Err(RepoStatsError::CacheError(format!("GetState: {}", e))),
    }
}

/// Ask the cache to load `user` if it needs to
pub fn request_fetch(cache: &ActorRef<QueryCacheMessage>, user: &str) -> Result<()> {
    cache
        .send_message(QueryCacheMessage::Fetch(user.to_string()))
        .map_err(|e| RepoStatsError::CacheError(format!("Fetch: {}", e)))
}

/// Start a fetch for `user` if it needs one and return the resulting state
pub async fn observe(cache: &ActorRef<QueryCacheMessage>, user: &str) -> Result<QueryState> {
    let key = user.to_string();

    match cache
        .call(|reply| QueryCacheMessage::Observe(key, reply), Some(CALL_TIMEOUT))
        .await
    {
        Ok(CallResult::Success(state)) => Ok(state),
        Ok(CallResult::Timeout) => Err(RepoStatsError::CacheError("Observe timed out".to_string())),
        Ok(CallResult::SenderError) => Err(RepoStatsError::CacheError(
            "Observe reply channel closed".to_string(),
        )),
        Err(e) => Err(RepoStatsError::CacheError(format!("Observe: {}", e))),
    }
}

pub async fn cache_stats(cache: &ActorRef<QueryCacheMessage>) -> Result<QueryCacheStats> {
    match cache
        .call(QueryCacheMessage::GetStats, Some(CALL_TIMEOUT))
        .await
    {
        Ok(CallResult::Success(stats)) => Ok(stats),
        Ok(CallResult::Timeout) => Err(RepoStatsError::CacheError("GetStats timed out".to_string())),
        Ok(CallResult::SenderError) => Err(RepoStatsError::CacheError(
            "GetStats reply channel closed".to_string(),
        )),
        Err(e) => Err(RepoStatsError::CacheError(format!("GetStats: {}", e))),
    }
}
