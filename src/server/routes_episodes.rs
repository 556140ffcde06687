use crate::server::{AppContext, AppError};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use episodic_common::{citation::Citation, Episode, EpisodeId, Error, NewEpisode};
use serde_json::{json, Value};

const SAVE_FAILED: &str = "Failed to save episode";

pub fn episode_routes() -> Router<AppContext> {
    Router::new()
        .route("/episodes", get(list_episodes).post(create_episode))
        .route(
            "/episodes/:id",
            get(get_episode).put(update_episode).delete(delete_episode),
        )
        .route("/episodes/:id/views", post(record_view))
        .route("/episodes/:id/citation", get(get_citation))
        .route("/storage", get(storage_status))
}

fn parse_id(raw: &str) -> Result<EpisodeId, AppError> {
    Ok(raw.parse::<EpisodeId>()?)
}

async fn load(ctx: &AppContext, id: &EpisodeId) -> Result<Episode, AppError> {
    ctx.store
        .get(id)
        .await?
        .ok_or_else(|| Error::not_found("Episode", id).into())
}

async fn save(ctx: &AppContext, episode: &Episode) -> Result<(), AppError> {
    ctx.store
        .put(episode)
        .await
        .map_err(|e| AppError::new(e).with_context(SAVE_FAILED))
}

async fn list_episodes(State(ctx): State<AppContext>) -> Result<impl IntoResponse, AppError> {
    let index = ctx.store.list().await?;
    Ok(Json(index))
}

async fn create_episode(
    State(ctx): State<AppContext>,
    Json(input): Json<NewEpisode>,
) -> Result<impl IntoResponse, AppError> {
    let episode = Episode::create(EpisodeId::generate(), input, Utc::now())?;
    save(&ctx, &episode).await?;

    tracing::info!(episode_id = %episode.id, title = %episode.title, "Created episode");
    Ok((StatusCode::CREATED, Json(episode.summary())))
}

async fn get_episode(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id)?;
    Ok(Json(load(&ctx, &id).await?))
}

async fn update_episode(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
    Json(patch): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id)?;
    let Value::Object(patch) = patch else {
        return Err(Error::validation("patch must be a JSON object").into());
    };

    let existing = load(&ctx, &id).await?;
    let updated = existing.apply_patch(&patch, Utc::now())?;
    save(&ctx, &updated).await?;

    tracing::info!(episode_id = %id, "Updated episode");
    Ok(Json(updated))
}

async fn delete_episode(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id)?;
    ctx.store
        .delete(&id)
        .await
        .map_err(|e| AppError::new(e).with_context("Failed to delete episode"))?;

    tracing::info!(episode_id = %id, "Deleted episode");
    Ok(Json(json!({ "ok": true })))
}

async fn record_view(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id)?;
    let mut episode = load(&ctx, &id).await?;
    episode.views += 1;
    episode.updated_at = Utc::now().max(episode.created_at);
    save(&ctx, &episode).await?;

    Ok(Json(json!({ "views": episode.views })))
}

async fn get_citation(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id)?;
    let episode = load(&ctx, &id).await?;
    Ok(Json(Citation::for_episode(&episode)))
}

async fn storage_status(State(ctx): State<AppContext>) -> impl IntoResponse {
    let tier = ctx.store.active_tier();
    Json(json!({
        "tier": tier,
        "writable": tier.is_writable(),
    }))
}
