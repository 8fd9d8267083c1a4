use std::sync::Arc;

use crate::api::paths;
use crate::auth::token_manager::TokenManager;
use crate::config::settings::{ApiConfig, ClientConfig};
use crate::dispatch::dispatcher::Dispatcher;
use crate::dispatch::request::CatalogRequest;
use crate::error::Result;
use crate::models::catalog::{Item, Overview, Year};
use crate::models::game::{
    GameNightNotification, GameNightResult, GameStatistics, QuestionAnswer, SimpleGameNightResult,
};
use crate::models::id::Id;
use crate::observability::logger::Logger;
use crate::observability::metrics::ClientMetrics;

/// Typed operations of the BMM API.
///
/// All requests carry `Accept-Language: nb`. There is currently no way to change this.
#[derive(Debug)]
pub struct BmmClient {
    dispatcher: Dispatcher,
}

impl BmmClient {
    pub fn new(config: &ApiConfig, tokens: Arc<TokenManager>) -> Result<Self> {
        Ok(Self { dispatcher: Dispatcher::new(config, tokens)? })
    }

    /// Builds manager and client from one config, sharing logger and metrics.
    pub fn from_config(config: &ClientConfig, logger: Logger, metrics: Arc<ClientMetrics>) -> Result<Self> {
        let tokens = TokenManager::new(config.auth.clone())
            .with_logger(logger.clone())
            .with_metrics(metrics.clone());
        let dispatcher = Dispatcher::new(&config.api, Arc::new(tokens))?
            .with_logger(logger)
            .with_metrics(metrics);
        Ok(Self { dispatcher })
    }

    /// Re-targets request logging. The token manager is shared and keeps the
    /// logger it was built with; give it one through `TokenManager::with_logger`
    /// or build both with `from_config`.
    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.dispatcher = self.dispatcher.with_logger(logger);
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<ClientMetrics>) -> Self {
        self.dispatcher = self.dispatcher.with_metrics(metrics);
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.dispatcher = self.dispatcher.with_base_url(base_url);
        self
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Years with published-album counts.
    pub async fn get_years(&self) -> Result<Vec<Year>> {
        self.dispatcher.fetch(&CatalogRequest::get(paths::YEARS)).await
    }

    pub async fn get_albums(&self, year: u32) -> Result<Vec<Item>> {
        self.dispatcher.fetch(&CatalogRequest::get(paths::albums(year))).await
    }

    /// The album itself, with its tracks in `tracks`.
    pub async fn get_album_tracks(&self, album_id: Id) -> Result<Item> {
        self.dispatcher.fetch(&CatalogRequest::get(paths::album(album_id))).await
    }

    /// Tracks tagged `podcast_tag`, unpublished ones included, at most `limit`.
    pub async fn get_podcast_tracks(&self, podcast_tag: &str, limit: u32) -> Result<Vec<Item>> {
        self.dispatcher
            .fetch(&CatalogRequest::get(paths::podcast_tracks(podcast_tag, limit)))
            .await
    }

    pub async fn get_languages(&self) -> Result<Vec<Overview>> {
        self.dispatcher.fetch(&CatalogRequest::get(paths::LANGUAGES)).await
    }

    pub async fn get_game_statistics(&self) -> Result<GameStatistics> {
        self.dispatcher.fetch(&CatalogRequest::get(paths::GAME_STATUS)).await
    }

    /// The endpoint takes a list; a single answer is sent wrapped in one.
    pub async fn submit_answer(&self, answer: &QuestionAnswer) -> Result<()> {
        let request = CatalogRequest::post(paths::QUESTION_ANSWERS, &[answer])?;
        self.dispatcher.execute(&request).await.map(|_| ())
    }

    pub async fn submit_notification(&self, notification: &GameNightNotification) -> Result<()> {
        let request = CatalogRequest::post(paths::GAME_NOTIFICATIONS, notification)?;
        self.dispatcher.execute(&request).await.map(|_| ())
    }

    pub async fn submit_game_night(&self, result: &GameNightResult) -> Result<()> {
        let request = CatalogRequest::post(paths::GAME_NIGHT, result)?;
        self.dispatcher.execute(&request).await.map(|_| ())
    }

    pub async fn submit_simple_game_night(&self, result: &SimpleGameNightResult) -> Result<()> {
        let request = CatalogRequest::post(paths::GAME_NIGHT_SIMPLE, result)?;
        self.dispatcher.execute(&request).await.map(|_| ())
    }
}
