//! Dataset lifecycle, file I/O, and per-session ad-hoc ratings.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use tourism_rec::synthetic::{self, DEFAULT_SEED, DEFAULT_USERS};
use tourism_rec::{
    ContentIndex, ContentMatch, Dataset, Place, PlaceId, PlaceRef, Recommendation,
    RecommendConfig, Recommender, SessionRatings, TrecReader, TrecWriter, UserId, UserRef,
};

use crate::config::EngineDefaults;
use crate::types::{McpError, McpResult};

/// Result of rating several places at once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchRating {
    pub rated: Vec<PlaceId>,
    /// References that matched no catalog place.
    pub skipped: Vec<String>,
}

/// Owns the loaded dataset, its content index, and the current session.
pub struct TourismSessionManager {
    dataset: Dataset,
    content: ContentIndex,
    defaults: EngineDefaults,
    ratings: SessionRatings,
    file_path: PathBuf,
    current_session: u32,
    session_token: Uuid,
    started_at: DateTime<Utc>,
    dirty: bool,
}

impl TourismSessionManager {
    /// Open a dataset file, generating the demo dataset if it does not exist.
    pub fn open(path: &str, defaults: EngineDefaults) -> McpResult<Self> {
        let file_path = PathBuf::from(path);

        let (dataset, dirty) = if file_path.exists() {
            tracing::info!("Opening existing dataset: {}", file_path.display());
            let dataset = TrecReader::read_from_file(&file_path)
                .map_err(|e| McpError::EngineError(format!("Failed to read dataset: {e}")))?;
            (dataset, false)
        } else {
            tracing::info!(
                "No dataset at {}, generating demo data",
                file_path.display()
            );
            (synthetic::generate(DEFAULT_USERS, DEFAULT_SEED)?, true)
        };

        let mut manager = Self::from_dataset(dataset, file_path, defaults);
        manager.dirty = dirty;
        manager.save()?;
        Ok(manager)
    }

    /// Wrap an in-memory dataset. Nothing is written until [`save`](Self::save).
    pub fn from_dataset(dataset: Dataset, file_path: PathBuf, defaults: EngineDefaults) -> Self {
        let content = ContentIndex::build(dataset.catalog.places());

        tracing::info!(
            "Session 1 started. Dataset has {} places, {} users, {} ratings",
            dataset.catalog.len(),
            dataset.user_ids().len(),
            dataset.ratings.len()
        );

        Self {
            dataset,
            content,
            defaults,
            ratings: SessionRatings::new(),
            file_path,
            current_session: 1,
            session_token: Uuid::new_v4(),
            started_at: Utc::now(),
            dirty: false,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn content(&self) -> &ContentIndex {
        &self.content
    }

    pub fn defaults(&self) -> &EngineDefaults {
        &self.defaults
    }

    /// Ad-hoc ratings of the current session.
    pub fn session_ratings(&self) -> &SessionRatings {
        &self.ratings
    }

    pub fn current_session_id(&self) -> u32 {
        self.current_session
    }

    pub fn session_token(&self) -> Uuid {
        self.session_token
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Start a fresh session, discarding ad-hoc ratings.
    pub fn start_session(&mut self, explicit_id: Option<u32>) -> McpResult<u32> {
        let session_id = explicit_id.unwrap_or(self.current_session + 1);
        self.current_session = session_id;
        self.session_token = Uuid::new_v4();
        self.started_at = Utc::now();
        self.ratings.clear();
        tracing::info!("Started session {session_id}");
        Ok(session_id)
    }

    /// End the current session. Returns its id and how many places were rated.
    pub fn end_session(&mut self) -> McpResult<(u32, usize)> {
        let session_id = self.current_session;
        let rated = self.ratings.len();
        self.ratings.clear();
        self.save()?;
        tracing::info!("Ended session {session_id} ({rated} ad-hoc ratings discarded)");
        Ok((session_id, rated))
    }

    /// Rate one place in the current session. Returns the place and its previous rating.
    pub fn rate_place(&mut self, place: &PlaceRef, rating: i64) -> McpResult<(&Place, Option<u8>)> {
        let place = self.dataset.catalog.resolve(place)?;
        let previous = self.ratings.rate(place.id, rating)?;
        tracing::debug!("Session {} rated {} = {rating}", self.current_session, place.id);
        Ok((place, previous))
    }

    /// Rate several places. Unknown places are skipped; an invalid rating fails the batch.
    pub fn rate_places(&mut self, entries: &[(PlaceRef, i64)]) -> McpResult<BatchRating> {
        let mut resolved = Vec::with_capacity(entries.len());
        let mut batch = BatchRating::default();
        for (place, rating) in entries {
            match self.dataset.catalog.resolve(place) {
                Ok(p) => {
                    tourism_rec::validate_rating(*rating)?;
                    resolved.push((p.id, *rating));
                }
                Err(_) => {
                    tracing::warn!("Skipping rating for unknown place {place}");
                    batch.skipped.push(place.to_string());
                }
            }
        }
        for (place_id, rating) in resolved {
            self.ratings.rate(place_id, rating)?;
            batch.rated.push(place_id);
        }
        Ok(batch)
    }

    /// Drop the ad-hoc ratings but keep the session open.
    pub fn clear_session_ratings(&mut self) -> usize {
        let n = self.ratings.len();
        self.ratings.clear();
        n
    }

    /// Replace the session ratings with a random demo set.
    pub fn demo_ratings(&mut self, seed: Option<u64>) -> McpResult<usize> {
        let seed = seed.unwrap_or(DEFAULT_SEED);
        self.ratings = synthetic::demo_session(&self.dataset.catalog, seed)?;
        tracing::info!(
            "Session {} loaded {} demo ratings (seed {seed})",
            self.current_session,
            self.ratings.len()
        );
        Ok(self.ratings.len())
    }

    /// Merge request overrides with the server defaults.
    pub fn recommend_config(
        &self,
        threshold: Option<f64>,
        top_n: Option<usize>,
    ) -> McpResult<RecommendConfig> {
        self.defaults.recommend_config(threshold, top_n)
    }

    /// Recommendations for a registered user.
    pub fn recommend_for_user(
        &self,
        user_id: UserId,
        config: &RecommendConfig,
    ) -> McpResult<Recommendation> {
        Ok(self.recommender().recommend(UserRef::Registered(user_id), config)?)
    }

    /// Recommendations for the ad-hoc user of the current session.
    pub fn recommend_for_session(&self, config: &RecommendConfig) -> McpResult<Recommendation> {
        Ok(self
            .recommender()
            .recommend(UserRef::Ephemeral(&self.ratings), config)?)
    }

    /// Content-similar places. Returns the resolved query place with its matches.
    pub fn similar_places(
        &self,
        place: &PlaceRef,
        k: usize,
    ) -> McpResult<(&Place, Vec<ContentMatch>)> {
        let query = self.dataset.catalog.resolve(place)?;
        let matches = self.content.similar(query.id, k)?;
        Ok((query, matches))
    }

    /// Save to file.
    pub fn save(&mut self) -> McpResult<()> {
        if !self.dirty {
            return Ok(());
        }

        self.dataset.touch();
        TrecWriter::write_to_file(&self.dataset, &self.file_path)
            .map_err(|e| McpError::EngineError(format!("Failed to write dataset: {e}")))?;

        self.dirty = false;
        tracing::info!("Saved dataset: {}", self.file_path.display());
        Ok(())
    }

    pub fn file_path(&self) -> &PathBuf {
        &self.file_path
    }

    fn recommender(&self) -> Recommender<'_> {
        Recommender::new(&self.dataset.ratings).with_catalog(&self.dataset.catalog)
    }
}

impl Drop for TourismSessionManager {
    fn drop(&mut self) {
        if self.dirty {
            if let Err(e) = self.save() {
                tracing::error!("Failed to save on drop: {e}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager(dir: &tempfile::TempDir) -> TourismSessionManager {
        let path = dir.path().join("dataset.trec");
        TourismSessionManager::open(path.to_str().unwrap(), EngineDefaults::default()).unwrap()
    }

    #[test]
    fn test_open_generates_and_saves() {
        let dir = tempfile::tempdir().unwrap();
        let m = manager(&dir);
        assert!(m.file_path().exists());
        assert_eq!(m.dataset().catalog.len(), 50);
        assert_eq!(m.content().len(), 50);

        let reopened = manager(&dir);
        assert_eq!(reopened.dataset().ratings.len(), m.dataset().ratings.len());
    }

    #[test]
    fn test_rate_by_name_and_id() {
        let dir = tempfile::tempdir().unwrap();
        let mut m = manager(&dir);
        let (place, previous) = m
            .rate_place(&PlaceRef::Name("Pantai Kuta".into()), 5)
            .unwrap();
        assert_eq!(place.id, 1);
        assert_eq!(previous, None);
        let (_, previous) = m.rate_place(&PlaceRef::Id(1), 3).unwrap();
        assert_eq!(previous, Some(5));
        assert_eq!(m.session_ratings().len(), 1);

        assert!(matches!(
            m.rate_place(&PlaceRef::Name("Atlantis".into()), 4),
            Err(McpError::PlaceNotFound(_))
        ));
        assert!(matches!(
            m.rate_place(&PlaceRef::Id(1), 6),
            Err(McpError::InvalidParams(_))
        ));
    }

    #[test]
    fn test_batch_skips_unknown_places() {
        let dir = tempfile::tempdir().unwrap();
        let mut m = manager(&dir);
        let batch = m
            .rate_places(&[
                (PlaceRef::Id(2), 4),
                (PlaceRef::Name("Atlantis".into()), 5),
            ])
            .unwrap();
        assert_eq!(batch.rated, vec![2]);
        assert_eq!(batch.skipped, vec!["Atlantis".to_string()]);

        assert!(m.rate_places(&[(PlaceRef::Id(3), 0)]).is_err());
        assert!(m.session_ratings().get(3).is_none());
    }

    #[test]
    fn test_session_recommendation_leaves_store_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let mut m = manager(&dir);
        let before = m.dataset().ratings.len();
        m.demo_ratings(None).unwrap();
        let config = m.recommend_config(None, None).unwrap();
        let rec = m.recommend_for_session(&config).unwrap();
        assert!(!rec.predictions().is_empty());
        assert_eq!(m.dataset().ratings.len(), before);
    }

    #[test]
    fn test_empty_session_is_unknown_user() {
        let dir = tempfile::tempdir().unwrap();
        let m = manager(&dir);
        let config = m.recommend_config(None, None).unwrap();
        assert!(matches!(
            m.recommend_for_session(&config),
            Err(McpError::UserNotFound(_))
        ));
    }

    #[test]
    fn test_start_session_discards_ratings() {
        let dir = tempfile::tempdir().unwrap();
        let mut m = manager(&dir);
        m.rate_place(&PlaceRef::Id(4), 4).unwrap();
        let token = m.session_token();
        assert_eq!(m.start_session(None).unwrap(), 2);
        assert!(m.session_ratings().is_empty());
        assert_ne!(m.session_token(), token);
        assert_eq!(m.start_session(Some(10)).unwrap(), 10);
    }

    #[test]
    fn test_similar_places() {
        let dir = tempfile::tempdir().unwrap();
        let m = manager(&dir);
        let (query, matches) = m
            .similar_places(&PlaceRef::Name("Candi Borobudur".into()), 3)
            .unwrap();
        assert_eq!(query.id, 8);
        assert_eq!(matches.len(), 3);
        assert!(matches.iter().all(|c| c.place_id != 8));
    }
}
