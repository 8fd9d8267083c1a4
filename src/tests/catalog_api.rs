#[cfg(test)]
mod test {
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};

    use crate::api::client::BmmClient;
    use crate::auth::token_manager::TokenManager;
    use crate::config::settings::{ClientConfig, LoggingConfig};
    use crate::dispatch::request::decode;
    use crate::error::Error;
    use crate::models::catalog::Item;
    use crate::models::game::{
        GameNightNotification, GameNightResult, QuestionAnswer, SimpleGameNightResult,
    };
    use crate::models::id::Id;
    use crate::observability::logger::Logger;
    use crate::observability::metrics::ClientMetrics;
    use crate::tests::common::*;

    const ALBUM_WITH_TRACKS: &[u8] = include_bytes!("fixtures/album_with_tracks.json");

    async fn client(server: &MockServer) -> BmmClient {
        grant_mock(server, "tok-1", 3600).await;
        let tokens = Arc::new(TokenManager::new(auth_config(server)));
        BmmClient::new(&api_config(server), tokens).unwrap()
    }

    #[test]
    fn album_fixture_decodes_with_six_tracks() {
        let album: Item = decode(ALBUM_WITH_TRACKS).unwrap();
        assert_eq!(album.item_type, "album");
        assert!(album.is_album());
        assert_eq!(album.tracks.len(), 6);
        assert!(album.tracks.iter().all(|track| track.item_type == "track"));
        assert_eq!(album.meta.contained_types, vec!["track"]);
        assert_eq!(album.bmm_id, json!("14322"));
        assert!(album.tracks[0].has_transcription);
        assert_eq!(
            album.published_at,
            Some(Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap())
        );
    }

    #[test]
    fn sparse_items_decode_with_defaults() {
        let item: Item = decode(br#"{"id": 1, "title": "x"}"#).unwrap();
        assert_eq!(item.id, 1);
        assert_eq!(item.title.as_deref(), Some("x"));
        assert!(item.item_type.is_empty());
        assert!(!item.is_album());

        let untyped: Item = decode(br#"{"type": "track"}"#).unwrap();
        assert_eq!(untyped.id, 0);
        assert_eq!(untyped.item_type, "track");
    }

    #[tokio::test]
    async fn get_years() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/facets/album_published/years");
                then.status(200).json_body(json!([
                    {"year": 2024, "count": 31},
                    {"year": 2023, "count": 54}
                ]));
            })
            .await;

        let years = client(&server).await.get_years().await.unwrap();
        assert_eq!(years.len(), 2);
        assert_eq!(years[0].year, 2024);
        assert_eq!(years[1].count, 54);
    }

    #[tokio::test]
    async fn get_albums_uses_year_path_with_trailing_slash() {
        let server = MockServer::start_async().await;
        let albums = server
            .mock_async(|when, then| {
                when.method(GET).path("/album/published/2024/");
                then.status(200).json_body(json!([
                    {"id": 1, "type": "album", "title": "Sommerstevnet"},
                    {"id": 2, "type": "album"}
                ]));
            })
            .await;

        let items = client(&server).await.get_albums(2024).await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title.as_deref(), Some("Sommerstevnet"));
        assert!(items[1].tracks.is_empty());
        assert_eq!(albums.hits_async().await, 1);
    }

    #[tokio::test]
    async fn get_album_tracks_decodes_album_fixture() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/album/14322");
                then.status(200).body(ALBUM_WITH_TRACKS);
            })
            .await;

        let album = client(&server)
            .await
            .get_album_tracks(Id::parse("14322").unwrap())
            .await
            .unwrap();
        assert_eq!(album.item_type, "album");
        assert_eq!(album.tracks.len(), 6);
    }

    #[tokio::test]
    async fn get_podcast_tracks_escapes_tag() {
        let server = MockServer::start_async().await;
        let tracks = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/track")
                    .query_param("tags", "fra kåre/podcast")
                    .query_param("size", "10")
                    .query_param("unpublished", "show");
                then.status(200).json_body(json!([{"id": 7, "type": "track"}]));
            })
            .await;

        let items = client(&server)
            .await
            .get_podcast_tracks("fra kåre/podcast", 10)
            .await
            .unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(tracks.hits_async().await, 1);
    }

    #[tokio::test]
    async fn get_languages_and_statistics() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/languages");
                then.status(200)
                    .json_body(json!([{"name": "Podcast", "languages": ["nb", "en"]}]));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/HVHE/status");
                then.status(200).json_body(json!({"game_nights": 12, "units": 3400}));
            })
            .await;

        let client = client(&server).await;
        let languages = client.get_languages().await.unwrap();
        assert_eq!(languages[0].languages, vec!["nb", "en"]);

        let stats = client.get_game_statistics().await.unwrap();
        assert_eq!(stats.game_nights, 12);
        assert_eq!(stats.units, 3400);
    }

    #[tokio::test]
    async fn submit_answer_wraps_single_answer_in_array() {
        let server = MockServer::start_async().await;
        let answer = QuestionAnswer {
            question_id: "q-1".into(),
            selected_answer_id: "a-3".into(),
            answered_correctly: true,
            answered_at: Utc.with_ymd_and_hms(2026, 2, 14, 19, 30, 0).unwrap(),
        };
        let expected = json!([serde_json::to_value(&answer).unwrap()]);
        let answers = server
            .mock_async(|when, then| {
                when.method(POST).path("/question/answers").json_body(expected);
                then.status(200);
            })
            .await;

        client(&server).await.submit_answer(&answer).await.unwrap();
        assert_eq!(answers.hits_async().await, 1);
    }

    #[tokio::test]
    async fn game_night_submissions_post_to_their_paths() {
        let server = MockServer::start_async().await;
        let notification = GameNightNotification {
            winner: "Team Blue".into(),
            message: "Gratulerer!".into(),
        };
        let result = GameNightResult {
            winner: "Team Blue".into(),
            units: 42,
            participants: vec!["Team Blue".into(), "Team Red".into()],
            played_at: Utc.with_ymd_and_hms(2026, 2, 14, 21, 0, 0).unwrap(),
        };
        let simple = SimpleGameNightResult { winner: "Team Red".into(), units: 7 };

        let notifications = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/HVHE/notifications")
                    .json_body(serde_json::to_value(&notification).unwrap());
                then.status(200);
            })
            .await;
        let gamenight = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/HVHE/gamenight")
                    .json_body(serde_json::to_value(&result).unwrap());
                then.status(200).body("{\"ok\":true}");
            })
            .await;
        let gamenight3 = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/HVHE/gamenight3")
                    .json_body(json!({"winner": "Team Red", "units": 7}));
                then.status(200);
            })
            .await;

        let client = client(&server).await;
        client.submit_notification(&notification).await.unwrap();
        client.submit_game_night(&result).await.unwrap();
        client.submit_simple_game_night(&simple).await.unwrap();

        assert_eq!(notifications.hits_async().await, 1);
        assert_eq!(gamenight.hits_async().await, 1);
        assert_eq!(gamenight3.hits_async().await, 1);
    }

    #[tokio::test]
    async fn rejected_submission_surfaces_api_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/HVHE/gamenight3");
                then.status(401).body("token expired");
            })
            .await;

        let err = client(&server)
            .await
            .submit_simple_game_night(&SimpleGameNightResult { winner: "x".into(), units: 1 })
            .await
            .unwrap_err();
        assert_eq!(err.status().map(|s| s.as_u16()), Some(401));
        assert_eq!(err.body(), Some(&b"token expired"[..]));
    }

    #[tokio::test]
    async fn from_config_and_base_url_override() {
        let server = MockServer::start_async().await;
        grant_mock(&server, "tok-1", 3600).await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v2/languages");
                then.status(200).json_body(json!([]));
            })
            .await;

        let config = ClientConfig {
            api: api_config(&server),
            auth: auth_config(&server),
            logging: LoggingConfig::default(),
        };
        let client = BmmClient::from_config(&config, Logger::noop(), Arc::new(ClientMetrics::new()))
            .unwrap()
            .with_base_url(format!("{}/v2/", server.base_url()));

        assert!(client.get_languages().await.unwrap().is_empty());
        assert!(matches!(Id::parse("not-a-number"), Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn client_logger_leaves_token_manager_logger_alone() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/oauth/token");
                then.status(200).json_body(json!({}));
            })
            .await;
        let manager_logs = CapturedLogs::default();
        let client_logs = CapturedLogs::default();
        let tokens = Arc::new(TokenManager::new(auth_config(&server)).with_logger(manager_logs.logger()));
        let client = BmmClient::new(&api_config(&server), tokens)
            .unwrap()
            .with_logger(client_logs.logger());

        assert!(matches!(client.get_years().await, Err(Error::Auth(_))));
        assert!(manager_logs.text().contains("Failed to get token"));
        assert!(!client_logs.text().contains("Failed to get token"));
    }
}
