//! HTTP handlers and route configuration.

mod auth;
mod favorites;
mod health;
mod notifications;
mod profile;
mod recipes;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Auth routes
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login))
                    .route("/logout", web::post().to(auth::logout))
                    .route("/password-reset", web::post().to(auth::password_reset)),
            )
            .service(
                web::scope("/recipes")
                    .route("/search", web::get().to(recipes::search))
                    .route("/{id}", web::get().to(recipes::detail)),
            )
            // Protected routes
            .service(
                web::scope("/favorites")
                    .route("", web::get().to(favorites::list_recipes))
                    .route("/ids", web::get().to(favorites::list_ids))
                    .route("/{recipe_id}", web::put().to(favorites::add))
                    .route("/{recipe_id}", web::delete().to(favorites::remove)),
            )
            .service(
                web::scope("/profile")
                    .route("", web::get().to(profile::get))
                    .route("", web::patch().to(profile::update))
                    .route("/photo", web::put().to(profile::upload_photo)),
            )
            .service(
                web::scope("/notifications/topics")
                    .route("", web::get().to(notifications::list))
                    .route("/{topic}", web::put().to(notifications::subscribe))
                    .route("/{topic}", web::delete().to(notifications::unsubscribe)),
            ),
    );
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::{Arc, Mutex};

    use actix_web::{App, http::StatusCode, test, web};
    use async_trait::async_trait;
    use serde_json::{Value, json};

    use savor_core::RemoteFetchError;
    use savor_core::domain::{RecipeDetail, RecipeId, RecipeSummary, SearchPage, SearchParams};
    use savor_core::ports::RecipeCatalog;
    use savor_infra::{
        Argon2PasswordService, InMemoryFavoritesRepository, InMemoryProfileRepository,
        InMemoryTopicHub, JwtConfig, JwtTokenService, LocalIdentityProvider, LocalObjectStorage,
        LocalStorageConfig,
    };

    use super::configure_routes;
    use crate::config::DEFAULT_PHOTO_MAX_BYTES;
    use crate::state::AppState;

    #[derive(Default)]
    struct StubCatalog {
        searches: Mutex<Vec<Vec<(&'static str, String)>>>,
    }

    #[async_trait]
    impl RecipeCatalog for StubCatalog {
        async fn search(&self, params: &SearchParams) -> Result<SearchPage, RemoteFetchError> {
            self.searches.lock().unwrap().push(params.query_pairs());
            Ok(SearchPage {
                results: vec![
                    RecipeSummary::new(1, "Chicken Curry"),
                    RecipeSummary::new(2, "Rice Pilaf"),
                ],
                offset: 0,
                number: params.number,
                total_results: 2,
            })
        }

        async fn recipe_detail(&self, id: RecipeId) -> Result<RecipeDetail, RemoteFetchError> {
            match id {
                1 => Ok(RecipeDetail::from_summary(RecipeSummary::new(1, "Chicken Curry"))),
                2 => Ok(RecipeDetail::from_summary(RecipeSummary::new(2, "Rice Pilaf"))),
                504 => Err(RemoteFetchError::Timeout),
                _ => Err(RemoteFetchError::Status {
                    status: 404,
                    message: "Recipe not found".to_string(),
                }),
            }
        }
    }

    fn test_state(catalog: Arc<StubCatalog>, media_root: &Path) -> AppState {
        let tokens = JwtTokenService::new(JwtConfig {
            secret: "handler-tests".to_string(),
            expiration_hours: 1,
            issuer: "savor-test".to_string(),
        });
        AppState::new(
            catalog,
            Arc::new(InMemoryFavoritesRepository::new()),
            Arc::new(InMemoryProfileRepository::new()),
            Arc::new(LocalIdentityProvider::new(
                Arc::new(Argon2PasswordService::new()),
                Arc::new(tokens),
            )),
            Arc::new(LocalObjectStorage::new(LocalStorageConfig {
                root: media_root.to_path_buf(),
                public_base_url: "http://media.test".to_string(),
            })),
            Arc::new(InMemoryTopicHub::default()),
        )
        .with_limits(10, 2)
    }

    macro_rules! app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($state))
                    .app_data(web::PayloadConfig::new(DEFAULT_PHOTO_MAX_BYTES))
                    .configure(configure_routes),
            )
            .await
        };
    }

    /// Registers `$email` and yields `(access_token, user_id)`.
    macro_rules! register {
        ($app:expr, $email:expr) => {{
            let req = test::TestRequest::post()
                .uri("/api/auth/register")
                .set_json(json!({ "email": $email, "password": "hunter22", "name": "Ada" }))
                .to_request();
            let res = test::call_service(&$app, req).await;
            assert_eq!(res.status(), StatusCode::CREATED);
            let body: Value = test::read_body_json(res).await;
            (
                body["accessToken"].as_str().unwrap().to_string(),
                body["userId"].as_str().unwrap().to_string(),
            )
        }};
    }

    fn bearer(token: &str) -> (&'static str, String) {
        ("Authorization", format!("Bearer {token}"))
    }

    #[actix_web::test]
    async fn test_health_check() {
        let media = tempfile::tempdir().unwrap();
        let app = app!(test_state(Arc::new(StubCatalog::default()), media.path()));

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "ok");
    }

    #[actix_web::test]
    async fn test_search_sends_ingredients_and_filters_titles() {
        let media = tempfile::tempdir().unwrap();
        let catalog = Arc::new(StubCatalog::default());
        let app = app!(test_state(catalog.clone(), media.path()));

        let req = test::TestRequest::get()
            .uri("/api/recipes/search?ingredients=chicken,rice&filter=curry")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        let titles: Vec<&str> = body["results"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["Chicken Curry"]);
        assert_eq!(body["totalResults"], 2);

        let sent = catalog.searches.lock().unwrap()[0].clone();
        assert!(sent.contains(&("includeIngredients", "chicken,rice".to_string())));
        assert!(sent.contains(&("number", "10".to_string())));
        assert!(!sent.iter().any(|(key, _)| *key == "query"));
    }

    #[actix_web::test]
    async fn test_search_with_diet_category() {
        let media = tempfile::tempdir().unwrap();
        let catalog = Arc::new(StubCatalog::default());
        let app = app!(test_state(catalog.clone(), media.path()));

        let req = test::TestRequest::get()
            .uri("/api/recipes/search?category=Vegan")
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);

        let sent = catalog.searches.lock().unwrap()[0].clone();
        assert!(sent.contains(&("query", "Vegan".to_string())));
        assert!(sent.contains(&("diet", "vegan".to_string())));
        assert!(!sent.iter().any(|(key, _)| *key == "type"));
    }

    #[actix_web::test]
    async fn test_detail_and_upstream_errors() {
        let media = tempfile::tempdir().unwrap();
        let app = app!(test_state(Arc::new(StubCatalog::default()), media.path()));

        let req = test::TestRequest::get().uri("/api/recipes/1").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["title"], "Chicken Curry");

        let req = test::TestRequest::get().uri("/api/recipes/7").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(res).await;
        assert!(body["detail"].as_str().unwrap().contains("Recipe not found"));

        let req = test::TestRequest::get().uri("/api/recipes/504").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::GATEWAY_TIMEOUT);
    }

    #[actix_web::test]
    async fn test_favorites_flow() {
        let media = tempfile::tempdir().unwrap();
        let app = app!(test_state(Arc::new(StubCatalog::default()), media.path()));
        let (token, _) = register!(app, "ada@example.com");

        for id in ["2", "1", "999", "1"] {
            let req = test::TestRequest::put()
                .uri(&format!("/api/favorites/{id}"))
                .insert_header(bearer(&token))
                .to_request();
            assert_eq!(
                test::call_service(&app, req).await.status(),
                StatusCode::NO_CONTENT
            );
        }

        let req = test::TestRequest::get()
            .uri("/api/favorites/ids")
            .insert_header(bearer(&token))
            .to_request();
        let ids: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(ids.as_array().unwrap().len(), 3);

        // 999 does not resolve and is left out of the hydrated list.
        let req = test::TestRequest::get()
            .uri("/api/favorites")
            .insert_header(bearer(&token))
            .to_request();
        let recipes: Value = test::call_and_read_body_json(&app, req).await;
        let hydrated: Vec<u64> = recipes
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["id"].as_u64().unwrap())
            .collect();
        assert_eq!(hydrated.len(), 2);
        assert!(hydrated.contains(&1) && hydrated.contains(&2));

        for _ in 0..2 {
            let req = test::TestRequest::delete()
                .uri("/api/favorites/2")
                .insert_header(bearer(&token))
                .to_request();
            assert_eq!(
                test::call_service(&app, req).await.status(),
                StatusCode::NO_CONTENT
            );
        }

        let req = test::TestRequest::get()
            .uri("/api/favorites/ids")
            .insert_header(bearer(&token))
            .to_request();
        let ids: Value = test::call_and_read_body_json(&app, req).await;
        let ids: Vec<&str> = ids
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["recipeId"].as_str().unwrap())
            .collect();
        assert!(!ids.contains(&"2"));
        assert_eq!(ids.len(), 2);
    }

    #[actix_web::test]
    async fn test_protected_routes_require_token() {
        let media = tempfile::tempdir().unwrap();
        let app = app!(test_state(Arc::new(StubCatalog::default()), media.path()));

        let req = test::TestRequest::get().uri("/api/favorites").to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::UNAUTHORIZED
        );

        let req = test::TestRequest::put()
            .uri("/api/favorites/1")
            .insert_header(bearer("not-a-jwt"))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[actix_web::test]
    async fn test_auth_errors_and_logout() {
        let media = tempfile::tempdir().unwrap();
        let app = app!(test_state(Arc::new(StubCatalog::default()), media.path()));
        let (token, _) = register!(app, "ada@example.com");

        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(json!({ "email": "ADA@example.com", "password": "hunter22" }))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::CONFLICT
        );

        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(json!({ "email": "bob@example.com", "password": "123" }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["detail"], "Password should be at least 6 characters");

        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({ "email": "ada@example.com", "password": "wrong-one" }))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::UNAUTHORIZED
        );

        let req = test::TestRequest::post()
            .uri("/api/auth/password-reset")
            .set_json(json!({ "email": "ghost@example.com" }))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::ACCEPTED
        );

        let req = test::TestRequest::post()
            .uri("/api/auth/logout")
            .insert_header(bearer(&token))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NO_CONTENT
        );

        let req = test::TestRequest::get()
            .uri("/api/profile")
            .insert_header(bearer(&token))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[actix_web::test]
    async fn test_profile_update_and_photo_upload() {
        let media = tempfile::tempdir().unwrap();
        let app = app!(test_state(Arc::new(StubCatalog::default()), media.path()));
        let (token, user_id) = register!(app, "ada@example.com");

        let req = test::TestRequest::get()
            .uri("/api/profile")
            .insert_header(bearer(&token))
            .to_request();
        let profile: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(profile["name"], "Ada");
        assert_eq!(profile["email"], "ada@example.com");

        let req = test::TestRequest::patch()
            .uri("/api/profile")
            .insert_header(bearer(&token))
            .set_json(json!({ "preferences": { "units": "metric" } }))
            .to_request();
        let profile: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(profile["name"], "Ada");
        assert_eq!(profile["preferences"]["units"], "metric");

        let req = test::TestRequest::put()
            .uri("/api/profile/photo")
            .insert_header(bearer(&token))
            .insert_header(("Content-Type", "image/jpeg"))
            .set_payload(vec![0xFF, 0xD8, 0xFF, 0xE0])
            .to_request();
        let profile: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(
            profile["photoUrl"],
            format!("http://media.test/profile_photos/{user_id}.jpg")
        );
        assert!(
            media
                .path()
                .join(format!("profile_photos/{user_id}.jpg"))
                .exists()
        );

        let req = test::TestRequest::put()
            .uri("/api/profile/photo")
            .insert_header(bearer(&token))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[actix_web::test]
    async fn test_photo_upload_body_limit() {
        let media = tempfile::tempdir().unwrap();
        let app = app!(test_state(Arc::new(StubCatalog::default()), media.path()));
        let (token, user_id) = register!(app, "ada@example.com");

        // A typical phone photo is well past actix's 256 KiB default.
        let photo = vec![0xAB; 1024 * 1024];
        let req = test::TestRequest::put()
            .uri("/api/profile/photo")
            .insert_header(bearer(&token))
            .insert_header(("Content-Type", "image/jpeg"))
            .set_payload(photo.clone())
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let stored = std::fs::read(media.path().join(format!("profile_photos/{user_id}.jpg")))
            .unwrap();
        assert_eq!(stored.len(), photo.len());

        let req = test::TestRequest::put()
            .uri("/api/profile/photo")
            .insert_header(bearer(&token))
            .insert_header(("Content-Type", "image/jpeg"))
            .set_payload(vec![0xAB; DEFAULT_PHOTO_MAX_BYTES + 1])
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
    }

    #[actix_web::test]
    async fn test_topic_subscriptions() {
        let media = tempfile::tempdir().unwrap();
        let app = app!(test_state(Arc::new(StubCatalog::default()), media.path()));
        let (token, _) = register!(app, "ada@example.com");
        let (other, _) = register!(app, "bob@example.com");

        let req = test::TestRequest::put()
            .uri("/api/notifications/topics/new-recipes")
            .insert_header(bearer(&token))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NO_CONTENT
        );

        let req = test::TestRequest::get()
            .uri("/api/notifications/topics")
            .insert_header(bearer(&token))
            .to_request();
        let topics: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(topics, json!(["new-recipes"]));

        let req = test::TestRequest::get()
            .uri("/api/notifications/topics")
            .insert_header(bearer(&other))
            .to_request();
        let topics: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(topics, json!([]));

        let req = test::TestRequest::put()
            .uri("/api/notifications/topics/bad$topic")
            .insert_header(bearer(&token))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::BAD_REQUEST
        );

        let req = test::TestRequest::delete()
            .uri("/api/notifications/topics/new-recipes")
            .insert_header(bearer(&token))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NO_CONTENT
        );

        let req = test::TestRequest::get()
            .uri("/api/notifications/topics")
            .insert_header(bearer(&token))
            .to_request();
        let topics: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(topics, json!([]));
    }
}
