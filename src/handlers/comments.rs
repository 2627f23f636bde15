// src/handlers/comments.rs
// DOCUMENTATION: HTTP handlers for photo comments
// PURPOSE: Add comments and list them per photo

use crate::errors::PhotoError;
use crate::models::{AddCommentRequest, CommentAddedResponse};
use crate::services::PhotoStore;
use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

/// POST /add_comment
/// JSON body: {"photo_id": "...", "comment": "..."}
pub async fn add_comment(
    store: web::Data<PhotoStore>,
    req: web::Json<AddCommentRequest>,
) -> Result<impl Responder, PhotoError> {
    if let Err(e) = req.validate() {
        return Err(PhotoError::ValidationError(e.to_string()));
    }

    let req = req.into_inner();
    store.add_comment(&req.photo_id, &req.comment).await?;
    Ok(HttpResponse::Ok().json(CommentAddedResponse::added()))
}

/// GET /get_comments/{photo_id}
pub async fn get_comments(
    store: web::Data<PhotoStore>,
    path: web::Path<String>,
) -> Result<impl Responder, PhotoError> {
    let comments = store.get_comments(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(comments))
}

/// Configuration for comment routes
pub fn config(cfg: &mut web::ServiceConfig) {
    // Malformed JSON bodies use the same error shape as every other failure
    let json_config = web::JsonConfig::default()
        .error_handler(|err, _req| PhotoError::ValidationError(err.to_string()).into());

    cfg.service(
        web::resource("/add_comment")
            .app_data(json_config)
            .route(web::post().to(add_comment)),
    )
    .route("/get_comments/{photo_id}", web::get().to(get_comments));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::env::test_config;
    use crate::handlers::photos;
    use crate::handlers::photos::tests::upload_request;
    use crate::services::photo_store::test_store;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use serde_json::json;

    #[actix_web::test]
    async fn test_add_and_get_comments() {
        let (store, _dir) = test_store().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(store.clone()))
                .configure(config),
        )
        .await;

        let req = test::TestRequest::get().uri("/get_comments/p1").to_request();
        let empty: Vec<String> = test::call_and_read_body_json(&app, req).await;
        assert!(empty.is_empty());

        let req = test::TestRequest::post()
            .uri("/add_comment")
            .set_json(json!({"photo_id": "p1", "comment": "Nice!"}))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!({"status": "comment added"}));

        let req = test::TestRequest::get().uri("/get_comments/p1").to_request();
        let comments: Vec<String> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(comments, vec!["Nice!"]);
    }

    #[actix_web::test]
    async fn test_add_comment_rejects_missing_fields() {
        let (store, _dir) = test_store().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(store.clone()))
                .configure(config),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/add_comment")
            .set_json(json!({"comment": "orphan text"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], "VALIDATION_ERROR");

        let req = test::TestRequest::post()
            .uri("/add_comment")
            .set_json(json!({"photo_id": "", "comment": "x"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_end_to_end_flow() {
        let (store, _dir) = test_store().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(store.clone()))
                .app_data(web::Data::new(test_config(std::path::PathBuf::from("unused"))))
                .configure(photos::config)
                .configure(config),
        )
        .await;

        let req = upload_request(&[
            ("title", None, b"Sunset".as_slice()),
            ("caption", None, b"At the beach".as_slice()),
            ("photo", Some("sunset.png"), b"png".as_slice()),
        ])
        .to_request();
        let uploaded: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(uploaded["message"], "Photo uploaded");
        let id = uploaded["photo_id"].as_str().unwrap().to_string();

        let req = test::TestRequest::get().uri("/list_photos").to_request();
        let photos: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(photos[0]["id"], id.as_str());
        assert_eq!(photos[0]["likes"], 0);

        let req = test::TestRequest::post()
            .uri(&format!("/like_photo/{}", id))
            .to_request();
        let liked: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(liked, json!({"likes": 1}));

        let req = test::TestRequest::post()
            .uri("/add_comment")
            .set_json(json!({"photo_id": id.clone(), "comment": "Nice!"}))
            .to_request();
        let added: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(added, json!({"status": "comment added"}));

        let req = test::TestRequest::get()
            .uri(&format!("/get_comments/{}", id))
            .to_request();
        let comments: Vec<String> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(comments, vec!["Nice!"]);
    }
}
