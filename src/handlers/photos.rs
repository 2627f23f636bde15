// src/handlers/photos.rs
// DOCUMENTATION: HTTP handlers for photo operations
// PURPOSE: Parse requests, call the photo store, return responses

use crate::config::Config;
use crate::errors::PhotoError;
use crate::models::{LikeResponse, SearchQuery, UploadPhotoResponse};
use crate::services::PhotoStore;
use actix_multipart::{Field, Multipart};
use actix_web::{web, HttpResponse, Responder};
use futures_util::TryStreamExt;

/// File part extracted from an upload form
struct UploadedFile {
    filename: String,
    data: Vec<u8>,
}

/// POST /upload_photo
/// Multipart form: `photo` (file, required), `title`, `caption`
pub async fn upload_photo(
    store: web::Data<PhotoStore>,
    config: web::Data<Config>,
    mut payload: Multipart,
) -> Result<impl Responder, PhotoError> {
    let limit = config.max_upload_bytes;
    let mut title = String::new();
    let mut caption = String::new();
    let mut file: Option<UploadedFile> = None;

    while let Some(mut field) = payload.try_next().await.map_err(invalid_multipart)? {
        let disposition = field.content_disposition();
        let name = disposition.get_name().unwrap_or_default().to_string();
        let filename = disposition.get_filename().map(str::to_string);

        match (name.as_str(), filename) {
            ("photo", Some(filename)) if file.is_none() => {
                let data = read_field(&mut field, limit).await?;
                file = Some(UploadedFile { filename, data });
            }
            ("title", None) => title = read_text(&mut field, limit).await?,
            ("caption", None) => caption = read_text(&mut field, limit).await?,
            _ => while field.try_next().await.map_err(invalid_multipart)?.is_some() {},
        }
    }

    let file = file.ok_or_else(|| PhotoError::ValidationError("No file part".to_string()))?;
    if file.filename.is_empty() {
        return Err(PhotoError::ValidationError("No selected file".to_string()));
    }

    let photo_id = store
        .upload_photo(&title, &caption, &file.filename, &file.data)
        .await?;

    Ok(HttpResponse::Ok().json(UploadPhotoResponse::uploaded(photo_id)))
}

/// GET /list_photos
pub async fn list_photos(store: web::Data<PhotoStore>) -> Result<impl Responder, PhotoError> {
    let photos = store.list_photos().await?;
    Ok(HttpResponse::Ok().json(photos))
}

/// GET /search?q=
pub async fn search_photos(
    store: web::Data<PhotoStore>,
    query: web::Query<SearchQuery>,
) -> Result<impl Responder, PhotoError> {
    let q = query.into_inner().q.unwrap_or_default();
    let photos = store.search_photos(&q).await?;
    Ok(HttpResponse::Ok().json(photos))
}

/// GET /uploads/{filename}
/// Serve the raw bytes of an uploaded photo
pub async fn uploaded_file(
    store: web::Data<PhotoStore>,
    path: web::Path<String>,
) -> Result<impl Responder, PhotoError> {
    let filename = path.into_inner();
    // A key that can never name a blob is just a missing file here
    let data = match store.get_blob(&filename).await {
        Ok(data) => data,
        Err(PhotoError::ValidationError(_)) => None,
        Err(e) => return Err(e),
    }
    .ok_or_else(|| PhotoError::NotFound(format!("file {}", filename)))?;

    let mime = mime_guess::from_path(&filename).first_or_octet_stream();
    Ok(HttpResponse::Ok().content_type(mime.as_ref()).body(data))
}

/// POST /like_photo/{photo_id}
pub async fn like_photo(
    store: web::Data<PhotoStore>,
    path: web::Path<String>,
) -> Result<impl Responder, PhotoError> {
    let likes = store.like_photo(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(LikeResponse { likes }))
}

/// Collect a multipart field into memory, failing once it exceeds `limit` bytes
async fn read_field(field: &mut Field, limit: usize) -> Result<Vec<u8>, PhotoError> {
    let mut data = Vec::new();
    while let Some(chunk) = field.try_next().await.map_err(invalid_multipart)? {
        if data.len() + chunk.len() > limit {
            return Err(PhotoError::ValidationError(format!(
                "Upload exceeds the {} byte limit",
                limit
            )));
        }
        data.extend_from_slice(&chunk);
    }
    Ok(data)
}

async fn read_text(field: &mut Field, limit: usize) -> Result<String, PhotoError> {
    let data = read_field(field, limit).await?;
    String::from_utf8(data)
        .map_err(|_| PhotoError::ValidationError("Form fields must be UTF-8 text".to_string()))
}

fn invalid_multipart(e: actix_multipart::MultipartError) -> PhotoError {
    PhotoError::ValidationError(format!("Invalid multipart body: {}", e))
}

/// Configuration for photo routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/upload_photo", web::post().to(upload_photo))
        .route("/list_photos", web::get().to(list_photos))
        .route("/search", web::get().to(search_photos))
        .route("/uploads/{filename}", web::get().to(uploaded_file))
        .route("/like_photo/{photo_id}", web::post().to(like_photo));
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::env::test_config;
    use crate::models::PhotoResponse;
    use crate::services::photo_store::test_store;
    use actix_web::http::{header, StatusCode};
    use actix_web::{test, App};

    const BOUNDARY: &str = "----photoshare-test-boundary";

    /// Build a multipart/form-data request body from (name, filename, content) parts
    pub(crate) fn multipart_body(parts: &[(&str, Option<&str>, &[u8])]) -> Vec<u8> {
        let mut body = Vec::new();
        for (name, filename, content) in parts {
            body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
            match filename {
                Some(filename) => body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                        name, filename
                    )
                    .as_bytes(),
                ),
                None => body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name)
                        .as_bytes(),
                ),
            }
            body.extend_from_slice(content);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
        body
    }

    pub(crate) fn upload_request(parts: &[(&str, Option<&str>, &[u8])]) -> test::TestRequest {
        test::TestRequest::post()
            .uri("/upload_photo")
            .insert_header((
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            ))
            .set_payload(multipart_body(parts))
    }

    macro_rules! photo_app {
        ($store:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($store.clone()))
                    .app_data(web::Data::new(test_config(std::path::PathBuf::from("unused"))))
                    .configure(config),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_upload_list_and_fetch_blob() {
        let (store, _dir) = test_store().await;
        let app = photo_app!(store);

        let req = upload_request(&[
            ("title", None, b"Sunset".as_slice()),
            ("caption", None, b"At the beach".as_slice()),
            ("photo", Some("sunset.jpg"), b"\xff\xd8jpeg".as_slice()),
        ])
        .to_request();
        let uploaded: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(uploaded["message"], "Photo uploaded");
        let photo_id = uploaded["photo_id"].as_str().unwrap().to_string();

        let req = test::TestRequest::get().uri("/list_photos").to_request();
        let photos: Vec<PhotoResponse> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(photos.len(), 1);
        assert_eq!(photos[0].id, photo_id);
        assert_eq!(photos[0].title, "Sunset");
        assert_eq!(photos[0].caption, "At the beach");
        assert_eq!(photos[0].likes, 0);
        assert_eq!(photos[0].url, format!("/uploads/{}_sunset.jpg", photo_id));

        let req = test::TestRequest::get().uri(&photos[0].url).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(header::CONTENT_TYPE).unwrap(),
            "image/jpeg"
        );
        let body = test::read_body(resp).await;
        assert_eq!(body.as_ref(), b"\xff\xd8jpeg".as_slice());
    }

    #[actix_web::test]
    async fn test_upload_without_photo_part() {
        let (store, _dir) = test_store().await;
        let app = photo_app!(store);

        let req = upload_request(&[("title", None, b"No image".as_slice())]).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "No file part");
    }

    #[actix_web::test]
    async fn test_upload_with_empty_filename() {
        let (store, _dir) = test_store().await;
        let app = photo_app!(store);

        let req = upload_request(&[("photo", Some(""), b"".as_slice())]).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "No selected file");
    }

    #[actix_web::test]
    async fn test_upload_over_limit_is_rejected() {
        let (store, _dir) = test_store().await;
        let app = photo_app!(store);

        // test_config allows 1024 bytes
        let big = vec![0u8; 2048];
        let req = upload_request(&[("photo", Some("big.png"), big.as_slice())]).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(store.list_photos().await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_search_endpoint() {
        let (store, _dir) = test_store().await;
        store.upload_photo("Sunset", "beach", "a.jpg", b"a").await.unwrap();
        store.upload_photo("Forest", "trees", "b.jpg", b"b").await.unwrap();
        let app = photo_app!(store);

        let req = test::TestRequest::get().uri("/search?q=sun").to_request();
        let found: Vec<PhotoResponse> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Sunset");

        let req = test::TestRequest::get().uri("/search").to_request();
        let all: Vec<PhotoResponse> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(all.len(), 2);
    }

    #[actix_web::test]
    async fn test_like_endpoint() {
        let (store, _dir) = test_store().await;
        let id = store.upload_photo("t", "c", "p.jpg", b"p").await.unwrap();
        let app = photo_app!(store);

        for expected in 1..=2 {
            let req = test::TestRequest::post()
                .uri(&format!("/like_photo/{}", id))
                .to_request();
            let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
            assert_eq!(body["likes"], expected);
        }

        let req = test::TestRequest::post().uri("/like_photo/unknown").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_path_like_upload_name_is_not_found() {
        let (store, _dir) = test_store().await;
        let app = photo_app!(store);

        for uri in ["/uploads/..", "/uploads/a%5Cb.jpg"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND, "uri {}", uri);
        }
    }

    #[actix_web::test]
    async fn test_missing_upload_is_not_found() {
        let (store, _dir) = test_store().await;
        let app = photo_app!(store);

        let req = test::TestRequest::get().uri("/uploads/none.jpg").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
