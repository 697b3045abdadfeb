use actix_web::web::{Data, Json, Query};
use actix_web::HttpResponse;
use log::info;
use serde::{Deserialize, Serialize};

use crate::context::UserInfo;
use crate::core::models::notification::{Notification, ReadFilter};
use crate::core::services::notification;
use crate::core::ports::repository::Manager;
use crate::error::Error;
use crate::request::{required, AdminEmail};
use crate::response::{Message, Reply};

#[derive(Debug, Deserialize)]
pub struct AddNotification {
    admin_email: Option<String>,
    notification: Option<String>,
}

#[derive(Debug, Serialize)]
struct NotificationId {
    notification_id: i32,
}

pub async fn add<D>(user_info: UserInfo, Json(body): Json<AddNotification>, db: Data<D>) -> Result<HttpResponse, Error>
where
    D: Manager + 'static,
{
    const MISSING: &str = "Invalid input. admin_email and notification are required.";
    let admin_email = required(body.admin_email, MISSING)?;
    let text = required(body.notification, MISSING)?;
    let mut conn = db.acquire().await?;
    let notification_id = notification::add_notification(&mut conn, admin_email, text).await?;
    info!("user {} added notification {}", user_info, notification_id);
    Ok(HttpResponse::Created().json(Reply::new("Notification added successfully.", NotificationId { notification_id })))
}

fn listing(key: &'static str, notifications: Vec<Notification>) -> serde_json::Value {
    let mut body = serde_json::Map::new();
    body.insert(key.into(), serde_json::json!(notifications));
    serde_json::Value::Object(body)
}

async fn inbox<D>(db: &D, query: AdminEmail, filter: ReadFilter) -> Result<HttpResponse, Error>
where
    D: Manager,
{
    let admin_email = query.required()?;
    let mut conn = db.acquire().await?;
    let notifications = notification::notifications(&mut conn, &admin_email, filter).await?;
    if notifications.is_empty() {
        return Ok(HttpResponse::NotFound().json(Message::new(filter.empty_message())));
    }
    let key = match filter {
        ReadFilter::All => "all_notifications",
        ReadFilter::Read => "read_notifications",
        ReadFilter::Unread => "unread_notifications",
    };
    Ok(HttpResponse::Ok().json(listing(key, notifications)))
}

pub async fn unread<D>(_: UserInfo, Query(query): Query<AdminEmail>, db: Data<D>) -> Result<HttpResponse, Error>
where
    D: Manager + 'static,
{
    inbox(db.get_ref(), query, ReadFilter::Unread).await
}

pub async fn all<D>(_: UserInfo, Query(query): Query<AdminEmail>, db: Data<D>) -> Result<HttpResponse, Error>
where
    D: Manager + 'static,
{
    inbox(db.get_ref(), query, ReadFilter::All).await
}

pub async fn read<D>(_: UserInfo, Query(query): Query<AdminEmail>, db: Data<D>) -> Result<HttpResponse, Error>
where
    D: Manager + 'static,
{
    inbox(db.get_ref(), query, ReadFilter::Read).await
}

#[derive(Debug, Serialize)]
pub struct UnreadCount {
    unread_count: i64,
}

pub async fn unread_count<D>(_: UserInfo, Query(query): Query<AdminEmail>, db: Data<D>) -> Result<Json<UnreadCount>, Error>
where
    D: Manager + 'static,
{
    let admin_email = query.required()?;
    let mut conn = db.acquire().await?;
    let unread_count = notification::unread_count(&mut conn, &admin_email).await?;
    Ok(Json(UnreadCount { unread_count }))
}

#[derive(Debug, Deserialize)]
pub struct MarkAsRead {
    admin_email: Option<String>,
    notification_id: Option<i32>,
}

#[derive(Debug, Serialize)]
struct Updated {
    updated: u64,
}

pub async fn mark_as_read<D>(user_info: UserInfo, Json(body): Json<MarkAsRead>, db: Data<D>) -> Result<HttpResponse, Error>
where
    D: Manager + 'static,
{
    let admin_email = required(body.admin_email, "admin_email is required")?;
    let mut conn = db.acquire().await?;
    let updated = notification::mark_as_read(&mut conn, &admin_email, body.notification_id).await?;
    info!("user {} marked {} notification(s) of {} as read", user_info, updated, admin_email);
    let message = match body.notification_id {
        Some(_) => "Notification marked as read.",
        None => "All notifications marked as read.",
    };
    Ok(HttpResponse::Ok().json(Reply::new(message, Updated { updated })))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::services::memory::MemStore;
    use crate::middlewares::jwt::JWTMiddleware;
    use actix_web::http::StatusCode;
    use actix_web::web::{get, patch, post, scope};
    use actix_web::{test, App};
    use chrono::Utc;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &[u8] = b"inbox secret";

    macro_rules! inbox_app {
        ($store:expr) => {
            test::init_service(
                App::new().app_data(Data::new($store.clone())).service(
                    scope("/notification_admin")
                        .wrap(JWTMiddleware::new(SECRET.to_vec()))
                        .route("/add", post().to(add::<MemStore>))
                        .route("/unread", get().to(unread::<MemStore>))
                        .route("/unread/count", get().to(unread_count::<MemStore>))
                        .route("/all", get().to(all::<MemStore>))
                        .route("/read", get().to(read::<MemStore>))
                        .route("/mark-as-read", patch().to(mark_as_read::<MemStore>)),
                ),
            )
            .await
        };
    }

    fn bearer() -> (&'static str, String) {
        let claims = serde_json::json!({"admin_id": 1, "email": "president@uni.edu", "role": "SuperAdmin", "exp": Utc::now().timestamp() + 3600});
        let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET)).unwrap();
        ("Authorization", format!("Bearer {}", token))
    }

    #[actix_web::test]
    async fn test_inbox_routes() {
        let store = MemStore::default();
        let app = inbox_app!(store);

        let req = test::TestRequest::get().uri("/notification_admin/unread?admin_email=president@uni.edu").insert_header(bearer()).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "No unread notifications.");

        let req = test::TestRequest::post()
            .uri("/notification_admin/add")
            .insert_header(bearer())
            .set_json(serde_json::json!({"admin_email": "president@uni.edu", "notification": "Request membership from alice@uni.edu"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: serde_json::Value = test::read_body_json(resp).await;
        let id = body["notification_id"].as_i64().unwrap();

        let req = test::TestRequest::get().uri("/notification_admin/unread/count?admin_email=president@uni.edu").insert_header(bearer()).to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, serde_json::json!({"unread_count": 1}));

        let req = test::TestRequest::get().uri("/notification_admin/unread?admin_email=president@uni.edu").insert_header(bearer()).to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["unread_notifications"][0]["notification"], "Request membership from alice@uni.edu");

        let req = test::TestRequest::patch()
            .uri("/notification_admin/mark-as-read")
            .insert_header(bearer())
            .set_json(serde_json::json!({"admin_email": "president@uni.edu", "notification_id": id}))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, serde_json::json!({"message": "Notification marked as read.", "updated": 1}));

        let req = test::TestRequest::get().uri("/notification_admin/read?admin_email=president@uni.edu").insert_header(bearer()).to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["read_notifications"][0]["is_read"], true);

        let req = test::TestRequest::get().uri("/notification_admin/all?admin_email=treasurer@uni.edu").insert_header(bearer()).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "No notifications found for the admin.");
    }

    #[actix_web::test]
    async fn test_inbox_routes_require_admin_email() {
        let store = MemStore::default();
        let app = inbox_app!(store);
        let req = test::TestRequest::get().uri("/notification_admin/unread/count").insert_header(bearer()).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "admin_email is required");
    }

    #[::core::prelude::v1::test]
    fn test_listing_key() {
        let now = Utc::now();
        let n = Notification {
            id: 1,
            admin_email: "president@uni.edu".into(),
            notification: "Request membership from alice@uni.edu".into(),
            is_read: false,
            created_at: now,
            updated_at: now,
        };
        let body = listing("unread_notifications", vec![n]);
        assert_eq!(body["unread_notifications"][0]["admin_email"], "president@uni.edu");
        assert_eq!(body["unread_notifications"][0]["is_read"], false);
    }

    #[::core::prelude::v1::test]
    fn test_created_body() {
        let body = serde_json::to_value(Reply::new("Notification added successfully.", NotificationId { notification_id: 3 })).unwrap();
        assert_eq!(body, serde_json::json!({"message": "Notification added successfully.", "notification_id": 3}));
    }
}
