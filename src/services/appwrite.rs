use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::time::Duration;

use crate::models::{Club, Event, StudentProfile};
use crate::services::store::{
    with_attendee, with_follower, without_attendee, without_follower, DocumentStore, StoreCollections,
    StoreError,
};

/// Default number of documents requested per page
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Appwrite databases API client
///
/// Handles all communication with the hosted document database:
/// - Listing the club and event catalogs (paginated)
/// - Fetching single student, club and event documents
/// - Updating follower, attendee and joined-club arrays
pub struct AppwriteStore {
    base_url: String,
    api_key: String,
    project_id: String,
    database_id: String,
    client: Client,
    collections: StoreCollections,
    page_size: usize,
}

impl AppwriteStore {
    /// Create a new Appwrite client
    pub fn new(
        base_url: String,
        api_key: String,
        project_id: String,
        database_id: String,
        collections: StoreCollections,
        timeout: Duration,
    ) -> Result<Self, StoreError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            api_key,
            project_id,
            database_id,
            client,
            collections,
            page_size: DEFAULT_PAGE_SIZE,
        })
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    fn documents_url(&self, collection: &str) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.base_url.trim_end_matches('/'),
            self.database_id,
            collection
        )
    }

    fn document_url(&self, collection: &str, id: &str) -> String {
        format!("{}/{}", self.documents_url(collection), urlencoding::encode(id))
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
    }

    fn check_status(status: StatusCode, what: &str) -> Result<(), StoreError> {
        match status {
            s if s.is_success() => Ok(()),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(StoreError::Unauthorized),
            StatusCode::NOT_FOUND => Err(StoreError::NotFound(what.to_string())),
            s => Err(StoreError::ApiError(format!("{}: {}", what, s))),
        }
    }

    /// List every document of a collection, following offset pagination
    async fn list_documents<T: DeserializeOwned>(
        &self,
        collection: &str,
        filters: &[String],
    ) -> Result<Vec<T>, StoreError> {
        let url = self.documents_url(collection);
        let mut offset = 0usize;
        let mut records = Vec::new();

        loop {
            let mut queries = filters.to_vec();
            queries.push(format!("limit({})", self.page_size));
            queries.push(format!("offset({})", offset));

            let query_string = queries
                .iter()
                .map(|q| format!("queries[]={}", urlencoding::encode(q)))
                .collect::<Vec<_>>()
                .join("&");
            let full_url = format!("{}?{}", url, query_string);

            tracing::debug!("Listing {} documents from offset {}", collection, offset);

            let response = self.authorized(self.client.get(&full_url)).send().await?;
            Self::check_status(response.status(), &format!("list {}", collection))?;

            let json: Value = response.json().await?;
            let documents = json
                .get("documents")
                .and_then(|d| d.as_array())
                .ok_or_else(|| StoreError::InvalidResponse("Missing documents array".into()))?;

            let page_len = documents.len();
            records.extend(documents.iter().filter_map(|doc| {
                let parsed = parse_document(doc);
                if parsed.is_none() {
                    tracing::warn!("Skipping malformed document in {}", collection);
                }
                parsed
            }));

            if page_len < self.page_size {
                break;
            }
            offset += page_len;
        }

        tracing::debug!("Listed {} documents from {}", records.len(), collection);

        Ok(records)
    }

    /// Fetch one document, `None` if it does not exist
    async fn get_document<T: DeserializeOwned>(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<T>, StoreError> {
        let response = self
            .authorized(self.client.get(self.document_url(collection, id)))
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Self::check_status(response.status(), &format!("get {}/{}", collection, id))?;

        let json: Value = response.json().await?;
        parse_document(&json)
            .map(Some)
            .ok_or_else(|| StoreError::InvalidResponse(format!("Failed to parse {}/{}", collection, id)))
    }

    async fn patch_document(&self, collection: &str, id: &str, data: Value) -> Result<(), StoreError> {
        let response = self
            .authorized(self.client.patch(self.document_url(collection, id)))
            .json(&json!({ "data": data }))
            .send()
            .await?;

        Self::check_status(response.status(), &format!("update {}/{}", collection, id))?;

        tracing::debug!("Updated document {}/{}", collection, id);
        Ok(())
    }

    async fn require_club(&self, club_id: &str) -> Result<Club, StoreError> {
        self.get_club(club_id)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("Club {}", club_id)))
    }

    async fn require_event(&self, event_id: &str) -> Result<Event, StoreError> {
        self.get_event(event_id)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("Event {}", event_id)))
    }
}

/// Turn an Appwrite document into a record.
///
/// Attributes may sit at the top level or under `data`; the `$id` system
/// attribute becomes `id`.
fn parse_document<T: DeserializeOwned>(doc: &Value) -> Option<T> {
    let data = doc.get("data").filter(|d| d.is_object()).unwrap_or(doc);
    let mut object = data.as_object()?.clone();

    let system_id = doc.get("$id").or_else(|| object.get("$id")).cloned();
    object.remove("$id");
    if !object.contains_key("id") {
        if let Some(id) = system_id {
            object.insert("id".to_string(), id);
        }
    }

    serde_json::from_value(Value::Object(object)).ok()
}

#[async_trait]
impl DocumentStore for AppwriteStore {
    async fn list_clubs(&self) -> Result<Vec<Club>, StoreError> {
        self.list_documents(&self.collections.clubs, &[]).await
    }

    async fn list_events(&self) -> Result<Vec<Event>, StoreError> {
        self.list_documents(&self.collections.events, &[]).await
    }

    async fn list_club_events(&self, club_id: &str) -> Result<Vec<Event>, StoreError> {
        let filter = format!("equal(\"clubId\", [{}])", Value::String(club_id.to_string()));
        self.list_documents(&self.collections.events, &[filter]).await
    }

    async fn get_student(&self, uid: &str) -> Result<Option<StudentProfile>, StoreError> {
        self.get_document(&self.collections.users, uid).await
    }

    async fn get_club(&self, club_id: &str) -> Result<Option<Club>, StoreError> {
        self.get_document(&self.collections.clubs, club_id).await
    }

    async fn get_event(&self, event_id: &str) -> Result<Option<Event>, StoreError> {
        self.get_document(&self.collections.events, event_id).await
    }

    async fn set_joined_clubs(&self, uid: &str, joined: &[String]) -> Result<(), StoreError> {
        self.patch_document(&self.collections.users, uid, json!({ "joinedClubs": joined }))
            .await
    }

    async fn add_follower(&self, club_id: &str, uid: &str) -> Result<(), StoreError> {
        let club = self.require_club(club_id).await?;
        let followers = with_follower(&club.followers, uid);
        self.patch_document(&self.collections.clubs, club_id, json!({ "followers": followers }))
            .await
    }

    async fn remove_follower(&self, club_id: &str, uid: &str) -> Result<(), StoreError> {
        let club = self.require_club(club_id).await?;
        let followers = without_follower(&club.followers, uid);
        self.patch_document(&self.collections.clubs, club_id, json!({ "followers": followers }))
            .await
    }

    async fn add_attendee(&self, event_id: &str, uid: &str) -> Result<Vec<String>, StoreError> {
        let event = self.require_event(event_id).await?;
        let attendees = with_attendee(&event.attendees, uid);
        self.patch_document(&self.collections.events, event_id, json!({ "attendees": attendees }))
            .await?;
        Ok(attendees)
    }

    async fn remove_attendee(&self, event_id: &str, uid: &str) -> Result<Vec<String>, StoreError> {
        let event = self.require_event(event_id).await?;
        let attendees = without_attendee(&event.attendees, uid);
        self.patch_document(&self.collections.events, event_id, json!({ "attendees": attendees }))
            .await?;
        Ok(attendees)
    }

    async fn delete_event(&self, event_id: &str) -> Result<(), StoreError> {
        let response = self
            .authorized(self.client.delete(self.document_url(&self.collections.events, event_id)))
            .send()
            .await?;

        Self::check_status(response.status(), &format!("delete event {}", event_id))?;

        tracing::info!("Deleted event {}", event_id);
        Ok(())
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        let url = format!("{}/databases/{}", self.base_url.trim_end_matches('/'), self.database_id);
        let response = self.authorized(self.client.get(&url)).send().await?;
        Ok(response.status().is_success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn store(base_url: String) -> AppwriteStore {
        AppwriteStore::new(
            base_url,
            "test_key".to_string(),
            "test_project".to_string(),
            "test_db".to_string(),
            StoreCollections::default(),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn test_appwrite_store_creation() {
        let store = store("https://appwrite.test/v1/".to_string()).with_page_size(0);

        assert_eq!(
            store.documents_url("clubs"),
            "https://appwrite.test/v1/databases/test_db/collections/clubs/documents"
        );
        assert_eq!(store.page_size, 1);
    }

    #[test]
    fn test_parse_document_maps_system_id() {
        let doc = json!({
            "$id": "club1",
            "$createdAt": "2024-01-01T00:00:00.000+00:00",
            "name": "Chess",
            "followers": ["u1"]
        });

        let club: Club = parse_document(&doc).unwrap();
        assert_eq!(club.id, "club1");
        assert_eq!(club.name, "Chess");
        assert_eq!(club.follower_count(), 1);
    }

    #[tokio::test]
    async fn test_list_clubs_parses_documents() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock(
                "GET",
                Matcher::Regex(r"^/databases/test_db/collections/clubs/documents".to_string()),
            )
            .match_query(Matcher::Any)
            .match_header("X-Appwrite-Key", "test_key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "total": 2,
                    "documents": [
                        { "$id": "c1", "name": "Chess", "tags": ["strategy"], "followers": 4 },
                        { "$id": "c2", "name": "Art", "tags": null }
                    ]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let clubs = store(server.url()).list_clubs().await.unwrap();

        mock.assert_async().await;
        assert_eq!(clubs.len(), 2);
        assert_eq!(clubs[0].follower_count(), 4);
        assert!(clubs[1].tags.is_empty());
    }

    #[tokio::test]
    async fn test_missing_student_is_none() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/databases/test_db/collections/users/documents/nobody")
            .with_status(404)
            .with_body(r#"{"message":"Document not found"}"#)
            .create_async()
            .await;

        let student = store(server.url()).get_student("nobody").await.unwrap();
        assert!(student.is_none());
    }

    #[tokio::test]
    async fn test_unauthorized_maps_to_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock(
                "GET",
                Matcher::Regex(r"^/databases/test_db/collections/events/documents".to_string()),
            )
            .match_query(Matcher::Any)
            .with_status(401)
            .create_async()
            .await;

        let result = store(server.url()).list_events().await;
        assert!(matches!(result, Err(StoreError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_add_attendee_patches_union() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/databases/test_db/collections/events/documents/e1")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({ "$id": "e1", "clubName": "Chess", "attendees": ["u1"] }).to_string())
            .create_async()
            .await;
        let patch = server
            .mock("PATCH", "/databases/test_db/collections/events/documents/e1")
            .match_body(Matcher::Json(json!({ "data": { "attendees": ["u1", "u2"] } })))
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let attendees = store(server.url()).add_attendee("e1", "u2").await.unwrap();

        patch.assert_async().await;
        assert_eq!(attendees, vec!["u1", "u2"]);
    }
}
