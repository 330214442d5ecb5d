use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use imsakia::errors::{ImsakiaError, Result};
use imsakia::services::resolver::{
    DEFAULT_CITY, DEFAULT_CLIENT_NAME, PageQuery, ResolverService, default_profile,
};
use imsakia::storage::{ClientProfile, LinkRecord, LinkStore};

// In-memory store standing in for the database.
#[derive(Default)]
struct MockStore {
    data: Mutex<HashMap<String, LinkRecord>>,
    should_fail: Mutex<bool>,
}

impl MockStore {
    fn failing() -> Self {
        Self {
            data: Mutex::new(HashMap::new()),
            should_fail: Mutex::new(true),
        }
    }

    fn insert_payload(&self, slug: &str, payload: &str) {
        let now = chrono::Utc::now();
        self.data.lock().unwrap().insert(
            slug.to_string(),
            LinkRecord {
                slug: slug.to_string(),
                payload: payload.to_string(),
                created_at: now,
                updated_at: now,
            },
        );
    }
}

#[async_trait::async_trait]
impl LinkStore for MockStore {
    async fn get(&self, slug: &str) -> Result<Option<LinkRecord>> {
        if *self.should_fail.lock().unwrap() {
            return Err(ImsakiaError::database_operation("mock store error"));
        }
        Ok(self.data.lock().unwrap().get(slug).cloned())
    }

    async fn upsert(&self, record: LinkRecord) -> Result<()> {
        if *self.should_fail.lock().unwrap() {
            return Err(ImsakiaError::database_operation("mock store error"));
        }
        self.data
            .lock()
            .unwrap()
            .insert(record.slug.clone(), record);
        Ok(())
    }

    async fn load_all(&self) -> Result<Vec<LinkRecord>> {
        Ok(self.data.lock().unwrap().values().cloned().collect())
    }

    async fn backend_name(&self) -> String {
        "mock".to_string()
    }
}

fn resolver_for(store: Arc<MockStore>) -> ResolverService {
    ResolverService::new(store, "123", Duration::from_secs(1))
}

fn query(s: Option<&str>, admin: Option<&str>) -> PageQuery {
    PageQuery {
        s: s.map(str::to_string),
        admin: admin.map(str::to_string),
    }
}

fn sample_profile() -> ClientProfile {
    ClientProfile {
        name: "متجر فورصة".to_string(),
        city: Some("الرياض".to_string()),
        whatsapp: Some("201001234567".to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_path_and_query_slug_resolve_identically() {
    let store = Arc::new(MockStore::default());
    store.insert_payload("foursa", &serde_json::to_string(&sample_profile()).unwrap());
    let resolver = resolver_for(store);

    let via_path = resolver.resolve("foursa", &query(None, None)).await;
    let via_query = resolver.resolve("", &query(Some("foursa"), None)).await;

    assert_eq!(via_path.profile, via_query.profile);
    assert_eq!(via_path.slug.as_deref(), Some("foursa"));
    assert_eq!(via_query.slug.as_deref(), Some("foursa"));
}

#[tokio::test]
async fn test_path_takes_precedence_over_query() {
    let store = Arc::new(MockStore::default());
    let mut other = sample_profile();
    other.name = "متجر آخر".to_string();
    store.insert_payload("first", &serde_json::to_string(&sample_profile()).unwrap());
    store.insert_payload("second", &serde_json::to_string(&other).unwrap());
    let resolver = resolver_for(store);

    let resolved = resolver.resolve("first", &query(Some("second"), None)).await;
    assert_eq!(resolved.slug.as_deref(), Some("first"));
    assert_eq!(resolved.profile.name, "متجر فورصة");
}

#[tokio::test]
async fn test_unknown_slug_yields_exact_default_profile() {
    let store = Arc::new(MockStore::default());
    let resolver = resolver_for(store);

    let resolved = resolver.resolve("ghost", &query(None, None)).await;
    assert_eq!(resolved.profile, default_profile());
    assert_eq!(resolved.profile.name, DEFAULT_CLIENT_NAME);
    assert_eq!(resolved.profile.name, "إمساكية رمضان الذكية");
    assert_eq!(resolved.profile.city.as_deref(), Some(DEFAULT_CITY));
    assert_eq!(resolved.profile.city.as_deref(), Some("القاهرة"));
}

#[tokio::test]
async fn test_no_slug_yields_default_profile() {
    let store = Arc::new(MockStore::default());
    let resolver = resolver_for(store);

    let resolved = resolver.resolve("", &query(None, None)).await;
    assert!(resolved.slug.is_none());
    assert_eq!(resolved.profile, default_profile());
}

#[tokio::test]
async fn test_store_failure_falls_back_silently() {
    let store = Arc::new(MockStore::failing());
    let resolver = resolver_for(store);

    let resolved = resolver.resolve("anything", &query(None, None)).await;
    assert_eq!(resolved.profile, default_profile());
}

#[tokio::test]
async fn test_empty_payload_falls_back() {
    let store = Arc::new(MockStore::default());
    store.insert_payload("hollow", "   ");
    let resolver = resolver_for(store);

    let resolved = resolver.resolve("hollow", &query(None, None)).await;
    assert_eq!(resolved.profile, default_profile());
}

#[tokio::test]
async fn test_undecodable_payload_falls_back() {
    let store = Arc::new(MockStore::default());
    store.insert_payload("broken", "{not json");
    let resolver = resolver_for(store);

    let resolved = resolver.resolve("broken", &query(None, None)).await;
    assert_eq!(resolved.profile, default_profile());
}

#[tokio::test]
async fn test_string_and_object_payloads_decode_identically() {
    let store = Arc::new(MockStore::default());
    let object_form = serde_json::to_string(&sample_profile()).unwrap();
    let string_form = serde_json::to_string(&object_form).unwrap();
    store.insert_payload("as-object", &object_form);
    store.insert_payload("as-string", &string_form);
    let resolver = resolver_for(store);

    let from_object = resolver.resolve("as-object", &query(None, None)).await;
    let from_string = resolver.resolve("as-string", &query(None, None)).await;

    assert_eq!(from_object.profile, from_string.profile);
    assert_eq!(from_object.profile, sample_profile());
}

#[tokio::test]
async fn test_lookup_lowercases_and_trims_slug() {
    let store = Arc::new(MockStore::default());
    store.insert_payload("foursa", &serde_json::to_string(&sample_profile()).unwrap());
    let resolver = resolver_for(store);

    let resolved = resolver.resolve("FOURSA", &query(None, None)).await;
    assert_eq!(resolved.profile.name, "متجر فورصة");

    let resolved = resolver.resolve("", &query(Some("  FourSA  "), None)).await;
    assert_eq!(resolved.profile.name, "متجر فورصة");
}

#[tokio::test]
async fn test_first_non_empty_path_segment_wins() {
    let store = Arc::new(MockStore::default());
    store.insert_payload("foursa", &serde_json::to_string(&sample_profile()).unwrap());
    let resolver = resolver_for(store);

    let resolved = resolver.resolve("foursa/anything/else", &query(None, None)).await;
    assert_eq!(resolved.slug.as_deref(), Some("foursa"));
    assert_eq!(resolved.profile.name, "متجر فورصة");
}

#[tokio::test]
async fn test_admin_flag_matrix() {
    let store = Arc::new(MockStore::default());
    let resolver = resolver_for(store);

    let resolved = resolver.resolve("", &query(None, Some("123"))).await;
    assert!(resolved.admin);

    let resolved = resolver.resolve("", &query(None, Some("456"))).await;
    assert!(!resolved.admin);

    let resolved = resolver.resolve("", &query(None, Some(""))).await;
    assert!(!resolved.admin);

    let resolved = resolver.resolve("", &query(None, None)).await;
    assert!(!resolved.admin);
}

#[tokio::test]
async fn test_admin_flag_is_independent_of_lookup_outcome() {
    let store = Arc::new(MockStore::failing());
    let resolver = resolver_for(store);

    let resolved = resolver.resolve("ghost", &query(None, Some("123"))).await;
    assert!(resolved.admin);
    assert_eq!(resolved.profile, default_profile());
}
