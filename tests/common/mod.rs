#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, Once};

use agenda::models::{Appointment, AppointmentSummary, Notification, ProviderProfile, User};
use agenda::repo::{
    AppointmentRepository, NotificationRepository, RepoError, UserRepository,
};
use agenda::services::jwt::JwtService;
use agenda::utils::time::start_of_hour;
use async_trait::async_trait;
use jsonwebtoken::{DecodingKey, EncodingKey};
use time::format_description::well_known::Rfc3339;
use time::{OffsetDateTime, UtcOffset};
use tokio::net::TcpListener;

pub fn init_tracing_once() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("agenda=debug")
            .with_test_writer()
            .init();
    });
}

/// In-memory user directory for integration tests.
#[derive(Debug, Default)]
pub struct InMemoryUsers {
    users: Mutex<HashMap<i64, User>>,
}

impl InMemoryUsers {
    pub fn insert(&self, user: User) {
        self.users.lock().unwrap().insert(user.id, user);
    }

    fn get(&self, id: i64) -> Option<User> {
        self.users.lock().unwrap().get(&id).cloned()
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepoError> {
        Ok(self.get(id))
    }
}

#[derive(Debug, Default)]
struct AppointmentStore {
    rows: Vec<Appointment>,
    next_id: i64,
}

/// In-memory appointment store for integration tests.
///
/// The whole store sits behind one mutex, so the conflict check inside
/// `insert` is atomic with the write. That mirrors the partial unique index
/// the Postgres implementation relies on: even when two requests pass the
/// engine's advisory availability check, only one insert can win the slot.
#[derive(Debug)]
pub struct InMemoryAppointments {
    store: Mutex<AppointmentStore>,
    users: Arc<InMemoryUsers>,
}

impl InMemoryAppointments {
    pub fn new(users: Arc<InMemoryUsers>) -> Self {
        Self {
            store: Mutex::new(AppointmentStore::default()),
            users,
        }
    }

    /// Snapshot of every stored appointment, canceled ones included.
    pub fn all(&self) -> Vec<Appointment> {
        self.store.lock().unwrap().rows.clone()
    }
}

#[async_trait]
impl AppointmentRepository for InMemoryAppointments {
    async fn insert(
        &self,
        requester_id: i64,
        provider_id: i64,
        date: OffsetDateTime,
    ) -> Result<Appointment, RepoError> {
        let mut store = self.store.lock().unwrap();

        let slot = start_of_hour(date.to_offset(UtcOffset::UTC));
        let taken = store.rows.iter().any(|row| {
            row.provider_id == provider_id
                && row.canceled_at.is_none()
                && start_of_hour(row.date.to_offset(UtcOffset::UTC)) == slot
        });
        if taken {
            return Err(RepoError::DuplicateSlot);
        }

        store.next_id += 1;
        let appointment = Appointment {
            id: store.next_id,
            requester_id,
            provider_id,
            date,
            canceled_at: None,
            created_at: OffsetDateTime::now_utc(),
        };
        store.rows.push(appointment.clone());
        Ok(appointment)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Appointment>, RepoError> {
        let store = self.store.lock().unwrap();
        Ok(store.rows.iter().find(|row| row.id == id).cloned())
    }

    async fn find_active_in_slot(
        &self,
        provider_id: i64,
        hour_start: OffsetDateTime,
    ) -> Result<Option<Appointment>, RepoError> {
        let store = self.store.lock().unwrap();
        Ok(store
            .rows
            .iter()
            .find(|row| {
                row.provider_id == provider_id
                    && row.canceled_at.is_none()
                    && start_of_hour(row.date.to_offset(UtcOffset::UTC)) == hour_start
            })
            .cloned())
    }

    async fn mark_canceled(
        &self,
        id: i64,
        at: OffsetDateTime,
    ) -> Result<Option<Appointment>, RepoError> {
        let mut store = self.store.lock().unwrap();
        let Some(row) = store.rows.iter_mut().find(|row| row.id == id) else {
            return Ok(None);
        };
        if row.canceled_at.is_some() {
            return Ok(None);
        }
        row.canceled_at = Some(at);
        Ok(Some(row.clone()))
    }

    async fn list_active_for_requester(
        &self,
        requester_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<AppointmentSummary>, RepoError> {
        let store = self.store.lock().unwrap();
        let mut active: Vec<&Appointment> = store
            .rows
            .iter()
            .filter(|row| row.requester_id == requester_id && row.canceled_at.is_none())
            .collect();
        active.sort_by_key(|row| row.date);

        Ok(active
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .map(|row| {
                let provider = self
                    .users
                    .get(row.provider_id)
                    .expect("provider should be seeded before listing");
                AppointmentSummary {
                    id: row.id,
                    date: row.date,
                    provider: ProviderProfile {
                        id: provider.id,
                        name: provider.name,
                        avatar_url: provider.avatar_url,
                    },
                }
            })
            .collect())
    }
}

/// In-memory notification sink that records appended notifications for
/// test assertions.
#[derive(Debug, Default)]
pub struct InMemoryNotifications {
    sent: Mutex<Vec<Notification>>,
}

impl InMemoryNotifications {
    /// All notification texts appended for the given recipient, in order.
    pub fn sent_to(&self, recipient_id: i64) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.recipient_id == recipient_id)
            .map(|n| n.content.clone())
            .collect()
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl NotificationRepository for InMemoryNotifications {
    async fn append(&self, recipient_id: i64, content: &str) -> Result<Notification, RepoError> {
        let mut sent = self.sent.lock().unwrap();
        let notification = Notification {
            id: sent.len() as i64 + 1,
            recipient_id,
            content: content.to_string(),
            read: false,
            created_at: OffsetDateTime::now_utc(),
        };
        sent.push(notification.clone());
        Ok(notification)
    }
}

/// A spawned application instance plus handles into its in-memory stores.
pub struct TestApp {
    pub address: String,
    pub users: Arc<InMemoryUsers>,
    pub appointments: Arc<InMemoryAppointments>,
    pub notifications: Arc<InMemoryNotifications>,
    jwt_service: JwtService,
}

impl TestApp {
    /// Seeds a user into the directory. Providers get an avatar reference so
    /// listing enrichment can be asserted against.
    pub fn seed_user(&self, id: i64, name: &str, is_provider: bool) {
        self.users.insert(User {
            id,
            name: name.to_string(),
            email: format!("user{id}@example.com"),
            password_hash: "x".repeat(60),
            is_provider,
            avatar_url: is_provider.then(|| format!("/files/avatar-{id}.jpg")),
        });
    }

    /// Mints a valid access token for the given user id.
    pub fn token_for(&self, user_id: i64) -> String {
        self.jwt_service
            .create_access_token(user_id)
            .expect("Failed to mint test access token")
    }
}

/// Spawns the application with in-memory repositories and returns its
/// address and store handles for testing.
///
/// Returned address format: `http://127.0.0.1:8492`
pub async fn spawn_app() -> TestApp {
    dotenvy::from_filename_override("tests/data/.test.env").unwrap();
    init_tracing_once();

    let users = Arc::new(InMemoryUsers::default());
    let appointments = Arc::new(InMemoryAppointments::new(Arc::clone(&users)));
    let notifications = Arc::new(InMemoryNotifications::default());

    let jwt_secret = std::env::var("JWT_SECRET").expect("JWT_SECRET should be set by .test.env");
    let jwt_service = JwtService::new(
        EncodingKey::from_secret(jwt_secret.as_bytes()),
        DecodingKey::from_secret(jwt_secret.as_bytes()),
    );

    // Randomly choose an available port
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port at localhost");
    let port = listener.local_addr().unwrap().port();

    let app = agenda::app_with_repositories(
        Arc::clone(&users) as Arc<dyn UserRepository>,
        Arc::clone(&appointments) as Arc<dyn AppointmentRepository>,
        Arc::clone(&notifications) as Arc<dyn NotificationRepository>,
    );

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let address = format!("http://127.0.0.1:{port}");

    // Wait for server to be ready
    let client = reqwest::Client::new();
    for _ in 0..10 {
        if client
            .get(format!("{address}/health-check"))
            .send()
            .await
            .is_ok()
        {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    }

    TestApp {
        address,
        users,
        appointments,
        notifications,
        jwt_service,
    }
}

/// RFC 3339 timestamp for the slot `hours_from_now` whole hours after the
/// current hour, at the given minute. Always a future hour for
/// `hours_from_now >= 1`.
pub fn slot_at(hours_from_now: i64, minute: u8) -> String {
    let base = start_of_hour(OffsetDateTime::now_utc()) + time::Duration::hours(hours_from_now);
    base.replace_minute(minute)
        .unwrap()
        .format(&Rfc3339)
        .unwrap()
}
