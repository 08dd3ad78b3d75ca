//! Shared fixtures for integration tests.
//!
//! An in-memory store implements both repository traits so the real
//! services, guard and handlers run without a database.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, Response};
use axum::Router;
use chrono::Utc;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use church_portal::api::{create_router, AppState};
use church_portal::config::{Config, MSG_CHURCH_NOT_FOUND, MSG_USER_NOT_FOUND, SESSION_COOKIE_NAME};
use church_portal::domain::{
    hash_password, normalize_email, Church, ChurchInput, ChurchSummary, MemberSummary, NewUser,
    RoleCount, SafeUser, User, UserChanges, UserRole,
};
use church_portal::errors::{AppError, AppResult};
use church_portal::infra::{ChurchRepository, UserRepository};
use church_portal::services::Services;

pub const JWT_SECRET: &str = "integration-test-secret-at-least-32-chars";
pub const ADMIN_SECRET: &str = "let-me-in";

#[derive(Default)]
pub struct InMemoryStore {
    users: Mutex<HashMap<Uuid, User>>,
    churches: Mutex<HashMap<Uuid, Church>>,
}

impl InMemoryStore {
    fn with_church(&self, mut user: User) -> User {
        let churches = self.churches.lock().unwrap();
        user.church = user
            .church_id
            .and_then(|id| churches.get(&id))
            .map(ChurchSummary::from);
        user
    }

    pub fn user(&self, id: Uuid) -> Option<User> {
        let user = self.users.lock().unwrap().get(&id).cloned()?;
        Some(self.with_church(user))
    }

    pub fn church(&self, id: Uuid) -> Option<Church> {
        self.churches.lock().unwrap().get(&id).cloned()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.user(id))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let email = normalize_email(email);
        let found = self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email == email)
            .cloned();
        Ok(found.map(|u| self.with_church(u)))
    }

    async fn create(&self, new: NewUser) -> AppResult<User> {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: normalize_email(&new.email),
            name: new.name,
            password_hash: new.password_hash,
            image: None,
            role: new.role,
            is_admin: new.is_admin,
            is_leader: new.is_leader,
            church_id: new.church_id,
            church: None,
            created_at: now,
            updated_at: now,
        };
        self.users.lock().unwrap().insert(user.id, user.clone());
        Ok(self.with_church(user))
    }

    async fn update(&self, id: Uuid, changes: UserChanges) -> AppResult<User> {
        let updated = {
            let mut users = self.users.lock().unwrap();
            let user = users
                .get_mut(&id)
                .ok_or_else(|| AppError::not_found(MSG_USER_NOT_FOUND))?;

            if let Some(email) = changes.email {
                user.email = normalize_email(&email);
            }
            if let Some(name) = changes.name {
                user.name = name;
            }
            if let Some(hash) = changes.password_hash {
                user.password_hash = Some(hash);
            }
            if let Some(image) = changes.image {
                user.image = image;
            }
            if let Some(role) = changes.role {
                user.role = role;
            }
            if let Some(is_admin) = changes.is_admin {
                user.is_admin = is_admin;
            }
            if let Some(is_leader) = changes.is_leader {
                user.is_leader = is_leader;
            }
            if let Some(church_id) = changes.church_id {
                user.church_id = church_id;
            }
            user.updated_at = Utc::now();
            user.clone()
        };
        Ok(self.with_church(updated))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.users
            .lock()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::not_found(MSG_USER_NOT_FOUND))
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let mut users: Vec<User> = self.users.lock().unwrap().values().cloned().collect();
        users.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(users.into_iter().map(|u| self.with_church(u)).collect())
    }

    async fn list_by_church(&self, church_id: Uuid) -> AppResult<Vec<MemberSummary>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .filter(|u| u.church_id == Some(church_id))
            .map(|u| MemberSummary {
                id: u.id,
                name: u.name.clone(),
                email: u.email.clone(),
                role: u.role,
            })
            .collect())
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.users.lock().unwrap().len() as u64)
    }

    async fn count_by_role(&self) -> AppResult<Vec<RoleCount>> {
        let users = self.users.lock().unwrap();
        let mut counts: Vec<RoleCount> = UserRole::ALL
            .into_iter()
            .map(|role| RoleCount {
                role,
                count: users.values().filter(|u| u.role == role).count() as u64,
            })
            .filter(|c| c.count > 0)
            .collect();
        counts.sort_by(|a, b| a.role.as_str().cmp(b.role.as_str()));
        Ok(counts)
    }
}

#[async_trait]
impl ChurchRepository for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Church>> {
        Ok(self.church(id))
    }

    async fn list(&self) -> AppResult<Vec<Church>> {
        let mut churches: Vec<Church> = self.churches.lock().unwrap().values().cloned().collect();
        churches.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(churches)
    }

    async fn create(&self, input: ChurchInput) -> AppResult<Church> {
        let now = Utc::now();
        let church = Church {
            id: Uuid::new_v4(),
            name: input.name,
            address: input.address,
            created_at: now,
            updated_at: now,
        };
        self.churches
            .lock()
            .unwrap()
            .insert(church.id, church.clone());
        Ok(church)
    }

    async fn update(&self, id: Uuid, input: ChurchInput) -> AppResult<Church> {
        let mut churches = self.churches.lock().unwrap();
        let church = churches
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(MSG_CHURCH_NOT_FOUND))?;
        church.name = input.name;
        church.address = input.address;
        church.updated_at = Utc::now();
        Ok(church.clone())
    }

    async fn delete_detaching_members(&self, id: Uuid) -> AppResult<u64> {
        let mut churches = self.churches.lock().unwrap();
        if !churches.contains_key(&id) {
            return Err(AppError::not_found(MSG_CHURCH_NOT_FOUND));
        }

        let mut detached = 0;
        for user in self.users.lock().unwrap().values_mut() {
            if user.church_id == Some(id) {
                user.church_id = None;
                detached += 1;
            }
        }
        churches.remove(&id);
        Ok(detached)
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.churches.lock().unwrap().len() as u64)
    }
}

/// Router plus direct access to the backing store.
pub struct TestApp {
    pub store: Arc<InMemoryStore>,
    pub state: AppState,
    pub router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let config = Config::new(
            "postgres://unused",
            JWT_SECRET,
            Some(ADMIN_SECRET.to_string()),
        )
        .unwrap();

        let store = Arc::new(InMemoryStore::default());
        let services = Services::from_repositories(store.clone(), store.clone(), &config);
        let state = AppState::from_services(&services, config);
        let router = create_router(state.clone());

        Self {
            store,
            state,
            router,
        }
    }

    pub async fn seed_church(&self, name: &str) -> Church {
        ChurchRepository::create(
            self.store.as_ref(),
            ChurchInput {
                name: name.to_string(),
                address: None,
            },
        )
        .await
        .unwrap()
    }

    pub async fn seed_user(
        &self,
        email: &str,
        password: &str,
        role: UserRole,
        is_admin: bool,
        church_id: Option<Uuid>,
    ) -> User {
        UserRepository::create(
            self.store.as_ref(),
            NewUser {
                email: email.to_string(),
                name: email.split('@').next().unwrap_or(email).to_string(),
                password_hash: Some(hash_password(password)),
                role,
                is_admin,
                is_leader: false,
                church_id,
            },
        )
        .await
        .unwrap()
    }

    /// `Cookie` header value carrying a fresh session for `user`.
    pub fn cookie_for(&self, user: &User) -> String {
        let token = self
            .state
            .sessions
            .tokens()
            .issue(&SafeUser::from(user))
            .unwrap();
        format!("{SESSION_COOKIE_NAME}={token}")
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        cookie: Option<&str>,
    ) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.router.clone().oneshot(request).await.unwrap()
    }
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Value of the session cookie set by a response, if any.
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with(&format!("{SESSION_COOKIE_NAME}=")))
        .map(str::to_string)
}
