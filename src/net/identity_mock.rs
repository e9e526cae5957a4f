//! Scripted in-memory identity backend for unit tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures::channel::oneshot;

use super::{BackendError, IdentityBackend, ListenerId, SessionListener, code};
use crate::net::types::ProviderUser;

pub(crate) fn record(id: &str, email: &str) -> ProviderUser {
    ProviderUser {
        local_id: id.to_owned(),
        email: email.to_owned(),
        display_name: None,
        photo_url: None,
        email_verified: Some(false),
    }
}

#[derive(Default)]
pub(crate) struct MockBackend {
    inner: Mutex<MockInner>,
}

#[derive(Default)]
struct MockInner {
    sign_in: Option<Result<ProviderUser, BackendError>>,
    create: Option<Result<ProviderUser, BackendError>>,
    update: Option<BackendError>,
    popup: Option<Result<ProviderUser, BackendError>>,
    sign_out: Option<BackendError>,
    sign_in_gate: Option<oneshot::Receiver<()>>,
    current: Option<ProviderUser>,
    listeners: Vec<(ListenerId, SessionListener)>,
    next_id: u64,
    calls: Vec<&'static str>,
    profile_updates: Vec<String>,
}

impl MockBackend {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn as_dyn(self: &Arc<Self>) -> Arc<dyn IdentityBackend> {
        Arc::clone(self) as Arc<dyn IdentityBackend>
    }

    pub(crate) fn script_sign_in(&self, result: Result<ProviderUser, BackendError>) {
        self.inner.lock().unwrap().sign_in = Some(result);
    }

    pub(crate) fn script_create(&self, result: Result<ProviderUser, BackendError>) {
        self.inner.lock().unwrap().create = Some(result);
    }

    pub(crate) fn fail_update(&self, error: BackendError) {
        self.inner.lock().unwrap().update = Some(error);
    }

    pub(crate) fn script_popup(&self, result: Result<ProviderUser, BackendError>) {
        self.inner.lock().unwrap().popup = Some(result);
    }

    pub(crate) fn fail_sign_out(&self, error: BackendError) {
        self.inner.lock().unwrap().sign_out = Some(error);
    }

    /// Block the next `sign_in_with_password` until `gate` resolves.
    pub(crate) fn hold_sign_in(&self, gate: oneshot::Receiver<()>) {
        self.inner.lock().unwrap().sign_in_gate = Some(gate);
    }

    pub(crate) fn set_current(&self, user: Option<ProviderUser>) {
        self.inner.lock().unwrap().current = user;
    }

    /// Fire a session-change notification to every listener.
    pub(crate) fn emit(&self, user: Option<ProviderUser>) {
        let listeners: Vec<SessionListener> = {
            let mut inner = self.inner.lock().unwrap();
            inner.current.clone_from(&user);
            inner.listeners.iter().map(|(_, l)| Arc::clone(l)).collect()
        };
        for listener in listeners {
            listener(user.clone());
        }
    }

    pub(crate) fn listener_count(&self) -> usize {
        self.inner.lock().unwrap().listeners.len()
    }

    pub(crate) fn calls(&self) -> Vec<&'static str> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub(crate) fn profile_updates(&self) -> Vec<String> {
        self.inner.lock().unwrap().profile_updates.clone()
    }

    fn record_call(&self, name: &'static str) {
        self.inner.lock().unwrap().calls.push(name);
    }
}

#[async_trait(?Send)]
impl IdentityBackend for MockBackend {
    async fn sign_in_with_password(&self, email: &str, _password: &str) -> Result<ProviderUser, BackendError> {
        self.record_call("sign_in_with_password");
        let gate = self.inner.lock().unwrap().sign_in_gate.take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        let scripted = self.inner.lock().unwrap().sign_in.take();
        let result = scripted.unwrap_or_else(|| Ok(record("uid-1", email)));
        if let Ok(user) = &result {
            self.inner.lock().unwrap().current = Some(user.clone());
        }
        result
    }

    async fn create_user(&self, email: &str, _password: &str) -> Result<ProviderUser, BackendError> {
        self.record_call("create_user");
        let scripted = self.inner.lock().unwrap().create.take();
        let result = scripted.unwrap_or_else(|| Ok(record("uid-new", email)));
        if let Ok(user) = &result {
            self.inner.lock().unwrap().current = Some(user.clone());
        }
        result
    }

    async fn update_profile(&self, display_name: &str) -> Result<ProviderUser, BackendError> {
        self.record_call("update_profile");
        let mut inner = self.inner.lock().unwrap();
        inner.profile_updates.push(display_name.to_owned());
        if let Some(error) = inner.update.take() {
            return Err(error);
        }
        let Some(current) = inner.current.as_mut() else {
            return Err(BackendError::coded(code::NO_CURRENT_USER, "no user"));
        };
        current.display_name = Some(display_name.to_owned());
        Ok(current.clone())
    }

    async fn sign_in_with_popup(&self) -> Result<ProviderUser, BackendError> {
        self.record_call("sign_in_with_popup");
        let scripted = self.inner.lock().unwrap().popup.take();
        scripted.unwrap_or_else(|| {
            let mut user = record("uid-google", "g@example.com");
            user.display_name = Some("Grace".to_owned());
            user.email_verified = Some(true);
            Ok(user)
        })
    }

    async fn sign_out(&self) -> Result<(), BackendError> {
        self.record_call("sign_out");
        let mut inner = self.inner.lock().unwrap();
        if let Some(error) = inner.sign_out.take() {
            return Err(error);
        }
        inner.current = None;
        Ok(())
    }

    fn current_user(&self) -> Option<ProviderUser> {
        self.inner.lock().unwrap().current.clone()
    }

    fn add_listener(&self, listener: SessionListener) -> ListenerId {
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        let id = ListenerId(inner.next_id);
        inner.listeners.push((id, listener));
        id
    }

    fn remove_listener(&self, id: ListenerId) {
        self.inner.lock().unwrap().listeners.retain(|(l, _)| *l != id);
    }
}
