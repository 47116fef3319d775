//! Producer state and the two-lock protocol.
//!
//! Two independently guarded regions feed the overlay:
//! - [`HookState`]: the local capture side (one holder + an `initialized` flag).
//! - [`NetworkState`]: the remote side (an `active` flag + one holder per client).
//!
//! Producer threads lock only their own region. The render thread is the only
//! place both are held at once, through [`Producers::lock`], which always takes
//! the hook lock before the network lock.
//!
//! # Example
//! ```
//! use stickup_overlay::producer::{ActiveSource, Producers};
//! use stickup_overlay::event::InputKind;
//!
//! let producers = Producers::new();
//! producers.with_hook(|hook| {
//!     hook.apply(&InputKind::KeyPressed { code: 0x41 });
//! });
//!
//! let guard = producers.lock();
//! assert_eq!(guard.select(0), Some(ActiveSource::Local));
//! ```

use crate::event::InputKind;
use crate::holder::ElementDataHolder;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Local capture state.
#[derive(Debug, Default)]
pub struct HookState {
    /// Set once the capture side has produced its first batch.
    pub initialized: bool,
    pub data: ElementDataHolder,
}

impl HookState {
    /// Apply one event and mark the hook as initialized.
    pub fn apply(&mut self, kind: &InputKind) {
        self.data.apply(kind);
        self.initialized = true;
    }
}

/// One connected remote feed.
#[derive(Debug, Default)]
pub struct RemoteClient {
    pub name: String,
    pub data: ElementDataHolder,
}

impl RemoteClient {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: ElementDataHolder::new(),
        }
    }

    pub fn apply(&mut self, kind: &InputKind) {
        self.data.apply(kind);
    }

    /// Clear wheel direction and mouse motion. The receive loop calls this
    /// before applying each packet so remote scrolls don't stick.
    pub fn decay(&mut self) {
        self.data.decay();
    }
}

/// Remote feed state.
#[derive(Debug, Default)]
pub struct NetworkState {
    /// Whether the receive side is running.
    pub active: bool,
    clients: Vec<RemoteClient>,
}

impl NetworkState {
    /// Register a client and return its 0-based index.
    pub fn connect(&mut self, name: impl Into<String>) -> usize {
        self.clients.push(RemoteClient::new(name));
        self.clients.len() - 1
    }

    /// Remove a client. Indices of later clients shift down by one.
    pub fn disconnect(&mut self, index: usize) -> Option<RemoteClient> {
        (index < self.clients.len()).then(|| self.clients.remove(index))
    }

    pub fn client(&self, index: usize) -> Option<&RemoteClient> {
        self.clients.get(index)
    }

    pub fn client_mut(&mut self, index: usize) -> Option<&mut RemoteClient> {
        self.clients.get_mut(index)
    }

    pub fn clients(&self) -> &[RemoteClient] {
        &self.clients
    }
}

/// Which producer a refresh cycle reads from. Resolved once per cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActiveSource {
    Local,
    /// 0-based client index.
    Remote(usize),
}

impl ActiveSource {
    /// Map the external selected-source setting (0 = local, `n` = client `n - 1`).
    pub fn from_setting(selected_source: u32, network_active: bool) -> Self {
        if network_active && selected_source > 0 {
            ActiveSource::Remote(selected_source as usize - 1)
        } else {
            ActiveSource::Local
        }
    }
}

/// Shared handles to both producer regions.
#[derive(Clone, Debug, Default)]
pub struct Producers {
    hook: Arc<Mutex<HookState>>,
    network: Arc<Mutex<NetworkState>>,
}

impl Producers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hook(&self) -> &Arc<Mutex<HookState>> {
        &self.hook
    }

    pub fn network(&self) -> &Arc<Mutex<NetworkState>> {
        &self.network
    }

    /// Run `f` with only the hook lock held.
    pub fn with_hook<R>(&self, f: impl FnOnce(&mut HookState) -> R) -> R {
        f(&mut self.hook.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// Run `f` with only the network lock held.
    pub fn with_network<R>(&self, f: impl FnOnce(&mut NetworkState) -> R) -> R {
        f(&mut self.network.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// Take both locks, hook first.
    ///
    /// A poisoned lock is recovered: a producer that panicked mid-write leaves
    /// at worst a stale record, which is better than a dead render thread.
    pub fn lock(&self) -> ProducerGuard<'_> {
        let hook = self.hook.lock().unwrap_or_else(PoisonError::into_inner);
        let network = self.network.lock().unwrap_or_else(PoisonError::into_inner);
        ProducerGuard { hook, network }
    }
}

/// Both producer locks, held for one refresh cycle.
pub struct ProducerGuard<'a> {
    hook: MutexGuard<'a, HookState>,
    network: MutexGuard<'a, NetworkState>,
}

impl ProducerGuard<'_> {
    /// Pick the producer for this cycle, or `None` when neither side has data.
    pub fn select(&self, selected_source: u32) -> Option<ActiveSource> {
        if !self.hook.initialized && !self.network.active {
            return None;
        }
        Some(ActiveSource::from_setting(
            selected_source,
            self.network.active,
        ))
    }

    /// The holder for `source`. `None` if a remote index has no client.
    pub fn holder(&self, source: ActiveSource) -> Option<&ElementDataHolder> {
        match source {
            ActiveSource::Local => Some(&self.hook.data),
            ActiveSource::Remote(index) => self.network.client(index).map(|c| &c.data),
        }
    }
}
