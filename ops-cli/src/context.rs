use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use auth_identity::{
    ClerkIdentityProvider, IdentityProvider, Session, SessionManager, StaticIdentityProvider,
};
use billing_service::BillingService;
use config_engine::ClinicConfig;
use database_layer::{RemoteStore, RestStore};
use error_common::Notifier;
use records_service::{
    AppointmentStore, Entity, EntityStore, MeetingLinks, PatientStore, PrescriptionStore,
    TeleconsultationStore,
};
use tracing::info;

use crate::offline::OfflineData;

/// Everything a command needs: configuration, backend, identity and output
pub struct AppContext {
    pub config: ClinicConfig,
    pub remote: Arc<dyn RemoteStore>,
    pub notifier: Arc<dyn Notifier>,
    pub sessions: SessionManager,
    pub links: MeetingLinks,
    offline: Option<OfflineData>,
}

impl AppContext {
    /// Hosted database and identity provider
    pub fn online(config: ClinicConfig, notifier: Arc<dyn Notifier>) -> anyhow::Result<Self> {
        config.validate(false)?;

        let timeout = Duration::from_secs(config.store.timeout_secs);
        let remote = RestStore::from_config(&config.store)?;
        let provider = ClerkIdentityProvider::from_config(&config.identity, timeout)?;
        info!(store = %config.store.url, "Using hosted database");

        Ok(Self::assemble(config, Arc::new(remote), Arc::new(provider), notifier, None))
    }

    /// Local data file and the configured offline user
    pub fn offline(config: ClinicConfig, notifier: Arc<dyn Notifier>) -> anyhow::Result<Self> {
        config.validate(true)?;

        let data = OfflineData::load(OfflineData::path_for(&config.identity.session_file))?;
        let provider = StaticIdentityProvider::from_offline(&config.identity.offline_user);
        info!(path = %data.path().display(), "Using offline data file");

        Ok(Self::assemble(config, data.store(), Arc::new(provider), notifier, Some(data)))
    }

    fn assemble(
        config: ClinicConfig,
        remote: Arc<dyn RemoteStore>,
        provider: Arc<dyn IdentityProvider>,
        notifier: Arc<dyn Notifier>,
        offline: Option<OfflineData>,
    ) -> Self {
        let sessions = SessionManager::new(provider, config.identity.session_file.clone());
        let links = MeetingLinks::from_config(&config.meeting);
        Self {
            config,
            remote,
            notifier,
            sessions,
            links,
            offline,
        }
    }

    pub fn is_offline(&self) -> bool {
        self.offline.is_some()
    }

    /// The signed-in practitioner, or an error asking to sign in
    pub async fn session(&self) -> anyhow::Result<Session> {
        self.sessions
            .require()
            .await
            .context("run `clinicdesk auth sign-in` first")
    }

    /// A store for `E`, attached to the signed-in practitioner and fetched
    pub async fn store<E: Entity>(&self) -> anyhow::Result<EntityStore<E>> {
        let session = self.session().await?;
        let mut store = EntityStore::new(Arc::clone(&self.remote), Arc::clone(&self.notifier));
        store.attach(session.practitioner_id()).await?;
        Ok(store)
    }

    pub async fn patients(&self) -> anyhow::Result<PatientStore> {
        self.store().await
    }

    pub async fn appointments(&self) -> anyhow::Result<AppointmentStore> {
        self.store().await
    }

    pub async fn prescriptions(&self) -> anyhow::Result<PrescriptionStore> {
        self.store().await
    }

    pub async fn teleconsultations(&self) -> anyhow::Result<TeleconsultationStore> {
        self.store().await
    }

    pub async fn billing(&self) -> anyhow::Result<BillingService> {
        let session = self.session().await?;
        let mut service = BillingService::new(Arc::clone(&self.remote), Arc::clone(&self.notifier));
        service.attach(session.practitioner_id()).await?;
        Ok(service)
    }

    /// Write offline changes back to the data file; no-op online
    pub fn persist(&self) -> anyhow::Result<()> {
        match &self.offline {
            Some(data) => data.save(),
            None => Ok(()),
        }
    }
}
