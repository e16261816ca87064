// ── Request gateway ──
//
// The only path to the network. Reads the key from the session, raises the
// busy indicator for the lifetime of the call and folds every failure into
// a `RequestOutcome`.

use std::time::Instant;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use torbox_api::{Endpoint, TorboxClient};

use crate::busy::BusyIndicator;
use crate::outcome::RequestOutcome;
use crate::session::Session;

/// Gateway shared by every loader. Cheaply cloneable.
#[derive(Clone)]
pub struct Gateway {
    client: TorboxClient,
    session: Session,
    busy: BusyIndicator,
}

impl Gateway {
    pub fn new(client: TorboxClient, session: Session, busy: BusyIndicator) -> Self {
        Self {
            client,
            session,
            busy,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn busy(&self) -> &BusyIndicator {
        &self.busy
    }

    /// Send one request and unwrap the envelope's `data`.
    ///
    /// `Success(None)` means the service answered successfully but sent no
    /// payload.
    pub async fn send<T, B>(&self, endpoint: &Endpoint, body: Option<&B>) -> RequestOutcome<Option<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let _busy = self.busy.begin();
        let api_key = self.session.api_key();
        let started = Instant::now();

        let outcome: RequestOutcome<Option<T>> = self
            .client
            .send(endpoint, api_key.as_ref(), body)
            .await
            .into();

        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        match &outcome {
            RequestOutcome::Success(_) => debug!(%endpoint, elapsed_ms, "request succeeded"),
            RequestOutcome::HttpError { status, message } => {
                warn!(%endpoint, status, %message, elapsed_ms, "request rejected");
            }
            RequestOutcome::TransportError(message) => {
                warn!(%endpoint, %message, elapsed_ms, "request failed");
            }
            RequestOutcome::PreconditionFailed(reason) => {
                debug!(%endpoint, %reason, "request not sent");
            }
        }
        outcome
    }

    pub async fn get<T: DeserializeOwned>(&self, endpoint: &Endpoint) -> RequestOutcome<Option<T>> {
        self.send::<T, ()>(endpoint, None).await
    }

    pub async fn post<T, B>(&self, endpoint: &Endpoint, body: &B) -> RequestOutcome<Option<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(endpoint, Some(body)).await
    }
}
