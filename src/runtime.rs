use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::controller::Controller;
use crate::event::{Action, AppEvent, GenerationOutcome};
use crate::generator::{ContentService, GenerationError};
use crate::host::Host;
use crate::session::request::GenerationRequest;

#[derive(Debug, Error)]
#[error("the application runtime has stopped")]
pub struct RuntimeClosed;

/// An event plus an optional acknowledgement fired once it has been handled.
pub struct Envelope {
    pub event: AppEvent,
    pub ack: Option<oneshot::Sender<()>>,
}

/// Cloneable sender used by hosts to feed user actions in.
#[derive(Clone)]
pub struct RuntimeHandle {
    tx: mpsc::UnboundedSender<Envelope>,
}

impl RuntimeHandle {
    /// Queue an action without waiting for it.
    pub fn send(&self, action: Action) -> Result<(), RuntimeClosed> {
        self.tx
            .send(Envelope {
                event: AppEvent::Action(action),
                ack: None,
            })
            .map_err(|_| RuntimeClosed)
    }

    /// Queue an action and wait until the controller has processed it and
    /// re-rendered. Generation it triggers may still be running.
    pub async fn dispatch(&self, action: Action) -> Result<(), RuntimeClosed> {
        let (ack, done) = oneshot::channel();
        self.tx
            .send(Envelope {
                event: AppEvent::Action(action),
                ack: Some(ack),
            })
            .map_err(|_| RuntimeClosed)?;
        done.await.map_err(|_| RuntimeClosed)
    }
}

/// Owns the controller and performs the generation calls it asks for.
pub struct Runtime<H: Host> {
    controller: Controller<H>,
    service: Arc<dyn ContentService>,
    timeout: Duration,
    tx: mpsc::UnboundedSender<Envelope>,
    rx: mpsc::UnboundedReceiver<Envelope>,
}

impl<H: Host> Runtime<H> {
    pub fn new(controller: Controller<H>, service: Arc<dyn ContentService>, timeout: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            controller,
            service,
            timeout,
            tx,
            rx,
        }
    }

    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle {
            tx: self.tx.clone(),
        }
    }

    pub fn controller(&self) -> &Controller<H> {
        &self.controller
    }

    pub fn mount(&mut self) {
        info!(service = self.service.name(), timeout = ?self.timeout, "starting runtime");
        self.controller.mount();
    }

    /// Wait for the next queued event and handle it.
    ///
    /// The runtime holds a sender of its own for generation outcomes, so the
    /// queue never closes while it is alive. Cancel-safe: nothing is lost if
    /// this is dropped while waiting.
    pub async fn step(&mut self) {
        let Some(Envelope { event, ack }) = self.rx.recv().await else {
            return;
        };
        for request in self.controller.handle(event) {
            self.spawn(request);
        }
        if let Some(ack) = ack {
            // The waiter may have given up; nothing to do then.
            let _ = ack.send(());
        }
    }

    /// Mount, process events until `shutdown` resolves, then unmount.
    ///
    /// Hands the unmounted controller back to the caller.
    pub async fn run<F>(mut self, shutdown: F) -> Controller<H>
    where
        F: Future<Output = ()>,
    {
        self.mount();
        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                _ = self.step() => {}
            }
        }
        info!("runtime stopping");
        self.controller.unmount();
        self.controller
    }

    fn spawn(&self, request: GenerationRequest) {
        let service = Arc::clone(&self.service);
        let tx = self.tx.clone();
        let timeout = self.timeout;

        debug!(token = %request.token, kind = request.kind.as_str(), "spawning generation");
        tokio::spawn(async move {
            let GenerationRequest {
                token,
                kind,
                lesson_id,
                prompt,
            } = request;

            let result = match tokio::time::timeout(timeout, service.generate(&prompt)).await {
                Ok(result) => result,
                Err(_) => Err(GenerationError::Timeout {
                    secs: timeout.as_secs(),
                }),
            };
            if let Err(err) = &result {
                warn!(%token, kind = kind.as_str(), "generation failed: {err}");
            }

            let outcome = GenerationOutcome {
                token,
                kind,
                lesson_id,
                result,
            };
            if tx
                .send(Envelope {
                    event: AppEvent::Generated(outcome),
                    ack: None,
                })
                .is_err()
            {
                debug!(%token, "runtime gone; dropping outcome");
            }
        });
    }
}
