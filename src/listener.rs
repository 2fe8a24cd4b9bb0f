//! Background frame listener.
//!
//! The listener owns the receiving end of a frame channel fed by the mesh
//! connection, decodes every frame and dispatches the result as an
//! [`Event`].

use bytes::Bytes;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::decoder::MeshDecoder;
use crate::diagnostic::DiagnosticSink;
use crate::event::{Event, EventDispatcher, Subscription};
use crate::types::DeviceTypeLookup;

/// Handle to a running frame listener task.
pub struct MeshListener {
    dispatcher: EventDispatcher,
    process_task: Option<JoinHandle<()>>,
}

impl MeshListener {
    /// Starts decoding frames from `frames` in a background task.
    ///
    /// Must be called from within a Tokio runtime. The event channel
    /// capacity comes from the decoder's configuration.
    #[must_use]
    pub fn spawn<L, S>(frames: mpsc::Receiver<Bytes>, decoder: MeshDecoder<L, S>) -> Self
    where
        L: DeviceTypeLookup + Send + Sync + 'static,
        S: DiagnosticSink + 'static,
    {
        let dispatcher = EventDispatcher::new(decoder.config().event_capacity);
        Self::spawn_with_dispatcher(frames, decoder, dispatcher)
    }

    /// Starts decoding frames, dispatching through an existing dispatcher.
    #[must_use]
    pub fn spawn_with_dispatcher<L, S>(
        mut frames: mpsc::Receiver<Bytes>,
        decoder: MeshDecoder<L, S>,
        dispatcher: EventDispatcher,
    ) -> Self
    where
        L: DeviceTypeLookup + Send + Sync + 'static,
        S: DiagnosticSink + 'static,
    {
        let task_dispatcher = dispatcher.clone();
        let process_task = tokio::spawn(async move {
            tracing::info!("mesh listener started");
            while let Some(frame) = frames.recv().await {
                process_frame(frame, &decoder, &task_dispatcher);
            }
            tracing::info!("frame source closed, mesh listener stopping");
            task_dispatcher.dispatch(Event::Closed);
        });

        Self {
            dispatcher,
            process_task: Some(process_task),
        }
    }

    /// Subscribes to decoded events.
    #[must_use]
    pub fn subscribe(&self) -> Subscription {
        self.dispatcher.subscribe()
    }

    /// Returns the dispatcher used by this listener.
    #[must_use]
    pub const fn dispatcher(&self) -> &EventDispatcher {
        &self.dispatcher
    }

    /// Returns true while the background task is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.process_task
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }

    /// Stops the background task.
    pub fn stop(&mut self) {
        if let Some(task) = self.process_task.take() {
            tracing::debug!("stopping mesh listener");
            task.abort();
        }
    }
}

impl Drop for MeshListener {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Decodes a received frame and dispatches the appropriate event.
fn process_frame<L, S>(frame: Bytes, decoder: &MeshDecoder<L, S>, dispatcher: &EventDispatcher)
where
    L: DeviceTypeLookup,
    S: DiagnosticSink,
{
    tracing::trace!("processing frame, {} bytes", frame.len());

    let (kind, update) = decoder.decode_classified(&frame);
    let event = if update.is_empty() {
        Event::Ignored { kind, frame }
    } else {
        Event::Update(update)
    };

    dispatcher.dispatch(event);
}
