//! Background key decoding.
//!
//! Two threads: a reader that does nothing but block on the input device,
//! and a dispatcher that owns the [`KeyDecoder`], the current subscriber and
//! the queue of outstanding cursor-position requests. Everything the
//! dispatcher reacts to arrives on one channel, so input bytes,
//! subscriptions, cursor requests and shutdown are handled strictly in the
//! order they were sent.

use std::collections::VecDeque;
use std::io::{ErrorKind, Read};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, SyncSender, TrySendError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{debug, info, warn};

use super::decoder::KeyDecoder;
use super::event::{Decoded, KeyInput};
use crate::domain::primitive::{CursorPos, RequestId};
use crate::shared::error::AppError;

const READ_CHUNK: usize = 256;

enum LoopMessage {
    Input(Vec<u8>),
    InputClosed,
    InputFailed(String),
    Subscribe(Sender<KeyInput>),
    CursorRequest {
        id: RequestId,
        reply: SyncSender<CursorPos>,
    },
    Shutdown,
}

/// Receiving end of the key stream. Only one subscription is live at a time:
/// a newer one disconnects the older.
pub struct KeySubscription {
    rx: Receiver<KeyInput>,
}

impl KeySubscription {
    /// Block for the next input. `None` once the stream has ended.
    pub fn recv(&self) -> Option<KeyInput> {
        self.rx.recv().ok()
    }

    #[cfg(test)]
    pub fn recv_timeout(&self, timeout: Duration) -> Result<KeyInput, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }

    #[cfg(test)]
    pub fn try_recv(&self) -> Result<KeyInput, mpsc::TryRecvError> {
        self.rx.try_recv()
    }
}

pub struct EventLoop {
    tx: Sender<LoopMessage>,
    dispatcher: Option<JoinHandle<()>>,
    /// Subscription registered before the reader started, so keys typed
    /// between start-up and the first `subscribe` call are kept.
    initial: Option<KeySubscription>,
}

impl EventLoop {
    /// Start reading `input` in the background.
    ///
    /// `escape_timeout` is how long a partial escape sequence is held before
    /// it is reported literally (a lone ESC press becomes the Escape key).
    pub fn spawn<R>(input: R, escape_timeout: Duration) -> Result<Self, AppError>
    where
        R: Read + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let (key_tx, key_rx) = mpsc::channel();

        let dispatcher = Dispatcher::new(escape_timeout, key_tx);
        let dispatcher = thread::Builder::new()
            .name("tpg-dispatch".into())
            .spawn(move || dispatcher.run(rx))
            .map_err(|source| AppError::ThreadSpawn {
                name: "tpg-dispatch",
                source,
            })?;

        let reader_tx = tx.clone();
        thread::Builder::new()
            .name("tpg-input".into())
            .spawn(move || read_input(input, reader_tx))
            .map_err(|source| AppError::ThreadSpawn {
                name: "tpg-input",
                source,
            })?;

        debug!("Event loop started (escape timeout {escape_timeout:?})");
        Ok(Self {
            tx,
            dispatcher: Some(dispatcher),
            initial: Some(KeySubscription { rx: key_rx }),
        })
    }

    /// Take over the key stream. Any previous subscription stops receiving.
    pub fn subscribe(&mut self) -> Result<KeySubscription, AppError> {
        if let Some(initial) = self.initial.take() {
            return Ok(initial);
        }
        let (key_tx, key_rx) = mpsc::channel();
        self.send(LoopMessage::Subscribe(key_tx))?;
        Ok(KeySubscription { rx: key_rx })
    }

    /// Register a cursor-position request. The returned receiver yields the
    /// position from the next unclaimed report, or disconnects if input ends
    /// first. The caller writes the query itself.
    pub fn request_cursor(&self, id: RequestId) -> Result<Receiver<CursorPos>, AppError> {
        let (reply, rx) = mpsc::sync_channel(1);
        self.send(LoopMessage::CursorRequest { id, reply })?;
        Ok(rx)
    }

    /// Stop the dispatcher and wait for it. The reader thread stays blocked
    /// on its device until the process exits.
    pub fn shutdown(&mut self) {
        let Some(dispatcher) = self.dispatcher.take() else {
            return;
        };
        let _ = self.tx.send(LoopMessage::Shutdown);
        if dispatcher.join().is_err() {
            warn!("Key dispatcher thread panicked");
        }
    }

    fn send(&self, message: LoopMessage) -> Result<(), AppError> {
        if self.dispatcher.is_none() {
            return Err(AppError::EventLoopStopped);
        }
        self.tx
            .send(message)
            .map_err(|_| AppError::EventLoopStopped)
    }
}

impl Drop for EventLoop {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn read_input<R: Read>(mut input: R, tx: Sender<LoopMessage>) {
    let mut buf = [0u8; READ_CHUNK];
    loop {
        match input.read(&mut buf) {
            Ok(0) => {
                let _ = tx.send(LoopMessage::InputClosed);
                return;
            }
            Ok(n) => {
                if tx.send(LoopMessage::Input(buf[..n].to_vec())).is_err() {
                    return;
                }
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                let _ = tx.send(LoopMessage::InputFailed(e.to_string()));
                return;
            }
        }
    }
}

struct Dispatcher {
    decoder: KeyDecoder,
    subscriber: Option<Sender<KeyInput>>,
    requests: VecDeque<(RequestId, SyncSender<CursorPos>)>,
    escape_timeout: Duration,
    input_open: bool,
}

impl Dispatcher {
    fn new(escape_timeout: Duration, subscriber: Sender<KeyInput>) -> Self {
        Self {
            decoder: KeyDecoder::new(),
            subscriber: Some(subscriber),
            requests: VecDeque::new(),
            escape_timeout,
            input_open: true,
        }
    }

    fn run(mut self, rx: Receiver<LoopMessage>) {
        loop {
            let message = if self.decoder.has_pending() {
                match rx.recv_timeout(self.escape_timeout) {
                    Ok(message) => message,
                    Err(RecvTimeoutError::Timeout) => {
                        let held = self.decoder.flush_pending();
                        self.route(held);
                        continue;
                    }
                    Err(RecvTimeoutError::Disconnected) => break,
                }
            } else {
                match rx.recv() {
                    Ok(message) => message,
                    Err(_) => break,
                }
            };

            match message {
                LoopMessage::Input(bytes) => {
                    let decoded = self.decoder.feed(&bytes);
                    self.route(decoded);
                }
                LoopMessage::InputClosed => self.close_input(None),
                LoopMessage::InputFailed(message) => self.close_input(Some(message)),
                LoopMessage::Subscribe(sender) => {
                    if !self.input_open {
                        debug!("Input already closed; dropping new subscriber");
                    } else if self.subscriber.replace(sender).is_some() {
                        debug!("Key subscriber replaced");
                    }
                }
                LoopMessage::CursorRequest { id, reply } => {
                    if self.input_open {
                        self.requests.push_back((id, reply));
                    } else {
                        debug!("Input already closed; dropping cursor request {id}");
                    }
                }
                LoopMessage::Shutdown => {
                    debug!("Key dispatcher shutting down");
                    break;
                }
            }
        }
    }

    fn route(&mut self, decoded: Vec<Decoded>) {
        for event in decoded {
            match event {
                Decoded::Input(input) => self.deliver(input),
                Decoded::CursorReport { pos, .. } => self.answer(pos),
            }
        }
    }

    fn deliver(&mut self, input: KeyInput) {
        let Some(subscriber) = &self.subscriber else {
            return;
        };
        if subscriber.send(input).is_err() {
            debug!("Key subscriber went away");
            self.subscriber = None;
        }
    }

    /// Hand a report to the oldest request still waiting. Requests whose
    /// caller already gave up are skipped.
    fn answer(&mut self, pos: CursorPos) {
        while let Some((id, reply)) = self.requests.pop_front() {
            match reply.try_send(pos) {
                Ok(()) => {
                    debug!("Cursor request {id} answered with {pos}");
                    return;
                }
                Err(TrySendError::Disconnected(_)) => {
                    debug!("Cursor request {id} expired before its report");
                }
                Err(TrySendError::Full(_)) => return,
            }
        }
        debug!("Ignoring unsolicited cursor report {pos}");
    }

    fn close_input(&mut self, error: Option<String>) {
        let held = self.decoder.flush_pending();
        self.route(held);
        match error {
            Some(message) => {
                warn!("Input failed: {message}");
                self.deliver(KeyInput::Error { message });
            }
            None => info!("Input closed"),
        }
        self.input_open = false;
        self.subscriber = None;
        self.requests.clear();
    }
}

// =============================================================================
// Tests
// =============================================================================
