//! Background I/O tasks of one connection.
//!
//! The send task owns the write half: queued frames leave at most one per
//! rate tick, so no sliding one-second window ever carries more than
//! `messages_per_second` writes. Heartbeats travel on a separate instant
//! channel that bypasses the rate gate; they are the only traffic allowed
//! to do so.
//!
//! The receive task owns the read half and is the only place inbound frames
//! are decoded: heartbeats are answered immediately, everything else is
//! handed to the event callback in wire order and then matched against the
//! pending-request map.

use std::sync::Arc;
use std::sync::atomic::Ordering;

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;
use tokio::time::{self, Duration, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

use spotwire_proto::messages::{ProtoHeartbeatEvent, ProtoMessage};
use spotwire_proto::{Payload, ProtoError, codec, framing};

use crate::correlation::PendingMap;

pub(crate) type EventHandler = Arc<dyn Fn(&ProtoMessage) + Send + Sync>;

/// One encoded envelope waiting in the outbound queue.
pub(crate) struct OutboundItem {
    pub frame: Vec<u8>,
    /// Checked at dispatch; a flagged item is dropped without a write.
    pub cancelled: Option<Arc<std::sync::atomic::AtomicBool>>,
}

pub(crate) async fn run_sender<W>(
    mut writer: W,
    mut queued_rx: mpsc::UnboundedReceiver<OutboundItem>,
    mut instant_rx: mpsc::UnboundedReceiver<Vec<u8>>,
    messages_per_second: u32,
    heartbeat_idle: Duration,
    shutdown: CancellationToken,
) -> Result<(), ProtoError>
where
    W: AsyncWrite + Unpin,
{
    let tick_period =
        Duration::from_secs_f64(1.0 / f64::from(messages_per_second.max(1)));
    let mut tick = time::interval(tick_period);
    tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let heartbeat = codec::encode(&ProtoHeartbeatEvent::default(), None);
    let mut last_write = Instant::now();

    loop {
        tokio::select! {
            biased;
            _ = shutdown.cancelled() => break,
            maybe_frame = instant_rx.recv() => {
                let Some(frame) = maybe_frame else { break };
                framing::write_frame(&mut writer, &frame).await?;
                last_write = Instant::now();
            }
            _ = tick.tick() => {
                if let Some(item) = next_live_item(&mut queued_rx) {
                    framing::write_frame(&mut writer, &item.frame).await?;
                    last_write = Instant::now();
                } else if last_write.elapsed() >= heartbeat_idle {
                    framing::write_frame(&mut writer, &heartbeat).await?;
                    last_write = Instant::now();
                    debug!("idle heartbeat written");
                }
            }
        }
    }

    debug!("send task stopping");
    Ok(())
}

/// Pops the next queued item that has not been cancelled while waiting.
fn next_live_item(
    queued_rx: &mut mpsc::UnboundedReceiver<OutboundItem>
) -> Option<OutboundItem> {
    loop {
        let item = queued_rx.try_recv().ok()?;
        let cancelled = item
            .cancelled
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Acquire));
        if cancelled {
            debug!("dropping cancelled outbound item");
            continue;
        }
        return Some(item);
    }
}

/// Runs until the connection dies; the return value is the disconnect
/// reason handed to the session teardown.
pub(crate) async fn run_receiver<R>(
    mut reader: R,
    max_frame_bytes: u32,
    pending: Arc<PendingMap>,
    on_envelope: EventHandler,
    instant_tx: mpsc::UnboundedSender<Vec<u8>>,
    shutdown: CancellationToken,
) -> String
where
    R: AsyncRead + Unpin,
{
    let heartbeat = codec::encode(&ProtoHeartbeatEvent::default(), None);

    loop {
        let frame = tokio::select! {
            biased;
            _ = shutdown.cancelled() => return "client disconnect".to_string(),
            frame = framing::read_frame(&mut reader, max_frame_bytes) => frame,
        };

        let bytes = match frame {
            Ok(bytes) => bytes,
            Err(ProtoError::ConnectionClosed) => {
                return "connection closed by server".to_string();
            }
            Err(ProtoError::FrameTooLarge(len)) => {
                error!(
                    "inbound frame exceeds limit: len={len}, max={max_frame_bytes}"
                );
                return format!("inbound frame too large: {len} bytes");
            }
            Err(err) => return format!("transport error: {err}"),
        };

        // Decode failures stay local to the frame; only transport errors
        // take the connection down.
        let envelope = match codec::decode(&bytes) {
            Ok(envelope) => envelope,
            Err(err) => {
                warn!(
                    "dropping undecodable frame: bytes={}, error={err}",
                    bytes.len()
                );
                continue;
            }
        };

        if envelope.payload_type == ProtoHeartbeatEvent::PAYLOAD_TYPE {
            if instant_tx.send(heartbeat.clone()).is_err() {
                return "send task stopped".to_string();
            }
            debug!("server heartbeat answered");
            continue;
        }

        on_envelope(&envelope);

        if let Some(id) = envelope.client_msg_id.clone() {
            if !pending.complete(&id, envelope) {
                debug!("late response dropped: client_msg_id={id}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicBool;

    use parking_lot::Mutex;
    use tokio::io::{AsyncWriteExt, DuplexStream};

    use spotwire_proto::messages::{ProtoOaVersionReq, ProtoOaVersionRes};

    use super::*;

    struct SenderHarness {
        queued_tx: mpsc::UnboundedSender<OutboundItem>,
        instant_tx: mpsc::UnboundedSender<Vec<u8>>,
        shutdown: CancellationToken,
        server: DuplexStream,
    }

    fn spawn_sender(
        messages_per_second: u32,
        heartbeat_idle: Duration,
    ) -> SenderHarness {
        let (client, server) = tokio::io::duplex(64 * 1024);
        let (_client_read, client_write) = tokio::io::split(client);
        let (queued_tx, queued_rx) = mpsc::unbounded_channel();
        let (instant_tx, instant_rx) = mpsc::unbounded_channel();
        let shutdown = CancellationToken::new();

        tokio::spawn(run_sender(
            client_write,
            queued_rx,
            instant_rx,
            messages_per_second,
            heartbeat_idle,
            shutdown.clone(),
        ));

        SenderHarness { queued_tx, instant_tx, shutdown, server }
    }

    async fn read_envelope(server: &mut DuplexStream) -> ProtoMessage {
        let bytes = framing::read_frame(server, spotwire_proto::DEFAULT_MAX_FRAME_BYTES)
            .await
            .expect("frame");
        codec::decode(&bytes).expect("decode")
    }

    fn queued_request(id: &str) -> OutboundItem {
        OutboundItem {
            frame: codec::encode(
                &ProtoOaVersionReq::default(),
                Some(id.to_string()),
            ),
            cancelled: None,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn no_sliding_second_exceeds_the_rate() {
        let mut harness = spawn_sender(5, Duration::from_secs(20));
        for i in 0..10 {
            harness.queued_tx.send(queued_request(&format!("id-{i}"))).expect("enqueue");
        }

        let start = Instant::now();
        let mut stamps = Vec::new();
        for i in 0..10 {
            let envelope = read_envelope(&mut harness.server).await;
            assert_eq!(envelope.client_msg_id.as_deref(), Some(format!("id-{i}").as_str()));
            stamps.push(start.elapsed());
        }

        for anchor in &stamps {
            let in_window = stamps
                .iter()
                .filter(|t| **t >= *anchor && **t < *anchor + Duration::from_secs(1))
                .count();
            assert!(in_window <= 5, "{in_window} writes within one second");
        }

        harness.shutdown.cancel();
    }

    #[tokio::test(start_paused = true)]
    async fn instant_frames_bypass_the_rate_gate() {
        let mut harness = spawn_sender(1, Duration::from_secs(20));
        // Saturate the queue, then push an instant heartbeat behind it.
        for i in 0..3 {
            harness.queued_tx.send(queued_request(&format!("id-{i}"))).expect("enqueue");
        }
        let heartbeat = codec::encode(&ProtoHeartbeatEvent::default(), None);
        harness.instant_tx.send(heartbeat).expect("instant");

        let envelope = read_envelope(&mut harness.server).await;
        assert_eq!(envelope.payload_type, ProtoHeartbeatEvent::PAYLOAD_TYPE);

        harness.shutdown.cancel();
    }

    #[tokio::test(start_paused = true)]
    async fn idle_connection_emits_heartbeat_after_heartbeat_idle() {
        let mut harness = spawn_sender(5, Duration::from_secs(20));

        let start = Instant::now();
        let envelope = read_envelope(&mut harness.server).await;

        assert_eq!(envelope.payload_type, ProtoHeartbeatEvent::PAYLOAD_TYPE);
        assert!(start.elapsed() >= Duration::from_secs(20));
        assert!(start.elapsed() < Duration::from_secs(21));

        harness.shutdown.cancel();
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_items_are_skipped_at_dispatch() {
        let harness_flag = Arc::new(AtomicBool::new(true));
        let mut harness = spawn_sender(5, Duration::from_secs(20));

        harness
            .queued_tx
            .send(OutboundItem {
                frame: codec::encode(
                    &ProtoOaVersionReq::default(),
                    Some("cancelled".to_string()),
                ),
                cancelled: Some(harness_flag),
            })
            .expect("enqueue");
        harness.queued_tx.send(queued_request("live")).expect("enqueue");

        let envelope = read_envelope(&mut harness.server).await;
        assert_eq!(envelope.client_msg_id.as_deref(), Some("live"));

        harness.shutdown.cancel();
    }

    struct ReceiverHarness {
        server: DuplexStream,
        pending: Arc<PendingMap>,
        instant_rx: mpsc::UnboundedReceiver<Vec<u8>>,
        shutdown: CancellationToken,
        handle: tokio::task::JoinHandle<String>,
        seen: Arc<Mutex<Vec<u32>>>,
    }

    fn spawn_receiver() -> ReceiverHarness {
        let (client, server) = tokio::io::duplex(64 * 1024);
        let (client_read, _client_write) = tokio::io::split(client);
        let (instant_tx, instant_rx) = mpsc::unbounded_channel();
        let pending = Arc::new(PendingMap::default());
        let shutdown = CancellationToken::new();
        let seen: Arc<Mutex<Vec<u32>>> = Arc::new(Mutex::new(Vec::new()));

        let on_envelope: EventHandler = {
            let seen = seen.clone();
            Arc::new(move |envelope| seen.lock().push(envelope.payload_type))
        };

        let handle = tokio::spawn(run_receiver(
            client_read,
            1024,
            pending.clone(),
            on_envelope,
            instant_tx,
            shutdown.clone(),
        ));

        ReceiverHarness { server, pending, instant_rx, shutdown, handle, seen }
    }

    #[tokio::test]
    async fn server_heartbeat_is_echoed_and_not_dispatched() {
        let mut harness = spawn_receiver();

        let heartbeat = codec::encode(&ProtoHeartbeatEvent::default(), None);
        framing::write_frame(&mut harness.server, &heartbeat).await.expect("write");

        let echoed = harness.instant_rx.recv().await.expect("echo");
        let envelope = codec::decode(&echoed).expect("decode");
        assert_eq!(envelope.payload_type, ProtoHeartbeatEvent::PAYLOAD_TYPE);
        assert!(harness.seen.lock().is_empty());

        harness.shutdown.cancel();
        assert_eq!(harness.handle.await.expect("join"), "client disconnect");
    }

    #[tokio::test]
    async fn undecodable_frame_is_skipped_and_loop_survives() {
        let mut harness = spawn_receiver();

        // Truncated protobuf: a length-delimited field header with no value.
        framing::write_frame(&mut harness.server, &[0x0a]).await.expect("write");

        let (tx, rx) = tokio::sync::oneshot::channel();
        let flag = Arc::new(AtomicBool::new(false));
        assert!(harness.pending.insert("r-1", tx, flag));

        let response = codec::encode(
            &ProtoOaVersionRes { version: "99".to_string() },
            Some("r-1".to_string()),
        );
        framing::write_frame(&mut harness.server, &response).await.expect("write");

        let envelope = rx.await.expect("resolved").expect("ok");
        assert_eq!(envelope.client_msg_id.as_deref(), Some("r-1"));

        harness.shutdown.cancel();
        harness.handle.await.expect("join");
    }

    #[tokio::test]
    async fn callbacks_run_in_wire_order() {
        let mut harness = spawn_receiver();

        let first =
            codec::encode(&ProtoOaVersionReq::default(), Some("1".to_string()));
        let second =
            codec::encode(&ProtoOaVersionRes::default(), Some("2".to_string()));
        framing::write_frame(&mut harness.server, &first).await.expect("write");
        framing::write_frame(&mut harness.server, &second).await.expect("write");

        while harness.seen.lock().len() < 2 {
            tokio::task::yield_now().await;
        }
        assert_eq!(
            *harness.seen.lock(),
            vec![
                ProtoOaVersionReq::PAYLOAD_TYPE,
                ProtoOaVersionRes::PAYLOAD_TYPE
            ]
        );

        harness.shutdown.cancel();
        harness.handle.await.expect("join");
    }

    #[tokio::test]
    async fn server_eof_reports_connection_closed() {
        let harness = spawn_receiver();
        drop(harness.server);

        assert_eq!(
            harness.handle.await.expect("join"),
            "connection closed by server"
        );
    }

    #[tokio::test]
    async fn oversized_inbound_frame_is_fatal() {
        let mut harness = spawn_receiver();

        harness
            .server
            .write_all(&1_048_576_u32.to_be_bytes())
            .await
            .expect("write prefix");

        let reason = harness.handle.await.expect("join");
        assert_eq!(reason, "inbound frame too large: 1048576 bytes");
    }
}
