// Outbound WebSocket connection to the game server. Mirrors
// `game_server::interface_adapters::net`'s own split sink/stream + mailbox
// shape from the other side of the wire: a writer task owns the sink so the
// bridge loop never has to interleave sends with the read loop, matching the
// `connect_async`/split/spawn pattern used for desktop WebSocket clients
// elsewhere in the corpus.

use futures_util::{SinkExt, StreamExt};
use protocol::{ClientMessage, ServerMessage};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::warn;

use crate::domain::BridgeError;

pub struct GameConnection {
    pub outbound: mpsc::UnboundedSender<ClientMessage>,
    pub inbound: mpsc::UnboundedReceiver<ServerMessage>,
    write_task: JoinHandle<()>,
    read_task: JoinHandle<()>,
}

impl GameConnection {
    pub async fn connect(url: &str) -> Result<Self, BridgeError> {
        let (stream, _) = connect_async(url).await?;
        let (mut sink, mut source) = stream.split();

        let (out_tx, mut out_rx) = mpsc::unbounded_channel::<ClientMessage>();
        let (in_tx, in_rx) = mpsc::unbounded_channel::<ServerMessage>();

        let write_task = tokio::spawn(async move {
            while let Some(msg) = out_rx.recv().await {
                let text = match serde_json::to_string(&msg) {
                    Ok(text) => text,
                    Err(e) => {
                        warn!(error = %e, "failed to serialize outbound message");
                        continue;
                    }
                };
                if sink.send(Message::Text(text.into())).await.is_err() {
                    break;
                }
            }
        });

        let read_task = tokio::spawn(async move {
            while let Some(frame) = source.next().await {
                match frame {
                    Ok(Message::Text(text)) => match serde_json::from_str::<ServerMessage>(&text) {
                        Ok(msg) => {
                            if in_tx.send(msg).is_err() {
                                break;
                            }
                        }
                        Err(e) => warn!(error = %e, "malformed server message"),
                    },
                    Ok(Message::Close(_)) => break,
                    Ok(_) => {}
                    Err(e) => {
                        warn!(error = %e, "websocket recv error");
                        break;
                    }
                }
            }
        });

        Ok(Self {
            outbound: out_tx,
            inbound: in_rx,
            write_task,
            read_task,
        })
    }

    pub fn send(&self, msg: ClientMessage) {
        let _ = self.outbound.send(msg);
    }

    pub async fn shutdown(self) {
        drop(self.outbound);
        self.write_task.abort();
        self.read_task.abort();
    }
}
