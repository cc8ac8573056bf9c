use std::sync::Arc;
use std::time::Instant;

use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::server::SessionSettings;
use crate::errors::ErrorCode;
use crate::state::app_state::AppState;
use crate::ws::dispatch::dispatch;
use crate::ws::registry::{Connection, ConnectionSink, DeliveryError, RoomId, RoomRegistry};
use crate::AppError;

/// One serialized snapshot on its way to a session.
#[derive(Message, Clone)]
#[rtype(result = "()")]
pub struct RoomBroadcast(pub Arc<str>);

/// Unbounded hand-off; only a stopped session counts as a failed delivery.
impl ConnectionSink for Recipient<RoomBroadcast> {
    fn deliver(&self, payload: Arc<str>) -> Result<(), DeliveryError> {
        if !self.connected() {
            return Err(DeliveryError::Closed);
        }
        self.do_send(RoomBroadcast(payload));
        Ok(())
    }
}

/// `GET /ws/{room_id}`. Any websocket handshake is upgraded; the room id is
/// checked at admission and a refused connection is closed without payload.
pub async fn upgrade(
    req: HttpRequest,
    stream: web::Payload,
    tail: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let mut handshake = ws::handshake(&req).map_err(|err| {
        AppError::bad_request(
            ErrorCode::BadRequest,
            format!("websocket handshake required: {err}"),
        )
    })?;

    let session = RoomWsSession::new(
        Uuid::new_v4(),
        tail.into_inner(),
        app_state.registry(),
        app_state.settings().clone(),
    );
    Ok(handshake.streaming(ws::WebsocketContext::create(session, stream)))
}

pub struct RoomWsSession {
    conn_id: Uuid,
    /// Path tail as requested, before validation.
    requested_room: String,
    registry: Arc<RoomRegistry>,
    settings: SessionSettings,

    /// Validated room, set once admitted.
    admitted: Option<RoomId>,
    last_heartbeat: Instant,
}

impl RoomWsSession {
    pub fn new(
        conn_id: Uuid,
        requested_room: String,
        registry: Arc<RoomRegistry>,
        settings: SessionSettings,
    ) -> Self {
        Self {
            conn_id,
            requested_room,
            registry,
            settings,
            admitted: None,
            last_heartbeat: Instant::now(),
        }
    }

    fn start_heartbeat(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(self.settings.heartbeat_interval, |actor, ctx| {
            if Instant::now().duration_since(actor.last_heartbeat) > actor.settings.client_timeout {
                warn!(
                    conn_id = %actor.conn_id,
                    room_id = %actor.requested_room,
                    "[WS SESSION] heartbeat timed out"
                );
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Normal)));
                ctx.stop();
                return;
            }
            ctx.ping(b"keepalive");
        });
    }

    fn handle_text(&mut self, text: &str, ctx: &mut ws::WebsocketContext<Self>) {
        let Some(room_id) = &self.admitted else {
            return;
        };
        let outcome = dispatch(&self.registry, room_id, self.conn_id, text);
        if !self.settings.report_invalid_moves {
            return;
        }
        if let Some(frame) = outcome.error_frame() {
            ctx.text(frame);
        }
    }
}

impl Actor for RoomWsSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        let recipient = ctx.address().recipient::<RoomBroadcast>();
        let conn = Connection::new(self.conn_id, recipient);

        match self.registry.admit(&self.requested_room, conn) {
            Ok(admission) => {
                info!(
                    conn_id = %self.conn_id,
                    room_id = %admission.room_id,
                    slot = %admission.slot,
                    "[WS SESSION] started"
                );
                self.admitted = Some(admission.room_id);
                self.start_heartbeat(ctx);
            }
            Err(err) => {
                info!(
                    conn_id = %self.conn_id,
                    room_id = %self.requested_room,
                    code = %err.code(),
                    "[WS SESSION] admission refused"
                );
                ctx.close(Some(ws::CloseReason {
                    code: ws::CloseCode::Policy,
                    description: None,
                }));
                ctx.stop();
            }
        }
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        if let Some(room_id) = self.admitted.take() {
            self.registry.remove(&room_id, self.conn_id);
        }
        info!(
            conn_id = %self.conn_id,
            room_id = %self.requested_room,
            "[WS SESSION] stopped"
        );
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for RoomWsSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(payload)) => {
                self.last_heartbeat = Instant::now();
                ctx.pong(&payload);
            }
            Ok(ws::Message::Pong(_)) => {
                self.last_heartbeat = Instant::now();
            }
            Ok(ws::Message::Text(text)) => {
                self.last_heartbeat = Instant::now();
                self.handle_text(&text, ctx);
            }
            Ok(ws::Message::Binary(_)) => {
                self.last_heartbeat = Instant::now();
                debug!(conn_id = %self.conn_id, "[WS SESSION] binary frame ignored");
            }
            Ok(ws::Message::Close(reason)) => {
                info!(conn_id = %self.conn_id, room_id = %self.requested_room, "[WS SESSION] client closed");
                ctx.close(reason);
                ctx.stop();
            }
            Ok(ws::Message::Continuation(_)) | Ok(ws::Message::Nop) => {
                self.last_heartbeat = Instant::now();
            }
            Err(err) => {
                warn!(
                    conn_id = %self.conn_id,
                    room_id = %self.requested_room,
                    error = %err,
                    "[WS SESSION] protocol error"
                );
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Error)));
                ctx.stop();
            }
        }
    }
}

impl Handler<RoomBroadcast> for RoomWsSession {
    type Result = ();

    fn handle(&mut self, msg: RoomBroadcast, ctx: &mut Self::Context) -> Self::Result {
        ctx.text(msg.0.as_ref());
    }
}
