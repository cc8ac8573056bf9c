// Admission, seating and room teardown

use serde_json::json;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use yacht_backend::config::server::SessionSettings;
use yacht_backend::domain::Slot;
use yacht_backend::ws::registry::RoomId;

use crate::support::websocket::{
    seeded_state, start_test_server, wait_for_connections, ws_url, TestResult, QUIET, TIMEOUT,
};
use crate::support::websocket_client::WebSocketClient;

#[actix_web::test]
async fn first_two_connections_take_p1_then_p2() -> TestResult {
    let (state, registry) = seeded_state(1, SessionSettings::default());
    let (server, addr, join) = start_test_server(state).await?;
    let url = ws_url(addr, "lobby");

    let mut first = WebSocketClient::connect_retry(&url, TIMEOUT).await?;
    wait_for_connections(&registry, 1, TIMEOUT).await?;
    let mut second = WebSocketClient::connect_retry(&url, TIMEOUT).await?;
    wait_for_connections(&registry, 2, TIMEOUT).await?;

    let room = RoomId::parse("lobby")?;
    assert_eq!(registry.occupancy(&room), Some(2));
    let snap = registry.snapshot(&room).expect("room exists");
    assert_eq!(snap.p1.map(|p| p.player_num), Some(Slot::P1));
    assert_eq!(snap.p2.map(|p| p.player_num), Some(Slot::P2));

    first.close().await?;
    second.close().await?;
    wait_for_connections(&registry, 0, TIMEOUT).await?;
    assert_eq!(registry.room_count(), 0);

    server.stop(true).await;
    let _ = join.await;
    Ok(())
}

#[actix_web::test]
async fn third_connection_is_closed_with_policy_code() -> TestResult {
    let (state, registry) = seeded_state(1, SessionSettings::default());
    let (server, addr, join) = start_test_server(state).await?;
    let url = ws_url(addr, "crowded");

    let mut p1 = WebSocketClient::connect_retry(&url, TIMEOUT).await?;
    wait_for_connections(&registry, 1, TIMEOUT).await?;
    let mut p2 = WebSocketClient::connect_retry(&url, TIMEOUT).await?;
    wait_for_connections(&registry, 2, TIMEOUT).await?;

    let mut third = WebSocketClient::connect_retry(&url, TIMEOUT).await?;
    assert_eq!(third.expect_close(TIMEOUT).await?, Some(CloseCode::Policy));

    // The seated players are untouched.
    assert_eq!(registry.connection_count(), 2);
    p1.expect_silence(QUIET).await?;
    p2.expect_silence(QUIET).await?;

    p1.close().await?;
    p2.close().await?;
    wait_for_connections(&registry, 0, TIMEOUT).await?;
    server.stop(true).await;
    let _ = join.await;
    Ok(())
}

#[actix_web::test]
async fn empty_room_is_torn_down_and_rejoin_starts_fresh() -> TestResult {
    let (state, registry) = seeded_state(9, SessionSettings::default());
    let (server, addr, join) = start_test_server(state).await?;
    let url = ws_url(addr, "ephemeral");
    let room = RoomId::parse("ephemeral")?;

    let mut p1 = WebSocketClient::connect_retry(&url, TIMEOUT).await?;
    wait_for_connections(&registry, 1, TIMEOUT).await?;
    p1.send_event("roll", json!({})).await?;
    p1.expect_json(TIMEOUT).await?;
    assert_eq!(registry.snapshot(&room).map(|s| s.rolls_left), Some(2));

    p1.close().await?;
    wait_for_connections(&registry, 0, TIMEOUT).await?;
    assert_eq!(registry.room_count(), 0);

    let mut again = WebSocketClient::connect_retry(&url, TIMEOUT).await?;
    wait_for_connections(&registry, 1, TIMEOUT).await?;
    let snap = registry.snapshot(&room).expect("room recreated");
    assert_eq!(snap.rolls_left, 3);
    assert_eq!(snap.round, 1);
    assert!(snap.p2.is_none());
    assert_eq!(snap.p1.map(|p| p.player_num), Some(Slot::P1));

    again.close().await?;
    wait_for_connections(&registry, 0, TIMEOUT).await?;
    server.stop(true).await;
    let _ = join.await;
    Ok(())
}

#[actix_web::test]
async fn leaving_frees_the_slot_for_a_newcomer() -> TestResult {
    let (state, registry) = seeded_state(11, SessionSettings::default());
    let (server, addr, join) = start_test_server(state).await?;
    let url = ws_url(addr, "musical-chairs");
    let room = RoomId::parse("musical-chairs")?;

    let mut p1 = WebSocketClient::connect_retry(&url, TIMEOUT).await?;
    wait_for_connections(&registry, 1, TIMEOUT).await?;
    let mut p2 = WebSocketClient::connect_retry(&url, TIMEOUT).await?;
    wait_for_connections(&registry, 2, TIMEOUT).await?;

    p1.close().await?;
    wait_for_connections(&registry, 1, TIMEOUT).await?;
    assert!(registry.snapshot(&room).expect("room").p1.is_none());

    let mut newcomer = WebSocketClient::connect_retry(&url, TIMEOUT).await?;
    wait_for_connections(&registry, 2, TIMEOUT).await?;
    let snap = registry.snapshot(&room).expect("room");
    assert_eq!(snap.p1.map(|p| p.player_num), Some(Slot::P1));

    newcomer.close().await?;
    p2.close().await?;
    wait_for_connections(&registry, 0, TIMEOUT).await?;
    server.stop(true).await;
    let _ = join.await;
    Ok(())
}

#[actix_web::test]
async fn invalid_room_paths_are_upgraded_then_closed() -> TestResult {
    let (state, registry) = seeded_state(1, SessionSettings::default());
    let (server, addr, join) = start_test_server(state).await?;

    for room in ["", "%20%20", "a/b"] {
        let mut client = WebSocketClient::connect_retry(&ws_url(addr, room), TIMEOUT).await?;
        assert_eq!(
            client.expect_close(TIMEOUT).await?,
            Some(CloseCode::Policy),
            "room path {room:?}"
        );
    }
    assert_eq!(registry.room_count(), 0);
    assert_eq!(registry.connection_count(), 0);

    server.stop(true).await;
    let _ = join.await;
    Ok(())
}
