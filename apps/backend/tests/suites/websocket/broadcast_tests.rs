// Snapshot fan-out to room members

use serde_json::json;
use yacht_backend::config::server::SessionSettings;
use yacht_backend::domain::Phase;
use yacht_backend::ws::registry::RoomId;

use crate::support::websocket::{
    fixed_dice_state, parse_snapshot, seeded_state, start_test_server, wait_for_connections, ws_url,
    TestResult, QUIET, TIMEOUT,
};
use crate::support::websocket_client::WebSocketClient;

#[actix_web::test]
async fn second_players_name_starts_the_game_for_both() -> TestResult {
    let (state, registry) = seeded_state(3, SessionSettings::default());
    let (server, addr, join) = start_test_server(state).await?;
    let url = ws_url(addr, "names");

    let mut p1 = WebSocketClient::connect_retry(&url, TIMEOUT).await?;
    wait_for_connections(&registry, 1, TIMEOUT).await?;
    let mut p2 = WebSocketClient::connect_retry(&url, TIMEOUT).await?;
    wait_for_connections(&registry, 2, TIMEOUT).await?;

    p1.send_event("setName", json!({ "name": "  ann  " })).await?;
    p1.expect_silence(QUIET).await?;
    p2.expect_silence(QUIET).await?;

    p2.send_event("setName", json!({ "name": "bob" })).await?;
    for client in [&mut p1, &mut p2] {
        let snap = parse_snapshot(client.expect_json(TIMEOUT).await?);
        assert_eq!(snap.room, "names");
        assert_eq!(snap.p1.as_ref().map(|p| p.nickname.as_str()), Some("ann"));
        assert_eq!(snap.p2.as_ref().map(|p| p.nickname.as_str()), Some("bob"));
        assert_eq!(snap.phase, Phase::AwaitingRoll);
        assert_eq!(snap.rolls_left, 3);
    }

    p1.close().await?;
    p2.close().await?;
    wait_for_connections(&registry, 0, TIMEOUT).await?;
    server.stop(true).await;
    let _ = join.await;
    Ok(())
}

#[actix_web::test]
async fn roll_is_broadcast_to_the_whole_room() -> TestResult {
    let (state, registry) = fixed_dice_state(&[2, 3, 4, 5, 6], SessionSettings::default());
    let (server, addr, join) = start_test_server(state).await?;
    let url = ws_url(addr, "rolling");

    let mut p1 = WebSocketClient::connect_retry(&url, TIMEOUT).await?;
    wait_for_connections(&registry, 1, TIMEOUT).await?;
    let mut p2 = WebSocketClient::connect_retry(&url, TIMEOUT).await?;
    wait_for_connections(&registry, 2, TIMEOUT).await?;

    p1.send_event("roll", json!({})).await?;
    let a = p1.expect_json(TIMEOUT).await?;
    let b = p2.expect_json(TIMEOUT).await?;
    assert_eq!(a, b);

    assert_eq!(a["diceInPlay"], json!([2, 3, 4, 5, 6]));
    assert_eq!(a["rollsLeft"], 2);
    assert_eq!(a["turn"], "p1");
    assert_eq!(a["scoreHints"]["largeStraight"], 40);

    p1.send_event("keep", json!({ "die": 4 })).await?;
    let kept = parse_snapshot(p2.expect_json(TIMEOUT).await?);
    assert_eq!(kept.dice_kept.len(), 1);
    assert_eq!(kept.dice_in_play.len(), 4);
    p1.expect_json(TIMEOUT).await?;

    p1.close().await?;
    p2.close().await?;
    wait_for_connections(&registry, 0, TIMEOUT).await?;
    server.stop(true).await;
    let _ = join.await;
    Ok(())
}

#[actix_web::test]
async fn burst_of_moves_reaches_every_member_in_order() -> TestResult {
    let (state, registry) = fixed_dice_state(&[1, 2, 3, 4, 5], SessionSettings::default());
    let (server, addr, join) = start_test_server(state).await?;
    let url = ws_url(addr, "burst");

    let mut p1 = WebSocketClient::connect_retry(&url, TIMEOUT).await?;
    wait_for_connections(&registry, 1, TIMEOUT).await?;
    let mut p2 = WebSocketClient::connect_retry(&url, TIMEOUT).await?;
    wait_for_connections(&registry, 2, TIMEOUT).await?;

    // One roll, then keep/unkeep of die 0 back to back; all accepted.
    p1.send_event("roll", json!({})).await?;
    let toggles = 60;
    for i in 0..toggles {
        let event = if i % 2 == 0 { "keep" } else { "unkeep" };
        p1.send_event(event, json!({ "die": 0 })).await?;
    }
    let accepted = toggles + 1;

    let mut frames = Vec::with_capacity(accepted);
    for _ in 0..accepted {
        frames.push(p2.expect_json(TIMEOUT).await?);
    }
    p2.expect_silence(QUIET).await?;

    for (i, frame) in frames.iter().enumerate() {
        assert_eq!(frame["diceKept"].as_array().map(Vec::len), Some(i % 2), "frame {i}");
    }
    let room = RoomId::parse("burst")?;
    let last = parse_snapshot(frames.pop().expect("frames"));
    assert_eq!(Some(last), registry.snapshot(&room));

    for _ in 0..accepted {
        p1.expect_json(TIMEOUT).await?;
    }
    p1.expect_silence(QUIET).await?;

    p1.close().await?;
    p2.close().await?;
    wait_for_connections(&registry, 0, TIMEOUT).await?;
    server.stop(true).await;
    let _ = join.await;
    Ok(())
}
