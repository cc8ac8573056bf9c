// Complete games played over the socket

use serde_json::json;
use yacht_backend::config::server::SessionSettings;
use yacht_backend::domain::{Category, Phase, Slot, Winner};

use crate::support::websocket::{
    fixed_dice_state, parse_snapshot, start_test_server, wait_for_connections, ws_url, TestResult,
    QUIET, TIMEOUT,
};
use crate::support::websocket_client::WebSocketClient;

#[actix_web::test]
async fn full_game_over_the_wire_ends_in_a_tie() -> TestResult {
    let (state, registry) = fixed_dice_state(&[6], SessionSettings::default());
    let (server, addr, join) = start_test_server(state).await?;
    let url = ws_url(addr, "marathon");

    let mut p1 = WebSocketClient::connect_retry(&url, TIMEOUT).await?;
    wait_for_connections(&registry, 1, TIMEOUT).await?;
    let mut p2 = WebSocketClient::connect_retry(&url, TIMEOUT).await?;
    wait_for_connections(&registry, 2, TIMEOUT).await?;

    let mut last = None;
    for category in Category::ALL {
        for mover in [Slot::P1, Slot::P2] {
            for (event, payload) in [
                ("roll", json!({})),
                ("score", json!({ "category": category })),
            ] {
                let (sender, other) = match mover {
                    Slot::P1 => (&mut p1, &mut p2),
                    Slot::P2 => (&mut p2, &mut p1),
                };
                sender.send_event(event, payload).await?;
                let mine = sender.expect_json(TIMEOUT).await?;
                let theirs = other.expect_json(TIMEOUT).await?;
                assert_eq!(mine, theirs);
                last = Some(mine);
            }
        }
    }

    let end = parse_snapshot(last.expect("at least one frame"));
    assert_eq!(end.phase, Phase::GameOver);
    assert_eq!(end.winner, Some(Winner::Tie));
    assert!(end.dice_in_play.is_empty());
    assert!(end.dice_kept.is_empty());
    assert_eq!(end.rolls_left, 0);
    assert_eq!(end.totals.p1, end.totals.p2);
    assert!(Category::ALL.iter().all(|c| end.score_card.p1.has(*c)));
    assert!(Category::ALL.iter().all(|c| end.score_card.p2.has(*c)));

    // Only restart is accepted now.
    p1.send_event("roll", json!({})).await?;
    p1.expect_silence(QUIET).await?;
    p2.send_event("restart", json!({})).await?;
    let fresh = parse_snapshot(p1.expect_json(TIMEOUT).await?);
    assert_eq!(fresh.round, 1);
    assert_eq!(fresh.winner, None);
    assert!(fresh.score_card.p1.is_empty());
    p2.expect_json(TIMEOUT).await?;

    p1.close().await?;
    p2.close().await?;
    wait_for_connections(&registry, 0, TIMEOUT).await?;
    server.stop(true).await;
    let _ = join.await;
    Ok(())
}
