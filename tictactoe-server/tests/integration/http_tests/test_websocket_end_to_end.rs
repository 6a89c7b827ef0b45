use anyhow::{Context, Result};
use futures::{SinkExt, StreamExt};
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::time::Duration;
use tictactoe_server::router;
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::tungstenite::{Error, Message};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

use super::{scenes_dir, test_state};
use crate::integration::init_tracing;

type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn spawn_server(state: tictactoe_server::AppState) -> Result<SocketAddr> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .context("Failed to bind test listener")?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router(state)).await {
            tracing::error!("test server stopped: {}", e);
        }
    });
    Ok(addr)
}

async fn connect(url: &str) -> Result<Client> {
    let (client, _) = connect_async(url)
        .await
        .with_context(|| format!("Failed to connect to {url}"))?;
    Ok(client)
}

/// Next JSON text frame, or `None` once the server closed the socket.
async fn next_json(client: &mut Client) -> Option<Value> {
    loop {
        let frame = tokio::time::timeout(Duration::from_secs(2), client.next())
            .await
            .expect("timed out waiting for the server")?;
        match frame {
            Ok(Message::Text(text)) => return Some(serde_json::from_str(text.as_str()).unwrap()),
            Ok(Message::Close(_)) | Err(_) => return None,
            Ok(_) => continue,
        }
    }
}

async fn next_where(client: &mut Client, key: &str, value: &str) -> Value {
    loop {
        let json = next_json(client).await.expect("socket closed early");
        if json[key] == value {
            return json;
        }
    }
}

async fn play(client: &mut Client, row: usize, col: usize) -> Result<()> {
    let frame = json!({ "action_type": "move", "data": { "position": { "row": row, "col": col } } });
    client
        .send(Message::Text(frame.to_string().into()))
        .await
        .context("Failed to send move")
}

#[tokio::test]
async fn test_full_game_over_websocket() -> Result<()> {
    init_tracing();

    let scenes = scenes_dir();
    let state = test_state(scenes.path());
    let room = state.rooms.create_room();
    let addr = spawn_server(state.clone()).await?;
    let url = format!("ws://{addr}/room/{}/socket", room.id());

    let mut x = connect(&url).await?;
    let info = next_where(&mut x, "message_type", "game_info").await;
    assert_eq!(info["data"]["player"]["side"], "X");

    let mut o = connect(&url).await?;
    let info = next_where(&mut o, "message_type", "game_info").await;
    assert_eq!(info["data"]["player"]["side"], "O");

    next_where(&mut x, "action_type", "init").await;
    next_where(&mut o, "action_type", "init").await;

    // X takes the left column.
    for (row, x_turn) in [(0, true), (0, false), (1, true), (1, false)] {
        if x_turn {
            play(&mut x, row, 0).await?;
        } else {
            play(&mut o, row, 1).await?;
        }
        next_where(&mut x, "action_type", "move").await;
        next_where(&mut o, "action_type", "move").await;
    }
    play(&mut x, 2, 0).await?;

    for client in [&mut x, &mut o] {
        let end = next_where(client, "action_type", "end").await;
        assert_eq!(end["data"]["status"], "X wins");
        assert_eq!(end["data"]["board"][2][0], "X");
        assert!(next_json(client).await.is_none(), "server should close the socket");
    }

    // The finished room leaves the registry.
    tokio::time::timeout(Duration::from_secs(2), async {
        while state.rooms.room_count() > 0 {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .context("finished room should be removed")?;

    Ok(())
}

#[tokio::test]
async fn test_unknown_room_socket_is_not_found() -> Result<()> {
    init_tracing();

    let scenes = scenes_dir();
    let addr = spawn_server(test_state(scenes.path())).await?;

    match connect_async(format!("ws://{addr}/room/room-nowhere-at-all/socket")).await {
        Err(Error::Http(response)) => assert_eq!(response.status(), 404),
        Err(other) => panic!("expected an HTTP error, got {other:?}"),
        Ok(_) => panic!("unknown rooms must refuse the upgrade"),
    }

    Ok(())
}
