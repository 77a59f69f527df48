use std::{convert::Infallible, time::Duration};

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures_util::stream::Stream;
use serde::Serialize;
use tokio::sync::broadcast::error::RecvError;

use crate::AppState;

/// One message on the app's event bus, forwarded to every open tab.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerEvent {
    pub name: String,
    pub data: String,
}

impl ServerEvent {
    /// Data-less "something changed, refetch" event.
    pub fn signal(name: &str) -> Self {
        Self {
            name: name.to_string(),
            data: "1".to_string(),
        }
    }

    pub fn json<T: Serialize>(name: &str, payload: &T) -> Self {
        Self {
            name: name.to_string(),
            data: serde_json::to_string(payload).unwrap_or_else(|_| "null".to_string()),
        }
    }
}

// GET /events
pub async fn sse_events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.events_tx.subscribe();

    let stream = futures_util::stream::unfold(rx, |mut rx| async {
        let evt = match rx.recv().await {
            Ok(e) => Event::default().event(e.name).data(e.data),
            Err(RecvError::Lagged(_)) => Event::default().event("ping").data("lagged"),
            Err(RecvError::Closed) => return None,
        };

        Some((Ok::<_, Infallible>(evt), rx))
    });

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(20))
            .text("keep-alive"),
    )
}
