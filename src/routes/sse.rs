use crate::state::RosterState;
use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::Stream;
use std::convert::Infallible;
use tokio_stream::{
    StreamExt,
    wrappers::{BroadcastStream, errors::BroadcastStreamRecvError},
};

/// One tick of the shared refresh signal. The generation only ever
/// goes up, so a listener sees each change at most once.
#[derive(Clone, Copy, Debug)]
pub struct RefreshEvent {
    pub generation: u64,
}

pub async fn sse_feed(
    State(state): State<RosterState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.subscribe_to_refresh_feed();

    let stream = BroadcastStream::new(rx).map(move |event| {
        Ok(Event::default()
            .event("students_changed")
            .data(effective_generation(&state, event).to_string()))
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// A lagged listener missed some ticks; the current generation stands
/// in for all of them, so a single refetch catches the listener up.
fn effective_generation(
    state: &RosterState,
    event: Result<RefreshEvent, BroadcastStreamRecvError>,
) -> u64 {
    match event {
        Ok(RefreshEvent { generation }) => generation,
        Err(BroadcastStreamRecvError::Lagged(missed)) => {
            warn!(missed, "Refresh listener lagged");
            state.refresh_generation()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{RefreshEvent, effective_generation};
    use crate::{config::RuntimeConfiguration, state::RosterState};
    use pretty_assertions::assert_eq;
    use tokio_stream::wrappers::errors::BroadcastStreamRecvError;

    fn state() -> RosterState {
        RosterState::new(&RuntimeConfiguration::from_api_base_url("http://localhost:9"))
    }

    #[test]
    fn a_delivered_tick_keeps_its_own_generation() {
        let state = state();
        state.students_changed();

        assert_eq!(
            effective_generation(&state, Ok(RefreshEvent { generation: 1 })),
            1
        );
    }

    #[test]
    fn a_lagged_listener_is_caught_up_to_the_current_generation() {
        let state = state();
        for _ in 0..12 {
            state.students_changed();
        }

        assert_eq!(
            effective_generation(&state, Err(BroadcastStreamRecvError::Lagged(4))),
            12
        );
    }
}
