//! Structured events emitted by the engines when `tracing` is enabled.

#![cfg(feature = "tracing")]

use std::sync::{Arc, Mutex};

use ftui_grid::{
    AutoSizeMode, ColumnWidth, GridColumn, GridSize, PaneLayoutEngine, PaneLayoutInput,
    ResizeMode, compute_resize, fit_columns,
};
use tracing::Subscriber;
use tracing_subscriber::Layer;
use tracing_subscriber::layer::{Context, SubscriberExt};

#[derive(Default)]
struct GridTraceState {
    messages: Vec<String>,
    saw_layout_span: bool,
}

struct GridTraceCapture {
    state: Arc<Mutex<GridTraceState>>,
}

impl<S> Layer<S> for GridTraceCapture
where
    S: Subscriber + for<'lookup> tracing_subscriber::registry::LookupSpan<'lookup>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::Id,
        _ctx: Context<'_, S>,
    ) {
        if attrs.metadata().name() == "grid.pane_layout" {
            self.state.lock().expect("grid trace lock").saw_layout_span = true;
        }
    }

    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        struct Msg {
            message: Option<String>,
        }
        impl tracing::field::Visit for Msg {
            fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
                if field.name() == "message" {
                    self.message = Some(value.to_string());
                }
            }

            fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
                if field.name() == "message" {
                    self.message = Some(format!("{value:?}").trim_matches('"').to_string());
                }
            }
        }
        let mut msg = Msg { message: None };
        event.record(&mut msg);
        if let Some(message) = msg.message {
            self.state
                .lock()
                .expect("grid trace lock")
                .messages
                .push(message);
        }
    }
}

#[test]
fn resize_and_layout_emit_events() {
    let state = Arc::new(Mutex::new(GridTraceState::default()));
    let subscriber = tracing_subscriber::registry().with(GridTraceCapture {
        state: Arc::clone(&state),
    });
    let _guard = tracing::subscriber::set_default(subscriber);
    tracing::callsite::rebuild_interest_cache();

    let mut columns = vec![
        GridColumn::new("a").width(100.0),
        GridColumn::new("b").width(100.0),
    ];
    let changed = compute_resize(
        10.0,
        &mut columns,
        |column| column.key == "a",
        ColumnWidth,
        ResizeMode::PushAndPull,
    )
    .expect("push-and-pull has an engine");
    assert!(changed);

    let input = PaneLayoutInput::new(GridSize::new(300.0, 200.0)).left_frozen(150.0);
    let layout = PaneLayoutEngine::default().compute(&input);
    assert!(layout.relayout_next_frame);

    let snapshot = state.lock().expect("grid trace lock");
    assert!(snapshot.saw_layout_span, "expected grid.pane_layout span");
    assert!(
        snapshot.messages.iter().any(|m| m == "grid.resize"),
        "expected grid.resize event, got {:?}",
        snapshot.messages
    );
    assert!(
        snapshot.messages.iter().any(|m| m == "grid.frozen_flip"),
        "expected grid.frozen_flip event"
    );
}

#[test]
fn column_fit_emits_auto_size_event() {
    let state = Arc::new(Mutex::new(GridTraceState::default()));
    let subscriber = tracing_subscriber::registry().with(GridTraceCapture {
        state: Arc::clone(&state),
    });
    let _guard = tracing::subscriber::set_default(subscriber);
    tracing::callsite::rebuild_interest_cache();

    let mut columns = vec![
        GridColumn::new("a").width(100.0),
        GridColumn::new("b").width(300.0),
    ];
    fit_columns(&mut columns, 600.0, AutoSizeMode::Equal, 80.0, None)
        .expect("equal mode has a strategy");
    assert_eq!(columns[0].width, 300.0);

    let snapshot = state.lock().expect("grid trace lock");
    assert!(
        snapshot.messages.iter().any(|m| m == "grid.auto_size"),
        "expected grid.auto_size event, got {:?}",
        snapshot.messages
    );
}
