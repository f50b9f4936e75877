//! Live view: the list poller feeds redraws, and a slower local tick keeps relative
//! timestamps fresh between polls.

use chrono::Utc;
use std::future::Future;
use std::io;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::time::Interval;

use hubconsole_core::polling::{ListPoller, PollEvent, PollSource};
use hubconsole_core::ui_config::UiConfig;

use crate::commands::print_screen;
use crate::config::ConsoleConfig;
use crate::context::ServiceContext;
use crate::render;
use crate::shell::{self, Route, Screen};
use crate::terminal;

fn body(context: &ServiceContext, route: &Route) -> String {
    match route {
        Route::Replications => {
            render::replications_view(&context.replications_service.view(), Utc::now())
        }
        Route::Nodes => render::nodes_view(&context.nodes_service.view()),
        Route::NotFound(_) => shell::not_found(),
    }
}

fn draw(context: &ServiceContext, route: &Route, ui: &UiConfig) -> io::Result<()> {
    let screen = Screen::new(body(context, route), ui);
    let pending = context.notifications.drain();
    let mut out = io::stdout().lock();
    terminal::clear(&mut out)?;
    terminal::write_screen(&mut out, &shell::navbar(route), &screen, ui)?;
    terminal::write_notifications(&mut out, &pending)
}

pub async fn run(
    context: Arc<ServiceContext>,
    route: Route,
    config: &ConsoleConfig,
) -> anyhow::Result<()> {
    let source: Arc<dyn PollSource> = match &route {
        Route::Replications => context.replications_service(),
        Route::Nodes => context.nodes_service(),
        Route::NotFound(_) => return print_screen(&context, &route, shell::not_found()).await,
    };

    tracing::info!(route = route.path(), "Starting live view");
    let ui = context.refresh_ui_config().await;
    draw(&context, &route, &ui)?;

    let poller = ListPoller::new(config.poll_interval);
    let (events_tx, mut events) = mpsc::unbounded_channel();
    poller.start(vec![source], events_tx).await;

    let mut redraw = tokio::time::interval(config.redraw_interval);
    redraw.tick().await;
    drive(&mut events, &mut redraw, tokio::signal::ctrl_c(), || {
        draw(&context, &route, &ui)
    })
    .await?;

    poller.stop().await;
    Ok(())
}

/// Redraws on every poll event and redraw tick until the channel closes or `shutdown`
/// completes. `shutdown` is created once and polled across iterations.
async fn drive<S, F>(
    events: &mut mpsc::UnboundedReceiver<PollEvent>,
    redraw: &mut Interval,
    shutdown: S,
    mut draw: F,
) -> io::Result<()>
where
    S: Future,
    F: FnMut() -> io::Result<()>,
{
    tokio::pin!(shutdown);
    loop {
        tokio::select! {
            event = events.recv() => {
                let Some(event) = event else { break };
                tracing::debug!(source = event.source, ok = event.outcome.is_ok(), "poll completed");
                draw()?;
            }
            _ = redraw.tick() => {
                draw()?;
            }
            _ = &mut shutdown => {
                tracing::info!("Interrupted, stopping live view");
                break;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::time::Duration;
    use tokio::time::{interval, sleep, timeout};

    fn event() -> PollEvent {
        PollEvent {
            source: "replications",
            outcome: Ok(1),
            at: Utc::now(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_completes_while_polls_keep_arriving() {
        let (tx, mut events) = mpsc::unbounded_channel();
        let feeder = tokio::spawn(async move {
            let mut tick = interval(Duration::from_secs(10));
            loop {
                tick.tick().await;
                if tx.send(event()).is_err() {
                    break;
                }
            }
        });
        let mut redraw = interval(Duration::from_secs(60));
        redraw.tick().await;

        let mut draws = 0;
        let finished = timeout(
            Duration::from_secs(120),
            drive(&mut events, &mut redraw, sleep(Duration::from_secs(25)), || {
                draws += 1;
                Ok(())
            }),
        )
        .await;

        assert!(matches!(finished, Ok(Ok(()))));
        assert!(draws >= 2);
        feeder.abort();
    }

    #[tokio::test]
    async fn closed_channel_ends_the_view() {
        let (tx, mut events) = mpsc::unbounded_channel();
        tx.send(event()).unwrap();
        drop(tx);
        let mut redraw = interval(Duration::from_secs(60));
        redraw.tick().await;

        let mut draws = 0;
        drive(&mut events, &mut redraw, std::future::pending::<()>(), || {
            draws += 1;
            Ok(())
        })
        .await
        .unwrap();
        assert_eq!(draws, 1);
    }
}
