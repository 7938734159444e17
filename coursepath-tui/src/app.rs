//! Event loop: paint, wait for input, route it to the page.

use crossterm::event::EventStream;
use disclosure::convert_event;
use futures::StreamExt;
use log::{debug, error, info, trace};

use crate::config::Config;
use crate::error::AppError;
use crate::page::{Flow, Page};
use crate::terminal::TerminalGuard;

pub async fn run(config: &Config) -> Result<(), AppError> {
    let mut terminal = TerminalGuard::new()?;
    let mut page = Page::new(config);
    let mut events = EventStream::new();
    info!("CoursePath started");

    loop {
        terminal.draw(|buf| page.render(buf))?;

        let event = tokio::select! {
            next = events.next() => match next {
                Some(Ok(event)) => event,
                Some(Err(e)) => {
                    error!("Event stream error: {}", e);
                    continue;
                }
                None => {
                    debug!("Event stream closed");
                    break;
                }
            },
            _ = tokio::signal::ctrl_c() => {
                debug!("Interrupted");
                break;
            }
        };

        trace!("Crossterm event: {:?}", event);
        let Some(event) = convert_event(event) else {
            continue;
        };
        if page.handle(event) == Flow::Quit {
            break;
        }
    }

    debug!("{} listeners still registered", page.document().listener_count());
    info!("CoursePath exiting");
    Ok(())
}
