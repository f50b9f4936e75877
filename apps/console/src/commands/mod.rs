//! Subcommand handlers. Each one refreshes the caches it needs, performs one action and
//! prints the resulting toasts.

pub mod nodes;
pub mod replications;

use chrono::Utc;
use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};

use hubconsole_core::Error;

use crate::context::ServiceContext;
use crate::render;
use crate::shell::{self, Route, Screen};
use crate::terminal;

/// Render one route once.
pub async fn show(context: &ServiceContext, route: &Route) -> anyhow::Result<()> {
    let body = match route {
        Route::Replications => {
            // the view renders the failure state itself
            let _ = context.replications_service.refresh().await;
            render::replications_view(&context.replications_service.view(), Utc::now())
        }
        Route::Nodes => {
            let _ = context.nodes_service.refresh().await;
            render::nodes_view(&context.nodes_service.view())
        }
        Route::NotFound(_) => shell::not_found(),
    };
    print_screen(context, route, body).await
}

pub async fn print_screen(
    context: &ServiceContext,
    route: &Route,
    body: String,
) -> anyhow::Result<()> {
    let ui = context.refresh_ui_config().await;
    let screen = Screen::new(body, &ui);
    let mut out = io::stdout().lock();
    terminal::write_screen(&mut out, &shell::navbar(route), &screen, &ui)?;
    Ok(())
}

pub const DELETE_CANCELED: &str = "Delete canceled.";

pub fn flush_notifications(context: &ServiceContext) -> io::Result<()> {
    let pending = context.notifications.drain();
    terminal::write_notifications(&mut io::stdout().lock(), &pending)
}

/// Report a mutation the hub answered with `false`.
pub fn report_unapplied(applied: bool, what: &str) {
    if !applied {
        eprintln!("The hub did not apply the {}.", what);
    }
}

/// Prints toasts raised before a failure, then hands the error back.
pub fn fail(context: &ServiceContext, err: Error) -> anyhow::Error {
    if let Err(io_err) = flush_notifications(context) {
        log::warn!("Failed to print notifications: {}", io_err);
    }
    err.into()
}

/// Yes/no questions put to the operator before a destructive action.
pub struct Confirm<R, W> {
    input: R,
    output: W,
    assume_yes: bool,
}

impl Confirm<BufReader<Stdin>, Stdout> {
    pub fn stdin(assume_yes: bool) -> Self {
        Self::new(BufReader::new(io::stdin()), io::stdout(), assume_yes)
    }
}

impl<R: BufRead, W: Write> Confirm<R, W> {
    pub fn new(input: R, output: W, assume_yes: bool) -> Self {
        Self {
            input,
            output,
            assume_yes,
        }
    }

    /// Print `question` and `detail`, then read one answer. An empty answer or end of
    /// input takes the default. With `assume_yes` nothing is asked and the answer is yes.
    pub fn ask(
        &mut self,
        question: &str,
        detail: Option<&str>,
        default_yes: bool,
    ) -> io::Result<bool> {
        if self.assume_yes {
            return Ok(true);
        }
        writeln!(self.output, "{}", question)?;
        if let Some(detail) = detail {
            writeln!(self.output, "{}", detail)?;
        }
        write!(self.output, "{} ", if default_yes { "[Y/n]" } else { "[y/N]" })?;
        self.output.flush()?;

        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            writeln!(self.output)?;
            return Ok(default_yes);
        }
        Ok(match answer.trim().to_ascii_lowercase().as_str() {
            "" => default_yes,
            "y" | "yes" => true,
            _ => false,
        })
    }

    pub fn note(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{}", message)
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

pub async fn saved_queries(context: &ServiceContext) -> anyhow::Result<()> {
    let queries = context.replications_service.saved_queries().await?;
    println!("{}", render::saved_queries(&queries));
    Ok(())
}
