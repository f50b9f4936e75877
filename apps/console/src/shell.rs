//! Routes, the navigation bar and the static views around them.

use hubconsole_core::ui_config::UiConfig;

pub const APP_TITLE: &str = "Replication Hub Console";

pub const HELP_TITLE: &str = "Welcome to the Replication Hub Console";
pub const HELP_INTRO: &str =
    "Replication is a tool that enables products to be replicated efficiently between DDF based nodes.";
pub const HELP_STEPS: [&str; 2] = [
    "1. Run `hubconsole nodes add` to add nodes.",
    "2. Run `hubconsole replications add` to configure a new Replication task.",
];

pub const SERVER_ERROR: &str =
    "Something went wrong talking to the hub. Try again shortly or contact your administrator.";

/// The views the console can show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Replications,
    Nodes,
    NotFound(String),
}

impl Route {
    /// `/` is the replications home, `/nodes` the nodes view. Everything else is not found.
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim();
        let normalized = trimmed.trim_start_matches('#');
        match normalized {
            "" | "/" => Self::Replications,
            "/nodes" | "/nodes/" | "nodes" => Self::Nodes,
            _ => Self::NotFound(trimmed.to_string()),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Self::Replications => "/",
            Self::Nodes => "/nodes",
            Self::NotFound(path) => path,
        }
    }
}

/// Top bar naming the app and the two navigable views, with the active one bracketed.
pub fn navbar(route: &Route) -> String {
    let entry = |label: &str, active: bool| {
        if active {
            format!("[{}]", label)
        } else {
            format!(" {} ", label)
        }
    };
    format!(
        "{}  {} {}  (hubconsole guide for help)",
        APP_TITLE,
        entry("Replications /", *route == Route::Replications),
        entry("Nodes /nodes", *route == Route::Nodes),
    )
}

pub fn help_dialog() -> String {
    let mut text = format!("{}\n\n{}\n\n", HELP_TITLE, HELP_INTRO);
    for step in HELP_STEPS {
        text.push_str(step);
        text.push('\n');
    }
    text
}

pub fn not_found() -> String {
    [
        "Oops!",
        "",
        "The page you are looking for cannot be found. Try using the menu to navigate the site.",
        "",
        "Or open / to return home.",
    ]
    .join("\n")
}

/// A rendered view with the optional configured banner around it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    pub header: Option<String>,
    pub body: String,
    pub footer: Option<String>,
}

impl Screen {
    pub fn new(body: String, ui: &UiConfig) -> Self {
        Self {
            header: ui.has_header().then(|| ui.header.trim().to_string()),
            body,
            footer: ui.has_footer().then(|| ui.footer.trim().to_string()),
        }
    }
}
