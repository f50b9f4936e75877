//! Plain-text views of the hub state.

use chrono::{DateTime, Utc};

use hubconsole_core::cache::QueryState;
use hubconsole_core::nodes::Node;
use hubconsole_core::queries::SavedQuery;
use hubconsole_core::replications::{
    allowed_actions, priority_string, split_filter, status_display_name, Replication,
    ReplicationGroups,
};
use hubconsole_core::utils::{format_bytes, format_relative};

use crate::shell::SERVER_ERROR;

pub const LOADING: &str = "Loading...";

pub const REMOTE_MANAGED_HELP: &str = "Replications in this table are remotely managed by the \
Cloud because one of the source or destination Nodes has been identified as a Cloud ready Node. \
They will be run by the Cloud and statistics for these Replications will not be available locally.";

const REMOTE_MARKER: &str = "[cloud]";

/// Legend printed under the tables when a marked row is shown.
pub const REMOTE_MARKER_HELP: &str = "[cloud] This Replication is remotely managed by the Cloud \
because one of the source or destination Nodes has been identified as a Cloud ready Node. It will \
be run by the Cloud and statistics for it will not be available locally.";

/// Left-aligned columns sized to the widest cell.
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let render = |cells: &[&str]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let mut out = vec![
        render(headers),
        render(&rule.iter().map(String::as_str).collect::<Vec<_>>()),
    ];
    for row in rows {
        out.push(render(&row.iter().map(String::as_str).collect::<Vec<_>>()));
    }
    out.join("\n")
}

fn yes_no(value: bool) -> String {
    if value { "Yes" } else { "No" }.to_string()
}

fn replication_row(replication: &Replication, now: DateTime<Utc>) -> Vec<String> {
    let filter = split_filter(&replication.filter);
    let sorting = filter
        .effective_sorts()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    let name = if replication.is_remote_managed() {
        format!("{} {}", replication.name, REMOTE_MARKER)
    } else {
        replication.name.clone()
    };
    let actions = allowed_actions(replication)
        .iter()
        .map(|a| a.label())
        .collect::<Vec<_>>()
        .join("/");

    vec![
        name,
        status_display_name(replication).unwrap_or("-").to_string(),
        replication.source.name.clone(),
        replication.destination.name.clone(),
        priority_string(replication.priority),
        yes_no(replication.bi_directional),
        filter.cql,
        sorting,
        replication.stats.items_transferred().to_string(),
        format_bytes(replication.stats.bytes_transferred(), true),
        format_relative(replication.stats.last_run, now),
        format_relative(replication.stats.last_success, now),
        actions,
        replication.id.to_string(),
    ]
}

pub fn replications_table(title: &str, replications: &[Replication], now: DateTime<Utc>) -> String {
    let rows: Vec<_> = replications
        .iter()
        .map(|r| replication_row(r, now))
        .collect();
    format!(
        "{}\n\n{}",
        title,
        table(
            &[
                "Name",
                "Last Run Status",
                "Source",
                "Destination",
                "Priority",
                "Bidirectional",
                "Filter",
                "Sorting",
                "Items Transferred",
                "Data Transferred",
                "Last Run",
                "Last Success",
                "Actions",
                "ID",
            ],
            &rows,
        )
    )
}

pub fn remote_replications_table(replications: &[Replication]) -> String {
    let rows: Vec<_> = replications
        .iter()
        .map(|r| {
            vec![
                r.name.clone(),
                r.source.name.clone(),
                r.destination.name.clone(),
                yes_no(r.bi_directional),
                yes_no(r.suspended),
                r.id.to_string(),
            ]
        })
        .collect();
    format!(
        "Remote Managed Replications\n{}\n\n{}",
        REMOTE_MANAGED_HELP,
        table(
            &["Name", "Source", "Destination", "Bidirectional", "Suspended", "ID"],
            &rows,
        )
    )
}

pub fn empty_replications() -> String {
    [
        "No replications yet.",
        "",
        "  + Add Replication",
        "    hubconsole replications add --name <name> --source <node> --destination <node> --filter <cql>",
    ]
    .join("\n")
}

pub fn replications_view(state: &QueryState<ReplicationGroups>, now: DateTime<Utc>) -> String {
    let groups = match state {
        QueryState::Loading => return LOADING.to_string(),
        QueryState::Failed(_) => return SERVER_ERROR.to_string(),
        QueryState::Ready(groups) => groups,
    };
    if groups.is_empty() {
        return empty_replications();
    }

    let mut sections = Vec::new();
    if !groups.active.is_empty() {
        sections.push(replications_table("Active Replications", &groups.active, now));
    }
    if !groups.inactive.is_empty() {
        sections.push(replications_table(
            "Inactive Replications",
            &groups.inactive,
            now,
        ));
    }
    if groups
        .active
        .iter()
        .chain(&groups.inactive)
        .any(Replication::is_remote_managed)
    {
        sections.push(REMOTE_MARKER_HELP.to_string());
    }
    if !groups.remote_managed.is_empty() {
        sections.push(remote_replications_table(&groups.remote_managed));
    }
    sections.join("\n\n")
}

pub fn nodes_view(state: &QueryState<Vec<Node>>) -> String {
    let nodes = match state {
        QueryState::Loading => return LOADING.to_string(),
        QueryState::Failed(_) => return SERVER_ERROR.to_string(),
        QueryState::Ready(nodes) => nodes,
    };
    let rows: Vec<_> = nodes
        .iter()
        .map(|n| {
            vec![
                n.name.clone(),
                n.address.url.clone(),
                yes_no(n.remote_managed),
                n.id.to_string(),
            ]
        })
        .collect();
    format!(
        "Nodes\n\n{}",
        table(&["Name", "URL", "Remote Managed", "ID"], &rows)
    )
}

pub fn saved_queries(queries: &[SavedQuery]) -> String {
    let rows: Vec<_> = queries
        .iter()
        .map(|q| vec![q.title.clone(), q.cql.clone()])
        .collect();
    table(&["Title", "Filter"], &rows)
}
