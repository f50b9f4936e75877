use clap::{Args, Subcommand};
use std::io::{BufRead, Write};

use hubconsole_core::queries::find_by_title;
use hubconsole_core::replications::{ReplicationForm, ReplicationUpdate, SortPolicy, DEFAULT_PRIORITY};
use hubconsole_core::Error;

use super::{fail, flush_notifications, report_unapplied, show, Confirm, DELETE_CANCELED};
use crate::context::ServiceContext;
use crate::shell::Route;

#[derive(Debug, Subcommand)]
pub enum ReplicationsCommand {
    /// List replications as active and inactive tables
    List,
    /// Create a new replication
    Add(AddReplicationArgs),
    /// Run a replication now
    Run { replication: String },
    /// Cancel a pending or running replication
    Cancel { replication: String },
    /// Suspend a replication
    Suspend { replication: String },
    /// Re-enable a suspended replication
    Enable { replication: String },
    /// Delete a replication
    Delete {
        replication: String,
        /// Keep the data already transferred by this replication
        #[arg(long)]
        keep_data: bool,
        /// Skip the confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Change the priority (1 lowest, 10 highest)
    Priority {
        replication: String,
        #[arg(value_parser = clap::value_parser!(u8).range(1..=10))]
        priority: u8,
    },
    /// Edit an existing replication
    Update(UpdateReplicationArgs),
}

#[derive(Debug, Args)]
pub struct AddReplicationArgs {
    #[arg(long)]
    pub name: String,
    /// Source node name or id
    #[arg(long)]
    pub source: String,
    /// Destination node name or id
    #[arg(long)]
    pub destination: String,
    /// CQL filter. Overrides the filter of --query.
    #[arg(long)]
    pub filter: Option<String>,
    /// Title of a saved search whose filter to use
    #[arg(long)]
    pub query: Option<String>,
    #[arg(long)]
    pub bi_directional: bool,
    #[arg(long, default_value_t = DEFAULT_PRIORITY, value_parser = clap::value_parser!(u8).range(1..=10))]
    pub priority: u8,
    /// Sort policy as attribute[:asc|:desc]. Repeatable.
    #[arg(long = "sort")]
    pub sorts: Vec<SortPolicy>,
}

#[derive(Debug, Args)]
pub struct UpdateReplicationArgs {
    pub replication: String,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub source: Option<String>,
    #[arg(long)]
    pub destination: Option<String>,
    #[arg(long)]
    pub filter: Option<String>,
    #[arg(long)]
    pub bi_directional: Option<bool>,
}

pub async fn execute(context: &ServiceContext, command: ReplicationsCommand) -> anyhow::Result<()> {
    match command {
        ReplicationsCommand::List => return show(context, &Route::Replications).await,
        ReplicationsCommand::Add(args) => add(context, args).await?,
        ReplicationsCommand::Update(args) => update(context, args).await?,
        ReplicationsCommand::Delete {
            replication,
            keep_data,
            yes,
        } => delete(context, &replication, keep_data, &mut Confirm::stdin(yes)).await?,
        other => row_action(context, other).await?,
    }
    flush_notifications(context)?;
    Ok(())
}

async fn add(context: &ServiceContext, args: AddReplicationArgs) -> anyhow::Result<()> {
    let nodes = context.nodes_service();
    let replications = context.replications_service();
    let (_, queries) = futures::try_join!(nodes.refresh(), replications.saved_queries())?;

    let mut form = ReplicationForm {
        name: args.name,
        source_id: Some(nodes.resolve(&args.source)?.id),
        destination_id: Some(nodes.resolve(&args.destination)?.id),
        bi_directional: args.bi_directional,
        priority: args.priority,
        ..ReplicationForm::default()
    };
    if let Some(title) = &args.query {
        let query = find_by_title(&queries, title)
            .ok_or_else(|| Error::not_found(format!("saved search '{}'", title)))?;
        form.select_query(Some(query));
    }
    if let Some(filter) = args.filter {
        form.filter = filter;
    }
    for sort in args.sorts {
        form.add_sort(sort);
    }
    if !form.can_submit() {
        anyhow::bail!("Name, source, destination and filter are all required");
    }

    if let Err(err) = replications.create(&mut form).await {
        for message in [&form.name_error, &form.filter_error, &form.destination_error]
            .into_iter()
            .flatten()
        {
            eprintln!("{}", message);
        }
        return Err(fail(context, err));
    }
    Ok(())
}

async fn update(context: &ServiceContext, args: UpdateReplicationArgs) -> anyhow::Result<()> {
    let nodes = context.nodes_service();
    let replications = context.replications_service();
    futures::try_join!(nodes.refresh(), replications.refresh())?;

    let target = replications.resolve(&args.replication)?;
    let mut request = ReplicationUpdate::new(target.id);
    request.name = args.name;
    request.source_id = args
        .source
        .map(|key| nodes.resolve(&key).map(|n| n.id))
        .transpose()?;
    request.destination_id = args
        .destination
        .map(|key| nodes.resolve(&key).map(|n| n.id))
        .transpose()?;
    request.filter = args.filter;
    request.bi_directional = args.bi_directional;

    let node_list = nodes.cache().list();
    let applied = replications
        .update(request, &node_list)
        .await
        .map_err(|err| fail(context, err))?;
    report_unapplied(applied, "update");
    Ok(())
}

pub const DELETE_DETAIL: &str = "All historical statistics associated with this Replication \
will be removed in addition to the Replication.";
pub const DELETE_DATA_QUESTION: &str = "Delete Data?";
pub const DELETE_DATA_HELP: &str = "If yes, resources that were copied to this local Node will \
be deleted along with the Replication.";

async fn delete<R: BufRead, W: Write>(
    context: &ServiceContext,
    key: &str,
    keep_data: bool,
    confirm: &mut Confirm<R, W>,
) -> anyhow::Result<()> {
    let service = context.replications_service();
    service.refresh().await?;
    let target = service.resolve(key)?;

    let question = format!("Are you sure you want to delete {}?", target.name);
    if !confirm.ask(&question, Some(DELETE_DETAIL), false)? {
        confirm.note(DELETE_CANCELED)?;
        return Ok(());
    }
    let delete_data =
        !keep_data && confirm.ask(DELETE_DATA_QUESTION, Some(DELETE_DATA_HELP), true)?;

    let applied = service
        .delete(&target.id, delete_data)
        .await
        .map_err(|err| fail(context, err))?;
    report_unapplied(applied, "delete");
    Ok(())
}

async fn row_action(context: &ServiceContext, command: ReplicationsCommand) -> anyhow::Result<()> {
    let service = context.replications_service();
    service.refresh().await?;

    let (key, action) = match &command {
        ReplicationsCommand::Run { replication } => (replication, "run"),
        ReplicationsCommand::Cancel { replication } => (replication, "cancel"),
        ReplicationsCommand::Suspend { replication } => (replication, "suspend"),
        ReplicationsCommand::Enable { replication } => (replication, "enable"),
        ReplicationsCommand::Priority { replication, .. } => (replication, "priority change"),
        _ => return Ok(()),
    };
    let id = service.resolve(key)?.id;

    let outcome = match command {
        ReplicationsCommand::Run { .. } => service.run(&id).await,
        ReplicationsCommand::Cancel { .. } => service.cancel(&id).await,
        ReplicationsCommand::Suspend { .. } => service.set_suspended(&id, true).await,
        ReplicationsCommand::Enable { .. } => service.set_suspended(&id, false).await,
        ReplicationsCommand::Priority { priority, .. } => {
            service.change_priority(&id, priority).await.map(|_| true)
        }
        _ => Ok(true),
    };
    let applied = outcome.map_err(|err| fail(context, err))?;
    report_unapplied(applied, action);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::Arc;

    use crate::test_support::{context, replication, RecordingHub};

    fn hub() -> Arc<RecordingHub> {
        Arc::new(RecordingHub {
            replications: vec![replication("r-1", "Nightly")],
            ..RecordingHub::default()
        })
    }

    fn answers(text: &str) -> Confirm<Cursor<Vec<u8>>, Vec<u8>> {
        Confirm::new(Cursor::new(text.as_bytes().to_vec()), Vec::new(), false)
    }

    #[tokio::test]
    async fn declined_delete_leaves_hub_untouched() {
        let hub = hub();
        let context = context(Arc::clone(&hub));
        let mut confirm = answers("n\n");

        delete(&context, "Nightly", false, &mut confirm).await.unwrap();

        assert!(hub.mutations().is_empty());
        assert_eq!(context.replications_service.cache().len(), 1);
        let printed = String::from_utf8(confirm.into_output()).unwrap();
        assert!(printed.contains("Are you sure you want to delete Nightly?"));
        assert!(printed.contains(DELETE_DETAIL));
        assert!(printed.contains(DELETE_CANCELED));
    }

    #[tokio::test]
    async fn confirmed_delete_defaults_to_deleting_data() {
        let hub = hub();
        let context = context(Arc::clone(&hub));
        let mut confirm = answers("y\n\n");

        delete(&context, "Nightly", false, &mut confirm).await.unwrap();

        assert_eq!(hub.mutations(), vec!["delete_replication r-1 true"]);
        assert!(context.replications_service.cache().is_empty());
        let printed = String::from_utf8(confirm.into_output()).unwrap();
        assert!(printed.contains(DELETE_DATA_QUESTION));
    }

    #[tokio::test]
    async fn keep_data_skips_the_data_question() {
        let hub = hub();
        let context = context(Arc::clone(&hub));
        let mut confirm = answers("y\n");

        delete(&context, "r-1", true, &mut confirm).await.unwrap();

        assert_eq!(hub.mutations(), vec!["delete_replication r-1 false"]);
        let printed = String::from_utf8(confirm.into_output()).unwrap();
        assert!(!printed.contains(DELETE_DATA_QUESTION));
    }

    #[tokio::test]
    async fn yes_flag_deletes_without_asking() {
        let hub = hub();
        let context = context(Arc::clone(&hub));
        let mut confirm = Confirm::new(Cursor::new(Vec::new()), Vec::new(), true);

        delete(&context, "Nightly", false, &mut confirm).await.unwrap();

        assert_eq!(hub.mutations(), vec!["delete_replication r-1 true"]);
        assert!(confirm.into_output().is_empty());
    }
}
