use clap::{Args, Subcommand};
use std::io::{BufRead, Write};

use hubconsole_core::nodes::{AddressInput, HostInput, NodeForm, NodeUpdate, DEFAULT_ROOT_CONTEXT};

use super::{fail, flush_notifications, report_unapplied, show, Confirm, DELETE_CANCELED};
use crate::context::ServiceContext;
use crate::shell::Route;

#[derive(Debug, Subcommand)]
pub enum NodesCommand {
    /// List registered nodes
    List,
    /// Register a new node
    Add(AddNodeArgs),
    /// Remove a node that no replication uses
    Delete {
        node: String,
        /// Skip the confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Edit a node
    Update(UpdateNodeArgs),
}

#[derive(Debug, Args)]
pub struct AddNodeArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub hostname: String,
    #[arg(long)]
    pub port: String,
    /// The path under which the replication services can be found
    #[arg(long, default_value = DEFAULT_ROOT_CONTEXT)]
    pub root_context: String,
}

#[derive(Debug, Args)]
pub struct UpdateNodeArgs {
    pub node: String,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long, requires = "port")]
    pub hostname: Option<String>,
    #[arg(long, requires = "hostname")]
    pub port: Option<i32>,
    #[arg(long)]
    pub root_context: Option<String>,
}

pub async fn execute(context: &ServiceContext, command: NodesCommand) -> anyhow::Result<()> {
    match command {
        NodesCommand::List => return show(context, &Route::Nodes).await,
        NodesCommand::Add(args) => add(context, args).await?,
        NodesCommand::Delete { node, yes } => {
            delete(context, &node, &mut Confirm::stdin(yes)).await?
        }
        NodesCommand::Update(args) => update(context, args).await?,
    }
    flush_notifications(context)?;
    Ok(())
}

async fn add(context: &ServiceContext, args: AddNodeArgs) -> anyhow::Result<()> {
    let service = context.nodes_service();
    let mut form = NodeForm {
        name: args.name,
        hostname: args.hostname,
        port: args.port,
        root_context: args.root_context,
        ..NodeForm::default()
    };
    if let Err(err) = service.create(&mut form).await {
        for message in [&form.name_error, &form.hostname_error, &form.port_error]
            .into_iter()
            .flatten()
        {
            eprintln!("{}", message);
        }
        return Err(fail(context, err));
    }
    Ok(())
}

async fn delete<R: BufRead, W: Write>(
    context: &ServiceContext,
    key: &str,
    confirm: &mut Confirm<R, W>,
) -> anyhow::Result<()> {
    let service = context.nodes_service();
    service.refresh().await?;
    let node = service.resolve(key)?;

    let question = format!("Are you sure you want to delete the node {}?", node.name);
    if !confirm.ask(&question, None, false)? {
        confirm.note(DELETE_CANCELED)?;
        return Ok(());
    }
    service
        .delete(&node.id)
        .await
        .map_err(|err| fail(context, err))
}

async fn update(context: &ServiceContext, args: UpdateNodeArgs) -> anyhow::Result<()> {
    let service = context.nodes_service();
    service.refresh().await?;
    let node = service.resolve(&args.node)?;

    let address = match (args.hostname, args.port) {
        (Some(hostname), Some(port)) => Some(AddressInput {
            host: HostInput { hostname, port },
        }),
        _ => None,
    };
    let request = NodeUpdate {
        id: node.id,
        name: args.name,
        address,
        root_context: args.root_context,
    };
    let applied = service
        .update(request)
        .await
        .map_err(|err| fail(context, err))?;
    report_unapplied(applied, "update");
    Ok(())
}
