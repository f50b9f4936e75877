//! GraphQL documents sent to the hub.

/// A named operation and the response field that carries its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    pub name: &'static str,
    pub field: &'static str,
    pub document: &'static str,
}

macro_rules! site_fields {
    () => {
        "id name remoteManaged address { url }"
    };
}

macro_rules! replication_fields {
    () => {
        concat!(
            "id name ",
            "source { ",
            site_fields!(),
            " } ",
            "destination { ",
            site_fields!(),
            " } ",
            "biDirectional filter suspended priority ",
            "stats { replicationStatus pushCount pullCount pushBytes pullBytes lastRun lastSuccess startTime }"
        )
    };
}

pub const ALL_REPLICATIONS: Operation = Operation {
    name: "allReplications",
    field: "replications",
    document: concat!(
        "query allReplications { replication { replications { ",
        replication_fields!(),
        " } } }"
    ),
};

pub const ALL_SITES: Operation = Operation {
    name: "allSites",
    field: "sites",
    document: concat!(
        "query allSites { replication { sites { ",
        site_fields!(),
        " } } }"
    ),
};

pub const ALL_QUERIES: Operation = Operation {
    name: "allQueries",
    field: "queries",
    document: "query allQueries { replication { queries { cql title } } }",
};

pub const UI_CONFIG: Operation = Operation {
    name: "uiConfig",
    field: "getUiConfig",
    document: "query uiConfig { replication { getUiConfig { header footer color background } } }",
};

pub const CREATE_REPLICATION: Operation = Operation {
    name: "createReplication",
    field: "createReplication",
    document: concat!(
        "mutation createReplication($name: String!, $sourceId: Pid!, $destinationId: Pid!, ",
        "$filter: String!, $biDirectional: Boolean, $priority: Int) { ",
        "createReplication(name: $name, sourceId: $sourceId, destinationId: $destinationId, ",
        "filter: $filter, biDirectional: $biDirectional, priority: $priority) { ",
        replication_fields!(),
        " } }"
    ),
};

pub const UPDATE_REPLICATION: Operation = Operation {
    name: "updateReplication",
    field: "updateReplication",
    document: concat!(
        "mutation updateReplication($id: Pid!, $name: String, $sourceId: Pid, ",
        "$destinationId: Pid, $filter: String, $biDirectional: Boolean, $suspended: Boolean) { ",
        "updateReplication(id: $id, name: $name, sourceId: $sourceId, ",
        "destinationId: $destinationId, filter: $filter, biDirectional: $biDirectional, ",
        "suspended: $suspended) }"
    ),
};

pub const SUSPEND_REPLICATION: Operation = Operation {
    name: "suspendReplication",
    field: "suspendReplication",
    document: "mutation suspendReplication($id: Pid!, $suspend: Boolean!) { suspendReplication(id: $id, suspend: $suspend) }",
};

pub const CANCEL_REPLICATION: Operation = Operation {
    name: "cancelReplication",
    field: "cancelReplication",
    document: "mutation cancelReplication($id: Pid!) { cancelReplication(id: $id) }",
};

pub const RUN_REPLICATION: Operation = Operation {
    name: "runReplication",
    field: "runReplication",
    document: "mutation runReplication($id: Pid!) { runReplication(id: $id) }",
};

pub const DELETE_REPLICATION: Operation = Operation {
    name: "deleteReplication",
    field: "deleteReplication",
    document: "mutation deleteReplication($id: Pid!, $deleteData: Boolean) { deleteReplication(id: $id, deleteData: $deleteData) }",
};

pub const CHANGE_PRIORITY: Operation = Operation {
    name: "changePriority",
    field: "changePriority",
    document: "mutation changePriority($id: Pid!, $priority: Int!) { changePriority(id: $id, priority: $priority) }",
};

pub const CREATE_SITE: Operation = Operation {
    name: "createReplicationSite",
    field: "createReplicationSite",
    document: concat!(
        "mutation createReplicationSite($name: String!, $address: Address!, $rootContext: String) { ",
        "createReplicationSite(name: $name, address: $address, rootContext: $rootContext) { ",
        site_fields!(),
        " } }"
    ),
};

pub const UPDATE_SITE: Operation = Operation {
    name: "updateReplicationSite",
    field: "updateReplicationSite",
    document: concat!(
        "mutation updateReplicationSite($id: Pid!, $name: String, $address: Address, $rootContext: String) { ",
        "updateReplicationSite(id: $id, name: $name, address: $address, rootContext: $rootContext) }"
    ),
};

pub const DELETE_SITE: Operation = Operation {
    name: "deleteReplicationSite",
    field: "deleteReplicationSite",
    document: "mutation deleteReplicationSite($id: Pid!) { deleteReplicationSite(id: $id) }",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_name_their_result_field() {
        for op in [
            ALL_REPLICATIONS,
            ALL_SITES,
            ALL_QUERIES,
            UI_CONFIG,
            CREATE_REPLICATION,
            UPDATE_REPLICATION,
            SUSPEND_REPLICATION,
            CANCEL_REPLICATION,
            RUN_REPLICATION,
            DELETE_REPLICATION,
            CHANGE_PRIORITY,
            CREATE_SITE,
            UPDATE_SITE,
            DELETE_SITE,
        ] {
            assert!(op.document.contains(op.name), "{}", op.name);
            assert!(op.document.contains(op.field), "{}", op.name);
        }
    }

    #[test]
    fn replication_query_requests_remote_flags() {
        assert!(ALL_REPLICATIONS
            .document
            .contains("source { id name remoteManaged address { url } }"));
        assert!(ALL_REPLICATIONS.document.contains("replicationStatus"));
    }
}
