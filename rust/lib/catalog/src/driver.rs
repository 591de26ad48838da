use std::net::{Ipv6Addr, SocketAddr};
use std::time::Duration;

use scylla::client::execution_profile::ExecutionProfile;
use scylla::client::session::Session;
use scylla::client::session_builder::SessionBuilder;
use scylla::policies::load_balancing::DefaultPolicy;
use scylla::DeserializeRow;
use scylla_gen_codegen::ColumnRow;
use tracing::{debug, info};

use crate::error::CatalogError;
use crate::traits::CatalogSource;

pub const DEFAULT_PORT: u16 = 9042;

const COLUMNS_QUERY: &str = "SELECT table_name, column_name, clustering_order, kind, position, \
     type AS column_type FROM system_schema.columns WHERE keyspace_name = ?";

const TABLE_COLUMNS_QUERY: &str = "SELECT table_name, column_name, clustering_order, kind, \
     position, type AS column_type FROM system_schema.columns \
     WHERE keyspace_name = ? AND table_name IN ?";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// How to reach the cluster.
#[derive(Debug, Clone)]
pub struct ConnectOptions {
    /// Host names or addresses, with or without a port.
    pub contact_points: Vec<String>,
    /// Port appended to contact points that do not carry one.
    pub port: u16,
    /// Data center the load balancer prefers.
    pub local_data_center: String,
    pub credentials: Option<Credentials>,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl ConnectOptions {
    /// Contact points as `host:port` strings.
    pub fn known_nodes(&self) -> Vec<String> {
        self.contact_points
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .map(|p| with_port(p, self.port))
            .collect()
    }
}

/// Append `port` unless the contact point already names one. Bare IPv6
/// addresses are bracketed first so their colons are not read as a port.
fn with_port(point: &str, port: u16) -> String {
    if point.parse::<SocketAddr>().is_ok() {
        return point.to_string();
    }
    if point.parse::<Ipv6Addr>().is_ok() {
        return format!("[{}]:{}", point, port);
    }
    if point.starts_with('[') && point.ends_with(']') {
        return format!("{}:{}", point, port);
    }
    match point.rsplit_once(':') {
        Some((host, explicit)) if !host.contains(':') && explicit.parse::<u16>().is_ok() => {
            point.to_string()
        }
        _ => format!("{}:{}", point, port),
    }
}

#[derive(DeserializeRow)]
struct CatalogColumn {
    table_name: String,
    column_name: String,
    clustering_order: Option<String>,
    kind: String,
    position: i32,
    column_type: String,
}

impl From<CatalogColumn> for ColumnRow {
    fn from(c: CatalogColumn) -> Self {
        ColumnRow {
            table_name: c.table_name,
            column_name: c.column_name,
            clustering_order: c.clustering_order,
            kind: c.kind,
            position: c.position,
            column_type: c.column_type,
        }
    }
}

/// ScyllaCatalog is a CatalogSource backed by a live driver session.
pub struct ScyllaCatalog {
    session: Session,
}

impl ScyllaCatalog {
    pub async fn connect(options: &ConnectOptions) -> Result<Self, CatalogError> {
        let nodes = options.known_nodes();
        if nodes.is_empty() {
            return Err(CatalogError::Connection("no contact points given".to_string()));
        }
        info!(nodes = ?nodes, dc = %options.local_data_center, "connecting to cluster");

        let policy = DefaultPolicy::builder()
            .prefer_datacenter(options.local_data_center.clone())
            .build();
        let profile = ExecutionProfile::builder()
            .load_balancing_policy(policy)
            .request_timeout(Some(options.request_timeout))
            .build();

        let mut builder = SessionBuilder::new()
            .known_nodes(&nodes)
            .connection_timeout(options.connect_timeout)
            .default_execution_profile_handle(profile.into_handle());
        if let Some(credentials) = &options.credentials {
            builder = builder.user(&credentials.username, &credentials.password);
        }

        let session = builder
            .build()
            .await
            .map_err(|e| CatalogError::Connection(e.to_string()))?;

        Ok(Self { session })
    }
}

impl CatalogSource for ScyllaCatalog {
    async fn fetch_columns(
        &self,
        keyspace: &str,
        tables: &[String],
    ) -> Result<Vec<ColumnRow>, CatalogError> {
        debug!(keyspace, tables = ?tables, "querying system_schema.columns");

        let result = if tables.is_empty() {
            self.session
                .query_unpaged(COLUMNS_QUERY, (keyspace,))
                .await
        } else {
            self.session
                .query_unpaged(TABLE_COLUMNS_QUERY, (keyspace, tables.to_vec()))
                .await
        }
        .map_err(|e| CatalogError::Query(e.to_string()))?;

        let rows = result
            .into_rows_result()
            .map_err(|e| CatalogError::Decode(e.to_string()))?;

        let mut columns = Vec::new();
        for row in rows
            .rows::<CatalogColumn>()
            .map_err(|e| CatalogError::Decode(e.to_string()))?
        {
            let row = row.map_err(|e| CatalogError::Decode(e.to_string()))?;
            columns.push(ColumnRow::from(row));
        }

        debug!(count = columns.len(), "fetched column rows");
        Ok(columns)
    }
}
