use mongodb::Client;
use mongodb::bson::doc;
use std::time::Duration;

use crate::common::{DatabaseError, DatabaseResult};

/// Deadline applied to every ping
pub const PING_DEADLINE: Duration = Duration::from_secs(10);

/// Run `{ ping: 1 }` against the admin database, bounded by [`PING_DEADLINE`]
pub async fn ping(client: &Client) -> DatabaseResult<()> {
    let admin = client.database("admin");
    let command = admin.run_command(doc! { "ping": 1 });

    match tokio::time::timeout(PING_DEADLINE, command).await {
        Ok(Ok(_)) => Ok(()),
        Ok(Err(e)) => Err(DatabaseError::HealthCheckFailed(e.to_string())),
        Err(_) => Err(DatabaseError::Timeout(PING_DEADLINE)),
    }
}
