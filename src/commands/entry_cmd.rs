//! One-shot mutation requests against the shared agenda.
//!
//! Both commands open a session, send their request, and wait briefly for
//! the broker to echo the accepted event back before disconnecting. The echo
//! is the only acknowledgement the protocol has.

use std::time::Duration;

use clap::Args;
use tokio::time::timeout;

use agenda_sync::{Config, ServerEvent, SyncClient, SyncSession, TalkType};

/// How long to wait for the broker to echo an accepted mutation back.
const ECHO_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Args)]
pub struct AddCommand {
    /// Name of the talk or topic
    name: String,

    /// Category (forum topic, lightning talk, project update, announcement,
    /// after meeting slot)
    #[arg(long = "type", value_name = "CATEGORY")]
    talk_type: TalkType,

    /// Short description
    #[arg(long)]
    desc: String,
}

impl AddCommand {
    pub async fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let mut client = SyncClient::from_config(config)?;
        let mut session = client.connect((), config.priorities()).await?;

        let talk_type = self.talk_type.to_string();
        session
            .request_create(&self.name, &talk_type, &self.desc)
            .await;

        let confirmed = wait_for_echo(&mut session, |event| match event {
            ServerEvent::Show { id, name, .. } if *name == self.name => Some(*id),
            _ => None,
        })
        .await;

        match confirmed {
            Some(id) => println!("Added entry {}", id),
            None => println!("Request sent; no confirmation received"),
        }

        session.close().await;
        Ok(())
    }
}

#[derive(Args)]
pub struct HideCommand {
    /// Id of the entry to hide
    id: i32,
}

impl HideCommand {
    pub async fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let mut client = SyncClient::from_config(config)?;
        let mut session = client.connect((), config.priorities()).await?;

        session.request_hide(self.id).await;

        let confirmed = wait_for_echo(&mut session, |event| match event {
            ServerEvent::Hide { id } if *id == self.id => Some(*id),
            _ => None,
        })
        .await;

        match confirmed {
            Some(id) => println!("Hid entry {}", id),
            None => println!("Request sent; no confirmation received"),
        }

        session.close().await;
        Ok(())
    }
}

/// Applies inbound events until one matches, the channel closes, or the
/// echo window runs out.
async fn wait_for_echo<T>(
    session: &mut SyncSession<()>,
    mut matches: impl FnMut(&ServerEvent) -> Option<T>,
) -> Option<T> {
    timeout(ECHO_TIMEOUT, async {
        while let Some(event) = session.recv_applied().await {
            if let Some(value) = matches(&event) {
                return Some(value);
            }
        }
        None
    })
    .await
    .unwrap_or(None)
}
