//! Live terminal view of the shared agenda.

use clap::Args;

use agenda_sync::{Config, Entry, SyncClient, ViewAdapter};

#[derive(Args)]
pub struct WatchCommand {}

impl WatchCommand {
    pub async fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let mut client = SyncClient::from_config(config)?;
        let mut session = client
            .connect(TableView::default(), config.priorities())
            .await?;

        let mode = if session.authenticated() {
            "editable"
        } else {
            "read-only"
        };
        println!("Connected ({}). Watching for changes...\n", mode);

        tokio::select! {
            _ = session.run() => {}
            _ = tokio::signal::ctrl_c() => {}
        }
        session.close().await;

        Ok(())
    }
}

/// Renders the agenda as a text table, redrawn on every change.
#[derive(Default)]
struct TableView {
    rows: Vec<Entry>,
}

impl TableView {
    fn redraw(&self) {
        println!("{:<6} {:<28} {:<20} {}", "ID", "NAME", "TYPE", "DESCRIPTION");
        println!("{}", "-".repeat(78));
        for row in &self.rows {
            println!(
                "{:<6} {:<28} {:<20} {}",
                row.id, row.name, row.talk_type, row.desc
            );
        }
        println!();
    }
}

impl ViewAdapter for TableView {
    fn insert_entry_before(&mut self, entry: &Entry, before: Option<usize>) {
        match before {
            Some(index) => self.rows.insert(index, entry.clone()),
            None => self.rows.push(entry.clone()),
        }
        self.redraw();
    }

    fn remove_entry_by_id(&mut self, id: i32) {
        if let Some(index) = self.rows.iter().position(|row| row.id == id) {
            self.rows.remove(index);
            self.redraw();
        }
    }
}
