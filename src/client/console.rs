use std::io::Write;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;

use crate::client::http::{ClientError, ItemsClient};
use crate::client::manager::{FormMode, ItemManager};
use crate::client::notifier::Notifier;
use crate::config::ClientSettings;
use crate::types::dto::items::Item;

const HELP: &str = "\
Commands:
  list                  re-fetch and show all items
  name <text>           set the form's name
  description <text>    set the form's description
  price <number>        set the form's price
  show                  show the form
  submit                create the item, or save the item being edited
  edit <id>             load an item into the form
  cancel                leave edit mode and clear the form
  delete <id>           delete an item (asks for confirmation)
  help                  show this help
  quit                  leave the console";

/// One parsed console line
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleCommand {
    List,
    SetName(String),
    SetDescription(String),
    SetPrice(String),
    ShowForm,
    Submit,
    Edit(i32),
    Cancel,
    Delete(i32),
    Help,
    Quit,
    Empty,
    Invalid(String),
}

impl ConsoleCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_ascii_lowercase().as_str() {
            "" => Self::Empty,
            "list" | "refresh" => Self::List,
            "name" => Self::SetName(rest.to_string()),
            "description" => Self::SetDescription(rest.to_string()),
            "price" => Self::SetPrice(rest.to_string()),
            "show" => Self::ShowForm,
            "submit" | "save" => Self::Submit,
            "cancel" => Self::Cancel,
            "help" => Self::Help,
            "quit" | "exit" => Self::Quit,
            "edit" => Self::parse_id(rest).map_or_else(|| Self::invalid(line), Self::Edit),
            "delete" => Self::parse_id(rest).map_or_else(|| Self::invalid(line), Self::Delete),
            _ => Self::invalid(line),
        }
    }

    fn parse_id(value: &str) -> Option<i32> {
        value.parse().ok()
    }

    fn invalid(line: &str) -> Self {
        Self::Invalid(line.to_string())
    }
}

/// Render the item table the way the console prints it
pub fn render_items(items: &[Item], loading: bool) -> String {
    if loading {
        return "Loading...".to_string();
    }
    if items.is_empty() {
        return "No items found".to_string();
    }

    let rows: Vec<[String; 4]> = items
        .iter()
        .map(|item| {
            [
                item.id.to_string(),
                item.name.clone(),
                item.description.clone(),
                format!("${:.2}", item.price),
            ]
        })
        .collect();

    let header = ["ID", "Name", "Description", "Price"];
    let mut widths = header.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_row = |cells: [&str; 4]| {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![format_row(header)];
    lines.extend(rows.iter().map(|row| {
        format_row([
            row[0].as_str(),
            row[1].as_str(),
            row[2].as_str(),
            row[3].as_str(),
        ])
    }));
    lines.join("\n")
}

/// Shared line reader; the console loop and confirmations both read from it
pub struct Prompt {
    lines: Mutex<Lines<BufReader<Stdin>>>,
}

impl Prompt {
    pub fn stdin() -> Self {
        Self {
            lines: Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
        }
    }

    /// Print `label` and read one line; `None` at end of input
    pub async fn read_line(&self, label: &str) -> Option<String> {
        print!("{}", label);
        let _ = std::io::stdout().flush();

        let mut lines = self.lines.lock().await;
        match lines.next_line().await {
            Ok(line) => line,
            Err(e) => {
                tracing::error!("Failed to read from stdin: {}", e);
                None
            }
        }
    }
}

/// Notifier that prints alerts and asks for confirmation on the terminal
pub struct TerminalNotifier {
    prompt: Arc<Prompt>,
}

impl TerminalNotifier {
    pub fn new(prompt: Arc<Prompt>) -> Self {
        Self { prompt }
    }
}

#[async_trait]
impl Notifier for TerminalNotifier {
    async fn alert(&self, message: &str) {
        println!("! {}", message);
    }

    async fn confirm(&self, message: &str) -> bool {
        match self.prompt.read_line(&format!("{} [y/N] ", message)).await {
            Some(answer) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            None => false,
        }
    }
}

/// Interactive item console against the configured API
pub async fn run_console(settings: ClientSettings) -> Result<(), ClientError> {
    let prompt = Arc::new(Prompt::stdin());
    let client = ItemsClient::new(&settings)?;
    let mut manager = ItemManager::new(client, TerminalNotifier::new(prompt.clone()));

    println!("Item console for {} (type 'help' for commands)", settings.api_url());
    if manager.refresh().await {
        println!("{}", render_items(manager.items(), manager.is_loading()));
    }

    loop {
        let label = match manager.mode() {
            FormMode::Create => "[create]> ".to_string(),
            FormMode::Edit(id) => format!("[edit #{}]> ", id),
        };
        let Some(line) = prompt.read_line(&label).await else {
            break;
        };

        match ConsoleCommand::parse(&line) {
            ConsoleCommand::List => {
                if manager.refresh().await {
                    println!("{}", render_items(manager.items(), manager.is_loading()));
                }
            }
            ConsoleCommand::SetName(value) => manager.form_mut().name = value,
            ConsoleCommand::SetDescription(value) => manager.form_mut().description = value,
            ConsoleCommand::SetPrice(value) => manager.form_mut().price = value,
            ConsoleCommand::ShowForm => {
                let form = manager.form();
                println!("name:        {}", form.name);
                println!("description: {}", form.description);
                println!("price:       {}", form.price);
            }
            ConsoleCommand::Submit => {
                if manager.submit().await {
                    println!("{}", render_items(manager.items(), manager.is_loading()));
                }
            }
            ConsoleCommand::Edit(id) => {
                if !manager.begin_edit_by_id(id) {
                    println!("No listed item with id {}; try 'list'", id);
                }
            }
            ConsoleCommand::Cancel => manager.cancel_edit(),
            ConsoleCommand::Delete(id) => {
                if manager.delete(id).await {
                    println!("{}", render_items(manager.items(), manager.is_loading()));
                }
            }
            ConsoleCommand::Help => println!("{}", HELP),
            ConsoleCommand::Quit => break,
            ConsoleCommand::Empty => {}
            ConsoleCommand::Invalid(line) => println!("Unknown command: {} (type 'help')", line),
        }
    }

    Ok(())
}
