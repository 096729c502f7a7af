use std::{io, path::PathBuf};

use clap::{CommandFactory, Parser, Subcommand};
use itertools::Itertools;

use crate::{
    config::Config,
    constants::{EXPORT_FILE_NAME, PLAN_DAYS},
    domain::{
        AppState, Axis, BlockField, BlockKey, BookField, NoteField,
        insights::Dashboard,
        plan::{self, PlanField},
        progress::DayCommit,
    },
    error::StoreError,
    storage::FileStore,
    store::StateStore,
};

#[derive(Parser, Debug)]
#[command(name = "sensei")]
#[command(about = "A 90-day learning tracker: three focus blocks a day", long_about = None)]
pub struct Cli {
    #[arg(long, global = true, help = "Directory holding the saved state")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(about = "Open the terminal dashboard")]
    Tui,

    #[command(about = "Show level, XP, streak and axis scores")]
    Status,

    #[command(about = "Show today's blocks, tasks and notes")]
    Today,

    #[command(subcommand, about = "Add or toggle tasks in a block")]
    Task(TaskCommand),

    #[command(about = "Set the topic or link of today's block")]
    Block {
        #[arg(help = "Block (a, b or c)")]
        block: BlockKey,

        #[arg(long, help = "New topic")]
        topic: Option<String>,

        #[arg(long, help = "New link")]
        link: Option<String>,
    },

    #[command(about = "Mark a block finished (+25 XP)")]
    Finish {
        #[arg(help = "Block (a, b or c)")]
        block: BlockKey,
    },

    #[command(about = "Close the day: extends or breaks the streak")]
    SaveDay,

    #[command(about = "Move to the next plan day")]
    NextDay,

    #[command(about = "Write today's notes or reflection")]
    Note {
        #[arg(long, help = "Notes for today")]
        notes: Option<String>,

        #[arg(long, help = "Reflection for today")]
        reflection: Option<String>,
    },

    #[command(subcommand, about = "Inspect or change the 90-day plan")]
    Plan(PlanCommand),

    #[command(subcommand, about = "Manage the reading list")]
    Books(BooksCommand),

    #[command(about = "Change the start date or current day")]
    Settings {
        #[arg(long, help = "Start date (YYYY-MM-DD)")]
        start: Option<String>,

        #[arg(long, help = "Current day (1-90)")]
        day: Option<u32>,
    },

    #[command(about = "Write a full backup")]
    Export {
        #[arg(long, short, help = "Output path (stdout when omitted)")]
        out: Option<PathBuf>,
    },

    #[command(about = "Restore fields from a backup file")]
    Import {
        #[arg(help = "Backup file")]
        path: PathBuf,
    },

    #[command(about = "Persist the current state")]
    Save,

    #[command(about = "Start over from day 1")]
    Reset {
        #[arg(long, help = "Confirm discarding all progress")]
        yes: bool,
    },

    #[command(about = "Generate shell completions")]
    Completions {
        #[arg(help = "Shell type (bash, zsh, fish)")]
        shell: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum TaskCommand {
    #[command(about = "Append a task to a block")]
    Add {
        block: BlockKey,
        text: String,
    },
    #[command(about = "Flip a task's done flag (1-based index)")]
    Toggle {
        block: BlockKey,
        index: usize,
    },
}

#[derive(Subcommand, Debug)]
pub enum PlanCommand {
    #[command(about = "List plan days")]
    Show {
        #[arg(long, help = "Only this day")]
        day: Option<u32>,
    },
    #[command(about = "Rebuild all 90 days from the catalogs")]
    Generate,
    #[command(about = "Remove the plan")]
    Clear,
    #[command(about = "Edit a title or link (fields: A, Alink, B, Blink, C, Clink)")]
    Edit {
        day: u32,
        field: PlanField,
        value: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum BooksCommand {
    #[command(about = "List books")]
    List,
    #[command(about = "Flip a book's done flag")]
    Toggle { id: String },
    #[command(about = "Edit a book field (title, focus, link, notes)")]
    Edit {
        id: String,
        field: BookField,
        value: String,
    },
}

type Store = StateStore<FileStore>;

pub fn open_store(config: &Config) -> Result<Store, String> {
    let backend = FileStore::open(&config.data_dir).map_err(|e| e.to_string())?;
    Ok(StateStore::load(backend))
}

fn print_status(state: &AppState) {
    let dash = Dashboard::from_state(state);
    println!(
        "Day {} / {} ({}%)  started {}",
        dash.current_day, PLAN_DAYS, dash.progress_percent, dash.start_date
    );
    println!(
        "Level {}  XP {}/{}  Streak {}",
        dash.level, dash.xp, dash.xp_next, dash.streak
    );
    println!(
        "{}",
        Axis::ALL
            .iter()
            .map(|&axis| format!("{} {}", axis.label(), dash.axes.get(axis)))
            .join("  ")
    );
    println!("{}", dash.coach);
}

fn print_today(state: &AppState) {
    println!("Day {}", state.current_day);
    for (key, block) in state.blocks.iter() {
        let mark = if block.done { "x" } else { " " };
        println!(
            "[{}] {} ({}) {}",
            mark,
            key,
            key.axis().label(),
            if block.topic.is_empty() {
                "-"
            } else {
                block.topic.as_str()
            }
        );
        if !block.link.is_empty() {
            println!("      {}", block.link);
        }
        for (i, task) in block.tasks.iter().enumerate() {
            let mark = if task.done { "x" } else { " " };
            println!("    {}. [{}] {}", i + 1, mark, task.text);
        }
    }

    let note = state.current_note();
    if !note.notes.is_empty() {
        println!("Notes: {}", note.notes);
    }
    if !note.reflection.is_empty() {
        println!("Reflection: {}", note.reflection);
    }
}

fn print_plan(state: &AppState, day: Option<u32>) -> Result<(), String> {
    if state.plan.is_empty() {
        println!("No plan yet. Run `sensei plan generate`.");
        return Ok(());
    }

    let entries: Vec<_> = match day {
        Some(day) => vec![
            plan::find_day(&state.plan, day).ok_or_else(|| format!("Day {} is not in the plan", day))?,
        ],
        None => state.plan.iter().collect(),
    };

    for entry in entries {
        println!("Day {}", entry.day);
        for axis in Axis::ALL {
            println!(
                "  {:6} {}  {}",
                axis.label(),
                entry.title(axis),
                entry.link(axis)
            );
            if !entry.tasks(axis).is_empty() {
                println!("         {}", entry.tasks(axis).iter().join(" • "));
            }
        }
    }
    Ok(())
}

fn print_books(state: &AppState) {
    for book in &state.books {
        let mark = if book.done { "x" } else { " " };
        println!("[{}] {:4} {} ({})", mark, book.id, book.title, book.focus);
        if !book.notes.is_empty() {
            println!("          {}", book.notes);
        }
    }
}

fn run_task(store: &mut Store, command: TaskCommand) -> Result<(), StoreError> {
    match command {
        TaskCommand::Add { block, text } => {
            if store.add_task(block, &text)? {
                println!("Added task to block {}", block);
            } else {
                println!("Nothing to add");
            }
        }
        TaskCommand::Toggle { block, index } => {
            let toggled = match index.checked_sub(1) {
                Some(i) => store.toggle_task(block, i)?,
                None => false,
            };
            if toggled {
                println!("Toggled task {} in block {}", index, block);
            } else {
                println!("Block {} has no task {}", block, index);
            }
        }
    }
    Ok(())
}

fn run_plan(store: &mut Store, command: PlanCommand) -> Result<(), String> {
    match command {
        PlanCommand::Show { day } => print_plan(store.state(), day)?,
        PlanCommand::Generate => {
            store.generate_full_plan().map_err(|e| e.to_string())?;
            println!("Full {}-day plan loaded", PLAN_DAYS);
        }
        PlanCommand::Clear => {
            store.clear_plan().map_err(|e| e.to_string())?;
            println!("Plan cleared");
        }
        PlanCommand::Edit { day, field, value } => {
            if store
                .edit_plan_field(day, field, value)
                .map_err(|e| e.to_string())?
            {
                println!("Updated {} on day {}", field, day);
            } else {
                println!("Day {} is not in the plan; nothing changed", day);
            }
        }
    }
    Ok(())
}

fn run_books(store: &mut Store, command: BooksCommand) -> Result<(), StoreError> {
    match command {
        BooksCommand::List => print_books(store.state()),
        BooksCommand::Toggle { id } => {
            if store.toggle_book(&id)? {
                println!("Toggled {}", id);
            } else {
                println!("No book with id {}", id);
            }
        }
        BooksCommand::Edit { id, field, value } => {
            if store.edit_book_field(&id, field, value)? {
                println!("Updated {}", id);
            } else {
                println!("No book with id {}", id);
            }
        }
    }
    Ok(())
}

fn run_command(config: &Config, command: Command) -> Result<(), String> {
    let mut store = match &command {
        Command::Completions { shell } => return print_completions(shell),
        Command::Tui => return run_tui(config),
        _ => open_store(config)?,
    };
    let err = |e: StoreError| e.to_string();

    match command {
        Command::Tui | Command::Completions { .. } => {}
        Command::Status => print_status(store.state()),
        Command::Today => print_today(store.state()),
        Command::Task(task) => run_task(&mut store, task).map_err(err)?,
        Command::Block { block, topic, link } => {
            if topic.is_none() && link.is_none() {
                return Err("Pass --topic and/or --link".to_string());
            }
            if let Some(topic) = topic {
                store
                    .edit_block_field(block, BlockField::Topic, topic)
                    .map_err(err)?;
            }
            if let Some(link) = link {
                store
                    .edit_block_field(block, BlockField::Link, link)
                    .map_err(err)?;
            }
            println!("Updated block {}", block);
        }
        Command::Finish { block } => {
            if store.finish_block(block).map_err(err)? {
                println!("Block {} completed! +25 XP", block);
            } else {
                println!("Block {} was already done", block);
            }
        }
        Command::SaveDay => match store.save_day().map_err(err)? {
            DayCommit::Completed { streak } => {
                println!("Day saved! Full day complete, streak {}", streak)
            }
            DayCommit::Broken => println!("Day saved. Not every block was finished; streak reset"),
        },
        Command::NextDay => {
            if store.advance_day().map_err(err)? {
                println!("Now on day {}", store.state().current_day);
            } else {
                println!("Already on the last day");
            }
        }
        Command::Note { notes, reflection } => {
            if notes.is_none() && reflection.is_none() {
                return Err("Pass --notes and/or --reflection".to_string());
            }
            if let Some(notes) = notes {
                store.edit_day_note(NoteField::Notes, notes).map_err(err)?;
            }
            if let Some(reflection) = reflection {
                store
                    .edit_day_note(NoteField::Reflection, reflection)
                    .map_err(err)?;
            }
            println!("Saved notes for day {}", store.state().current_day);
        }
        Command::Plan(plan) => run_plan(&mut store, plan)?,
        Command::Books(books) => run_books(&mut store, books).map_err(err)?,
        Command::Settings { start, day } => {
            let update = store
                .update_settings(start.as_deref(), day)
                .map_err(err)?;
            if start.is_some() && !update.start_date_applied {
                println!("Ignored start date (expected YYYY-MM-DD)");
            }
            if day.is_some() && !update.current_day_applied {
                println!("Ignored day (expected 1-{})", PLAN_DAYS);
            }
            println!("Settings saved.");
        }
        Command::Export { out } => match out {
            Some(path) => {
                let path = if path.is_dir() {
                    path.join(EXPORT_FILE_NAME)
                } else {
                    path
                };
                store.export_to_path(&path).map_err(err)?;
                println!("Exported to {}", path.display());
            }
            None => println!("{}", store.export().map_err(err)?),
        },
        Command::Import { path } => {
            store.import_from_path(&path).map_err(err)?;
            println!("Backup imported.");
        }
        Command::Save => {
            store.save().map_err(err)?;
            println!("Saved.");
        }
        Command::Reset { yes } => {
            if !yes {
                return Err("Reset discards all progress; rerun with --yes".to_string());
            }
            store.reset().map_err(err)?;
            println!("Started over at day 1");
        }
    }

    Ok(())
}

pub fn run_tui(config: &Config) -> Result<(), String> {
    let store = open_store(config)?;
    crate::app::run_ui(store).map_err(|e| e.to_string())
}

pub fn print_completions(shell: &str) -> Result<(), String> {
    use clap_complete::Shell;
    let shell = match shell {
        "bash" => Shell::Bash,
        "zsh" => Shell::Zsh,
        "fish" => Shell::Fish,
        _ => {
            return Err(format!(
                "Unsupported shell: {}. Use bash, zsh, or fish.",
                shell
            ));
        }
    };
    clap_complete::generate(shell, &mut Cli::command(), "sensei", &mut io::stdout());
    Ok(())
}

pub fn run_cli(config: &Config, command: Command) {
    if let Err(e) = run_command(config, command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_plan_edit_field() {
        let cli = Cli::try_parse_from(["sensei", "plan", "edit", "12", "Blink", "https://b.example"])
            .unwrap();
        match cli.command {
            Some(Command::Plan(PlanCommand::Edit { day, field, value })) => {
                assert_eq!(day, 12);
                assert_eq!(field.to_string(), "Blink");
                assert_eq!(value, "https://b.example");
            }
            other => panic!("unexpected parse: {other:?}"),
        }
    }

    #[test]
    fn test_rejects_unknown_block() {
        assert!(Cli::try_parse_from(["sensei", "finish", "d"]).is_err());
        assert!(Cli::try_parse_from(["sensei", "plan", "edit", "3", "Atasks", "x"]).is_err());
    }

    #[test]
    fn test_no_subcommand_means_tui() {
        let cli = Cli::try_parse_from(["sensei", "--data-dir", "/tmp/sensei"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/sensei")));
    }
}
