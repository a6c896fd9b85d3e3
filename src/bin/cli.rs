use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use cleaning_monitor::display::{
    attendance_frame, daily_summary_frame, heavy_cleaning_frame, render_text_table,
};
use cleaning_monitor::{
    CleanStatus, CleaningType, DailyCleaning, PresentationState, Section, SheetLayout, TaskError,
    TaskId, TaskRepository, load_workbook, save_attendance_csv, save_summary_csv,
    save_summary_json,
};
use polars::prelude::{DataFrame, PolarsResult};
use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "cli", version, about = "Train cleaning monitor")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Count cleaning markers per train in a daily cleaning workbook
    Summary {
        file: PathBuf,
        /// JSON file overriding the sheet layout
        #[arg(long)]
        layout: Option<PathBuf>,
        /// Also write the summary as CSV
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Also write the summary as JSON
        #[arg(long)]
        json: Option<PathBuf>,
    },
    /// Show per-date attendance for every train
    Details {
        file: PathBuf,
        #[arg(long)]
        layout: Option<PathBuf>,
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Print the default sheet layout as JSON
    Layout,
    /// Interactive heavy cleaning task shell (reads commands from stdin)
    Tasks {
        #[arg(long)]
        layout: Option<PathBuf>,
    },
}

type CliResult<T> = Result<T, Box<dyn Error>>;

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn read_layout(path: Option<&Path>) -> CliResult<SheetLayout> {
    match path {
        Some(path) => Ok(SheetLayout::from_json_path(path)?),
        None => Ok(SheetLayout::default()),
    }
}

fn print_frame(frame: PolarsResult<DataFrame>) {
    match frame {
        Ok(df) => println!("{}", render_text_table(&df)),
        Err(e) => println!("Error building table: {e}"),
    }
}

fn run_summary(
    file: &Path,
    layout: Option<&Path>,
    csv: Option<&Path>,
    json: Option<&Path>,
) -> CliResult<()> {
    let mut daily = DailyCleaning::new(read_layout(layout)?);
    let grid = load_workbook(file)?;
    let summary = daily.import(grid, today())?;
    if summary.is_empty() {
        println!("No train records found in {}.", file.display());
    }
    println!("{}", render_text_table(&daily_summary_frame(summary)?));
    if let Some(path) = csv {
        save_summary_csv(summary, path)?;
        println!("Summary written to {}", path.display());
    }
    if let Some(path) = json {
        save_summary_json(summary, path)?;
        println!("Summary written to {}", path.display());
    }
    Ok(())
}

fn run_details(file: &Path, layout: Option<&Path>, csv: Option<&Path>) -> CliResult<()> {
    let mut daily = DailyCleaning::new(read_layout(layout)?);
    let mut view = PresentationState::new(today());
    daily.import(load_workbook(file)?, view.today())?;
    daily.show_details(&mut view)?;
    println!(
        "{}",
        render_text_table(&attendance_frame(daily.attendance(), daily.summary())?)
    );
    if let Some(path) = csv {
        save_attendance_csv(daily.attendance(), path)?;
        println!("Attendance written to {}", path.display());
    }
    Ok(())
}

fn print_help() {
    println!(
        "Commands:\n  help                               Show this help\n  show                               Show heavy cleaning tasks (filtered)\n  add <train> <YYYY-MM-DD> <type...> Add a task (type is a key or full label)\n  toggle <id>                        Flip Cleaned/Uncleaned\n  remove <id>                        Delete a task\n  filter train <train>               Only show one train\n  filter date <YYYY-MM-DD>           Only show one scheduled date\n  filter type <type...>              Only show one cleaning type\n  filter status <Cleaned|Uncleaned>  Only show one status\n  filter clear                       Remove all filters\n  types                              List cleaning types\n  trains                             List train numbers with tasks\n  today <YYYY-MM-DD>                 Override the current date\n  import <path>                      Import a daily cleaning workbook\n  summary                            Show the imported marker summary\n  details                            Toggle the per-date attendance table\n  menu                               Leave the current section\n  quit|exit                          Exit"
    );
}

fn print_cleaning_types() {
    println!("Cleaning types:");
    for ty in CleaningType::ALL {
        println!("  {:<10} every {:>3} days  {}", ty.key(), ty.interval_days(), ty.label());
    }
}

fn parse_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").ok()
}

fn parse_id(input: Option<&str>) -> Option<TaskId> {
    input.and_then(|s| s.parse::<TaskId>().ok())
}

fn show_tasks(repo: &TaskRepository, view: &PresentationState) {
    if let Some(section) = view.active_section {
        println!("{}", section.title());
    }
    let tasks = repo.filter(&view.filters);
    print_frame(heavy_cleaning_frame(tasks, view.today()));
}

fn apply_filter<'a>(view: &mut PresentationState, mut parts: impl Iterator<Item = &'a str>) {
    let field = parts.next();
    let rest: Vec<&str> = parts.collect();
    let value = rest.join(" ");
    match field {
        Some("clear") => {
            view.filters.clear();
            println!("Filters cleared.");
        }
        Some("train") if !value.is_empty() => {
            view.filters.train_model = Some(value);
            println!("Filter set.");
        }
        Some("date") => match parse_date(&value) {
            Some(date) => {
                view.filters.scheduled_date = Some(date);
                println!("Filter set.");
            }
            None => println!("Invalid date (YYYY-MM-DD)"),
        },
        Some("type") => match value.parse::<CleaningType>() {
            Ok(ty) => {
                view.filters.cleaning_type = Some(ty);
                println!("Filter set.");
            }
            Err(e) => println!("Error: {e}"),
        },
        Some("status") => match value.parse::<CleanStatus>() {
            Ok(status) => {
                view.filters.clean_status = Some(status);
                println!("Filter set.");
            }
            Err(e) => println!("Error: {e}"),
        },
        _ => println!("Usage: filter <train|date|type|status> <value> | filter clear"),
    }
}

fn run_shell(layout: SheetLayout) {
    let mut repo = TaskRepository::new();
    let mut daily = DailyCleaning::new(layout);
    let mut view = PresentationState::new(today());
    view.enter(Section::HeavyCleaning);

    println!("Cleaning Monitor (CLI) - type 'help' for commands\n");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        let line = match lines.next() {
            Some(Ok(line)) => line,
            _ => break,
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "menu" => {
                view.back_to_menu();
                println!(
                    "Sections: {}, {}",
                    Section::DailyCleaning.title(),
                    Section::HeavyCleaning.title()
                );
            }
            "show" => {
                view.enter(Section::HeavyCleaning);
                show_tasks(&repo, &view);
            }
            "types" => print_cleaning_types(),
            "trains" => {
                let trains = repo.distinct_train_models();
                if trains.is_empty() {
                    println!("No tasks yet.");
                } else {
                    println!("{}", trains.join(", "));
                }
            }
            "add" => {
                let train = parts.next();
                let date = parts.next();
                let rest: Vec<&str> = parts.collect();
                let (Some(train), Some(date_s)) = (train, date) else {
                    println!("Usage: add <train> <YYYY-MM-DD> <type...>");
                    continue;
                };
                let Some(date) = parse_date(date_s) else {
                    println!("Invalid date (YYYY-MM-DD)");
                    continue;
                };
                let ty = match rest.join(" ").parse::<CleaningType>() {
                    Ok(ty) => ty,
                    Err(e) => {
                        println!("Error: {e}");
                        continue;
                    }
                };
                match repo.add_task(train, date, ty) {
                    Ok(id) => {
                        println!("Added task {id}.");
                        show_tasks(&repo, &view);
                    }
                    Err(e) => println!("Error: {e}"),
                }
            }
            "toggle" => match parse_id(parts.next()) {
                Some(id) => match repo.toggle_clean(id, view.today()) {
                    Ok(status) => {
                        println!("Task {id} is now {status}.");
                        show_tasks(&repo, &view);
                    }
                    Err(TaskError::NotFound(id)) => println!("Task {id} not found."),
                    Err(e) => println!("Error: {e}"),
                },
                None => println!("Usage: toggle <id>"),
            },
            "remove" => match parse_id(parts.next()) {
                Some(id) => match repo.remove_task(id) {
                    Ok(task) => {
                        println!("Removed task {} ({}).", task.id, task.train_model);
                        show_tasks(&repo, &view);
                    }
                    Err(TaskError::NotFound(id)) => println!("Task {id} not found."),
                    Err(e) => println!("Error: {e}"),
                },
                None => println!("Usage: remove <id>"),
            },
            "filter" => {
                apply_filter(&mut view, parts);
                show_tasks(&repo, &view);
            }
            "today" => match parts.next().and_then(parse_date) {
                Some(date) => {
                    view.set_today(date);
                    println!("Today is {date}.");
                }
                None => println!("Usage: today <YYYY-MM-DD>"),
            },
            "import" => {
                let rest: Vec<&str> = parts.collect();
                if rest.is_empty() {
                    println!("Usage: import <path>");
                    continue;
                }
                let path = PathBuf::from(rest.join(" "));
                view.enter(Section::DailyCleaning);
                let result = load_workbook(&path)
                    .map_err(|e| e.to_string())
                    .and_then(|grid| {
                        daily
                            .import(grid, view.today())
                            .map(|s| s.len())
                            .map_err(|e| e.to_string())
                    });
                match result {
                    Ok(count) => {
                        println!("Imported {count} train records from {}.", path.display());
                        print_frame(daily_summary_frame(daily.summary()));
                    }
                    Err(e) => println!("Import failed: {e}"),
                }
            }
            "summary" => {
                view.enter(Section::DailyCleaning);
                if daily.summary().is_empty() {
                    println!("No data imported yet. Please import a workbook.");
                } else {
                    print_frame(daily_summary_frame(daily.summary()));
                }
            }
            "details" => {
                view.enter(Section::DailyCleaning);
                if !daily.has_workbook() {
                    println!("No workbook imported yet.");
                    continue;
                }
                if let Err(e) = daily.show_details(&mut view) {
                    println!("Error: {e}");
                    continue;
                }
                if view.show_attendance {
                    print_frame(attendance_frame(daily.attendance(), daily.summary()));
                } else {
                    println!("Details hidden.");
                    print_frame(daily_summary_frame(daily.summary()));
                }
            }
            _ => println!("Unknown command. Type 'help'."),
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Command::Summary {
            file,
            layout,
            csv,
            json,
        }) => run_summary(&file, layout.as_deref(), csv.as_deref(), json.as_deref()),
        Some(Command::Details { file, layout, csv }) => {
            run_details(&file, layout.as_deref(), csv.as_deref())
        }
        Some(Command::Layout) => SheetLayout::default()
            .to_json_pretty()
            .map(|json| println!("{json}"))
            .map_err(Into::into),
        Some(Command::Tasks { layout }) => read_layout(layout.as_deref()).map(run_shell),
        None => {
            run_shell(SheetLayout::default());
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
