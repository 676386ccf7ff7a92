//! Interactive shell for browsing and editing student records.

use std::io::{self, BufRead, Write};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use student_client::{ClientConfig, HttpStudentApi, Mode, Notice, Session, Student};

/// Manage student records on a running record store.
#[derive(Debug, Parser)]
#[command(name = "students", version)]
struct Cli {
    /// Base URL of the record store (defaults to STUDENTS_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Log level written to stderr
    #[arg(long, default_value = "warn")]
    log_level: String,
}

const HELP: &str = "\
Commands:
  list               show the (filtered) students
  search <text>      filter rows by name or email; no text clears the filter
  new                start a new record
  edit <id>          load a record into the form
  name <value>       set the name field
  email <value>      set the email field
  save               add or update the record in the form
  cancel             discard the form
  delete <id>        delete a record after confirmation
  refresh            fetch the students again
  help               show this help
  quit               leave the shell";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match cli.api_url.as_deref() {
        Some(url) => ClientConfig::new(url)?,
        None => ClientConfig::from_env()?,
    };
    tracing::info!("Using record store at {}", config.api_base_url);

    let mut session = Session::new(HttpStudentApi::new(&config));
    if session.refresh().await.is_ok() {
        print_table(&session);
    }
    print_notice(&mut session);

    loop {
        prompt(&session)?;
        let Some(line) = read_line()? else {
            break;
        };

        let line = line.trim();
        let (command, arg) = match line.split_once(char::is_whitespace) {
            Some((command, arg)) => (command, arg.trim()),
            None => (line, ""),
        };

        match command {
            "" => {}
            "list" | "ls" => print_table(&session),
            "search" => {
                session.set_search(arg);
                print_table(&session);
            }
            "new" => {
                session.cancel();
                println!("Drafting a new student");
            }
            "edit" => match parse_id(arg) {
                Some(id) => match session.begin_edit(id) {
                    Ok(()) => print_draft(&session),
                    Err(e) => println!("{}", e),
                },
                None => println!("Usage: edit <id>"),
            },
            "name" => session.set_name(arg),
            "email" => session.set_email(arg),
            "save" => {
                if session.submit().await.is_ok() {
                    print_table(&session);
                }
            }
            "cancel" => {
                session.cancel();
                println!("Form cleared");
            }
            "delete" | "rm" => match parse_id(arg) {
                Some(id) => delete(&mut session, id).await,
                None => println!("Usage: delete <id>"),
            },
            "refresh" => {
                if session.refresh().await.is_ok() {
                    print_table(&session);
                }
            }
            "help" | "?" => println!("{}", HELP),
            "quit" | "exit" => break,
            other => println!("Unknown command '{}'. Type 'help' for a list.", other),
        }

        print_notice(&mut session);
    }

    Ok(())
}

async fn delete(session: &mut Session<HttpStudentApi>, id: i64) {
    let confirm = |student: &Student| {
        println!("{} <{}>", student.name, student.email);
        ask("Are you sure you want to delete this student? [y/N] ")
    };

    match session.delete(id, &confirm).await {
        Ok(true) => print_table(session),
        Ok(false) => println!("Kept student {}", id),
        // Reported through the session notice
        Err(_) => {}
    }
}

/// Prompt for a yes/no answer; anything but yes declines.
fn ask(question: &str) -> bool {
    if print_inline(question).is_err() {
        return false;
    }
    match read_line() {
        Ok(Some(answer)) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
        _ => false,
    }
}

/// Read one line from stdin; `None` at end of input.
fn read_line() -> io::Result<Option<String>> {
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

fn parse_id(arg: &str) -> Option<i64> {
    arg.parse().ok()
}

fn prompt(session: &Session<HttpStudentApi>) -> io::Result<()> {
    let label = match session.mode() {
        Mode::New => "new".to_string(),
        Mode::Editing(id) => format!("editing {}", id),
    };
    print_inline(&format!("students [{}]> ", label))
}

fn print_inline(text: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()
}

fn print_table(session: &Session<HttpStudentApi>) {
    let rows = session.visible();
    let name_width = rows
        .iter()
        .map(|s| s.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Name".len());

    println!("{:>6}  {:<name_width$}  Email", "Id", "Name");
    for student in &rows {
        println!(
            "{:>6}  {:<name_width$}  {}",
            student.id, student.name, student.email
        );
    }

    if session.search().trim().is_empty() {
        println!("{} students", rows.len());
    } else {
        println!(
            "{} of {} students match '{}'",
            rows.len(),
            session.students().len(),
            session.search().trim()
        );
    }
}

fn print_draft(session: &Session<HttpStudentApi>) {
    let draft = session.draft();
    println!("name:  {}", draft.name);
    println!("email: {}", draft.email);
}

fn print_notice(session: &mut Session<HttpStudentApi>) {
    match session.take_notice() {
        Some(Notice::Info(msg)) => println!("{}", msg),
        Some(Notice::Error(msg)) => println!("Error: {}", msg),
        None => {}
    }
}
