use std::sync::Arc;

use clap::{Parser, Subcommand};
use dialoguer::Input;
use dotenvy::dotenv;
use rosterly::config::store::StoreConfig;
use rosterly::modules::students::repository::ALL_COURSES;
use rosterly::prefs::{Theme, ThemePreferences};
use rosterly::seeder::{SeedOutcome, check_and_seed};
use rosterly::{AppError, StudentRepository};
use rosterly_models::students::NewStudent;
use rosterly_store::JsonFileStore;
use validator::Validate;

#[derive(Parser)]
#[command(name = "rosterly-cli")]
#[command(about = "Rosterly CLI - Administrative tools for the roster store", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the students collection with sample records if it is empty
    Seed {
        /// Identity id to record as the actor on seeded records
        #[arg(short, long)]
        actor: Option<String>,
    },
    /// List students, optionally filtered by course
    List {
        /// Course to filter by
        #[arg(short, long)]
        course: Option<String>,
    },
    /// Add a student record (missing fields are prompted for)
    Add {
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        email: Option<String>,
        #[arg(short, long)]
        course: Option<String>,
        #[arg(short, long)]
        gpa: Option<f64>,
    },
    /// Show the distinct course values
    Courses,
    /// Delete a student by id
    Delete {
        /// Store-assigned student id
        id: String,
    },
    /// Show or toggle the persisted theme preference
    Theme {
        /// Toggle before showing
        #[arg(short, long)]
        toggle: bool,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    rosterly::logging::init_tracing();

    let config = StoreConfig::from_env();
    let store = Arc::new(JsonFileStore::new(config.data_dir.clone()));
    let repo = StudentRepository::new(store.clone(), config.students_collection.clone());

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Seed { actor } => handle_seed(&store, &config, actor).await,
        Commands::List { course } => handle_list(&repo, course).await,
        Commands::Add {
            name,
            email,
            course,
            gpa,
        } => handle_add(&repo, name, email, course, gpa).await,
        Commands::Courses => handle_courses(&repo).await,
        Commands::Delete { id } => handle_delete(&repo, &id).await,
        Commands::Theme { toggle } => handle_theme(&config, toggle).await,
    };

    if let Err(err) = result {
        eprintln!("❌ {}", err.message());
        std::process::exit(1);
    }
}

async fn handle_seed(
    store: &Arc<JsonFileStore>,
    config: &StoreConfig,
    actor: Option<String>,
) -> Result<(), AppError> {
    let outcome = check_and_seed(
        store.as_ref(),
        &config.students_collection,
        actor.as_deref(),
    )
    .await?;
    match outcome {
        SeedOutcome::Seeded { count } => {
            println!("✅ Seeded {} students", count);
        }
        SeedOutcome::AlreadySeeded { existing } => {
            println!(
                "Collection already has {} students, nothing to do",
                existing
            );
        }
    }
    Ok(())
}

async fn handle_list(repo: &StudentRepository, course: Option<String>) -> Result<(), AppError> {
    let students = match course.as_deref() {
        Some(course) if course != ALL_COURSES => repo.list_by_course(course).await,
        _ => repo.list_all().await,
    };

    if students.is_empty() {
        println!("No students found");
        return Ok(());
    }

    for student in &students {
        println!(
            "{}  {:<22} {:<32} {:<24} GPA {:.2}",
            student.id, student.name, student.email, student.course, student.gpa
        );
    }
    println!("{} student(s)", students.len());
    Ok(())
}

async fn handle_add(
    repo: &StudentRepository,
    name: Option<String>,
    email: Option<String>,
    course: Option<String>,
    gpa: Option<f64>,
) -> Result<(), AppError> {
    let name = prompt_if_missing(name, "Name")?;
    let email = prompt_if_missing(email, "Email")?;
    let course = prompt_if_missing(course, "Course")?;
    let gpa = match gpa {
        Some(gpa) => gpa,
        None => Input::<f64>::new()
            .with_prompt("GPA (0.0 - 4.0)")
            .interact_text()
            .map_err(AppError::internal)?,
    };

    let draft = NewStudent {
        name,
        email,
        course,
        gpa,
        enrollment_date: None,
        added_by: None,
        added_by_email: None,
    };
    draft.validate().map_err(AppError::bad_request)?;

    let student = repo.create(draft).await?;
    println!(
        "✅ Added {} ({}) with id {}",
        student.name, student.course, student.id
    );
    Ok(())
}

async fn handle_courses(repo: &StudentRepository) -> Result<(), AppError> {
    for course in repo.list_available_courses().await {
        println!("{}", course);
    }
    Ok(())
}

async fn handle_delete(repo: &StudentRepository, id: &str) -> Result<(), AppError> {
    repo.delete(id).await?;
    println!("✅ Deleted student {}", id);
    Ok(())
}

async fn handle_theme(config: &StoreConfig, toggle: bool) -> Result<(), AppError> {
    let prefs = ThemePreferences::new(config.theme_path());
    let mut theme = prefs.load().await;
    if toggle {
        theme = theme.toggled();
        prefs.save(theme).await?;
    }
    match theme {
        Theme::Dark => println!("dark"),
        Theme::Light => println!("light"),
    }
    Ok(())
}

fn prompt_if_missing(value: Option<String>, prompt: &str) -> Result<String, AppError> {
    match value {
        Some(value) => Ok(value),
        None => Input::<String>::new()
            .with_prompt(prompt)
            .interact_text()
            .map_err(AppError::internal),
    }
}
