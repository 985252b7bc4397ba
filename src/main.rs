use std::sync::Arc;

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use coursewalk::api::{CourseApiClient, CourseSource};
use coursewalk::{App, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "coursewalk")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base URL of the course API (overrides config and environment)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Bearer token for the course API
    #[arg(long, global = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available courses
    List,
    /// Open a course in the viewer
    Open {
        /// Identifier of the course to open
        course_id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "coursewalk=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(url) = cli.api_url {
        config.api_base_url = url;
    }
    if cli.token.is_some() {
        config.api_token = cli.token;
    }

    let client = CourseApiClient::new(config.api_base_url.clone(), config.request_timeout())?
        .with_token(config.api_token.clone());

    match cli.command {
        Commands::List => {
            let courses = client.list_courses().await.map_err(|e| {
                anyhow!("Failed to load course catalog: {}", e.user_message())
            })?;
            if courses.is_empty() {
                println!("No courses available.");
            }
            for course in courses {
                let lessons = course
                    .lesson_count
                    .map(|n| format!(" ({} lessons)", n))
                    .unwrap_or_default();
                println!("{}\t{}{}", course.id, course.title, lessons);
            }
        }
        Commands::Open { course_id } => {
            let course = client.fetch_course(&course_id).await.map_err(|e| {
                anyhow!("Failed to load course {}: {}", course_id, e.user_message())
            })?;
            tracing::info!("Opened course {} with {} lessons", course.id, course.lesson_count());

            let mut app = App::new(course, Arc::new(client), config.auto_advance_delay())?;
            app.run().await?;
        }
    }

    Ok(())
}
