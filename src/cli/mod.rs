use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::application::EmployeeService;
use crate::domain::{EmployeeDraft, EmployeeId};
use crate::http::{self, DEFAULT_CORS_ORIGIN};
use crate::io::ImportOptions;

/// Staffbook - Employee Directory
#[derive(Parser)]
#[command(name = "staffbook")]
#[command(about = "An employee directory backed by SQLite, served over a REST API")]
#[command(version)]
pub struct Cli {
    /// Database file path
    #[arg(
        short,
        long,
        global = true,
        env = "STAFFBOOK_DATABASE",
        default_value = "staffbook.db"
    )]
    pub database: String,

    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new database
    Init,

    /// Serve the REST API
    Serve {
        /// Address to listen on
        #[arg(long, env = "STAFFBOOK_BIND", default_value = "127.0.0.1:8080")]
        bind: String,

        /// Origin allowed to call the API from a browser
        #[arg(long, env = "STAFFBOOK_CORS_ORIGIN", default_value = DEFAULT_CORS_ORIGIN)]
        cors_origin: String,
    },

    /// Employee management commands
    #[command(subcommand)]
    Employee(EmployeeCommands),

    /// Export the directory to CSV or JSON
    Export {
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,

        /// Format: csv, json
        #[arg(short, long, default_value = "csv")]
        format: String,
    },

    /// Import employees from CSV or a JSON snapshot
    Import {
        /// Input file (stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,

        /// Format: csv, json
        #[arg(short, long, default_value = "csv")]
        format: String,

        /// Preview without importing
        #[arg(long)]
        dry_run: bool,

        /// Skip rows whose email is already taken
        #[arg(long)]
        skip_duplicates: bool,
    },
}

#[derive(Subcommand)]
pub enum EmployeeCommands {
    /// List all employees
    List,

    /// Show a single employee
    Show {
        /// Employee ID
        id: EmployeeId,
    },

    /// Add a new employee
    Add {
        #[arg(long)]
        first_name: String,

        #[arg(long)]
        last_name: String,

        /// Email address (must be unique)
        #[arg(long)]
        email: String,

        #[arg(long)]
        department: String,
    },

    /// Replace an employee's details
    Update {
        /// Employee ID
        id: EmployeeId,

        #[arg(long)]
        first_name: String,

        #[arg(long)]
        last_name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        department: String,
    },

    /// Delete an employee
    Delete {
        /// Employee ID
        id: EmployeeId,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Init => {
                EmployeeService::init(&self.database).await?;
                println!("Database initialized: {}", self.database);
            }

            Commands::Serve { bind, cors_origin } => {
                let service = EmployeeService::init(&self.database).await?;
                http::serve(&bind, service, &cors_origin).await?;
            }

            Commands::Employee(employee_cmd) => {
                let service = EmployeeService::connect(&self.database).await?;
                run_employee_command(&service, employee_cmd).await?;
            }

            Commands::Export { output, format } => {
                let service = EmployeeService::connect(&self.database).await?;
                run_export_command(&service, output.as_deref(), &format).await?;
            }

            Commands::Import {
                input,
                format,
                dry_run,
                skip_duplicates,
            } => {
                let service = EmployeeService::connect(&self.database).await?;
                let options = ImportOptions {
                    dry_run,
                    skip_duplicates,
                };
                run_import_command(&service, input.as_deref(), &format, options).await?;
            }
        }

        Ok(())
    }
}

async fn run_employee_command(service: &EmployeeService, cmd: EmployeeCommands) -> Result<()> {
    match cmd {
        EmployeeCommands::List => {
            let employees = service.list_employees().await?;
            if employees.is_empty() {
                println!("No employees found.");
            } else {
                println!(
                    "{:<6} {:<24} {:<32} {:<16}",
                    "ID", "NAME", "EMAIL", "DEPARTMENT"
                );
                println!("{}", "-".repeat(80));
                for employee in employees {
                    println!(
                        "{:<6} {:<24} {:<32} {:<16}",
                        employee.id,
                        truncate(&employee.full_name(), 24),
                        truncate(&employee.email, 32),
                        truncate(&employee.department, 16)
                    );
                }
            }
        }

        EmployeeCommands::Show { id } => {
            let employee = service.get_employee(id).await?;
            println!("Employee: {}", employee.full_name());
            println!("  ID:          {}", employee.id);
            println!("  Email:       {}", employee.email);
            println!("  Department:  {}", employee.department);
        }

        EmployeeCommands::Add {
            first_name,
            last_name,
            email,
            department,
        } => {
            let employee = service
                .create_employee(EmployeeDraft::new(first_name, last_name, email, department))
                .await?;
            println!(
                "Created employee: {} <{}> ({})",
                employee.full_name(),
                employee.email,
                employee.id
            );
        }

        EmployeeCommands::Update {
            id,
            first_name,
            last_name,
            email,
            department,
        } => {
            let employee = service
                .update_employee(
                    EmployeeDraft::new(first_name, last_name, email, department),
                    id,
                )
                .await?;
            println!(
                "Updated employee: {} <{}> ({})",
                employee.full_name(),
                employee.email,
                employee.id
            );
        }

        EmployeeCommands::Delete { id } => {
            service.delete_employee(id).await?;
            println!("Deleted employee: {}", id);
        }
    }
    Ok(())
}

async fn run_export_command(
    service: &EmployeeService,
    output: Option<&str>,
    format: &str,
) -> Result<()> {
    use crate::io::Exporter;
    use std::fs::File;
    use std::io::{Write, stdout};

    let exporter = Exporter::new(service);

    let writer: Box<dyn Write> = match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path))?;
            Box::new(file)
        }
        None => Box::new(stdout()),
    };

    let count = match format.to_lowercase().as_str() {
        "csv" => exporter.export_employees_csv(writer).await?,
        "json" => exporter.export_json(writer).await?.employees.len(),
        other => anyhow::bail!("Unknown export format '{}'. Valid formats: csv, json", other),
    };

    if output.is_some() {
        eprintln!("Exported {} employee(s)", count);
    }
    Ok(())
}

async fn run_import_command(
    service: &EmployeeService,
    input: Option<&str>,
    format: &str,
    options: ImportOptions,
) -> Result<()> {
    use crate::io::Importer;
    use std::fs::File;
    use std::io::{Read, stdin};

    let reader: Box<dyn Read> = match input {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("Failed to open input file: {}", path))?;
            Box::new(file)
        }
        None => Box::new(stdin()),
    };

    let dry_run = options.dry_run;
    let importer = Importer::new(service);
    let result = match format.to_lowercase().as_str() {
        "csv" => importer.import_employees_csv(reader, options).await?,
        "json" => importer.import_json(reader, options).await?,
        other => anyhow::bail!("Unknown import format '{}'. Valid formats: csv, json", other),
    };

    if dry_run {
        println!("Dry run: {} employee(s) would be imported", result.imported);
    } else {
        println!("Imported {} employee(s)", result.imported);
    }
    if result.skipped > 0 {
        println!("Skipped {} duplicate(s)", result.skipped);
    }
    if !result.errors.is_empty() {
        println!("{} error(s):", result.errors.len());
        for error in &result.errors {
            println!("  line {}: {}", error.line, error.error);
        }
    }

    Ok(())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
