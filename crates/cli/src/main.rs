use std::{
    fs,
    io::Read,
    path::{Path, PathBuf},
    process,
};

use clap::{Parser, Subcommand};

use repoql_core::{
    CommandModeCache, ConditionGroup, Operation, RawCondition, StatementGenerator,
};
use repoql_testkit::load_entity_from_str;

mod error_presentation;

use error_presentation::{CliError, CliResult, render_runtime_error};

/// Generate SQL statements and command modes from entity definitions.
#[derive(Debug, Parser)]
#[command(name = "repoql", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate the statement for one operation.
    Generate {
        /// Entity definition YAML file, or `-` for stdin.
        #[arg(long)]
        entity: PathBuf,
        /// Operation: select, insert, update, delete, or merge.
        #[arg(long)]
        operation: String,
        /// Pre-rendered condition text appended after WHERE.
        #[arg(long = "where")]
        condition: Option<String>,
        /// Row limit for select statements.
        #[arg(long)]
        top: Option<usize>,
    },
    /// Print the resolved command mode for an entity.
    Mode {
        /// Entity definition YAML file, or `-` for stdin.
        #[arg(long)]
        entity: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    match run(cli.command) {
        Ok(output) => println!("{output}"),
        Err(error) => {
            eprintln!("{}", render_runtime_error(error));
            process::exit(1);
        }
    }
}

fn run(command: Command) -> CliResult<String> {
    match command {
        Command::Generate {
            entity,
            operation,
            condition,
            top,
        } => generate(&entity, &operation, condition.as_deref(), top),
        Command::Mode { entity } => mode(&entity),
    }
}

fn generate(
    entity_path: &Path,
    operation: &str,
    condition: Option<&str>,
    top: Option<usize>,
) -> CliResult<String> {
    let operation: Operation = operation.parse().map_err(repoql_core::Error::from)?;
    let (provider, entity) = load_provider(entity_path)?;
    let generator = StatementGenerator::new(&provider);
    let condition = condition.map(RawCondition::new);
    let condition_ref = condition
        .as_ref()
        .map(|condition| condition as &dyn ConditionGroup);

    if operation == Operation::Select {
        return Ok(generator.select(&entity, condition_ref, None, top)?);
    }
    let statement = generator.generate(&entity, operation, condition_ref)?;
    Ok(statement.sql)
}

fn mode(entity_path: &Path) -> CliResult<String> {
    let (provider, entity) = load_provider(entity_path)?;
    let cache = CommandModeCache::new();
    Ok(cache.resolve(&provider, &entity).as_str().to_string())
}

fn load_provider(
    path: &Path,
) -> CliResult<(repoql_core::MapProvider, std::sync::Arc<repoql_core::EntityDescriptor>)> {
    let yaml = read_input(path)?;
    let definition = load_entity_from_str(&yaml)?;
    Ok(definition.into_provider()?)
}

fn read_input(path: &Path) -> CliResult<String> {
    if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .map_err(CliError::ReadStdin)?;
        return Ok(buffer);
    }
    fs::read_to_string(path).map_err(|source| CliError::ReadFile {
        path: path.to_path_buf(),
        source,
    })
}
