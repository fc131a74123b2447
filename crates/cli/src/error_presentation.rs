use std::{io, path::PathBuf};

use anyhow::Context;
use miette::Report;

const GENERATION_CONTEXT: &str = "while generating the statement";
const FILE_READ_CONTEXT: &str = "while reading entity definition file";
const STDIN_READ_CONTEXT: &str = "while reading entity definition from stdin";
const YAML_CONTEXT: &str = "while parsing entity definition";

pub(crate) type CliResult<T> = std::result::Result<T, CliError>;

#[derive(Debug)]
pub(crate) enum CliError {
    ReadFile { path: PathBuf, source: io::Error },
    ReadStdin(io::Error),
    Yaml(serde_yaml::Error),
    Core(repoql_core::Error),
}

impl From<repoql_core::Error> for CliError {
    fn from(value: repoql_core::Error) -> Self {
        Self::Core(value)
    }
}

impl From<serde_yaml::Error> for CliError {
    fn from(value: serde_yaml::Error) -> Self {
        Self::Yaml(value)
    }
}

pub(crate) fn render_runtime_error(error: CliError) -> String {
    match error {
        CliError::ReadFile { path, source } => {
            let context = format!("{FILE_READ_CONTEXT} `{}`", path.display());
            let report = report_with_context(source, context);
            format!("[io] {report}")
        }
        CliError::ReadStdin(source) => {
            let report = report_with_context(source, STDIN_READ_CONTEXT);
            format!("[io] {report}")
        }
        CliError::Yaml(source) => {
            let report = report_with_context(source, YAML_CONTEXT);
            format!("[yaml] {report}")
        }
        CliError::Core(source) => {
            let category = core_category(&source);
            let report = report_with_context(source, GENERATION_CONTEXT);
            format!("[{category}] {report}")
        }
    }
}

fn report_with_context<E, C>(source: E, context: C) -> Report
where
    E: std::error::Error + Send + Sync + 'static,
    C: Into<String>,
{
    let context = context.into();
    let anyhow_error = std::result::Result::<(), E>::Err(source)
        .context(context)
        .expect_err("context wrapping must produce an error");
    miette::miette!("{anyhow_error:#}")
}

fn core_category(error: &repoql_core::Error) -> &'static str {
    match error {
        repoql_core::Error::Build(_) => "build",
        repoql_core::Error::Metadata(_) => "metadata",
    }
}

#[cfg(test)]
mod tests {
    use super::{CliError, render_runtime_error};
    use repoql_core::{BuildError, MetadataError};

    #[test]
    fn core_errors_are_categorized() {
        let build = CliError::Core(BuildError::EmptyClause { clause: "GROUP BY" }.into());
        assert!(render_runtime_error(build).starts_with("[build]"));

        let metadata = CliError::Core(
            MetadataError::UnknownOperation {
                value: "upsert".to_string(),
            }
            .into(),
        );
        let rendered = render_runtime_error(metadata);
        assert!(rendered.starts_with("[metadata]"));
        assert!(rendered.contains("upsert"));
    }

    #[test]
    fn io_errors_carry_the_path_context() {
        let error = CliError::ReadFile {
            path: "entities/person.yaml".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        let rendered = render_runtime_error(error);
        assert!(rendered.starts_with("[io]"));
        assert!(rendered.contains("entities/person.yaml"));
    }
}
