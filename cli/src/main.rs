mod description;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use description::StatementDescription;
use sqlstmt::BuilderConfig;
use std::fs;
use std::io::Read;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "sqlstmt-cli")]
#[command(about = "Render parameterized SQL from a JSON statement description")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the SQL on the first line and the JSON argument array on the second
    Render {
        /// Statement description file, `-` reads from stdin
        #[arg(short, long)]
        input: String,

        /// Builder config file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Enable debug logging
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    match args.command {
        Command::Render {
            input,
            config,
            verbose,
        } => {
            init_tracing(verbose);
            let (sql, binds) = render(&input, config.as_ref())?;
            println!("{}", sql);
            println!("{}", binds);
        }
    }
    Ok(())
}

// 日志输出到 stderr，stdout 只保留渲染结果
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read statement description from stdin")?;
        Ok(buf)
    } else {
        fs::read_to_string(input).with_context(|| format!("Failed to read input file: {}", input))
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<BuilderConfig> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            Ok(BuilderConfig::from_json_str(&text)?)
        }
        None => Ok(BuilderConfig::default()),
    }
}

fn render(input: &str, config: Option<&PathBuf>) -> Result<(String, String)> {
    let config = load_config(config)?;
    let description = StatementDescription::from_json_str(&read_input(input)?)?;
    tracing::debug!(
        kind = %description.kind,
        table = %description.table,
        clauses = description.clauses.len(),
        "rendering statement"
    );
    let (sql, args) = description.build(config)?.build();
    let binds = serde_json::to_string(&args).context("Failed to serialize arguments")?;
    Ok((sql, binds))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_render_args() {
        let args = Args::try_parse_from([
            "sqlstmt-cli",
            "render",
            "--input",
            "-",
            "--config",
            "pg.json",
            "--verbose",
        ])
        .unwrap();
        match args.command {
            Command::Render {
                input,
                config,
                verbose,
            } => {
                assert_eq!(input, "-");
                assert_eq!(config, Some(PathBuf::from("pg.json")));
                assert!(verbose);
            }
        }
    }

    #[test]
    fn test_input_is_required() {
        assert!(Args::try_parse_from(["sqlstmt-cli", "render"]).is_err());
    }

    #[test]
    fn test_render_from_file() {
        let dir = std::env::temp_dir().join(format!("sqlstmt-cli-test-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let input = dir.join("stmt.json");
        let config = dir.join("config.json");
        fs::write(
            &input,
            r#"{"kind":"update","table":"skill","clauses":[
                {"op":"set","field":"desc","value":"x"},
                {"op":"eq","field":"id","value":7}
            ]}"#,
        )
        .unwrap();
        fs::write(&config, r#"{"placeholder":{"numbered":"$"}}"#).unwrap();

        let (sql, binds) = render(input.to_str().unwrap(), Some(&config)).unwrap();
        assert_eq!(sql, "UPDATE `skill` SET `desc`=$1 WHERE `id`=$2;");
        assert_eq!(binds, r#"["x",7]"#);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_input_file() {
        let err = render("/nonexistent/stmt.json", None).unwrap_err();
        assert!(err.to_string().contains("Failed to read input file"));
    }
}
