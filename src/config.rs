//! CLI configuration and argument parsing.

use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::asg::types::SearchTags;
use crate::error::{FindAsgError, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const COMMIT: &str = env!("BUILD_COMMIT");
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Legacy region variable honoured when neither --region nor AWS_REGION is set.
const LEGACY_REGION_ENV: &str = "EC2_REGION";

/// Legacy endpoint variables, in lookup order, used when no endpoint URL is set.
const LEGACY_ENDPOINT_ENVS: &[&str] = &["AWS_URL", "EC2_URL"];

/// Find EC2 Auto Scaling Groups by tags.
///
/// Lists every Auto Scaling Group in a region, keeps those carrying all of
/// the given tags, and prints a summary of each including instance health
/// and lifecycle counts.
#[derive(Parser, Debug, Clone)]
#[command(name = "ec2-find-asg")]
#[command(about = "Find EC2 Auto Scaling Groups by tags")]
#[command(version = const_format::formatcp!(
    "{} (commit: {}, build date: {})",
    VERSION, COMMIT, BUILD_DATE
))]
pub struct Args {
    /// AWS region (falls back to EC2_REGION, then the SDK default chain)
    #[arg(short, long, env = "AWS_REGION")]
    pub region: Option<String>,

    /// AWS profile to use
    #[arg(short, long, env = "AWS_PROFILE")]
    pub profile: Option<String>,

    /// Custom Auto Scaling endpoint URL (falls back to AWS_URL, then EC2_URL)
    #[arg(long, env = "AWS_ENDPOINT_URL")]
    pub endpoint_url: Option<String>,

    /// Tag the group must carry (format: KEY=VALUE, repeatable)
    #[arg(short = 't', long = "tag", value_name = "KEY=VALUE")]
    pub tag: Vec<String>,

    /// Tags as a JSON object (e.g. '{"env": "prod"}'; '{}' matches every group)
    #[arg(long, value_name = "JSON")]
    pub tags: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub output: OutputFormat,

    /// Print JSON on a single line
    #[arg(long, default_value = "false")]
    pub compact: bool,

    /// Give up on the AWS request after this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", env = "FIND_ASG_LOG_LEVEL")]
    pub log_level: String,
}

/// Result output format.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Table,
}

/// Application configuration derived from CLI args.
#[derive(Debug, Clone)]
pub struct Config {
    pub region: Option<String>,
    pub profile: Option<String>,
    pub endpoint_url: Option<String>,
    pub search_tags: SearchTags,
    pub output: OutputFormat,
    pub compact: bool,
    pub timeout: Option<Duration>,
}

impl Config {
    /// Create config from CLI arguments. Fails when no search tags were given.
    pub fn from_args(args: Args) -> Result<Self> {
        let region = first_set([args.region, std::env::var(LEGACY_REGION_ENV).ok()]);
        let endpoint_url = first_set(
            std::iter::once(args.endpoint_url)
                .chain(LEGACY_ENDPOINT_ENVS.iter().map(|var| std::env::var(var).ok())),
        );
        let search_tags = parse_search_tags(&args.tag, args.tags.as_deref())?;

        let timeout = match args.timeout {
            Some(0) => return Err(FindAsgError::config("--timeout must be greater than 0")),
            Some(secs) => Some(Duration::from_secs(secs)),
            None => None,
        };

        Ok(Self {
            region,
            profile: args.profile,
            endpoint_url,
            search_tags,
            output: args.output,
            compact: args.compact,
            timeout,
        })
    }

    /// Get region display name for logs.
    pub fn region_display(&self) -> &str {
        self.region.as_deref().unwrap_or("(sdk default)")
    }
}

/// First non-blank value, trimmed. Explicit flags come first, legacy env vars after.
fn first_set(candidates: impl IntoIterator<Item = Option<String>>) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .map(|v| v.trim().to_string())
        .find(|v| !v.is_empty())
}

/// Combine `--tag` pairs and the `--tags` JSON object into one search set.
fn parse_search_tags(pairs: &[String], json: Option<&str>) -> Result<SearchTags> {
    if pairs.is_empty() && json.is_none() {
        return Err(FindAsgError::config(
            "no search tags given; pass --tag KEY=VALUE or --tags '{}' to match every group",
        ));
    }

    let mut tags = SearchTags::from_pairs(pairs)?;
    if let Some(raw) = json {
        tags.merge(SearchTags::from_json(raw)?)?;
    }

    Ok(tags)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_args(tag: Vec<&str>, tags: Option<&str>) -> Args {
        Args {
            region: Some("us-west-1".to_string()),
            profile: None,
            endpoint_url: None,
            tag: tag.iter().map(|s| s.to_string()).collect(),
            tags: tags.map(String::from),
            output: OutputFormat::Json,
            compact: false,
            timeout: None,
            log_level: "warn".to_string(),
        }
    }

    #[test]
    fn test_missing_tags_is_configuration_error() {
        let err = Config::from_args(create_test_args(vec![], None)).unwrap_err();
        assert!(matches!(err, FindAsgError::Configuration(_)));
        assert!(err.to_string().contains("no search tags given"));
    }

    #[test]
    fn test_empty_json_tags_allowed() {
        let config = Config::from_args(create_test_args(vec![], Some("{}"))).unwrap();
        assert!(config.search_tags.is_empty());
    }

    #[test]
    fn test_tag_pairs_and_json_are_merged() {
        let config = Config::from_args(create_test_args(
            vec!["env=prod"],
            Some(r#"{"tier": "web"}"#),
        ))
        .unwrap();

        let tags: Vec<(&str, &str)> = config.search_tags.iter().collect();
        assert_eq!(tags, vec![("env", "prod"), ("tier", "web")]);
    }

    #[test]
    fn test_invalid_tag_pair_rejected() {
        let err = Config::from_args(create_test_args(vec!["env"], None)).unwrap_err();
        assert!(err.to_string().contains("expected KEY=VALUE"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut args = create_test_args(vec!["env=prod"], None);
        args.timeout = Some(0);
        assert!(Config::from_args(args).is_err());
    }

    #[test]
    fn test_timeout_converted() {
        let mut args = create_test_args(vec!["env=prod"], None);
        args.timeout = Some(15);
        let config = Config::from_args(args).unwrap();
        assert_eq!(config.timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_first_set_precedence() {
        assert_eq!(
            first_set([Some("eu-west-1".into()), Some("us-east-1".into())]),
            Some("eu-west-1".to_string())
        );
        assert_eq!(
            first_set([None, Some("us-east-1".into())]),
            Some("us-east-1".to_string())
        );
        assert_eq!(first_set([None, Some("  ".into())]), None);
        assert_eq!(first_set([None, None]), None);
    }

    #[test]
    fn test_first_set_skips_blank_explicit_value() {
        assert_eq!(
            first_set([
                Some(String::new()),
                None,
                Some(" http://localhost:4566 ".into()),
            ]),
            Some("http://localhost:4566".to_string())
        );
    }

    #[test]
    fn test_explicit_endpoint_wins_over_legacy_env() {
        let mut args = create_test_args(vec!["env=prod"], None);
        args.endpoint_url = Some("http://localhost:4566".to_string());

        let config = Config::from_args(args).unwrap();

        assert_eq!(config.endpoint_url.as_deref(), Some("http://localhost:4566"));
    }

    #[test]
    fn test_cli_parses_repeated_tags() {
        let args = Args::try_parse_from([
            "ec2-find-asg",
            "--region",
            "us-west-1",
            "-t",
            "env=prod",
            "--tag",
            "tier=web",
            "-o",
            "table",
        ])
        .unwrap();

        assert_eq!(args.tag, vec!["env=prod", "tier=web"]);
        assert_eq!(args.output, OutputFormat::Table);
        assert_eq!(args.region.as_deref(), Some("us-west-1"));
    }
}
