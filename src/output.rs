//! Output formatting module.

pub mod table;

use crate::asg::FindResult;
use crate::config::OutputFormat;
use crate::error::Result;

/// Render the result in the requested format.
pub fn render(result: &FindResult, format: OutputFormat, compact: bool) -> Result<String> {
    match format {
        OutputFormat::Json => render_json(result, compact),
        OutputFormat::Table => Ok(table::render_table(result)),
    }
}

/// Serialize as `{"as_groups": [...]}`.
pub fn render_json(result: &FindResult, compact: bool) -> Result<String> {
    let json = if compact {
        serde_json::to_string(result)?
    } else {
        serde_json::to_string_pretty(result)?
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asg::projector::project;
    use crate::asg::types::Group;

    fn result_with(names: &[&str]) -> FindResult {
        FindResult {
            as_groups: names
                .iter()
                .map(|n| {
                    project(&Group {
                        name: n.to_string(),
                        ..Default::default()
                    })
                })
                .collect(),
        }
    }

    #[test]
    fn test_render_json_empty() {
        let out = render(&FindResult::default(), OutputFormat::Json, true).unwrap();
        assert_eq!(out, r#"{"as_groups":[]}"#);
    }

    #[test]
    fn test_render_json_pretty_is_valid() {
        let out = render(&result_with(&["web", "api"]), OutputFormat::Json, false).unwrap();
        assert!(out.contains('\n'));

        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["as_groups"][0]["name"], "web");
        assert_eq!(value["as_groups"][1]["name"], "api");
    }

    #[test]
    fn test_render_table_dispatch() {
        let out = render(&result_with(&["web"]), OutputFormat::Table, false).unwrap();
        assert!(out.contains("NAME"));
        assert!(out.contains("web"));
    }
}
