pub mod expenses;
pub mod salesorders;

use std::path::PathBuf;

use books_core::models::Comment;
use books_core::parser::Listing;
use books_core::query::QueryParameters;
use books_core::response::BinaryFile;
use colored::Colorize;
use serde::Serialize;

use crate::prelude::{println, *};

/// Parse repeated `--filter key=value` flags, keeping their order
pub fn parse_filters(filters: &[String]) -> Result<QueryParameters> {
    let mut params = QueryParameters::new();

    for filter in filters {
        let (key, value) = filter
            .split_once('=')
            .ok_or_else(|| eyre!("Invalid filter {filter:?}, expected key=value"))?;

        if key.is_empty() {
            return Err(eyre!("Invalid filter {filter:?}, empty key"));
        }

        params.insert(key, value);
    }

    Ok(params)
}

/// Print a serializable value as pretty JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print the server's confirmation message
pub fn print_message(message: &str, json: bool) -> Result<()> {
    if json {
        print_json(&serde_json::json!({ "message": message }))
    } else {
        println!("{}", message.green());
        Ok(())
    }
}

/// Save a download and report where it went
pub async fn save_download(
    file: &BinaryFile,
    output: Option<PathBuf>,
    fallback: &str,
    json: bool,
) -> Result<()> {
    let path = books::files::save_file(file, output, fallback).await?;

    if json {
        print_json(&serde_json::json!({
            "path": path.display().to_string(),
            "bytes": file.len(),
            "content_type": file.content_type,
        }))
    } else {
        println!(
            "{} {} ({} bytes)",
            "Saved".green(),
            path.display().to_string().bold(),
            file.len()
        );
        Ok(())
    }
}

pub fn display_comments(comments: &Listing<Comment>) {
    if comments.is_empty() {
        println!("{}", "No comments".bright_black());
        return;
    }

    let mut table = new_table();
    table.add_row(prettytable::row![
        "Date".bold().cyan(),
        "By".bold().cyan(),
        "Comment".bold().cyan()
    ]);

    for comment in &comments.items {
        table.add_row(prettytable::row![
            text(&comment.date).bright_black().to_string(),
            text(&comment.commented_by).bright_magenta().to_string(),
            text(&comment.description)
        ]);
    }

    table.printstd();
}

/// Optional text for table cells
pub fn text(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("-")
}

/// Optional amount for table cells
pub fn amount(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}"),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filters_keeps_order() {
        // Arrange
        let flags = vec![
            "status=unbilled".to_string(),
            "sort_column=date".to_string(),
        ];

        // Act
        let params = parse_filters(&flags).unwrap();

        // Assert
        let keys: Vec<_> = params.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["status", "sort_column"]);
        assert_eq!(params.get("status").unwrap().to_string(), "unbilled");
    }

    #[test]
    fn test_parse_filters_value_may_contain_equals() {
        let flags = vec!["description_contains=a=b".to_string()];

        let params = parse_filters(&flags).unwrap();

        assert_eq!(
            params.get("description_contains").unwrap().to_string(),
            "a=b"
        );
    }

    #[test]
    fn test_parse_filters_rejects_malformed() {
        assert!(parse_filters(&["status".to_string()]).is_err());
        assert!(parse_filters(&["=x".to_string()]).is_err());
    }

    #[test]
    fn test_amount_formatting() {
        assert_eq!(amount(Some(12.5)), "12.50");
        assert_eq!(amount(None), "-");
    }
}
