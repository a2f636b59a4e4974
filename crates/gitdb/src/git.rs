//! Git subprocess access

use std::path::Path;
use std::process::Command;

use chrono::{DateTime, Utc};
use types::{Commit, IndexError};

/// Field separator in the pretty format (ASCII unit separator)
const FIELD_SEP: char = '\x1f';

/// hash, author name, author email, strict ISO author date, summary
const PRETTY_FORMAT: &str = "%H%x1f%an%x1f%ae%x1f%aI%x1f%s";

/// Run git with `args` in `repo`, returning trimmed stdout
fn run_git(repo: &Path, args: &[&str]) -> Result<String, IndexError> {
    let output = Command::new("git")
        .args(args)
        .current_dir(repo)
        .output()
        .map_err(|e| IndexError::GitSpawn(e.to_string()))?;

    if !output.status.success() {
        return Err(IndexError::GitFailed {
            command: args.join(" "),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// List commits reachable from HEAD, newest first
pub fn list_commits(repo: &Path, max: Option<usize>) -> Result<Vec<Commit>, IndexError> {
    let format_arg = format!("--pretty=format:{}", PRETTY_FORMAT);
    let max_arg = max.map(|max| format!("--max-count={}", max));

    let mut args = vec!["log", format_arg.as_str()];
    if let Some(ref max_arg) = max_arg {
        args.push(max_arg.as_str());
    }

    let stdout = run_git(repo, &args)?;
    stdout
        .lines()
        .filter(|line| !line.is_empty())
        .map(parse_record)
        .collect()
}

/// Parse one pretty-format record into a commit
fn parse_record(line: &str) -> Result<Commit, IndexError> {
    let parts: Vec<&str> = line.split(FIELD_SEP).collect();
    if parts.len() != 5 {
        return Err(IndexError::MalformedRecord(line.to_string()));
    }

    let authored_at = DateTime::parse_from_rfc3339(parts[3])
        .map_err(|e| IndexError::InvalidTimestamp {
            value: parts[3].to_string(),
            message: e.to_string(),
        })?
        .with_timezone(&Utc);

    Ok(Commit {
        hash: parts[0].to_string(),
        author_name: parts[1].to_string(),
        author_email: parts[2].to_string(),
        authored_at,
        summary: parts[4].to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(fields: [&str; 5]) -> String {
        fields.join("\x1f")
    }

    #[test]
    fn parses_a_full_record() {
        let line = record([
            "0123456789abcdef0123456789abcdef01234567",
            "Dev One",
            "dev@devkit.dev",
            "2024-05-01T12:30:00+02:00",
            "fix config loader merge order",
        ]);

        let commit = parse_record(&line).unwrap();

        assert_eq!(commit.short_hash(), "01234567");
        assert_eq!(commit.author_name, "Dev One");
        assert_eq!(commit.summary, "fix config loader merge order");
        // offset timestamps normalize to UTC
        assert_eq!(commit.authored_at.to_rfc3339(), "2024-05-01T10:30:00+00:00");
    }

    #[test]
    fn rejects_records_with_missing_fields() {
        let line = record(["abc", "Dev", "dev@devkit.dev", "2024-05-01T12:30:00Z", "ok"])
            .replace('\x1f', "|");

        let err = parse_record(&line).unwrap_err();
        assert!(matches!(err, IndexError::MalformedRecord(_)));
    }

    #[test]
    fn rejects_unparseable_timestamps() {
        let line = record(["abc", "Dev", "dev@devkit.dev", "yesterday", "ok"]);

        let err = parse_record(&line).unwrap_err();
        assert!(matches!(err, IndexError::InvalidTimestamp { .. }));
    }
}
