//! Text descriptor format: one `<pid> <arrival> <burst>` triple per line,
//! whitespace separated. Blank lines are skipped.

use std::fs;
use std::path::Path;

use crate::error::InputError;
use crate::sim::Job;

pub fn parse_jobs(text: &str) -> Result<Vec<Job>, InputError> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| parse_line(line).ok_or_else(|| malformed(idx + 1, line)))
        .collect()
}

pub fn read_jobs(path: impl AsRef<Path>) -> Result<Vec<Job>, InputError> {
    let text = fs::read_to_string(path)?;
    parse_jobs(&text)
}

fn parse_line(line: &str) -> Option<Job> {
    let mut parts = line.split_whitespace();
    let id = parts.next()?.parse().ok()?;
    let arrival = parts.next()?.parse().ok()?;
    let burst = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Job::new(id, arrival, burst))
}

fn malformed(line: usize, content: &str) -> InputError {
    InputError::Malformed {
        line,
        content: content.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_triples_in_order() {
        let jobs = parse_jobs("1 0 10\n2 2 2\n\n3  4\t1\n").unwrap();
        assert_eq!(
            jobs,
            vec![Job::new(1, 0, 10), Job::new(2, 2, 2), Job::new(3, 4, 1)]
        );
    }

    #[test]
    fn keeps_negative_values_for_validation() {
        let jobs = parse_jobs("5 -1 0").unwrap();
        assert_eq!(jobs, vec![Job::new(5, -1, 0)]);
    }

    #[test]
    fn reports_malformed_line_number() {
        let err = parse_jobs("1 0 3\n2 x 4\n").unwrap_err();
        match err {
            InputError::Malformed { line, content } => {
                assert_eq!(line, 2);
                assert_eq!(content, "2 x 4");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_extra_fields() {
        assert!(parse_jobs("1 0 3 9").is_err());
    }
}
