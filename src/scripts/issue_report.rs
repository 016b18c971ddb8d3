use std::io::{self, Write};

/// Issues reported by the offline debugging check, in display order
pub const KNOWN_ISSUES: [&str; 3] = [
    "Syntax error in backend/app.py on line 23",
    "Missing import in scripts/full-setup.sh",
    "Undefined variable in backend/index.js",
];

pub fn write_issue_report<W: Write>(out: &mut W, issues: &[&str]) -> io::Result<()> {
    writeln!(out, "🔍 Running AI Debugging...")?;

    if issues.is_empty() {
        writeln!(out, "✅ No issues found. Your project is clean!")?;
        return Ok(());
    }

    writeln!(out, "⚠️ Issues detected:")?;
    for issue in issues {
        writeln!(out, " - {}", issue)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(issues: &[&str]) -> String {
        let mut out = Vec::new();
        write_issue_report(&mut out, issues).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn lists_the_three_known_issues_in_order() {
        let text = render(&KNOWN_ISSUES);
        let issue_lines: Vec<&str> = text.lines().filter(|l| l.starts_with(" - ")).collect();
        assert_eq!(
            issue_lines,
            vec![
                " - Syntax error in backend/app.py on line 23",
                " - Missing import in scripts/full-setup.sh",
                " - Undefined variable in backend/index.js",
            ]
        );
        assert_eq!(text.lines().count(), 5);
        assert_eq!(text.lines().nth(1), Some("⚠️ Issues detected:"));
    }

    #[test]
    fn clean_project_message() {
        let text = render(&[]);
        assert_eq!(
            text,
            "🔍 Running AI Debugging...\n✅ No issues found. Your project is clean!\n"
        );
    }
}
