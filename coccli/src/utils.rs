//! Output helpers shared by the subcommands.

use std::{
    fmt::Display,
    io::{Write, stdout},
};

use tabwriter::TabWriter;

/// Renders an optional field, `-` when absent.
pub fn show<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_owned(), |value| value.to_string())
}

/// Prints tab separated `rows` under `header` as aligned columns.
pub fn print_table<I>(header: &str, rows: I) -> anyhow::Result<()>
where
    I: IntoIterator<Item = String>,
{
    write_table(stdout(), header, rows)
}

/// Writes tab separated `rows` under `header` to `out`, aligned.
pub fn write_table<W, I>(out: W, header: &str, rows: I) -> anyhow::Result<()>
where
    W: Write,
    I: IntoIterator<Item = String>,
{
    let mut writer = TabWriter::new(out);
    writeln!(&mut writer, "{header}")?;
    for row in rows {
        writeln!(&mut writer, "{row}")?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show() {
        assert_eq!(show(Some(12)), "12");
        assert_eq!(show(Some("#2PP")), "#2PP");
        assert_eq!(show::<i64>(None), "-");
    }

    #[test]
    fn test_table_columns_align() {
        let mut out = Vec::new();
        write_table(
            &mut out,
            "tag\tname\tlevel",
            ["#2PP\tLegends\t20".to_owned(), "#ABCDEF\tx\t3".to_owned()],
        )
        .unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(!text.contains('\t'));

        let name_col = lines[0].find("name").unwrap();
        assert_eq!(lines[1].find("Legends"), Some(name_col));
        assert_eq!(lines[2].find('x'), Some(name_col));
        assert!(name_col > "#ABCDEF".len());

        let level_col = lines[0].find("level").unwrap();
        assert_eq!(lines[1].find("20"), Some(level_col));
        assert_eq!(lines[2].rfind('3'), Some(level_col));
    }
}
